//! Rewrites of single constructs that need no context beyond temps: template literals, object
//! spread and rest, and `export * as`.

use super::build::array;
use super::build::body_stmts;
use super::build::call_arg;
use super::build::call_with_this;
use super::build::pat_to_expr;
use super::build::take_expr;
use super::optional_chain::is_chain_link;
use super::optional_chain::ChainMode;
use super::Lowerer;
use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::class_or_object::ClassOrObjVal;
use crate::ast::class_or_object::ObjMember;
use crate::ast::class_or_object::ObjMemberType;
use crate::ast::expr::lit::LitObjExpr;
use crate::ast::expr::lit::LitTemplatePart;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::pat::ObjPat;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::Expr;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::import_export::ExportName;
use crate::ast::import_export::ExportNames;
use crate::ast::import_export::ImportNames;
use crate::ast::import_export::ModuleExportImportName;
use crate::ast::node::Node;
use crate::ast::stmt::decl::PatDecl;
use crate::ast::stmt::decl::VarDecl;
use crate::ast::stmt::decl::VarDeclMode;
use crate::ast::stmt::decl::VarDeclarator;
use crate::ast::stmt::ExportListStmt;
use crate::ast::stmt::ImportStmt;
use crate::ast::stmt::Stmt;
use crate::emit::escape::is_identifier_name;
use crate::loc::Loc;
use crate::operator::OperatorName;
use crate::parse::expr::lit::cook_literal;
use crate::target::Feature;
use crate::temp::prologue_end;
use crate::token::TT;
use tracing::debug;

fn normalize_line_endings(raw: &str) -> String {
  raw.replace("\r\n", "\n").replace('\r', "\n")
}

fn obj_literal(loc: Loc, members: Vec<Node<ObjMember>>) -> Node<Expr> {
  Node::new(loc, LitObjExpr { members }).wrap(Expr::from)
}

/// Whether `pat` has an object rest element anywhere.
pub(super) fn has_obj_rest(pat: &Pat) -> bool {
  match pat {
    Pat::Obj(obj) => obj.stx.rest.is_some() || has_nested_obj_rest(pat),
    Pat::Arr(_) => has_nested_obj_rest(pat),
    Pat::Id(_) | Pat::AssignTarget(_) => false,
  }
}

/// Whether `pat` has an object rest element below its root.
fn has_nested_obj_rest(pat: &Pat) -> bool {
  match pat {
    Pat::Obj(obj) => {
      obj.stx.properties.iter().any(|p| has_obj_rest(&p.stx.target.stx))
        || obj.stx.rest.as_ref().is_some_and(|r| has_obj_rest(&r.stx))
    }
    Pat::Arr(arr) => {
      arr
        .stx
        .elements
        .iter()
        .flatten()
        .any(|e| has_obj_rest(&e.target.stx))
        || arr.stx.rest.as_ref().is_some_and(|r| has_obj_rest(&r.stx))
    }
    Pat::Id(_) | Pat::AssignTarget(_) => false,
  }
}

/// Whether an object rest in `pat` can be split out: it must be on the root pattern only.
fn is_splittable_obj_rest(pat: &Pat) -> bool {
  matches!(pat, Pat::Obj(obj) if obj.stx.rest.is_some()) && !has_nested_obj_rest(pat)
}

impl Lowerer<'_> {
  pub(super) fn object_literal(&mut self, e: &mut Node<Expr>) {
    let Expr::LitObj(obj) = e.stx.as_mut() else {
      unreachable!("object literal");
    };
    for member in obj.stx.members.iter_mut() {
      let loc = member.loc;
      match &mut member.stx.typ {
        ObjMemberType::Valued { key, val } => {
          self.key(key);
          match val {
            ClassOrObjVal::Getter(g) => self.func(&mut g.stx.func),
            ClassOrObjVal::Setter(s) => self.func(&mut s.stx.func),
            ClassOrObjVal::Method(m) => self.func(&mut m.stx.func),
            ClassOrObjVal::Prop(Some(value)) => self.expr(value),
            ClassOrObjVal::Prop(None)
            | ClassOrObjVal::Accessor(_)
            | ClassOrObjVal::StaticBlock(_) => {}
          };
        }
        ObjMemberType::Shorthand { id } => {
          if id.stx.name == "arguments" {
            if let Some(alias) = self.resolve_arguments() {
              member.stx.typ = ObjMemberType::Valued {
                key: ClassOrObjKey::direct(loc, "arguments", TT::Identifier),
                val: ClassOrObjVal::Prop(Some(Expr::id(loc, alias))),
              };
            };
          };
        }
        ObjMemberType::Rest { val } => self.expr(val),
      };
    }
    let has_spread = obj
      .stx
      .members
      .iter()
      .any(|m| matches!(m.stx.typ, ObjMemberType::Rest { .. }));
    if has_spread && !self.supports(Feature::ObjectRestSpread) {
      self.object_spread(e);
    };
  }

  /// `{a, ...b, c}` becomes `__spreadProps(__spreadValues({ a }, b), { c })`.
  fn object_spread(&mut self, e: &mut Node<Expr>) {
    let loc = e.loc;
    let Expr::LitObj(obj) = *take_expr(e).stx else {
      unreachable!("object literal");
    };
    debug!("lowering object spread");
    let mut result: Option<Node<Expr>> = None;
    let mut props = Vec::new();
    for member in obj.stx.members {
      let value = match member.stx.typ {
        ObjMemberType::Rest { val } => val,
        typ => {
          props.push(Node::new(member.loc, ObjMember { typ }));
          continue;
        }
      };
      if !props.is_empty() || result.is_none() {
        let batch = obj_literal(loc, std::mem::take(&mut props));
        result = Some(match result {
          None => batch,
          Some(prev) => Expr::helper(loc, "__spreadProps", vec![prev, batch]),
        });
      };
      let prev = result.take().unwrap_or_else(|| unreachable!("spread base"));
      result = Some(Expr::helper(loc, "__spreadValues", vec![prev, value]));
    }
    let mut result = result.unwrap_or_else(|| unreachable!("object has a spread"));
    if !props.is_empty() {
      result = Expr::helper(loc, "__spreadProps", vec![result, obj_literal(loc, props)]);
    };
    *e = result;
  }

  /// `` `a${b}c` `` becomes `"a" + b + "c"`.
  pub(super) fn template_to_concat(&mut self, e: &mut Node<Expr>) {
    let loc = e.loc;
    let Expr::LitTemplate(template) = *take_expr(e).stx else {
      unreachable!("template literal");
    };
    debug!("lowering template literal");
    let mut result: Option<Node<Expr>> = None;
    for (i, part) in template.stx.parts.into_iter().enumerate() {
      let operand = match part {
        LitTemplatePart::String(raw) => {
          if raw.is_empty() && i > 0 {
            continue;
          };
          let raw = normalize_line_endings(&raw);
          Expr::str(loc, cook_literal(&raw).unwrap_or(raw))
        }
        LitTemplatePart::Substitution(sub) => sub,
      };
      result = Some(match result {
        None => operand,
        Some(left) => Expr::binary(loc, OperatorName::Addition, left, operand),
      });
    }
    *e = result.unwrap_or_else(|| Expr::str(loc, ""));
  }

  pub(super) fn tagged_template(&mut self, e: &mut Node<Expr>) {
    let loc = e.loc;
    let Expr::TaggedTemplate(tagged) = e.stx.as_mut() else {
      unreachable!("tagged template");
    };
    let tag = &mut tagged.stx.function;
    let this_arg = if is_chain_link(tag) {
      self.optional_chain(tag, ChainMode::CallTarget)
    } else if matches!(tag.stx.as_ref(), Expr::Member(m) if m.stx.is_private() && self.private_info(&m.stx.right).is_some())
    {
      let (read, this_arg) = self.private_callee(take_expr(tag));
      *tag = read;
      Some(this_arg)
    } else {
      self.expr(tag);
      None
    };
    for part in tagged.stx.parts.iter_mut() {
      if let LitTemplatePart::Substitution(sub) = part {
        self.expr(sub);
      };
    }
    if this_arg.is_none() && self.supports(Feature::TemplateLiteral) {
      return;
    };

    debug!("lowering tagged template");
    let function = take_expr(&mut tagged.stx.function);
    let mut cooked = Vec::new();
    let mut raws = Vec::new();
    let mut subs = Vec::new();
    for part in std::mem::take(&mut tagged.stx.parts) {
      match part {
        LitTemplatePart::String(raw) => {
          let raw = normalize_line_endings(&raw);
          cooked.push(match cook_literal(&raw) {
            Some(value) => Expr::str(loc, value),
            None => Expr::undefined(loc),
          });
          raws.push(raw);
        }
        LitTemplatePart::Substitution(sub) => subs.push(sub),
      }
    }
    let same_raw = cooked
      .iter()
      .zip(raws.iter())
      .all(|(c, r)| matches!(c.stx.as_ref(), Expr::LitStr(s) if &s.stx.value == r));
    let mut template_args = vec![array(loc, cooked)];
    if !same_raw {
      template_args.push(array(
        loc,
        raws.into_iter().map(|r| Expr::str(loc, r)).collect(),
      ));
    };
    // The template object is created once per call site, so it lives at module scope.
    let cache = self.temps.alloc_in(0, self.scopes, None, None, true);
    let strings = Expr::binary(
      loc,
      OperatorName::LogicalOr,
      Expr::id(loc, &cache),
      Expr::assign(
        loc,
        Expr::id(loc, &cache),
        Expr::helper(loc, "__template", template_args),
      ),
    );
    let mut arguments = vec![strings];
    arguments.extend(subs);
    *e = match this_arg {
      Some(this_arg) => call_with_this(
        loc,
        function,
        this_arg,
        arguments.into_iter().map(call_arg).collect(),
      ),
      None => Expr::call(loc, function, arguments),
    };
  }

  /// `export * as ns from "m"` becomes `import * as ns from "m"; export { ns };`.
  pub(super) fn export_list(&mut self, list: Node<ExportListStmt>, out: &mut Vec<Node<Stmt>>) {
    let loc = list.loc;
    let (alias, from) = match (&list.stx.names, &list.stx.from) {
      (ExportNames::All(Some(alias)), Some(from)) if !self.supports(Feature::ExportStarAs) => {
        (alias.stx.name.clone(), from.clone())
      }
      _ => {
        out.push(list.wrap(Stmt::from));
        return;
      }
    };
    debug!("lowering export star as");
    let local = if is_identifier_name(&alias) && alias != "default" {
      self.temps.alloc_named_bound(self.scopes, &alias)
    } else {
      self.temps.alloc_bound(self.scopes)
    };
    out.push(
      Node::new(loc, ImportStmt {
        default: None,
        names: Some(ImportNames::All(PatDecl::new(Pat::id(loc, &local)))),
        module: from,
      })
      .wrap(Stmt::from),
    );
    out.push(
      Node::new(loc, ExportListStmt {
        names: ExportNames::Specific(vec![Node::new(loc, ExportName {
          exportable: ModuleExportImportName::Ident(local),
          alias: Node::new(loc, IdPat { name: alias }),
        })]),
        from: None,
      })
      .wrap(Stmt::from),
    );
  }

  /// The key list passed to `__objRest`. Computed keys that cannot be repeated are evaluated into
  /// temps here, in the pattern.
  fn rest_keys(&mut self, pat: &mut ObjPat) -> Vec<Node<Expr>> {
    let mut keys = Vec::new();
    for prop in pat.properties.iter_mut() {
      let loc = prop.loc;
      match &mut prop.stx.key {
        ClassOrObjKey::Direct(direct) => keys.push(Expr::str(loc, direct.stx.key.clone())),
        ClassOrObjKey::Computed(key) => match key.stx.as_ref() {
          Expr::LitStr(_) | Expr::LitNum(_) => keys.push(key.clone()),
          _ => {
            let (first, again) = self.capture(take_expr(key));
            *key = first;
            keys.push(Expr::helper(loc, "__restKey", vec![again]));
          }
        },
      }
    }
    keys
  }

  /// Splits `{ a, ...rest } = source` into `{ a } = source` and `rest = __objRest(source, ["a"])`.
  /// `source` must be safe to evaluate twice.
  fn split_obj_rest(&mut self, loc: Loc, mut pat: ObjPat, source: &Node<Expr>) -> Vec<(Node<Pat>, Node<Expr>)> {
    debug!("lowering object rest");
    let rest = pat
      .rest
      .take()
      .unwrap_or_else(|| unreachable!("object rest"));
    let keys = self.rest_keys(&mut pat);
    let mut parts = Vec::new();
    if !pat.properties.is_empty() {
      parts.push((Node::new(loc, pat).wrap(Pat::Obj), source.clone()));
    };
    let rest_value = Expr::helper(loc, "__objRest", vec![source.clone(), array(loc, keys)]);
    parts.push((rest, rest_value));
    parts
  }

  fn obj_rest_unsupported(&mut self, loc: Loc) {
    self.unsupported_syntax(loc, "nested object rest patterns");
  }

  pub(super) fn lower_declarator_rest(&mut self, decl: &mut VarDecl) {
    if !decl
      .declarators
      .iter()
      .any(|d| has_obj_rest(&d.pattern.stx.pat.stx))
    {
      return;
    };
    let mut declarators = Vec::with_capacity(decl.declarators.len());
    for declarator in std::mem::take(&mut decl.declarators) {
      let loc = declarator.pattern.loc;
      let pat = &declarator.pattern.stx.pat;
      if !has_obj_rest(&pat.stx) {
        declarators.push(declarator);
        continue;
      };
      if !is_splittable_obj_rest(&pat.stx) || declarator.initializer.is_none() {
        self.obj_rest_unsupported(loc);
        declarators.push(declarator);
        continue;
      };
      let VarDeclarator {
        pattern,
        initializer,
      } = declarator;
      let init = initializer.unwrap_or_else(|| unreachable!("initializer"));
      let Pat::Obj(obj) = *pattern.stx.pat.stx else {
        unreachable!("object pattern");
      };
      let has_props = !obj.stx.properties.is_empty();
      let source = if has_props && !matches!(init.stx.as_ref(), Expr::Id(_)) {
        let name = self.temps.alloc_bound(self.scopes);
        declarators.push(VarDeclarator::new(loc, &name, Some(init)));
        Expr::id(loc, name)
      } else {
        init
      };
      for (target, value) in self.split_obj_rest(loc, *obj.stx, &source) {
        declarators.push(VarDeclarator {
          pattern: PatDecl::new(target),
          initializer: Some(value),
        });
      }
    }
    decl.declarators = declarators;
  }

  /// Moves an object rest parameter into the body: `function f({ a, ...b }) {}` becomes
  /// `function f(_a) { var { a } = _a, b = __objRest(_a, ["a"]); }`.
  pub(super) fn lower_param_rest(&mut self, f: &mut Func) {
    let mut decls = Vec::new();
    for param in f.parameters.iter_mut() {
      let loc = param.loc;
      let pat = &param.stx.pattern.stx.pat;
      if !has_obj_rest(&pat.stx) {
        continue;
      };
      if !is_splittable_obj_rest(&pat.stx) {
        self.obj_rest_unsupported(loc);
        continue;
      };
      let name = self.temps.alloc_bound(self.scopes);
      let pattern = std::mem::replace(&mut param.stx.pattern, PatDecl::new(Pat::id(loc, &name)));
      decls.push(VarDeclarator {
        pattern,
        initializer: Some(Expr::id(loc, name)),
      });
    }
    if decls.is_empty() {
      return;
    };
    let loc = decls[0].pattern.loc;
    let mut decl = VarDecl {
      export: false,
      mode: VarDeclMode::Var,
      declarators: decls,
    };
    self.lower_declarator_rest(&mut decl);
    let stmt = Node::new(loc, decl).wrap(Stmt::from);
    if let FuncBody::Expression(_) = &f.body {
      let body = std::mem::replace(&mut f.body, FuncBody::Block(Vec::new()));
      f.body = FuncBody::Block(body_stmts(body));
    };
    if let FuncBody::Block(body) = &mut f.body {
      let at = prologue_end(body);
      body.insert(at, stmt);
    };
  }

  /// `({ a, ...b } = c)` becomes `(_a = c, { a } = _a, b = __objRest(_a, ["a"]), _a)`. Returns
  /// false when the pattern has no object rest this can split.
  pub(super) fn lower_assign_rest(&mut self, e: &mut Node<Expr>) -> bool {
    let loc = e.loc;
    let Expr::Binary(assign) = e.stx.as_mut() else {
      return false;
    };
    let Expr::ObjPat(obj) = assign.stx.left.stx.as_ref() else {
      return false;
    };
    let pat = Pat::Obj(obj.clone());
    if !has_obj_rest(&pat) {
      return false;
    };
    if !is_splittable_obj_rest(&pat) {
      self.obj_rest_unsupported(loc);
      return false;
    };
    let Expr::ObjPat(obj) = *take_expr(&mut assign.stx.left).stx else {
      unreachable!("object pattern");
    };
    let init = take_expr(&mut assign.stx.right);
    let name = self.temps.alloc(self.scopes);
    let source = Expr::id(loc, &name);
    let mut parts = vec![Expr::assign(loc, Expr::id(loc, &name), init)];
    for (target, value) in self.split_obj_rest(loc, *obj.stx, &source) {
      parts.push(Expr::assign(loc, pat_to_expr(target), value));
    }
    parts.push(source);
    *e = Expr::comma(parts).unwrap_or_else(|| unreachable!("nonempty"));
    true
  }
}
