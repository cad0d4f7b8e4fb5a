//! Classes: fields moved into the constructor or after the class, private names backed by
//! `WeakMap`s and `WeakSet`s, auto-accessors, static blocks, and the class binding those need.
//!
//! Members are visited in source order. Computed keys of moved fields are then captured walking
//! the members from last to first, and the captures are chained into the next key that stays in
//! the class body, so every key is still evaluated once and in order.

use super::build::arrow_expr;
use super::build::class_expr;
use super::build::func_expr;
use super::build::func_node;
use super::build::new_expr;
use super::build::return_stmt;
use super::build::take_expr;
use super::build::var_stmt;
use super::build::CLASS_REF;
use super::expr::bigint_decimal;
use super::private::ClassCtx;
use super::private::PrivateInfo;
use super::private::PrivateKind;
use super::purity::is_removable_expr;
use super::purity::is_removable_stmts;
use super::CtxKind;
use super::FuncCtx;
use super::Lowerer;
use crate::ast::class_or_object::ClassMember;
use crate::ast::class_or_object::ClassOrObjGetter;
use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::class_or_object::ClassOrObjMethod;
use crate::ast::class_or_object::ClassOrObjSetter;
use crate::ast::class_or_object::ClassOrObjVal;
use crate::ast::class_or_object::ClassStaticBlock;
use crate::ast::expr::pat::ClassOrFuncName;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::CallArg;
use crate::ast::expr::CallExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::IdExpr;
use crate::ast::expr::OptionalChain;
use crate::ast::expr::SuperExpr;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::import_export::ExportName;
use crate::ast::import_export::ExportNames;
use crate::ast::import_export::ModuleExportImportName;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ClassDecl;
use crate::ast::stmt::decl::ParamDecl;
use crate::ast::stmt::decl::VarDeclMode;
use crate::ast::stmt::ExportListStmt;
use crate::ast::stmt::Stmt;
use crate::loc::Loc;
use crate::operator::OperatorName;
use crate::scope::ScopeKind;
use crate::target::Feature;
use crate::temp::insert_var_decl;
use crate::temp::prologue_end;
use crate::temp::FrameKind;
use crate::temp::TempVar;
use crate::token::TT;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use derive_visitor::Visitor;
use derive_visitor::VisitorMut;
use tracing::debug;

/// Which members leave the class body.
#[derive(Clone, Copy, Debug)]
struct ClassPolicy {
  instance_fields: bool,
  static_fields: bool,
  static_blocks: bool,
  // `__publicField` rather than plain assignment.
  define: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FuncRole {
  Method,
  Getter,
  Setter,
}

/// A member after visiting, before the class is reassembled.
enum Slot {
  Kept(Node<ClassMember>),
  Field {
    loc: Loc,
    static_: bool,
    key: ClassOrObjKey,
    init: Option<Node<Expr>>,
  },
  // A field without initializer under assignment semantics; only its key is evaluated.
  Dropped(ClassOrObjKey),
  PrivateField {
    loc: Loc,
    static_: bool,
    name: String,
    init: Option<Node<Expr>>,
  },
  PrivateFunc {
    loc: Loc,
    name: String,
    role: FuncRole,
    func: Node<Func>,
  },
  StaticCode(Vec<Node<Expr>>),
}

/// A class with its members restructured. `prefix` runs before the class, `suffix` after it, with
/// `placeholder` standing for the class binding in `suffix`.
struct LoweredClass {
  extends: Option<Node<Expr>>,
  members: Vec<Node<ClassMember>>,
  prefix: Vec<Node<Expr>>,
  suffix: Vec<Node<Expr>>,
  placeholder: String,
  // A lowered static initializer reads `this`, so the class needs a binding of its own.
  static_this: bool,
}

type BinaryExprNode = Node<BinaryExpr>;
type IdExprNode = Node<IdExpr>;

#[derive(Visitor)]
#[visitor(BinaryExprNode(enter))]
struct BrandCheckFinder {
  found: bool,
}

impl BrandCheckFinder {
  fn enter_binary_expr_node(&mut self, node: &BinaryExprNode) {
    if node.stx.operator == OperatorName::In
      && matches!(node.stx.left.stx.as_ref(), Expr::Id(id) if id.stx.name.starts_with('#'))
    {
      self.found = true;
    };
  }
}

#[derive(VisitorMut)]
#[visitor(IdExprNode(enter))]
struct RenameVisitor<'a> {
  from: &'a str,
  to: &'a str,
}

impl RenameVisitor<'_> {
  fn enter_id_expr_node(&mut self, node: &mut IdExprNode) {
    if node.stx.name == self.from {
      node.stx.name = self.to.to_string();
    };
  }
}

fn rename(from: &str, to: &str, members: &mut [Node<ClassMember>], exprs: &mut [Node<Expr>]) {
  let mut visitor = RenameVisitor { from, to };
  for member in members.iter_mut() {
    member.drive_mut(&mut visitor);
  }
  for expr in exprs.iter_mut() {
    expr.drive_mut(&mut visitor);
  }
}

fn sequence(parts: Vec<Node<Expr>>) -> Node<Expr> {
  Expr::comma(parts).unwrap_or_else(|| unreachable!("empty sequence"))
}

fn private_name(member: &ClassMember) -> Option<&str> {
  match &member.key {
    ClassOrObjKey::Direct(d) if d.stx.tt == TT::PrivateMember => Some(&d.stx.key),
    _ => None,
  }
}

fn private_kind(val: &ClassOrObjVal) -> Option<PrivateKind> {
  match val {
    ClassOrObjVal::Prop(_) => Some(PrivateKind::Field),
    ClassOrObjVal::Method(_) => Some(PrivateKind::Method),
    ClassOrObjVal::Getter(_) | ClassOrObjVal::Setter(_) => Some(PrivateKind::Accessor),
    ClassOrObjVal::Accessor(_) | ClassOrObjVal::StaticBlock(_) => None,
  }
}

fn kept(loc: Loc, key: ClassOrObjKey, static_: bool, val: ClassOrObjVal) -> Slot {
  Slot::Kept(Node::new(loc, ClassMember { key, static_, val }))
}

fn is_constructor(member: &Node<ClassMember>) -> bool {
  !member.stx.static_
    && matches!(member.stx.val, ClassOrObjVal::Method(_))
    && matches!(&member.stx.key, ClassOrObjKey::Direct(d) if d.stx.key == "constructor" && d.stx.tt != TT::PrivateMember)
}

fn is_super_call(stmt: &Node<Stmt>) -> bool {
  match stmt.stx.as_ref() {
    Stmt::Expr(s) => matches!(s.stx.expr.stx.as_ref(), Expr::Call(c) if matches!(c.stx.callee.stx.as_ref(), Expr::Super(_))),
    _ => false,
  }
}

fn is_literal_key(key: &Node<Expr>) -> bool {
  matches!(key.stx.as_ref(), Expr::LitStr(_) | Expr::LitNum(_))
}

/// The property key a moved field defines, as a value.
fn field_key(key: ClassOrObjKey) -> Node<Expr> {
  match key {
    ClassOrObjKey::Computed(expr) => expr,
    ClassOrObjKey::Direct(direct) => {
      let loc = direct.loc;
      let direct = *direct.stx;
      let key = direct.key;
      match direct.tt {
        TT::LiteralNumber => Expr::num(loc, key),
        TT::LiteralBigInt => {
          let decimal = bigint_decimal(&key).unwrap_or(key);
          Expr::str(loc, decimal)
        }
        _ => Expr::str(loc, key),
      }
    }
  }
}

/// `receiver.key = init` or `receiver[key] = init`.
fn field_assignment(loc: Loc, receiver: Node<Expr>, key: ClassOrObjKey, init: Node<Expr>) -> Node<Expr> {
  let target = match key {
    ClassOrObjKey::Direct(d) if d.stx.tt == TT::Identifier => Expr::member(loc, receiver, d.stx.key.clone()),
    key => Expr::computed_member(loc, receiver, field_key(key)),
  };
  Expr::assign(loc, target, init)
}

/// A name for the backing field of an auto-accessor, without the `#`.
fn backing_base(key: &str, tt: TT) -> String {
  if tt == TT::PrivateMember {
    return format!("_{}", key.trim_start_matches('#'));
  };
  let mut base: String = key
    .chars()
    .map(|c| if c.is_alphanumeric() || c == '_' || c == '$' { c } else { '_' })
    .collect();
  if base.is_empty() || base.starts_with(|c: char| c.is_ascii_digit()) {
    base.insert(0, '_');
  };
  base
}

fn getter_member(loc: Loc, key: ClassOrObjKey, static_: bool, backing: &str) -> Node<ClassMember> {
  let read = Expr::member(loc, Expr::this(loc), backing);
  let func = func_node(loc, false, false, Vec::new(), FuncBody::Block(vec![return_stmt(loc, read)]));
  Node::new(loc, ClassMember {
    key,
    static_,
    val: ClassOrObjVal::Getter(Node::new(loc, ClassOrObjGetter { func })),
  })
}

fn setter_member(loc: Loc, key: ClassOrObjKey, static_: bool, backing: &str) -> Node<ClassMember> {
  let write = Expr::assign(
    loc,
    Expr::member(loc, Expr::this(loc), backing),
    Expr::id(loc, "_"),
  );
  let func = func_node(
    loc,
    false,
    false,
    vec![ParamDecl::simple(loc, "_")],
    FuncBody::Block(vec![Stmt::expr(write)]),
  );
  Node::new(loc, ClassMember {
    key,
    static_,
    val: ClassOrObjVal::Setter(Node::new(loc, ClassOrObjSetter { func })),
  })
}

/// `constructor() {}`, or `constructor() { super(...arguments); }` in a derived class.
fn synthesized_constructor(loc: Loc, derived: bool) -> Node<ClassMember> {
  let mut body = Vec::new();
  if derived {
    let call = Node::new(loc, CallExpr {
      optional_chaining: OptionalChain::None,
      pure: false,
      callee: Node::new(loc, SuperExpr {}).wrap(Expr::from),
      arguments: vec![Node::new(loc, CallArg {
        spread: true,
        value: Expr::id(loc, "arguments"),
      })],
    })
    .wrap(Expr::from);
    body.push(Stmt::expr(call));
  };
  Node::new(loc, ClassMember {
    key: ClassOrObjKey::direct(loc, "constructor", TT::Identifier),
    static_: false,
    val: ClassOrObjVal::Method(Node::new(loc, ClassOrObjMethod {
      func: func_node(loc, false, false, Vec::new(), FuncBody::Block(body)),
    })),
  })
}

/// A lowered static block as expressions: its statements if they are all expressions, otherwise
/// an arrow called in place.
fn static_code(loc: Loc, mut body: Vec<Node<Stmt>>, temps: Vec<TempVar>) -> Vec<Node<Expr>> {
  if temps.is_empty() && body.iter().all(|s| matches!(s.stx.as_ref(), Stmt::Expr(_))) {
    return body
      .into_iter()
      .map(|s| match *s.stx {
        Stmt::Expr(e) => e.stx.expr,
        _ => unreachable!("expression statement"),
      })
      .collect();
  };
  let pure = is_removable_stmts(&body);
  insert_var_decl(&mut body, loc, temps);
  let mut call = Expr::call(loc, arrow_expr(loc, Vec::new(), FuncBody::Block(body)), Vec::new());
  if let Expr::Call(c) = call.stx.as_mut() {
    c.stx.pure = pure;
  };
  vec![call]
}

impl Lowerer<'_> {
  pub(super) fn class_decl(&mut self, decl: Node<ClassDecl>, out: &mut Vec<Node<Stmt>>) {
    let loc = decl.loc;
    let ClassDecl {
      export,
      export_default,
      name,
      extends,
      members,
    } = *decl.stx;
    let name = name.map(|n| n.stx.name);
    let LoweredClass {
      extends,
      mut members,
      prefix,
      mut suffix,
      placeholder,
      static_this,
    } = self.lower_class(loc, extends, members);

    if !prefix.is_empty() {
      out.push(Stmt::expr(sequence(prefix)));
    };
    if suffix.is_empty() {
      out.push(
        Node::new(loc, ClassDecl {
          export,
          export_default,
          name: name.map(|name| Node::new(loc, ClassOrFuncName { name })),
          extends,
          members,
        })
        .wrap(Stmt::from),
      );
      return;
    };

    let name = match name {
      Some(name) => name,
      None => {
        let stem = format!("{}_default", self.options.file_stem);
        self.temps.alloc_named_bound(self.scopes, &stem)
      }
    };
    if !static_this {
      rename(&placeholder, &name, &mut [], &mut suffix);
      out.push(
        Node::new(loc, ClassDecl {
          export,
          export_default,
          name: Some(Node::new(loc, ClassOrFuncName { name })),
          extends,
          members,
        })
        .wrap(Stmt::from),
      );
      out.extend(suffix.into_iter().map(Stmt::expr));
      return;
    };

    // const _Foo = class _Foo {}; ...; let Foo = _Foo;
    debug!("binding class for static this");
    let alias = self.temps.alloc_named_bound(self.scopes, &format!("_{name}"));
    rename(&name, &alias, &mut members, &mut suffix);
    rename(&placeholder, &alias, &mut [], &mut suffix);
    out.push(var_stmt(
      loc,
      false,
      VarDeclMode::Const,
      &alias,
      class_expr(loc, Some(alias.clone()), extends, members),
    ));
    out.extend(suffix.into_iter().map(Stmt::expr));
    out.push(var_stmt(
      loc,
      export && !export_default,
      VarDeclMode::Let,
      &name,
      Expr::id(loc, &alias),
    ));
    if export_default {
      out.push(
        Node::new(loc, ExportListStmt {
          names: ExportNames::Specific(vec![Node::new(loc, ExportName {
            exportable: ModuleExportImportName::Ident(name),
            alias: Node::new(loc, IdPat {
              name: "default".to_string(),
            }),
          })]),
          from: None,
        })
        .wrap(Stmt::from),
      );
    };
  }

  pub(super) fn class_expr(&mut self, e: &mut Node<Expr>) {
    let loc = e.loc;
    let Expr::Class(class) = *take_expr(e).stx else {
      unreachable!("class expression");
    };
    let class = *class.stx;
    let name = class.name.map(|n| n.stx.name);
    let LoweredClass {
      extends,
      mut members,
      mut prefix,
      mut suffix,
      placeholder,
      ..
    } = self.lower_class(loc, class.extends, class.members);

    if suffix.is_empty() {
      prefix.push(class_expr(loc, name, extends, members));
      *e = sequence(prefix);
      return;
    };

    // (_a = class {}, statics, _a)
    let temp = self.temps.alloc(self.scopes);
    if let Some(name) = &name {
      rename(name, &temp, &mut members, &mut suffix);
    };
    rename(&placeholder, &temp, &mut [], &mut suffix);
    prefix.push(Expr::assign(
      loc,
      Expr::id(loc, &temp),
      class_expr(loc, None, extends, members),
    ));
    prefix.extend(suffix);
    prefix.push(Expr::id(loc, temp));
    *e = sequence(prefix);
  }

  fn class_policy(&self, members: &[Node<ClassMember>], privates: &[(String, Option<PrivateInfo>)]) -> ClassPolicy {
    let lowered_private = |static_: bool| {
      privates
        .iter()
        .any(|(_, info)| matches!(info, Some(info) if info.static_ == static_))
    };
    let static_fields = !self.supports(Feature::ClassStaticField) || lowered_private(true);
    let has_static_blocks = members
      .iter()
      .any(|m| matches!(m.stx.val, ClassOrObjVal::StaticBlock(_)));
    ClassPolicy {
      instance_fields: !self.supports(Feature::ClassField) || lowered_private(false),
      static_fields,
      static_blocks: has_static_blocks && (!self.supports(Feature::ClassStaticBlocks) || static_fields),
      define: self.options.use_define_for_class_fields,
    }
  }

  fn private_supported(&self, kind: PrivateKind, static_: bool) -> bool {
    let (instance, statics) = match kind {
      PrivateKind::Field => (Feature::ClassPrivateField, Feature::ClassPrivateStaticField),
      PrivateKind::Method => (Feature::ClassPrivateMethod, Feature::ClassPrivateStaticMethod),
      PrivateKind::Accessor => (Feature::ClassPrivateAccessor, Feature::ClassPrivateStaticAccessor),
    };
    self.supports(instance) && (!static_ || self.supports(statics))
  }

  /// Decides which private names of the class are lowered and allocates their bindings, in source
  /// order. Lowering one instance (or static) private name lowers all of them, so brands and
  /// storage are in place before any initializer runs.
  fn declare_privates(&mut self, members: &[Node<ClassMember>]) -> Vec<(String, Option<PrivateInfo>)> {
    let mut found: Vec<(String, PrivateKind, bool, bool, bool)> = Vec::new();
    for member in members {
      let (Some(name), Some(kind)) = (private_name(&member.stx), private_kind(&member.stx.val)) else {
        continue;
      };
      let getter = matches!(member.stx.val, ClassOrObjVal::Getter(_));
      let setter = matches!(member.stx.val, ClassOrObjVal::Setter(_));
      match found.iter_mut().find(|(n, ..)| n == name) {
        Some(entry) => {
          entry.3 |= getter;
          entry.4 |= setter;
        }
        None => found.push((name.to_string(), kind, member.stx.static_, getter, setter)),
      };
    }
    if found.is_empty() {
      return Vec::new();
    };

    let brand_checks = !self.supports(Feature::ClassPrivateBrandCheck) && {
      let mut finder = BrandCheckFinder { found: false };
      for member in members {
        member.drive(&mut finder);
      }
      finder.found
    };
    let lowered = |static_: bool| {
      brand_checks
        || found
          .iter()
          .any(|(_, kind, s, ..)| *s == static_ && !self.private_supported(*kind, static_))
    };
    let (instance, statics) = (lowered(false), lowered(true));

    let mut privates = Vec::with_capacity(found.len());
    for (name, kind, static_, getter, setter) in found {
      if !(if static_ { statics } else { instance }) {
        privates.push((name, None));
        continue;
      };
      let base = name.trim_start_matches('#').to_string();
      let storage = self.temps.alloc_named(self.scopes, &format!("_{base}"));
      let mut info = PrivateInfo {
        kind,
        storage,
        method: None,
        getter: None,
        setter: None,
        static_,
      };
      match kind {
        PrivateKind::Field => {}
        PrivateKind::Method => info.method = Some(self.temps.alloc_named(self.scopes, &format!("{base}_fn"))),
        PrivateKind::Accessor => {
          if getter {
            info.getter = Some(self.temps.alloc_named(self.scopes, &format!("{base}_get")));
          };
          if setter {
            info.setter = Some(self.temps.alloc_named(self.scopes, &format!("{base}_set")));
          };
        }
      };
      privates.push((name, Some(info)));
    }
    privates
  }

  /// Replaces each `accessor x = v` with a private backing field and a getter and setter for it.
  fn auto_accessors(&mut self, members: Vec<Node<ClassMember>>) -> Vec<Node<ClassMember>> {
    if !members
      .iter()
      .any(|m| matches!(m.stx.val, ClassOrObjVal::Accessor(_)))
    {
      return members;
    };
    let mut taken: Vec<String> = members
      .iter()
      .filter_map(|m| private_name(&m.stx).map(str::to_string))
      .collect();
    let mut out = Vec::with_capacity(members.len() + 2);
    for member in members {
      let loc = member.loc;
      let ClassMember { key, static_, val } = *member.stx;
      let ClassOrObjVal::Accessor(init) = val else {
        out.push(Node::new(loc, ClassMember { key, static_, val }));
        continue;
      };
      debug!("lowering auto-accessor");
      let (base, get_key, set_key) = match key {
        ClassOrObjKey::Direct(direct) => {
          let base = backing_base(&direct.stx.key, direct.stx.tt);
          (base, ClassOrObjKey::Direct(direct.clone()), ClassOrObjKey::Direct(direct))
        }
        ClassOrObjKey::Computed(expr) => {
          let temp = self.temps.alloc(self.scopes);
          let key_loc = expr.loc;
          (
            temp.trim_start_matches('_').to_string(),
            ClassOrObjKey::Computed(Expr::assign(key_loc, Expr::id(key_loc, &temp), expr)),
            ClassOrObjKey::Computed(Expr::id(key_loc, temp)),
          )
        }
      };
      let mut backing = format!("#{base}");
      let mut suffix = 2;
      while taken.contains(&backing) {
        backing = format!("#{base}{suffix}");
        suffix += 1;
      }
      taken.push(backing.clone());
      out.push(Node::new(loc, ClassMember {
        key: ClassOrObjKey::direct(loc, &backing, TT::PrivateMember),
        static_,
        val: ClassOrObjVal::Prop(init),
      }));
      out.push(getter_member(loc, get_key, static_, &backing));
      out.push(setter_member(loc, set_key, static_, &backing));
    }
    out
  }

  fn lower_class(
    &mut self,
    loc: Loc,
    mut extends: Option<Node<Expr>>,
    members: Vec<Node<ClassMember>>,
  ) -> LoweredClass {
    if !self.supports(Feature::Class) {
      self.unsupported_syntax(loc, "class syntax");
    };
    if let Some(extends) = &mut extends {
      self.expr(extends);
    };
    let members = if self.supports(Feature::Decorators) {
      members
    } else {
      self.auto_accessors(members)
    };
    let privates = self.declare_privates(&members);
    let policy = self.class_policy(&members, &privates);
    if policy.instance_fields || policy.static_fields || policy.static_blocks || !privates.is_empty() {
      debug!("lowering class");
    };
    self.classes.push(ClassCtx { privates });
    let placeholder = format!("{CLASS_REF}{}", self.classes.len());

    let mut static_this = false;
    let mut slots = Vec::with_capacity(members.len());
    for member in members {
      let slot = self.class_member(member, policy, &placeholder, &mut static_this);
      slots.push(slot);
    }
    let prefix = self.chain_computed_keys(&mut slots);

    let ctx = self
      .classes
      .pop()
      .unwrap_or_else(|| unreachable!("class context"));
    let info = |name: &str| -> PrivateInfo {
      ctx
        .privates
        .iter()
        .find(|(n, _)| n == name)
        .and_then(|(_, info)| info.clone())
        .unwrap_or_else(|| unreachable!("private name {name} is not lowered"))
    };
    let class_ref = || Expr::id(loc, &placeholder);

    // Brands first, so private methods are callable from any initializer.
    let mut inits = Vec::new();
    let mut statics = Vec::new();
    for (_, private) in ctx.privates.iter() {
      if let Some(private) = private {
        if private.kind != PrivateKind::Field {
          let receiver = if private.static_ {
            class_ref()
          } else {
            Expr::this(loc)
          };
          let add = Expr::helper(loc, "__privateAdd", vec![receiver, Expr::id(loc, &private.storage)]);
          if private.static_ {
            statics.push(add);
          } else {
            inits.push(add);
          };
        };
      };
    }

    let mut storage = Vec::new();
    let mut stored: Vec<String> = Vec::new();
    let mut kept = Vec::new();
    for slot in slots {
      match slot {
        Slot::Kept(member) => kept.push(member),
        Slot::Dropped(_) => {}
        Slot::Field {
          loc,
          static_,
          key,
          init,
        } => {
          let receiver = if static_ { class_ref() } else { Expr::this(loc) };
          let value = if policy.define {
            let mut args = vec![receiver, field_key(key)];
            args.extend(init);
            Expr::helper(loc, "__publicField", args)
          } else {
            let init = init.unwrap_or_else(|| unreachable!("dropped field"));
            field_assignment(loc, receiver, key, init)
          };
          if static_ {
            statics.push(value);
          } else {
            inits.push(value);
          };
        }
        Slot::PrivateField {
          loc,
          static_,
          name,
          init,
        } => {
          let private = info(&name);
          if !stored.contains(&name) {
            storage.push(Expr::assign(
              loc,
              Expr::id(loc, &private.storage),
              new_expr(loc, "WeakMap", Vec::new()),
            ));
            stored.push(name);
          };
          let receiver = if static_ { class_ref() } else { Expr::this(loc) };
          let mut args = vec![receiver, Expr::id(loc, &private.storage)];
          args.extend(init);
          let add = Expr::helper(loc, "__privateAdd", args);
          if static_ {
            statics.push(add);
          } else {
            inits.push(add);
          };
        }
        Slot::PrivateFunc {
          loc,
          name,
          role,
          func,
        } => {
          let private = info(&name);
          if !stored.contains(&name) {
            storage.push(Expr::assign(
              loc,
              Expr::id(loc, &private.storage),
              new_expr(loc, "WeakSet", Vec::new()),
            ));
            stored.push(name);
          };
          let binding = match role {
            FuncRole::Method => private.method,
            FuncRole::Getter => private.getter,
            FuncRole::Setter => private.setter,
          }
          .unwrap_or_else(|| unreachable!("private function binding"));
          storage.push(Expr::assign(loc, Expr::id(loc, binding), func_expr(loc, func)));
        }
        Slot::StaticCode(code) => statics.extend(code),
      };
    }

    self.add_to_constructor(loc, &mut kept, extends.is_some(), inits);
    storage.extend(statics);
    LoweredClass {
      extends,
      members: kept,
      prefix,
      suffix: storage,
      placeholder,
      static_this,
    }
  }

  /// Visits one member and decides where it goes.
  fn class_member(
    &mut self,
    member: Node<ClassMember>,
    policy: ClassPolicy,
    placeholder: &str,
    static_this: &mut bool,
  ) -> Slot {
    let loc = member.loc;
    let ClassMember {
      mut key,
      static_,
      val,
    } = *member.stx;
    self.key(&mut key);
    let private = key.is_private().then(|| key.direct_name().unwrap_or_default().to_string());
    let lowered_private = private
      .as_deref()
      .is_some_and(|name| self.private_info(name).is_some());

    match val {
      ClassOrObjVal::Method(mut method) if lowered_private => {
        self.func(&mut method.stx.func);
        Slot::PrivateFunc {
          loc,
          name: private.unwrap_or_default(),
          role: FuncRole::Method,
          func: method.stx.func,
        }
      }
      ClassOrObjVal::Getter(mut getter) if lowered_private => {
        self.func(&mut getter.stx.func);
        Slot::PrivateFunc {
          loc,
          name: private.unwrap_or_default(),
          role: FuncRole::Getter,
          func: getter.stx.func,
        }
      }
      ClassOrObjVal::Setter(mut setter) if lowered_private => {
        self.func(&mut setter.stx.func);
        Slot::PrivateFunc {
          loc,
          name: private.unwrap_or_default(),
          role: FuncRole::Setter,
          func: setter.stx.func,
        }
      }
      ClassOrObjVal::Prop(mut init) => {
        let moved = lowered_private
          || (private.is_none() && if static_ { policy.static_fields } else { policy.instance_fields });
        let moved_static = moved && static_;
        *static_this |= self.field_init(&mut init, moved_static.then_some(placeholder));
        match private {
          Some(name) if lowered_private => Slot::PrivateField {
            loc,
            static_,
            name,
            init,
          },
          _ if moved && init.is_none() && !policy.define => Slot::Dropped(key),
          _ if moved => Slot::Field {
            loc,
            static_,
            key,
            init,
          },
          _ => kept(loc, key, static_, ClassOrObjVal::Prop(init)),
        }
      }
      ClassOrObjVal::StaticBlock(mut block) => {
        let lowered = policy.static_blocks;
        let (uses_this, temps) = self.static_block(&mut block, lowered.then_some(placeholder));
        if lowered {
          debug!("lowering class static block");
          *static_this |= uses_this;
          let block_loc = block.loc;
          return Slot::StaticCode(static_code(block_loc, block.stx.body, temps));
        };
        let block_loc = block.loc;
        insert_var_decl(&mut block.stx.body, block_loc, temps);
        kept(loc, key, static_, ClassOrObjVal::StaticBlock(block))
      }
      ClassOrObjVal::Method(mut method) => {
        self.func(&mut method.stx.func);
        kept(loc, key, static_, ClassOrObjVal::Method(method))
      }
      ClassOrObjVal::Getter(mut getter) => {
        self.func(&mut getter.stx.func);
        kept(loc, key, static_, ClassOrObjVal::Getter(getter))
      }
      ClassOrObjVal::Setter(mut setter) => {
        self.func(&mut setter.stx.func);
        kept(loc, key, static_, ClassOrObjVal::Setter(setter))
      }
      ClassOrObjVal::Accessor(mut init) => {
        self.field_init(&mut init, None);
        kept(loc, key, static_, ClassOrObjVal::Accessor(init))
      }
    }
  }

  /// Visits a field initializer. With `placeholder`, the initializer moves after the class and its
  /// `this` becomes the class binding. Returns whether such an initializer reads `this`.
  fn field_init(&mut self, init: &mut Option<Node<Expr>>, placeholder: Option<&str>) -> bool {
    let Some(init) = init else {
      return false;
    };
    let kind = if placeholder.is_some() {
      CtxKind::StaticInit
    } else {
      CtxKind::FieldInit
    };
    let mut ctx = FuncCtx::new(kind, self.temps.current());
    ctx.this_alias = placeholder.map(str::to_string);
    self.funcs.push(ctx);
    self.expr(init);
    let ctx = self
      .funcs
      .pop()
      .unwrap_or_else(|| unreachable!("field context"));
    kind == CtxKind::StaticInit && ctx.uses_this
  }

  /// Visits a static block body in a frame of its own. Returns whether a moved block reads `this`,
  /// and the temps the body must declare.
  fn static_block(&mut self, block: &mut Node<ClassStaticBlock>, placeholder: Option<&str>) -> (bool, Vec<TempVar>) {
    let owner = self
      .scopes
      .scope_at(block.loc, ScopeKind::Function)
      .unwrap_or_else(|| self.temps.owner());
    self.temps.push(FrameKind::Function, owner);
    let kind = if placeholder.is_some() {
      CtxKind::StaticInit
    } else {
      CtxKind::FieldInit
    };
    let mut ctx = FuncCtx::new(kind, self.temps.current());
    ctx.this_alias = placeholder.map(str::to_string);
    self.funcs.push(ctx);
    self.stmts(&mut block.stx.body);
    let ctx = self
      .funcs
      .pop()
      .unwrap_or_else(|| unreachable!("static block context"));
    let temps = self.temps.pop();
    (kind == CtxKind::StaticInit && ctx.uses_this, temps)
  }

  /// Captures the computed keys of moved fields and chains them into the keys that stay. Returns
  /// the captures that have no key to go into.
  fn chain_computed_keys(&mut self, slots: &mut [Slot]) -> Vec<Node<Expr>> {
    let last_kept = slots.iter().rposition(|s| {
      matches!(s, Slot::Kept(m) if matches!(m.stx.key, ClassOrObjKey::Computed(_)))
    });
    let after_last_kept = |i: usize| last_kept.map_or(false, |k| i > k);

    let mut captures: Vec<Option<Node<Expr>>> = slots.iter().map(|_| None).collect();
    let mut trailing = false;
    let mut kept_capture = None;
    for i in (0..slots.len()).rev() {
      if Some(i) == last_kept {
        if trailing {
          kept_capture = Some(self.temps.alloc(self.scopes));
        };
        continue;
      };
      match &mut slots[i] {
        Slot::Field {
          key: ClassOrObjKey::Computed(expr),
          ..
        } if !is_literal_key(expr) => {
          let loc = expr.loc;
          let name = self.temps.alloc(self.scopes);
          let value = std::mem::replace(expr, Expr::id(loc, &name));
          captures[i] = Some(Expr::assign(loc, Expr::id(loc, name), value));
          trailing |= after_last_kept(i);
        }
        Slot::Dropped(ClassOrObjKey::Computed(expr)) if !is_removable_expr(expr) => {
          captures[i] = Some(take_expr(expr));
          trailing |= after_last_kept(i);
        }
        _ => {}
      };
    }

    let mut pending = Vec::new();
    let mut head = Vec::new();
    for (i, slot) in slots.iter_mut().enumerate() {
      if let Some(capture) = captures[i].take() {
        pending.push(capture);
        continue;
      };
      let Slot::Kept(member) = slot else {
        continue;
      };
      let ClassOrObjKey::Computed(key) = &mut member.stx.key else {
        continue;
      };
      if Some(i) == last_kept {
        if let Some(name) = &kept_capture {
          let loc = key.loc;
          head = std::mem::take(&mut pending);
          head.push(Expr::assign(loc, Expr::id(loc, name), take_expr(key)));
          continue;
        };
      };
      if !pending.is_empty() {
        let mut parts = std::mem::take(&mut pending);
        parts.push(take_expr(key));
        *key = sequence(parts);
      };
    }

    match (last_kept, kept_capture) {
      (Some(i), Some(name)) => {
        if let Slot::Kept(member) = &mut slots[i] {
          if let ClassOrObjKey::Computed(key) = &mut member.stx.key {
            let loc = key.loc;
            head.append(&mut pending);
            head.push(Expr::id(loc, name));
            *key = sequence(head);
          };
        };
        Vec::new()
      }
      _ => pending,
    }
  }

  /// Runs `inits` at the start of construction: in the constructor, after `super(...)` in a
  /// derived class. A constructor that receives them moves to the front of the body.
  fn add_to_constructor(
    &mut self,
    loc: Loc,
    members: &mut Vec<Node<ClassMember>>,
    derived: bool,
    inits: Vec<Node<Expr>>,
  ) {
    if inits.is_empty() {
      return;
    };
    let mut ctor = match members.iter().position(is_constructor) {
      Some(i) => members.remove(i),
      None => synthesized_constructor(loc, derived),
    };
    let ClassOrObjVal::Method(method) = &mut ctor.stx.val else {
      unreachable!("constructor is a method");
    };
    let FuncBody::Block(body) = &mut method.stx.func.stx.body else {
      unreachable!("constructor has a block body");
    };
    let at = if derived {
      match body.iter().position(is_super_call) {
        Some(i) => i + 1,
        None => {
          self.unsupported_syntax(ctor.loc, "class fields in a constructor without a top-level super call");
          prologue_end(body)
        }
      }
    } else {
      prologue_end(body)
    };
    let stmts: Vec<Node<Stmt>> = inits.into_iter().map(Stmt::expr).collect();
    body.splice(at..at, stmts);
    members.insert(0, ctor);
  }
}
