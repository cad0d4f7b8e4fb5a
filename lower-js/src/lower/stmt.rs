use super::build::block_stmt;
use super::build::empty_stmt;
use super::build::take_expr;
use super::build::NullishChain;
use super::leaf::has_obj_rest;
use super::Lowerer;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::ast::stmt::decl::PatDecl;
use crate::ast::stmt::decl::VarDecl;
use crate::ast::stmt::decl::VarDeclMode;
use crate::ast::stmt::ExprStmt;
use crate::ast::stmt::ForInOfLhs;
use crate::ast::stmt::ForTripleStmtInit;
use crate::ast::stmt::IfStmt;
use crate::ast::stmt::Stmt;
use crate::loc::Loc;
use crate::operator::OperatorName;
use crate::target::Feature;

/// Whether a test always takes the same branch: `Some(false)` for `false`, `0`, `""`, `null` and
/// `void 0`, `Some(true)` for `true` and nonzero numbers.
fn static_truthiness(test: &Node<Expr>) -> Option<bool> {
  match test.stx.as_ref() {
    Expr::LitBool(b) => Some(b.stx.value),
    Expr::LitNull(_) => Some(false),
    Expr::LitNum(n) => match n.stx.value.parse::<f64>() {
      Ok(v) => Some(v != 0.0 && !v.is_nan()),
      Err(_) => None,
    },
    Expr::LitStr(s) => Some(!s.stx.value.is_empty()),
    Expr::Unary(u) if u.stx.operator == OperatorName::Void => Some(false),
    _ => None,
  }
}

/// The value of a collapsed chain in statement position is unused; keep its side effects only.
fn drop_nullish_value(expr: Node<Expr>) -> Option<Node<Expr>> {
  match *expr.stx {
    Expr::Binary(b) if b.stx.operator == OperatorName::Comma => Some(b.stx.left),
    _ => None,
  }
}

impl Lowerer<'_> {
  pub(super) fn stmts(&mut self, body: &mut Vec<Node<Stmt>>) {
    for stmt in std::mem::take(body) {
      self.stmt(stmt, body);
    }
  }

  /// Lowers a statement that must stay a single statement, such as a loop body.
  pub(super) fn single_stmt(&mut self, stmt: &mut Node<Stmt>) {
    let loc = stmt.loc;
    let taken = std::mem::replace(stmt, empty_stmt(loc));
    let mut out = Vec::new();
    self.stmt(taken, &mut out);
    *stmt = if out.len() > 1 {
      block_stmt(loc, out)
    } else {
      out.pop().unwrap_or_else(|| empty_stmt(loc))
    };
  }

  /// Lowers one statement into `out`. Some statements expand to several, e.g. a class
  /// declaration followed by its static initializers; some vanish.
  pub(super) fn stmt(&mut self, stmt: Node<Stmt>, out: &mut Vec<Node<Stmt>>) {
    let loc = stmt.loc;
    let mut stx = match *stmt.stx {
      Stmt::ClassDecl(decl) => return self.class_decl(decl, out),
      Stmt::ExportList(list) => return self.export_list(list, out),
      Stmt::ForOf(for_of) if for_of.stx.await_ => return self.for_await(for_of, out),
      Stmt::Expr(s) => {
        if let Some(s) = self.expr_stmt(s) {
          out.push(Node::new(loc, Stmt::Expr(s)));
        };
        return;
      }
      stx => stx,
    };
    self.visit_stmt(loc, &mut stx);
    out.push(Node::new(loc, stx));
  }

  fn expr_stmt(&mut self, mut s: Node<ExprStmt>) -> Option<Node<ExprStmt>> {
    self.expr(&mut s.stx.expr);
    if s.stx.expr.assoc.get::<NullishChain>().is_some() {
      let rest = drop_nullish_value(take_expr(&mut s.stx.expr))?;
      s.stx.expr = rest;
    };
    Some(s)
  }

  fn visit_stmt(&mut self, loc: Loc, stmt: &mut Stmt) {
    match stmt {
      Stmt::Block(b) => self.stmts(&mut b.stx.body),
      Stmt::Break(_)
      | Stmt::Comment(_)
      | Stmt::Continue(_)
      | Stmt::Debugger(_)
      | Stmt::Empty(_)
      | Stmt::Import(_) => {}
      Stmt::DoWhile(s) => {
        self.single_stmt(&mut s.stx.body);
        self.expr(&mut s.stx.condition);
      }
      Stmt::ExportDefaultExpr(s) => self.expr(&mut s.stx.expression),
      Stmt::ForIn(s) => {
        self.for_lhs(&mut s.stx.lhs);
        self.expr(&mut s.stx.rhs);
        self.single_stmt(&mut s.stx.body);
      }
      Stmt::ForOf(s) => {
        if !self.supports(Feature::ForOf) {
          self.unsupported_syntax(loc, "for-of loops");
        };
        self.for_lhs(&mut s.stx.lhs);
        self.expr(&mut s.stx.rhs);
        self.single_stmt(&mut s.stx.body);
      }
      Stmt::ForTriple(s) => {
        match &mut s.stx.init {
          ForTripleStmtInit::None => {}
          ForTripleStmtInit::Expr(e) => self.expr(e),
          ForTripleStmtInit::Decl(d) => {
            let loc = d.loc;
            self.var_decl(loc, &mut d.stx);
          }
        };
        if let Some(cond) = &mut s.stx.cond {
          self.expr(cond);
        };
        if let Some(post) = &mut s.stx.post {
          self.expr(post);
        };
        self.single_stmt(&mut s.stx.body);
      }
      Stmt::If(s) => self.if_stmt(s),
      Stmt::Label(s) => self.single_stmt(&mut s.stx.statement),
      Stmt::Return(s) => {
        if let Some(value) = &mut s.stx.value {
          self.expr(value);
        };
      }
      Stmt::Switch(s) => {
        self.expr(&mut s.stx.test);
        for branch in s.stx.branches.iter_mut() {
          if let Some(case) = &mut branch.stx.case {
            self.expr(case);
          };
          self.stmts(&mut branch.stx.body);
        }
      }
      Stmt::Throw(s) => self.expr(&mut s.stx.value),
      Stmt::Try(s) => {
        self.stmts(&mut s.stx.wrapped.stx.body);
        if let Some(catch) = &mut s.stx.catch {
          if let Some(param) = &mut catch.stx.parameter {
            self.pat_decl(param);
            self.unsplittable_rest(&param.stx.pat);
          } else if !self.supports(Feature::OptionalCatchBinding) {
            let name = self.temps.alloc_named_bound(self.scopes, "e");
            catch.stx.parameter = Some(PatDecl::new(Pat::id(catch.loc, name)));
          };
          self.stmts(&mut catch.stx.body);
        };
        if let Some(finally) = &mut s.stx.finally {
          self.stmts(&mut finally.stx.body);
        };
      }
      Stmt::While(s) => {
        self.expr(&mut s.stx.condition);
        self.single_stmt(&mut s.stx.body);
      }
      Stmt::With(s) => {
        self.expr(&mut s.stx.object);
        self.single_stmt(&mut s.stx.body);
      }
      Stmt::FunctionDecl(d) => self.func(&mut d.stx.function),
      Stmt::VarDecl(d) => {
        let loc = d.loc;
        self.var_decl(loc, &mut d.stx);
      }
      Stmt::ClassDecl(_) | Stmt::ExportList(_) | Stmt::Expr(_) => {
        unreachable!("statement expands in place")
      }
    }
  }

  fn if_stmt(&mut self, s: &mut Node<IfStmt>) {
    self.expr(&mut s.stx.test);
    let truthiness = static_truthiness(&s.stx.test);
    self.branch(truthiness == Some(false), &mut s.stx.consequent);
    if let Some(alternate) = &mut s.stx.alternate {
      self.branch(truthiness == Some(true), alternate);
    };
  }

  fn branch(&mut self, dead: bool, stmt: &mut Node<Stmt>) {
    if dead {
      self.dead_branches += 1;
    };
    self.single_stmt(stmt);
    if dead {
      self.dead_branches -= 1;
    };
  }

  pub(super) fn for_lhs(&mut self, lhs: &mut ForInOfLhs) {
    let pat = match lhs {
      ForInOfLhs::Assign(pat) => {
        self.pat(pat);
        &*pat
      }
      ForInOfLhs::Decl((mode, decl)) => {
        if *mode != VarDeclMode::Var && !self.supports(Feature::ConstAndLet) {
          self.unsupported_syntax(decl.loc, mode.keyword());
        };
        self.pat_decl(decl);
        &decl.stx.pat
      }
    };
    self.unsplittable_rest(pat);
  }

  /// Reports an object rest in a binding that has no place to put the split.
  fn unsplittable_rest(&mut self, pat: &Node<Pat>) {
    if !self.supports(Feature::ObjectRestSpread) && has_obj_rest(&pat.stx) {
      self.unsupported_syntax(pat.loc, "object rest patterns in loop or catch bindings");
    };
  }

  pub(super) fn var_decl(&mut self, loc: Loc, decl: &mut VarDecl) {
    if decl.mode != VarDeclMode::Var && !self.supports(Feature::ConstAndLet) {
      self.unsupported_syntax(loc, decl.mode.keyword());
    };
    for declarator in decl.declarators.iter_mut() {
      self.pat_decl(&mut declarator.pattern);
      if let Some(init) = &mut declarator.initializer {
        self.expr(init);
      };
    }
    if !self.supports(Feature::ObjectRestSpread) {
      self.lower_declarator_rest(decl);
    };
  }

  /// A binding pattern outside expressions: a declaration, parameter or catch binding.
  pub(super) fn pat_decl(&mut self, decl: &mut Node<PatDecl>) {
    if !matches!(decl.stx.pat.stx.as_ref(), Pat::Id(_)) && !self.supports(Feature::Destructuring) {
      self.unsupported_syntax(decl.loc, "destructuring");
    };
    self.pat(&mut decl.stx.pat);
  }

  pub(super) fn pat(&mut self, pat: &mut Node<Pat>) {
    match pat.stx.as_mut() {
      Pat::Id(_) => {}
      Pat::Arr(arr) => {
        for elem in arr.stx.elements.iter_mut().flatten() {
          self.pat(&mut elem.target);
          if let Some(default) = &mut elem.default_value {
            self.root_expr(default);
          };
        }
        if let Some(rest) = &mut arr.stx.rest {
          self.pat(rest);
        };
      }
      Pat::Obj(obj) => {
        for prop in obj.stx.properties.iter_mut() {
          self.key(&mut prop.stx.key);
          self.pat(&mut prop.stx.target);
          if let Some(default) = &mut prop.stx.default_value {
            self.root_expr(default);
          };
        }
        if let Some(rest) = &mut obj.stx.rest {
          self.pat(rest);
        };
      }
      Pat::AssignTarget(target) => self.assign_target(target),
    }
  }
}
