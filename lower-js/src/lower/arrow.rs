//! Resolution of `this` and `arguments` across arrows that stop being arrows.

use super::build::body_stmts;
use super::build::func_expr;
use super::build::take_expr;
use super::CtxKind;
use super::Lowerer;
use crate::ast::expr::Expr;
use crate::ast::func::FuncBody;
use crate::ast::node::Node;
use crate::loc::Loc;
use tracing::debug;

impl Lowerer<'_> {
  /// The name `this` must be replaced with here, if any.
  pub(super) fn resolve_this(&mut self) -> Option<String> {
    let mut crossed = false;
    for i in (0..self.funcs.len()).rev() {
      let ctx = &mut self.funcs[i];
      ctx.uses_this = true;
      match ctx.kind {
        CtxKind::Arrow => crossed |= ctx.lowered_arrow,
        CtxKind::Function if crossed => {
          if let Some(alias) = &ctx.this_alias {
            return Some(alias.clone());
          };
          let frame = ctx.frame;
          let alias = self.temps.alloc_in(
            frame,
            self.scopes,
            Some("_this"),
            Some(Expr::this(Loc(0, 0))),
            true,
          );
          self.funcs[i].this_alias = Some(alias.clone());
          return Some(alias);
        }
        CtxKind::StaticInit => return ctx.this_alias.clone(),
        CtxKind::Function | CtxKind::Module | CtxKind::FieldInit => return None,
      };
    }
    None
  }

  /// The name `arguments` must be replaced with here, if any.
  pub(super) fn resolve_arguments(&mut self) -> Option<String> {
    let mut crossed = false;
    for i in (0..self.funcs.len()).rev() {
      let ctx = &mut self.funcs[i];
      match ctx.kind {
        CtxKind::Arrow => crossed |= ctx.lowered_arrow || ctx.lifted_arrow,
        CtxKind::Function => {
          ctx.uses_arguments = true;
          if !crossed {
            return None;
          };
          if let Some(alias) = &ctx.arguments_alias {
            return Some(alias.clone());
          };
          let frame = ctx.frame;
          let alias = self.temps.alloc_in(
            frame,
            self.scopes,
            Some("_arguments"),
            Some(Expr::id(Loc(0, 0), "arguments")),
            true,
          );
          self.funcs[i].arguments_alias = Some(alias.clone());
          return Some(alias);
        }
        CtxKind::Module | CtxKind::FieldInit | CtxKind::StaticInit => return None,
      };
    }
    None
  }

  /// `this` as seen from here, e.g. as the receiver of `super.x?.()`.
  pub(super) fn this_value(&mut self, loc: Loc) -> Node<Expr> {
    match self.resolve_this() {
      Some(alias) => Expr::id(loc, alias),
      None => Expr::this(loc),
    }
  }

  /// Replaces the arrow at `e`, already lowered inside, with a function expression.
  pub(super) fn arrow_to_function(&mut self, e: &mut Node<Expr>) {
    let loc = e.loc;
    let Expr::ArrowFunc(arrow) = *take_expr(e).stx else {
      unreachable!("arrow");
    };
    debug!("lowering arrow function");
    let mut func = arrow.stx.func;
    func.stx.arrow = false;
    if let FuncBody::Expression(_) = &func.stx.body {
      let body = std::mem::replace(&mut func.stx.body, FuncBody::Block(Vec::new()));
      func.stx.body = FuncBody::Block(body_stmts(body));
    };
    *e = func_expr(loc, func);
  }
}
