use super::build::array;
use super::build::block_stmt;
use super::build::pat_to_expr;
use super::AwaitAs;
use super::CtxKind;
use super::Lowerer;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::ast::stmt::decl::PatDecl;
use crate::ast::stmt::decl::VarDecl;
use crate::ast::stmt::decl::VarDeclMode;
use crate::ast::stmt::decl::VarDeclarator;
use crate::ast::stmt::BlockStmt;
use crate::ast::stmt::CatchBlock;
use crate::ast::stmt::ForInOfLhs;
use crate::ast::stmt::ForOfStmt;
use crate::ast::stmt::ForTripleStmt;
use crate::ast::stmt::ForTripleStmtInit;
use crate::ast::stmt::IfStmt;
use crate::ast::stmt::Stmt;
use crate::ast::stmt::ThrowStmt;
use crate::ast::stmt::TryStmt;
use crate::diag::CODE_UNSUPPORTED_FOR_AWAIT;
use crate::loc::Loc;
use crate::operator::OperatorName;
use crate::target::Feature;
use tracing::debug;

struct LoopNames {
  iter: String,
  more: String,
  temp: String,
  error: String,
}

impl Lowerer<'_> {
  pub(super) fn for_await(&mut self, mut for_of: Node<ForOfStmt>, out: &mut Vec<Node<Stmt>>) {
    let loc = for_of.loc;
    let ctx = self.ctx();
    let (kind, await_as, native_async) = (ctx.kind, ctx.await_as, ctx.native_async);
    let native = self.supports(Feature::ForAwait);

    if kind == CtxKind::Module && !self.supports(Feature::TopLevelAwait) {
      if self.dead_branches > 0 {
        for_of.stx.await_ = false;
      } else {
        self.top_level_await_unsupported(loc);
      };
      self.for_await_natively(&mut for_of);
      out.push(for_of.wrap(Stmt::from));
      return;
    };

    let lower = await_as != AwaitAs::Await || (!native && (kind == CtxKind::Module || native_async));
    if !lower {
      if !native {
        self.unsupported(loc, CODE_UNSUPPORTED_FOR_AWAIT, "for-await loops");
      };
      self.for_await_natively(&mut for_of);
      out.push(for_of.wrap(Stmt::from));
      return;
    };

    debug!("lowering for-await loop");
    let names = LoopNames {
      iter: self.temps.alloc_named_bound(self.scopes, "iter"),
      more: self.temps.alloc_named_bound(self.scopes, "more"),
      temp: self.temps.alloc_named_bound(self.scopes, "temp"),
      error: self.temps.alloc_named_bound(self.scopes, "error"),
    };
    let ForOfStmt { lhs, mut rhs, body, .. } = *for_of.stx;
    self.expr(&mut rhs);

    let mut stmts = Vec::new();
    let value = Expr::member(loc, Expr::id(loc, &names.temp), "value");
    let binding = match lhs {
      ForInOfLhs::Decl((mode, pattern)) => Node::new(loc, VarDecl {
        export: false,
        mode,
        declarators: vec![VarDeclarator {
          pattern,
          initializer: Some(value),
        }],
      })
      .wrap(Stmt::from),
      ForInOfLhs::Assign(pat) => Stmt::expr(Expr::assign(loc, pat_to_expr(pat), value)),
    };
    self.stmt(binding, &mut stmts);
    match *body.stx {
      Stmt::Block(block) => {
        for stmt in block.stx.body {
          self.stmt(stmt, &mut stmts);
        }
      }
      stx => self.stmt(Node::new(body.loc, stx), &mut stmts),
    };

    out.push(self.for_await_loop(loc, &names, rhs, stmts));
  }

  fn for_await_natively(&mut self, for_of: &mut Node<ForOfStmt>) {
    self.for_lhs(&mut for_of.stx.lhs);
    self.expr(&mut for_of.stx.rhs);
    self.single_stmt(&mut for_of.stx.body);
  }

  fn for_await_loop(
    &self,
    loc: Loc,
    names: &LoopNames,
    rhs: Node<Expr>,
    body: Vec<Node<Stmt>>,
  ) -> Node<Stmt> {
    let id = |name: &str| Expr::id(loc, name);

    // for (var iter = __forAwait(rhs), more, temp, error; more = !(temp = await iter.next()).done; more = false)
    let init = Node::new(loc, VarDecl {
      export: false,
      mode: VarDeclMode::Var,
      declarators: vec![
        VarDeclarator::new(loc, &names.iter, Some(Expr::helper(loc, "__forAwait", vec![rhs]))),
        VarDeclarator::new(loc, &names.more, None),
        VarDeclarator::new(loc, &names.temp, None),
        VarDeclarator::new(loc, &names.error, None),
      ],
    });
    let next = Expr::call(loc, Expr::member(loc, id(&names.iter), "next"), vec![]);
    let step = Expr::assign(loc, id(&names.temp), self.awaited(loc, next));
    let cond = Expr::assign(
      loc,
      id(&names.more),
      Expr::unary(loc, OperatorName::LogicalNot, Expr::member(loc, step, "done")),
    );
    let post = Expr::assign(loc, id(&names.more), Expr::bool(loc, false));
    let for_stmt = Node::new(loc, ForTripleStmt {
      init: ForTripleStmtInit::Decl(init),
      cond: Some(cond),
      post: Some(post),
      body: block_stmt(loc, body),
    })
    .wrap(Stmt::from);

    // catch (temp) { error = [temp]; }
    let catch = Node::new(loc, CatchBlock {
      parameter: Some(PatDecl::new(Pat::id(loc, &names.temp))),
      body: vec![Stmt::expr(Expr::assign(
        loc,
        id(&names.error),
        array(loc, vec![id(&names.temp)]),
      ))],
    });

    // try { more && (temp = iter.return) && await temp.call(iter); } finally { if (error) throw error[0]; }
    let close = Expr::binary(
      loc,
      OperatorName::LogicalAnd,
      Expr::binary(
        loc,
        OperatorName::LogicalAnd,
        id(&names.more),
        Expr::assign(loc, id(&names.temp), Expr::member(loc, id(&names.iter), "return")),
      ),
      self.awaited(
        loc,
        Expr::call(loc, Expr::member(loc, id(&names.temp), "call"), vec![id(&names.iter)]),
      ),
    );
    let rethrow = Node::new(loc, IfStmt {
      test: id(&names.error),
      consequent: Node::new(loc, ThrowStmt {
        value: Expr::computed_member(loc, id(&names.error), Expr::num(loc, "0")),
      })
      .wrap(Stmt::from),
      alternate: None,
    })
    .wrap(Stmt::from);
    let finally = Node::new(loc, TryStmt {
      wrapped: Node::new(loc, BlockStmt {
        body: vec![Stmt::expr(close)],
      }),
      catch: None,
      finally: Some(Node::new(loc, BlockStmt { body: vec![rethrow] })),
    })
    .wrap(Stmt::from);

    Node::new(loc, TryStmt {
      wrapped: Node::new(loc, BlockStmt {
        body: vec![for_stmt],
      }),
      catch: Some(catch),
      finally: Some(Node::new(loc, BlockStmt {
        body: vec![finally],
      })),
    })
    .wrap(Stmt::from)
  }
}
