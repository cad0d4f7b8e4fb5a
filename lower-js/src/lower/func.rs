use super::build::body_stmts;
use super::build::func_expr;
use super::build::func_node;
use super::build::param_iife;
use super::build::return_stmt;
use super::build::take_expr;
use super::AwaitAs;
use super::CtxKind;
use super::FuncCtx;
use super::Lowerer;
use crate::ast::expr::lit::LitArrElem;
use crate::ast::expr::lit::LitArrExpr;
use crate::ast::expr::Expr;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ParamDecl;
use crate::diag::CODE_UNSUPPORTED_ASYNC;
use crate::diag::CODE_UNSUPPORTED_GENERATOR;
use crate::loc::Loc;
use crate::scope::ScopeKind;
use crate::target::Feature;
use crate::temp::insert_var_decl;
use crate::temp::FrameKind;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FuncMode {
  Native,
  AsyncToGenerator,
  AsyncGeneratorToGenerator,
}

impl Lowerer<'_> {
  fn func_mode(&mut self, loc: Loc, async_: bool, generator: bool) -> FuncMode {
    let generators = self.supports(Feature::Generator);
    match (async_, generator) {
      (false, false) => FuncMode::Native,
      (false, true) => {
        if !generators {
          self.unsupported(loc, CODE_UNSUPPORTED_GENERATOR, "generator functions");
        };
        FuncMode::Native
      }
      (true, false) => {
        if self.supports(Feature::AsyncAwait) {
          FuncMode::Native
        } else if generators {
          FuncMode::AsyncToGenerator
        } else {
          self.unsupported(loc, CODE_UNSUPPORTED_ASYNC, "async functions");
          FuncMode::Native
        }
      }
      (true, true) => {
        if self.supports(Feature::AsyncGenerator) {
          FuncMode::Native
        } else if generators {
          FuncMode::AsyncGeneratorToGenerator
        } else if !self.supports(Feature::AsyncAwait) {
          self.unsupported(loc, CODE_UNSUPPORTED_ASYNC, "async functions");
          FuncMode::Native
        } else {
          self.unsupported(loc, CODE_UNSUPPORTED_GENERATOR, "generator functions");
          FuncMode::Native
        }
      }
    }
  }

  /// Lowers a function of any kind: declaration, expression, arrow, method or accessor.
  pub(super) fn func(&mut self, func: &mut Node<Func>) {
    let loc = func.loc;
    let f = func.stx.as_mut();
    let mode = self.func_mode(loc, f.async_, f.generator);
    let params_may_throw = f
      .parameters
      .iter()
      .any(|p| self.options.param_purity.param_may_throw(p));
    let owner = self
      .scopes
      .scope_at(loc, ScopeKind::Function)
      .unwrap_or_else(|| self.scopes.root());

    self.temps.push(FrameKind::Function, owner);
    let kind = if f.arrow {
      CtxKind::Arrow
    } else {
      CtxKind::Function
    };
    let mut ctx = FuncCtx::new(kind, self.temps.current());
    ctx.lowered_arrow = f.arrow && !self.supports(Feature::Arrow);
    ctx.lifted_arrow = f.arrow && mode != FuncMode::Native;
    ctx.await_as = match mode {
      FuncMode::Native => AwaitAs::Await,
      FuncMode::AsyncToGenerator => AwaitAs::Yield,
      FuncMode::AsyncGeneratorToGenerator => AwaitAs::YieldAwait,
    };
    ctx.native_async = f.async_
      && mode == FuncMode::Native
      && self.supports(if f.generator {
        Feature::AsyncGenerator
      } else {
        Feature::AsyncAwait
      });
    self.funcs.push(ctx);

    self.params(&mut f.parameters);
    match &mut f.body {
      FuncBody::Block(body) => self.stmts(body),
      FuncBody::Expression(e) => self.expr(e),
    };
    if !self.supports(Feature::ObjectRestSpread) {
      self.lower_param_rest(f);
    };

    let ctx = self
      .funcs
      .pop()
      .unwrap_or_else(|| unreachable!("function context"));
    let temps = self.temps.pop();
    if !temps.is_empty() {
      if let FuncBody::Expression(_) = &f.body {
        let body = std::mem::replace(&mut f.body, FuncBody::Block(Vec::new()));
        f.body = FuncBody::Block(body_stmts(body));
      };
      if let FuncBody::Block(body) = &mut f.body {
        insert_var_decl(body, loc, temps);
      };
    };

    if mode != FuncMode::Native {
      let forward = params_may_throw || (!f.arrow && ctx.uses_arguments);
      self.lower_async(loc, f, mode, forward, ctx.uses_this);
    };
  }

  fn params(&mut self, params: &mut [Node<ParamDecl>]) {
    self.ctx_mut().in_params = true;
    for param in params.iter_mut() {
      let loc = param.loc;
      if param.stx.rest && !self.supports(Feature::RestArgument) {
        self.unsupported_syntax(loc, "rest arguments");
      };
      if param.stx.default_value.is_some() && !self.supports(Feature::DefaultArgument) {
        self.unsupported_syntax(loc, "default arguments");
      };
      self.pat_decl(&mut param.stx.pattern);
      if let Some(default) = &mut param.stx.default_value {
        self.root_expr(default);
      };
    }
    self.ctx_mut().in_params = false;
  }

  /// Lowers a parameter default or pattern root. Temps it needs become parameters of arrows
  /// wrapping it, the first temp outermost, since the function body's `var`s are not yet in scope.
  pub(super) fn hosted_param_expr(&mut self, e: &mut Node<Expr>) {
    let loc = e.loc;
    let owner = self.temps.owner();
    self.temps.push(FrameKind::Params, owner);
    self.ctx_mut().in_params = false;
    self.expr(e);
    self.ctx_mut().in_params = true;
    for temp in self.temps.pop().into_iter().rev() {
      let inner = take_expr(e);
      *e = param_iife(loc, temp.name, inner);
    }
  }

  fn lower_async(&mut self, loc: Loc, f: &mut Func, mode: FuncMode, forward: bool, uses_this: bool) {
    let helper = match mode {
      FuncMode::AsyncToGenerator => {
        debug!("lowering async function");
        "__async"
      }
      FuncMode::AsyncGeneratorToGenerator => {
        debug!("lowering async generator");
        "__asyncGenerator"
      }
      FuncMode::Native => unreachable!("native function"),
    };
    let body = body_stmts(std::mem::replace(&mut f.body, FuncBody::Block(Vec::new())));
    let params = std::mem::take(&mut f.parameters);
    let (outer, inner, args) = if forward {
      // Placeholders keep the function's `length`.
      let simple = params
        .iter()
        .take_while(|p| !p.stx.rest && p.stx.default_value.is_none())
        .count();
      let mut outer: Vec<Node<ParamDecl>> = (0..simple)
        .map(|i| ParamDecl::simple(loc, format!("_{i}")))
        .collect();
      let args = if f.arrow {
        let mut rest = ParamDecl::simple(loc, format!("_{simple}"));
        rest.stx.rest = true;
        outer.push(rest);
        let mut elements: Vec<LitArrElem> = (0..simple)
          .map(|i| LitArrElem::Single(Expr::id(loc, format!("_{i}"))))
          .collect();
        elements.push(LitArrElem::Rest(Expr::id(loc, format!("_{simple}"))));
        Node::new(loc, LitArrExpr { elements }).wrap(Expr::from)
      } else {
        Expr::id(loc, "arguments")
      };
      (outer, params, args)
    } else {
      (params, Vec::new(), Expr::null(loc))
    };
    let this_arg = if !f.arrow || uses_this {
      Expr::this(loc)
    } else {
      Expr::null(loc)
    };
    let generator = func_expr(
      loc,
      func_node(loc, false, true, inner, FuncBody::Block(body)),
    );
    let call = Expr::helper(loc, helper, vec![this_arg, args, generator]);
    f.async_ = false;
    f.generator = false;
    f.parameters = outer;
    f.body = if f.arrow {
      FuncBody::Expression(call)
    } else {
      FuncBody::Block(vec![return_stmt(loc, call)])
    };
  }
}
