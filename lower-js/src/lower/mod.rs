//! The lowering pass. One recursive dispatcher visits the tree in evaluation order and hands each
//! construct the target lacks to the engine for its kind. Engines rewrite nodes in place and take
//! temps from the [`TempManager`].

mod arrow;
mod build;
mod class;
mod expr;
mod for_await;
mod func;
mod leaf;
mod logical;
mod optional_chain;
mod private;
mod purity;
mod stmt;
#[cfg(test)]
mod tests;

pub use purity::ParamPurity;

use crate::ast::node::Node;
use crate::ast::stmt::Stmt;
use crate::ast::stx::TopLevel;
use crate::diag::Diagnostic;
use crate::diag::CODE_UNSUPPORTED_SYNTAX;
use crate::loc::Loc;
use crate::scope::ScopeTree;
use crate::target::Feature;
use crate::temp::var_decl_stmt;
use crate::temp::TempManager;
use crate::LowerOptions;
use private::ClassCtx;
use tracing::debug_span;

/// What owns `this` and `arguments` where the dispatcher currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CtxKind {
  Module,
  Function,
  Arrow,
  // A class field initializer or static block that stays in the class body.
  FieldInit,
  // A static initializer or static block moved after the class.
  StaticInit,
}

/// How `await` is expressed in the function being visited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AwaitAs {
  Await,
  Yield,
  YieldAwait,
}

#[derive(Debug)]
struct FuncCtx {
  kind: CtxKind,
  // Temp frame of the body, where `_this` and `_arguments` are declared.
  frame: usize,
  // An arrow becoming a `function`.
  lowered_arrow: bool,
  // An async arrow whose body moves into a generator.
  lifted_arrow: bool,
  await_as: AwaitAs,
  // An async function or generator kept as written, where `for await` may stay.
  native_async: bool,
  // Visiting parameters, so temps are hosted by per-expression arrows.
  in_params: bool,
  this_alias: Option<String>,
  arguments_alias: Option<String>,
  uses_this: bool,
  uses_arguments: bool,
}

impl FuncCtx {
  fn new(kind: CtxKind, frame: usize) -> FuncCtx {
    FuncCtx {
      kind,
      frame,
      lowered_arrow: false,
      lifted_arrow: false,
      await_as: AwaitAs::Await,
      native_async: false,
      in_params: false,
      this_alias: None,
      arguments_alias: None,
      uses_this: false,
      uses_arguments: false,
    }
  }
}

pub(crate) struct Lowerer<'a> {
  options: &'a LowerOptions,
  scopes: &'a ScopeTree,
  temps: TempManager,
  diagnostics: Vec<Diagnostic>,
  funcs: Vec<FuncCtx>,
  classes: Vec<ClassCtx>,
  // Nesting depth of branches that never run, e.g. `if (false) ...`.
  dead_branches: u32,
}

impl<'a> Lowerer<'a> {
  fn new(options: &'a LowerOptions, scopes: &'a ScopeTree) -> Lowerer<'a> {
    Lowerer {
      options,
      scopes,
      temps: TempManager::new(scopes.root()),
      diagnostics: Vec::new(),
      funcs: vec![FuncCtx::new(CtxKind::Module, 0)],
      classes: Vec::new(),
      dead_branches: 0,
    }
  }

  fn supports(&self, feature: Feature) -> bool {
    self.options.target.supports(feature)
  }

  fn report(&mut self, code: &'static str, message: impl Into<String>, loc: Loc) {
    self.diagnostics.push(Diagnostic::error(code, message, loc));
  }

  fn unsupported(&mut self, loc: Loc, code: &'static str, what: &str) {
    self.report(
      code,
      format!("Transforming {what} to the configured target environment is not supported yet"),
      loc,
    );
  }

  fn unsupported_syntax(&mut self, loc: Loc, what: &str) {
    self.unsupported(loc, CODE_UNSUPPORTED_SYNTAX, what);
  }

  fn ctx(&self) -> &FuncCtx {
    self.funcs.last().unwrap_or_else(|| unreachable!("no function context"))
  }

  fn ctx_mut(&mut self) -> &mut FuncCtx {
    self
      .funcs
      .last_mut()
      .unwrap_or_else(|| unreachable!("no function context"))
  }

  fn top_level(&mut self, body: &mut Vec<Node<Stmt>>) {
    let mut out = Vec::with_capacity(body.len());
    for stmt in std::mem::take(body) {
      let loc = stmt.loc;
      let mut lowered = Vec::new();
      self.stmt(stmt, &mut lowered);
      let temps = self.temps.finish_group();
      if !temps.is_empty() {
        out.push(var_decl_stmt(loc, temps));
      };
      out.extend(lowered);
    }
    *body = out;
  }
}

/// Rewrites everything in `top_level` the target lacks. Constructs without a rewrite are left as
/// they are and reported. Names of synthesized bindings are reserved in `scopes`.
pub fn lower(
  top_level: &mut Node<TopLevel>,
  options: &LowerOptions,
  scopes: &mut ScopeTree,
) -> Vec<Diagnostic> {
  let span = debug_span!("lower", target = %options.target);
  let _entered = span.enter();
  let (names, diagnostics) = {
    let mut lowerer = Lowerer::new(options, scopes);
    lowerer.top_level(&mut top_level.stx.body);
    let names: Vec<String> = lowerer.temps.names().map(str::to_string).collect();
    (names, lowerer.diagnostics)
  };
  for name in names {
    scopes.reserve(&name);
  }
  diagnostics
}
