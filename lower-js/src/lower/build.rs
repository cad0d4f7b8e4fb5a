//! Small constructors for the code the engines synthesize.

use crate::ast::class_or_object::ClassMember;
use crate::ast::expr::lit::LitArrElem;
use crate::ast::expr::lit::LitArrExpr;
use crate::ast::expr::pat::ClassOrFuncName;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::ArrowFuncExpr;
use crate::ast::expr::CallArg;
use crate::ast::expr::CallExpr;
use crate::ast::expr::ClassExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::FuncExpr;
use crate::ast::expr::NewExpr;
use crate::ast::expr::OptionalChain;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ParamDecl;
use crate::ast::stmt::decl::VarDecl;
use crate::ast::stmt::decl::VarDeclMode;
use crate::ast::stmt::decl::VarDeclarator;
use crate::ast::stmt::BlockStmt;
use crate::ast::stmt::EmptyStmt;
use crate::ast::stmt::ReturnStmt;
use crate::ast::stmt::Stmt;
use crate::loc::Loc;

/// Prefix of the name standing for a class binding in the class's moved static code until the
/// binding is known. The class nesting depth follows it. It cannot collide with a source identifier.
pub const CLASS_REF: &str = "\u{0}class";

/// Marks an optional chain that collapsed to `void 0` because its base is always nullish, so a
/// statement can drop the value.
pub struct NullishChain;

pub fn dummy_expr() -> Node<Expr> {
  Expr::id(Loc(0, 0), "")
}

pub fn take_expr(expr: &mut Node<Expr>) -> Node<Expr> {
  std::mem::replace(expr, dummy_expr())
}

/// Identifiers, `this`, `super` and primitive literals can be evaluated again without effect.
pub fn is_reusable(expr: &Node<Expr>) -> bool {
  matches!(
    expr.stx.as_ref(),
    Expr::Id(_)
      | Expr::This(_)
      | Expr::Super(_)
      | Expr::LitNull(_)
      | Expr::LitBool(_)
      | Expr::LitNum(_)
      | Expr::LitStr(_)
      | Expr::LitBigInt(_)
  )
}

pub fn empty_stmt(loc: Loc) -> Node<Stmt> {
  Node::new(loc, EmptyStmt {}).wrap(Stmt::from)
}

pub fn block_stmt(loc: Loc, body: Vec<Node<Stmt>>) -> Node<Stmt> {
  Node::new(loc, BlockStmt { body }).wrap(Stmt::from)
}

pub fn return_stmt(loc: Loc, value: Node<Expr>) -> Node<Stmt> {
  Node::new(loc, ReturnStmt { value: Some(value) }).wrap(Stmt::from)
}

pub fn var_stmt(loc: Loc, export: bool, mode: VarDeclMode, name: &str, init: Node<Expr>) -> Node<Stmt> {
  Node::new(loc, VarDecl {
    export,
    mode,
    declarators: vec![VarDeclarator::new(loc, name, Some(init))],
  })
  .wrap(Stmt::from)
}

pub fn array(loc: Loc, elements: Vec<Node<Expr>>) -> Node<Expr> {
  Node::new(loc, LitArrExpr {
    elements: elements.into_iter().map(LitArrElem::Single).collect(),
  })
  .wrap(Expr::from)
}

pub fn new_expr(loc: Loc, callee: &str, arguments: Vec<Node<Expr>>) -> Node<Expr> {
  Node::new(loc, NewExpr {
    callee: Expr::id(loc, callee),
    arguments: arguments.into_iter().map(call_arg).collect(),
  })
  .wrap(Expr::from)
}

pub fn call_arg(value: Node<Expr>) -> Node<CallArg> {
  Node::new(value.loc, CallArg {
    spread: false,
    value,
  })
}

/// `callee.call(this_arg, ...arguments)`.
pub fn call_with_this(
  loc: Loc,
  callee: Node<Expr>,
  this_arg: Node<Expr>,
  mut arguments: Vec<Node<CallArg>>,
) -> Node<Expr> {
  arguments.insert(0, call_arg(this_arg));
  Node::new(loc, CallExpr {
    optional_chaining: OptionalChain::None,
    pure: false,
    callee: Expr::member(loc, callee, "call"),
    arguments,
  })
  .wrap(Expr::from)
}

pub fn func_node(loc: Loc, async_: bool, generator: bool, parameters: Vec<Node<ParamDecl>>, body: FuncBody) -> Node<Func> {
  Node::new(loc, Func {
    arrow: false,
    async_,
    generator,
    parameters,
    body,
  })
}

pub fn func_expr(loc: Loc, func: Node<Func>) -> Node<Expr> {
  Node::new(loc, FuncExpr { name: None, func }).wrap(Expr::from)
}

pub fn arrow_expr(loc: Loc, parameters: Vec<Node<ParamDecl>>, body: FuncBody) -> Node<Expr> {
  let func = Node::new(loc, Func {
    arrow: true,
    async_: false,
    generator: false,
    parameters,
    body,
  });
  Node::new(loc, ArrowFuncExpr { func }).wrap(Expr::from)
}

/// `((param) => body)()`, binding `param` for the duration of `body`.
pub fn param_iife(loc: Loc, param: String, body: Node<Expr>) -> Node<Expr> {
  let arrow = arrow_expr(
    loc,
    vec![ParamDecl::simple(loc, param)],
    FuncBody::Expression(body),
  );
  Expr::call(loc, arrow, vec![])
}

pub fn class_expr(
  loc: Loc,
  name: Option<String>,
  extends: Option<Node<Expr>>,
  members: Vec<Node<ClassMember>>,
) -> Node<Expr> {
  Node::new(loc, ClassExpr {
    name: name.map(|name| Node::new(loc, ClassOrFuncName { name })),
    extends,
    members,
  })
  .wrap(Expr::from)
}

/// Turns a function body into statements, returning the value of an expression body.
pub fn body_stmts(body: FuncBody) -> Vec<Node<Stmt>> {
  match body {
    FuncBody::Block(stmts) => stmts,
    FuncBody::Expression(expr) => {
      let loc = expr.loc;
      vec![return_stmt(loc, expr)]
    }
  }
}

/// An assignment target pattern as the left of `=`.
pub fn pat_to_expr(pat: Node<Pat>) -> Node<Expr> {
  let loc = pat.loc;
  match *pat.stx {
    Pat::Id(id) => Expr::id(loc, id.stx.name),
    Pat::Arr(arr) => Node::new(loc, Expr::ArrPat(arr)),
    Pat::Obj(obj) => Node::new(loc, Expr::ObjPat(obj)),
    Pat::AssignTarget(target) => target,
  }
}
