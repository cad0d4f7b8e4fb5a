pub mod lit;
pub mod pat;

use super::class_or_object::ClassMember;
use super::func::Func;
use super::node::Node;
use crate::loc::Loc;
use crate::operator::OperatorName;
use derive_more::derive::From;
use derive_more::derive::TryInto;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use lit::LitArrExpr;
use lit::LitBigIntExpr;
use lit::LitBoolExpr;
use lit::LitNullExpr;
use lit::LitNumExpr;
use lit::LitObjExpr;
use lit::LitRegexExpr;
use lit::LitStrExpr;
use lit::LitTemplateExpr;
use lit::LitTemplatePart;
use pat::ArrPat;
use pat::ClassOrFuncName;
use pat::ObjPat;
use serde::Serialize;

// We must wrap each variant with Node<T> as otherwise we won't be able to visit Node<T> instead of just T.
#[derive(Debug, Clone, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(tag = "$t")]
pub enum Expr {
  ArrowFunc(Node<ArrowFuncExpr>),
  Binary(Node<BinaryExpr>),
  Call(Node<CallExpr>),
  Class(Node<ClassExpr>),
  ComputedMember(Node<ComputedMemberExpr>),
  Cond(Node<CondExpr>),
  Func(Node<FuncExpr>),
  Id(Node<IdExpr>),
  Import(Node<ImportExpr>),
  ImportMeta(Node<ImportMeta>),
  Member(Node<MemberExpr>),
  New(Node<NewExpr>),
  NewTarget(Node<NewTarget>),
  Super(Node<SuperExpr>),
  TaggedTemplate(Node<TaggedTemplateExpr>),
  This(Node<ThisExpr>),
  Unary(Node<UnaryExpr>),
  UnaryPostfix(Node<UnaryPostfixExpr>),
  Yield(Node<YieldExpr>),

  // Literals.
  LitArr(Node<LitArrExpr>),
  LitBigInt(Node<LitBigIntExpr>),
  LitBool(Node<LitBoolExpr>),
  LitNull(Node<LitNullExpr>),
  LitNum(Node<LitNumExpr>),
  LitObj(Node<LitObjExpr>),
  LitRegex(Node<LitRegexExpr>),
  LitStr(Node<LitStrExpr>),
  LitTemplate(Node<LitTemplateExpr>),

  // Destructuring assignment targets.
  ArrPat(Node<ArrPat>),
  ObjPat(Node<ObjPat>),
}

/// Whether a member access or call participates in an optional chain.
///
/// `Start` marks the link carrying `?.`; `Continue` marks the links after it that are short-circuited
/// along with it. Parentheses end a chain, so links outside them are `None`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub enum OptionalChain {
  #[default]
  None,
  Start,
  Continue,
}

impl OptionalChain {
  pub fn is_chain(self) -> bool {
    self != OptionalChain::None
  }
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct CallArg {
  #[drive(skip)]
  pub spread: bool,
  pub value: Node<Expr>,
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct ArrowFuncExpr {
  pub func: Node<Func>, // Always arrow.
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct BinaryExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub left: Node<Expr>,
  pub right: Node<Expr>,
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct CallExpr {
  #[drive(skip)]
  pub optional_chaining: OptionalChain,
  // Printed with a leading `/* @__PURE__ */` annotation.
  #[drive(skip)]
  pub pure: bool,
  pub callee: Node<Expr>,
  pub arguments: Vec<Node<CallArg>>,
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct ClassExpr {
  pub name: Option<Node<ClassOrFuncName>>,
  pub extends: Option<Node<Expr>>,
  pub members: Vec<Node<ClassMember>>,
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct CondExpr {
  pub test: Node<Expr>,
  pub consequent: Node<Expr>,
  pub alternate: Node<Expr>,
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct ComputedMemberExpr {
  #[drive(skip)]
  pub optional_chaining: OptionalChain,
  pub object: Node<Expr>,
  pub member: Node<Expr>,
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct FuncExpr {
  pub name: Option<Node<ClassOrFuncName>>,
  pub func: Node<Func>,
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct IdExpr {
  #[drive(skip)]
  pub name: String,
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct ImportExpr {
  pub module: Node<Expr>,
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct ImportMeta {}

// Dedicated type so that the property name is never mistaken for a variable usage. A `right` starting
// with `#` is a private name.
#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct MemberExpr {
  #[drive(skip)]
  pub optional_chaining: OptionalChain,
  pub left: Node<Expr>,
  #[drive(skip)]
  pub right: String,
}

impl MemberExpr {
  pub fn is_private(&self) -> bool {
    self.right.starts_with('#')
  }
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct NewExpr {
  pub callee: Node<Expr>,
  pub arguments: Vec<Node<CallArg>>,
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct NewTarget {}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct SuperExpr {}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct ThisExpr {}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct TaggedTemplateExpr {
  pub function: Node<Expr>,
  pub parts: Vec<LitTemplatePart>,
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct UnaryExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub argument: Node<Expr>,
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct UnaryPostfixExpr {
  #[drive(skip)]
  pub operator: OperatorName,
  pub argument: Node<Expr>,
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct YieldExpr {
  #[drive(skip)]
  pub delegate: bool,
  pub argument: Option<Node<Expr>>,
}

// Constructors used when synthesizing code.
impl Expr {
  pub fn id(loc: Loc, name: impl Into<String>) -> Node<Expr> {
    Node::new(loc, IdExpr { name: name.into() }).wrap(Expr::from)
  }

  pub fn this(loc: Loc) -> Node<Expr> {
    Node::new(loc, ThisExpr {}).wrap(Expr::from)
  }

  pub fn null(loc: Loc) -> Node<Expr> {
    Node::new(loc, LitNullExpr {}).wrap(Expr::from)
  }

  pub fn bool(loc: Loc, value: bool) -> Node<Expr> {
    Node::new(loc, LitBoolExpr { value }).wrap(Expr::from)
  }

  pub fn num(loc: Loc, value: impl Into<String>) -> Node<Expr> {
    Node::new(loc, LitNumExpr {
      value: value.into(),
    })
    .wrap(Expr::from)
  }

  pub fn str(loc: Loc, value: impl Into<String>) -> Node<Expr> {
    Node::new(loc, LitStrExpr {
      value: value.into(),
    })
    .wrap(Expr::from)
  }

  /// `void 0`.
  pub fn undefined(loc: Loc) -> Node<Expr> {
    Expr::unary(loc, OperatorName::Void, Expr::num(loc, "0"))
  }

  pub fn unary(loc: Loc, operator: OperatorName, argument: Node<Expr>) -> Node<Expr> {
    Node::new(loc, UnaryExpr { operator, argument }).wrap(Expr::from)
  }

  pub fn binary(
    loc: Loc,
    operator: OperatorName,
    left: Node<Expr>,
    right: Node<Expr>,
  ) -> Node<Expr> {
    Node::new(loc, BinaryExpr {
      operator,
      left,
      right,
    })
    .wrap(Expr::from)
  }

  pub fn assign(loc: Loc, left: Node<Expr>, right: Node<Expr>) -> Node<Expr> {
    Expr::binary(loc, OperatorName::Assignment, left, right)
  }

  /// Joins the expressions with the comma operator. Returns `None` if there are none.
  pub fn comma(exprs: impl IntoIterator<Item = Node<Expr>>) -> Option<Node<Expr>> {
    exprs.into_iter().reduce(|left, right| {
      let loc = left.loc + right.loc;
      Expr::binary(loc, OperatorName::Comma, left, right)
    })
  }

  pub fn cond(
    loc: Loc,
    test: Node<Expr>,
    consequent: Node<Expr>,
    alternate: Node<Expr>,
  ) -> Node<Expr> {
    Node::new(loc, CondExpr {
      test,
      consequent,
      alternate,
    })
    .wrap(Expr::from)
  }

  pub fn member(loc: Loc, left: Node<Expr>, right: impl Into<String>) -> Node<Expr> {
    Node::new(loc, MemberExpr {
      optional_chaining: OptionalChain::None,
      left,
      right: right.into(),
    })
    .wrap(Expr::from)
  }

  pub fn computed_member(loc: Loc, object: Node<Expr>, member: Node<Expr>) -> Node<Expr> {
    Node::new(loc, ComputedMemberExpr {
      optional_chaining: OptionalChain::None,
      object,
      member,
    })
    .wrap(Expr::from)
  }

  pub fn call(loc: Loc, callee: Node<Expr>, arguments: Vec<Node<Expr>>) -> Node<Expr> {
    Node::new(loc, CallExpr {
      optional_chaining: OptionalChain::None,
      pure: false,
      callee,
      arguments: arguments
        .into_iter()
        .map(|value| {
          Node::new(value.loc, CallArg {
            spread: false,
            value,
          })
        })
        .collect(),
    })
    .wrap(Expr::from)
  }

  /// Calls a runtime helper such as `__publicField`.
  pub fn helper(loc: Loc, name: &str, arguments: Vec<Node<Expr>>) -> Node<Expr> {
    Expr::call(loc, Expr::id(loc, name), arguments)
  }

  pub fn is_id(&self, name: &str) -> bool {
    matches!(self, Expr::Id(id) if id.stx.name == name)
  }
}
