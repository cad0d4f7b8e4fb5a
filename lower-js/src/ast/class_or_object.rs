use super::expr::Expr;
use super::expr::IdExpr;
use super::func::Func;
use super::node::Node;
use super::stmt::Stmt;
use crate::loc::Loc;
use crate::token::TT;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

/// This is a node as the key may not be the same as source[node.loc], due to decoding/normalization.
#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct ClassOrObjMemberDirectKey {
  #[drive(skip)]
  pub key: String,
  // The original token type: identifier or keyword, `LiteralString` (key is the decoded value),
  // `LiteralNumber`, `LiteralBigInt` (key is the digits without `n`), or `PrivateMember` (key
  // includes `#`).
  #[drive(skip)]
  pub tt: TT,
}

// WARNING: This enum must exist, and the two variants cannot be merged by representing Direct with an IdExpr, as it's not a usage of a variable.
#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub enum ClassOrObjKey {
  Direct(Node<ClassOrObjMemberDirectKey>),
  Computed(Node<Expr>),
}

impl ClassOrObjKey {
  pub fn direct(loc: Loc, key: impl Into<String>, tt: TT) -> ClassOrObjKey {
    ClassOrObjKey::Direct(Node::new(loc, ClassOrObjMemberDirectKey {
      key: key.into(),
      tt,
    }))
  }

  pub fn is_private(&self) -> bool {
    matches!(self, ClassOrObjKey::Direct(d) if d.stx.tt == TT::PrivateMember)
  }

  /// The name of a non-computed key, e.g. `constructor` or `#x`.
  pub fn direct_name(&self) -> Option<&str> {
    match self {
      ClassOrObjKey::Direct(d) => Some(&d.stx.key),
      ClassOrObjKey::Computed(_) => None,
    }
  }
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct ClassOrObjGetter {
  pub func: Node<Func>, // `parameters` is empty.
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct ClassOrObjMethod {
  pub func: Node<Func>,
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct ClassOrObjSetter {
  pub func: Node<Func>, // `parameters` contains exactly one ParamDecl with no `default_value` or `rest`.
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct ClassStaticBlock {
  pub body: Vec<Node<Stmt>>,
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub enum ClassOrObjVal {
  Getter(Node<ClassOrObjGetter>),
  Setter(Node<ClassOrObjSetter>),
  Method(Node<ClassOrObjMethod>),
  // Must be Some if object, as shorthands are covered by ObjMemberType::Shorthand.
  Prop(Option<Node<Expr>>),
  // `accessor x = v`. Only in classes.
  Accessor(Option<Node<Expr>>),
  // `static { ... }`. The member key is unused.
  StaticBlock(Node<ClassStaticBlock>),
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub enum ObjMemberType {
  Valued {
    key: ClassOrObjKey,
    val: ClassOrObjVal,
  },
  Shorthand {
    id: Node<IdExpr>,
  },
  Rest {
    val: Node<Expr>,
  },
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct ClassMember {
  pub key: ClassOrObjKey,
  #[drive(skip)]
  pub static_: bool,
  pub val: ClassOrObjVal,
}

// This is a node instead of an enum so that we can replace it when lowering e.g. object spread.
#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct ObjMember {
  pub typ: ObjMemberType,
}
