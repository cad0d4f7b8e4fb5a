use super::Expr;
use crate::ast::class_or_object::ObjMember;
use crate::ast::node::Node;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub enum LitArrElem {
  Single(Node<Expr>),
  Rest(Node<Expr>),
  Empty,
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct LitArrExpr {
  pub elements: Vec<LitArrElem>,
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct LitBigIntExpr {
  // As written, without the trailing `n`. Keeps any radix prefix and numeric separators.
  #[drive(skip)]
  pub value: String,
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct LitBoolExpr {
  #[drive(skip)]
  pub value: bool,
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct LitNullExpr {}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct LitNumExpr {
  // Source text; printed verbatim.
  #[drive(skip)]
  pub value: String,
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct LitObjExpr {
  pub members: Vec<Node<ObjMember>>,
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct LitRegexExpr {
  #[drive(skip)]
  pub value: String, // Including delimiter slashes and any flags.
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct LitStrExpr {
  #[drive(skip)]
  pub value: String,
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub struct LitTemplateExpr {
  pub parts: Vec<LitTemplatePart>,
}

#[derive(Debug, Clone, Drive, DriveMut, Serialize)]
pub enum LitTemplatePart {
  Substitution(Node<Expr>),
  // Raw text between the delimiters, escapes not yet processed.
  #[drive(skip)]
  String(String),
}
