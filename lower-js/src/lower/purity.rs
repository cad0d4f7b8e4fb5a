use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::class_or_object::ClassOrObjVal;
use crate::ast::class_or_object::ObjMemberType;
use crate::ast::expr::lit::LitArrElem;
use crate::ast::expr::lit::LitTemplatePart;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ParamDecl;
use crate::ast::stmt::Stmt;
use crate::operator::OperatorName;
use serde::Deserialize;
use serde::Serialize;

/// Which parameter defaults an async lowering may evaluate outside the generator.
///
/// Parameters evaluate when the outer function is called. If evaluating one can throw, the
/// exception must instead reject the returned promise, so the parameters move into the generator
/// and the outer function forwards `arguments`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamPurity {
  /// Literals, identifiers, `this`, functions, and unary operators and array and object literals
  /// built from those.
  #[default]
  Syntactic,
  /// Only literals.
  Conservative,
}

impl ParamPurity {
  pub fn param_may_throw(self, param: &Node<ParamDecl>) -> bool {
    if !matches!(param.stx.pattern.stx.pat.stx.as_ref(), Pat::Id(_)) {
      return true;
    };
    match &param.stx.default_value {
      None => false,
      Some(default) => match self {
        ParamPurity::Syntactic => !is_syntactically_safe(default),
        ParamPurity::Conservative => !is_literal(default),
      },
    }
  }
}

fn is_literal(expr: &Node<Expr>) -> bool {
  match expr.stx.as_ref() {
    Expr::LitNull(_)
    | Expr::LitBool(_)
    | Expr::LitNum(_)
    | Expr::LitStr(_)
    | Expr::LitBigInt(_) => true,
    Expr::LitTemplate(t) => t
      .stx
      .parts
      .iter()
      .all(|p| matches!(p, LitTemplatePart::String(_))),
    _ => false,
  }
}

fn is_syntactically_safe(expr: &Node<Expr>) -> bool {
  if is_literal(expr) {
    return true;
  };
  match expr.stx.as_ref() {
    Expr::Id(_) | Expr::This(_) | Expr::ArrowFunc(_) | Expr::Func(_) => true,
    Expr::Unary(unary) => {
      matches!(
        unary.stx.operator,
        OperatorName::Void
          | OperatorName::LogicalNot
          | OperatorName::UnaryNegation
          | OperatorName::UnaryPlus
          | OperatorName::Typeof
      ) && is_syntactically_safe(&unary.stx.argument)
    }
    Expr::LitArr(arr) => arr.stx.elements.iter().all(|elem| match elem {
      LitArrElem::Single(expr) => is_syntactically_safe(expr),
      LitArrElem::Empty => true,
      LitArrElem::Rest(_) => false,
    }),
    Expr::LitObj(obj) => obj.stx.members.iter().all(|member| match &member.stx.typ {
      ObjMemberType::Valued {
        key: ClassOrObjKey::Direct(_),
        val: ClassOrObjVal::Prop(Some(value)),
      } => is_syntactically_safe(value),
      ObjMemberType::Valued {
        key: ClassOrObjKey::Direct(_),
        val: ClassOrObjVal::Getter(_) | ClassOrObjVal::Setter(_) | ClassOrObjVal::Method(_),
      } => true,
      ObjMemberType::Shorthand { .. } => true,
      _ => false,
    }),
    _ => false,
  }
}

/// Whether evaluating the expression can be skipped when its value is unused.
pub fn is_removable_expr(expr: &Node<Expr>) -> bool {
  match expr.stx.as_ref() {
    Expr::LitNull(_)
    | Expr::LitBool(_)
    | Expr::LitNum(_)
    | Expr::LitStr(_)
    | Expr::LitBigInt(_)
    | Expr::LitRegex(_)
    | Expr::This(_) => true,
    Expr::ArrowFunc(_) | Expr::Func(_) => true,
    Expr::Call(call) => {
      call.stx.pure
        && call
          .stx
          .arguments
          .iter()
          .all(|arg| !arg.stx.spread && is_removable_expr(&arg.stx.value))
    }
    Expr::Unary(unary) => match unary.stx.operator {
      OperatorName::UnaryPlus
      | OperatorName::UnaryNegation
      | OperatorName::LogicalNot
      | OperatorName::BitwiseNot
      | OperatorName::Void => is_removable_expr(&unary.stx.argument),
      OperatorName::Typeof => {
        matches!(unary.stx.argument.stx.as_ref(), Expr::Id(_))
          || is_removable_expr(&unary.stx.argument)
      }
      _ => false,
    },
    Expr::Binary(bin) => {
      bin.stx.operator == OperatorName::Comma
        && is_removable_expr(&bin.stx.left)
        && is_removable_expr(&bin.stx.right)
    }
    Expr::Cond(cond) => {
      is_removable_expr(&cond.stx.test)
        && is_removable_expr(&cond.stx.consequent)
        && is_removable_expr(&cond.stx.alternate)
    }
    Expr::LitArr(arr) => arr.stx.elements.iter().all(|elem| match elem {
      LitArrElem::Single(expr) => is_removable_expr(expr),
      LitArrElem::Empty => true,
      LitArrElem::Rest(_) => false,
    }),
    Expr::LitTemplate(t) => t.stx.parts.iter().all(|p| match p {
      LitTemplatePart::Substitution(_) => false,
      LitTemplatePart::String(_) => true,
    }),
    _ => false,
  }
}

/// Whether running the statements can be skipped when nothing observes them.
pub fn is_removable_stmts(stmts: &[Node<Stmt>]) -> bool {
  stmts.iter().all(|stmt| match stmt.stx.as_ref() {
    Stmt::Empty(_) | Stmt::Comment(_) => true,
    Stmt::Block(block) => is_removable_stmts(&block.stx.body),
    Stmt::Expr(e) => is_removable_expr(&e.stx.expr),
    Stmt::Try(t) => {
      is_removable_stmts(&t.stx.wrapped.stx.body)
        && t
          .stx
          .catch
          .as_ref()
          .map_or(true, |c| is_removable_stmts(&c.stx.body))
        && t
          .stx
          .finally
          .as_ref()
          .map_or(true, |f| is_removable_stmts(&f.stx.body))
    }
    _ => false,
  })
}

#[cfg(test)]
mod tests {
  use super::is_removable_stmts;
  use super::ParamPurity;
  use crate::ast::expr::Expr;
  use crate::ast::stmt::Stmt;
  use crate::parse::parse;

  fn params_may_throw(purity: ParamPurity, src: &str) -> Vec<bool> {
    let ast = parse(src).unwrap().ast;
    let Stmt::Expr(stmt) = ast.stx.body[0].stx.as_ref() else {
      panic!("expected expression statement");
    };
    let Expr::ArrowFunc(arrow) = stmt.stx.expr.stx.as_ref() else {
      panic!("expected arrow");
    };
    arrow
      .stx
      .func
      .stx
      .parameters
      .iter()
      .map(|p| purity.param_may_throw(p))
      .collect()
  }

  #[test]
  fn test_syntactic_purity() {
    assert_eq!(
      params_may_throw(
        ParamPurity::Syntactic,
        "(a, b = 1, c = x, d = -1, e = [1, {f: 2}], g = () => h(), i = /x/, j = `${k}`, l = m(), {n}) => {}"
      ),
      vec![false, false, false, false, false, false, true, true, true, true]
    );
  }

  #[test]
  fn test_conservative_purity() {
    assert_eq!(
      params_may_throw(ParamPurity::Conservative, "(a, b = 1, c = x, d = -1, e = 'e') => {}"),
      vec![false, false, true, true, false]
    );
  }

  #[test]
  fn test_removable_statements() {
    let removable = |src: &str| is_removable_stmts(&parse(src).unwrap().ast.stx.body);
    assert!(removable("try { /* @__PURE__ */ a() } finally { 1 }"));
    assert!(removable("; {}"));
    assert!(!removable("try {} finally { a() }"));
    assert!(!removable("var x = 1"));
  }
}
