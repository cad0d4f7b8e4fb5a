use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::operator::Associativity;
use crate::operator::OperatorName;
use crate::operator::OPERATORS;
use crate::operator::PRECEDENCE_ASSIGNMENT;
use crate::operator::PRECEDENCE_CALL_MEMBER;
use crate::operator::PRECEDENCE_CONDITIONAL;
use crate::operator::PRECEDENCE_PRIMARY;

#[derive(Clone, Copy, Debug)]
pub enum Side {
  Left,
  Right,
}

/// The lowest precedence an operand on `side` of `op` may have without being parenthesized.
pub fn child_min_prec_for_binary(op: OperatorName, side: Side) -> u8 {
  let operator = &OPERATORS[&op];
  let prec = operator.precedence;
  match (operator.associativity, side) {
    (Associativity::Left, Side::Left) | (Associativity::Right, Side::Right) => prec,
    (Associativity::Left, Side::Right) | (Associativity::Right, Side::Left) => prec + 1,
  }
}

/// Returns the precedence of an expression kind, derived from the parser's table so that printing
/// without explicit parentheses re-parses to the same tree.
pub fn expr_prec(expr: &Node<Expr>) -> u8 {
  match expr.stx.as_ref() {
    Expr::Binary(binary) => OPERATORS[&binary.stx.operator].precedence,
    Expr::Cond(_) => PRECEDENCE_CONDITIONAL,
    Expr::Unary(unary) => OPERATORS[&unary.stx.operator].precedence,
    Expr::UnaryPostfix(unary) => OPERATORS[&unary.stx.operator].precedence,
    // Neither can be an operand of a binary operator without parentheses.
    Expr::ArrowFunc(_) | Expr::Yield(_) => PRECEDENCE_ASSIGNMENT,
    // Always printed with an argument list, so it binds like a call.
    Expr::New(_) => PRECEDENCE_CALL_MEMBER,
    Expr::Call(_)
    | Expr::Member(_)
    | Expr::ComputedMember(_)
    | Expr::TaggedTemplate(_)
    | Expr::Import(_) => PRECEDENCE_CALL_MEMBER,
    Expr::Class(_)
    | Expr::Func(_)
    | Expr::Id(_)
    | Expr::ImportMeta(_)
    | Expr::NewTarget(_)
    | Expr::Super(_)
    | Expr::This(_)
    | Expr::LitArr(_)
    | Expr::LitBigInt(_)
    | Expr::LitBool(_)
    | Expr::LitNull(_)
    | Expr::LitNum(_)
    | Expr::LitObj(_)
    | Expr::LitRegex(_)
    | Expr::LitStr(_)
    | Expr::LitTemplate(_)
    | Expr::ArrPat(_)
    | Expr::ObjPat(_) => PRECEDENCE_PRIMARY,
  }
}

/// Whether the expression is a link of an optional chain, whose parent must parenthesize it unless
/// the parent continues the chain.
pub fn is_chain_link(expr: &Node<Expr>) -> bool {
  match expr.stx.as_ref() {
    Expr::Member(member) => member.stx.optional_chaining.is_chain(),
    Expr::ComputedMember(member) => member.stx.optional_chaining.is_chain(),
    Expr::Call(call) => call.stx.optional_chaining.is_chain(),
    _ => false,
  }
}

/// Whether a call appears on the left spine, which would be taken as the argument list of an
/// enclosing `new`.
pub fn has_call_on_spine(expr: &Node<Expr>) -> bool {
  match expr.stx.as_ref() {
    Expr::Call(_) | Expr::Import(_) => true,
    Expr::Member(member) => has_call_on_spine(&member.stx.left),
    Expr::ComputedMember(member) => has_call_on_spine(&member.stx.object),
    Expr::TaggedTemplate(tagged) => has_call_on_spine(&tagged.stx.function),
    _ => false,
  }
}

#[cfg(test)]
mod tests {
  use super::child_min_prec_for_binary;
  use super::Side;
  use crate::operator::OperatorName;

  #[test]
  fn associativity_decides_the_tighter_side() {
    assert_eq!(child_min_prec_for_binary(OperatorName::Subtraction, Side::Left), 14);
    assert_eq!(child_min_prec_for_binary(OperatorName::Subtraction, Side::Right), 15);
    assert_eq!(child_min_prec_for_binary(OperatorName::Assignment, Side::Left), 4);
    assert_eq!(child_min_prec_for_binary(OperatorName::Assignment, Side::Right), 3);
    assert_eq!(child_min_prec_for_binary(OperatorName::Exponentiation, Side::Left), 17);
  }
}
