use crate::operator::Operator;
use crate::operator::OperatorName;
use crate::operator::OPERATORS;
use crate::token::TT;

/// The infix operator a token starts, if any. Member access, calls, `?:` and postfix operators
/// are not here; the expression loop handles them itself.
pub fn binary_operator(typ: TT) -> Option<&'static Operator> {
  use OperatorName::*;
  let name = match typ {
    TT::Comma => Comma,
    TT::QuestionQuestion => NullishCoalescing,
    TT::BarBar => LogicalOr,
    TT::AmpersandAmpersand => LogicalAnd,
    TT::Bar => BitwiseOr,
    TT::Caret => BitwiseXor,
    TT::Ampersand => BitwiseAnd,
    TT::EqualsEquals => Equality,
    TT::ExclamationEquals => Inequality,
    TT::EqualsEqualsEquals => StrictEquality,
    TT::ExclamationEqualsEquals => StrictInequality,
    TT::ChevronLeft => LessThan,
    TT::ChevronLeftEquals => LessThanOrEqual,
    TT::ChevronRight => GreaterThan,
    TT::ChevronRightEquals => GreaterThanOrEqual,
    TT::KeywordIn => In,
    TT::KeywordInstanceof => Instanceof,
    TT::ChevronLeftChevronLeft => BitwiseLeftShift,
    TT::ChevronRightChevronRight => BitwiseRightShift,
    TT::ChevronRightChevronRightChevronRight => BitwiseUnsignedRightShift,
    TT::Plus => Addition,
    TT::Hyphen => Subtraction,
    TT::Asterisk => Multiplication,
    TT::Slash => Division,
    TT::Percent => Remainder,
    TT::AsteriskAsterisk => Exponentiation,
    typ => assignment_operator(typ)?,
  };
  Some(&OPERATORS[&name])
}

fn assignment_operator(typ: TT) -> Option<OperatorName> {
  use OperatorName::*;
  Some(match typ {
    TT::Equals => Assignment,
    TT::PlusEquals => AssignmentAddition,
    TT::HyphenEquals => AssignmentSubtraction,
    TT::AsteriskEquals => AssignmentMultiplication,
    TT::SlashEquals => AssignmentDivision,
    TT::PercentEquals => AssignmentRemainder,
    TT::AsteriskAsteriskEquals => AssignmentExponentiation,
    TT::AmpersandEquals => AssignmentBitwiseAnd,
    TT::BarEquals => AssignmentBitwiseOr,
    TT::CaretEquals => AssignmentBitwiseXor,
    TT::ChevronLeftChevronLeftEquals => AssignmentBitwiseLeftShift,
    TT::ChevronRightChevronRightEquals => AssignmentBitwiseRightShift,
    TT::ChevronRightChevronRightChevronRightEquals => AssignmentBitwiseUnsignedRightShift,
    TT::AmpersandAmpersandEquals => AssignmentLogicalAnd,
    TT::BarBarEquals => AssignmentLogicalOr,
    TT::QuestionQuestionEquals => AssignmentNullishCoalescing,
    _ => return None,
  })
}

/// `new`, `yield` and the postfix operators are parsed separately.
pub fn prefix_operator(typ: TT) -> Option<OperatorName> {
  use OperatorName::*;
  Some(match typ {
    TT::KeywordAwait => Await,
    TT::Tilde => BitwiseNot,
    TT::KeywordDelete => Delete,
    TT::Exclamation => LogicalNot,
    TT::HyphenHyphen => PrefixDecrement,
    TT::PlusPlus => PrefixIncrement,
    TT::Hyphen => UnaryNegation,
    TT::Plus => UnaryPlus,
    TT::KeywordTypeof => Typeof,
    TT::KeywordVoid => Void,
    _ => return None,
  })
}

#[cfg(test)]
mod tests {
  use super::binary_operator;
  use super::prefix_operator;
  use crate::operator::OperatorName;
  use crate::token::TT;

  #[test]
  fn test_tokens_shared_by_prefix_and_infix() {
    assert_eq!(binary_operator(TT::Hyphen).map(|o| o.name), Some(OperatorName::Subtraction));
    assert_eq!(prefix_operator(TT::Hyphen), Some(OperatorName::UnaryNegation));
    assert_eq!(prefix_operator(TT::Slash), None);
    assert!(binary_operator(TT::Dot).is_none());
    assert!(binary_operator(TT::QuestionQuestionEquals).is_some_and(|o| o.name.is_assignment()));
  }
}
