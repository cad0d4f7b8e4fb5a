use ahash::HashMap;
use ahash::HashMapExt;
use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub enum OperatorName {
  Addition,
  Assignment,
  AssignmentAddition,
  AssignmentBitwiseAnd,
  AssignmentBitwiseLeftShift,
  AssignmentBitwiseOr,
  AssignmentBitwiseRightShift,
  AssignmentBitwiseUnsignedRightShift,
  AssignmentBitwiseXor,
  AssignmentDivision,
  AssignmentExponentiation,
  AssignmentLogicalAnd,
  AssignmentLogicalOr,
  AssignmentMultiplication,
  AssignmentNullishCoalescing,
  AssignmentRemainder,
  AssignmentSubtraction,
  Await,
  BitwiseAnd,
  BitwiseLeftShift,
  BitwiseNot,
  BitwiseOr,
  BitwiseRightShift,
  BitwiseUnsignedRightShift,
  BitwiseXor,
  Call,
  Comma,
  ComputedMemberAccess,
  Conditional,
  Delete,
  Division,
  Equality,
  Exponentiation,
  GreaterThan,
  GreaterThanOrEqual,
  In,
  Inequality,
  Instanceof,
  LessThan,
  LessThanOrEqual,
  LogicalAnd,
  LogicalNot,
  LogicalOr,
  MemberAccess,
  Multiplication,
  New,
  NullishCoalescing,
  OptionalChainingCall,
  OptionalChainingComputedMemberAccess,
  OptionalChainingMemberAccess,
  PostfixDecrement,
  PostfixIncrement,
  PrefixDecrement,
  PrefixIncrement,
  Remainder,
  StrictEquality,
  StrictInequality,
  Subtraction,
  Typeof,
  UnaryNegation,
  UnaryPlus,
  Void,
  Yield,
  YieldDelegated,
}

impl OperatorName {
  pub fn is_assignment(self) -> bool {
    matches!(
      self,
      OperatorName::Assignment
        | OperatorName::AssignmentAddition
        | OperatorName::AssignmentBitwiseAnd
        | OperatorName::AssignmentBitwiseLeftShift
        | OperatorName::AssignmentBitwiseOr
        | OperatorName::AssignmentBitwiseRightShift
        | OperatorName::AssignmentBitwiseUnsignedRightShift
        | OperatorName::AssignmentBitwiseXor
        | OperatorName::AssignmentDivision
        | OperatorName::AssignmentExponentiation
        | OperatorName::AssignmentLogicalAnd
        | OperatorName::AssignmentLogicalOr
        | OperatorName::AssignmentMultiplication
        | OperatorName::AssignmentNullishCoalescing
        | OperatorName::AssignmentRemainder
        | OperatorName::AssignmentSubtraction
    )
  }

  /// The binary operator a compound assignment applies, e.g. `+` for `+=`.
  pub fn compound_binary(self) -> Option<OperatorName> {
    Some(match self {
      OperatorName::AssignmentAddition => OperatorName::Addition,
      OperatorName::AssignmentBitwiseAnd => OperatorName::BitwiseAnd,
      OperatorName::AssignmentBitwiseLeftShift => OperatorName::BitwiseLeftShift,
      OperatorName::AssignmentBitwiseOr => OperatorName::BitwiseOr,
      OperatorName::AssignmentBitwiseRightShift => OperatorName::BitwiseRightShift,
      OperatorName::AssignmentBitwiseUnsignedRightShift => OperatorName::BitwiseUnsignedRightShift,
      OperatorName::AssignmentBitwiseXor => OperatorName::BitwiseXor,
      OperatorName::AssignmentDivision => OperatorName::Division,
      OperatorName::AssignmentExponentiation => OperatorName::Exponentiation,
      OperatorName::AssignmentLogicalAnd => OperatorName::LogicalAnd,
      OperatorName::AssignmentLogicalOr => OperatorName::LogicalOr,
      OperatorName::AssignmentMultiplication => OperatorName::Multiplication,
      OperatorName::AssignmentNullishCoalescing => OperatorName::NullishCoalescing,
      OperatorName::AssignmentRemainder => OperatorName::Remainder,
      OperatorName::AssignmentSubtraction => OperatorName::Subtraction,
      _ => return None,
    })
  }

  pub fn syntax(self) -> &'static str {
    match self {
      OperatorName::Addition | OperatorName::UnaryPlus => "+",
      OperatorName::Assignment => "=",
      OperatorName::AssignmentAddition => "+=",
      OperatorName::AssignmentBitwiseAnd => "&=",
      OperatorName::AssignmentBitwiseLeftShift => "<<=",
      OperatorName::AssignmentBitwiseOr => "|=",
      OperatorName::AssignmentBitwiseRightShift => ">>=",
      OperatorName::AssignmentBitwiseUnsignedRightShift => ">>>=",
      OperatorName::AssignmentBitwiseXor => "^=",
      OperatorName::AssignmentDivision => "/=",
      OperatorName::AssignmentExponentiation => "**=",
      OperatorName::AssignmentLogicalAnd => "&&=",
      OperatorName::AssignmentLogicalOr => "||=",
      OperatorName::AssignmentMultiplication => "*=",
      OperatorName::AssignmentNullishCoalescing => "??=",
      OperatorName::AssignmentRemainder => "%=",
      OperatorName::AssignmentSubtraction => "-=",
      OperatorName::Await => "await",
      OperatorName::BitwiseAnd => "&",
      OperatorName::BitwiseLeftShift => "<<",
      OperatorName::BitwiseNot => "~",
      OperatorName::BitwiseOr => "|",
      OperatorName::BitwiseRightShift => ">>",
      OperatorName::BitwiseUnsignedRightShift => ">>>",
      OperatorName::BitwiseXor => "^",
      OperatorName::Comma => ",",
      OperatorName::Conditional => "?",
      OperatorName::Delete => "delete",
      OperatorName::Division => "/",
      OperatorName::Equality => "==",
      OperatorName::Exponentiation => "**",
      OperatorName::GreaterThan => ">",
      OperatorName::GreaterThanOrEqual => ">=",
      OperatorName::In => "in",
      OperatorName::Inequality => "!=",
      OperatorName::Instanceof => "instanceof",
      OperatorName::LessThan => "<",
      OperatorName::LessThanOrEqual => "<=",
      OperatorName::LogicalAnd => "&&",
      OperatorName::LogicalNot => "!",
      OperatorName::LogicalOr => "||",
      OperatorName::Multiplication => "*",
      OperatorName::New => "new",
      OperatorName::NullishCoalescing => "??",
      OperatorName::PostfixDecrement | OperatorName::PrefixDecrement => "--",
      OperatorName::PostfixIncrement | OperatorName::PrefixIncrement => "++",
      OperatorName::Remainder => "%",
      OperatorName::StrictEquality => "===",
      OperatorName::StrictInequality => "!==",
      OperatorName::Subtraction | OperatorName::UnaryNegation => "-",
      OperatorName::Typeof => "typeof",
      OperatorName::Void => "void",
      OperatorName::Yield => "yield",
      OperatorName::YieldDelegated => "yield*",
      OperatorName::Call
      | OperatorName::ComputedMemberAccess
      | OperatorName::MemberAccess
      | OperatorName::OptionalChainingCall
      | OperatorName::OptionalChainingComputedMemberAccess
      | OperatorName::OptionalChainingMemberAccess => "",
    }
  }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Associativity {
  Left,
  Right,
}

pub struct Operator {
  pub name: OperatorName,
  pub precedence: u8,
  pub associativity: Associativity,
}

pub const PRECEDENCE_COMMA: u8 = 1;
pub const PRECEDENCE_YIELD: u8 = 2;
pub const PRECEDENCE_ASSIGNMENT: u8 = 3;
pub const PRECEDENCE_CONDITIONAL: u8 = 4;
pub const PRECEDENCE_NULLISH: u8 = 5;
pub const PRECEDENCE_LOGICAL_OR: u8 = 6;
pub const PRECEDENCE_LOGICAL_AND: u8 = 7;
pub const PRECEDENCE_EXPONENTIATION: u8 = 16;
pub const PRECEDENCE_PREFIX: u8 = 17;
pub const PRECEDENCE_POSTFIX: u8 = 18;
pub const PRECEDENCE_NEW: u8 = 19;
pub const PRECEDENCE_CALL_MEMBER: u8 = 20;
pub const PRECEDENCE_PRIMARY: u8 = 21;

#[rustfmt::skip]
pub static OPERATORS: Lazy<HashMap<OperatorName, Operator>> = Lazy::new(|| {
  use Associativity::*;
  use OperatorName::*;
  let mut map = HashMap::<OperatorName, Operator>::new();
  let mut add = |name: OperatorName, precedence: u8, associativity: Associativity| {
    map.insert(name, Operator { name, precedence, associativity });
  };
  add(Comma, PRECEDENCE_COMMA, Left);
  add(Yield, PRECEDENCE_YIELD, Right);
  add(YieldDelegated, PRECEDENCE_YIELD, Right);
  for op in [
    Assignment, AssignmentAddition, AssignmentBitwiseAnd, AssignmentBitwiseLeftShift,
    AssignmentBitwiseOr, AssignmentBitwiseRightShift, AssignmentBitwiseUnsignedRightShift,
    AssignmentBitwiseXor, AssignmentDivision, AssignmentExponentiation, AssignmentLogicalAnd,
    AssignmentLogicalOr, AssignmentMultiplication, AssignmentNullishCoalescing,
    AssignmentRemainder, AssignmentSubtraction,
  ] {
    add(op, PRECEDENCE_ASSIGNMENT, Right);
  }
  add(Conditional, PRECEDENCE_CONDITIONAL, Right);
  add(NullishCoalescing, PRECEDENCE_NULLISH, Left);
  add(LogicalOr, PRECEDENCE_LOGICAL_OR, Left);
  add(LogicalAnd, PRECEDENCE_LOGICAL_AND, Left);
  add(BitwiseOr, 8, Left);
  add(BitwiseXor, 9, Left);
  add(BitwiseAnd, 10, Left);
  for op in [Equality, Inequality, StrictEquality, StrictInequality] {
    add(op, 11, Left);
  }
  for op in [LessThan, LessThanOrEqual, GreaterThan, GreaterThanOrEqual, In, Instanceof] {
    add(op, 12, Left);
  }
  for op in [BitwiseLeftShift, BitwiseRightShift, BitwiseUnsignedRightShift] {
    add(op, 13, Left);
  }
  add(Addition, 14, Left);
  add(Subtraction, 14, Left);
  for op in [Multiplication, Division, Remainder] {
    add(op, 15, Left);
  }
  add(Exponentiation, PRECEDENCE_EXPONENTIATION, Right);
  for op in [
    Await, BitwiseNot, Delete, LogicalNot, PrefixDecrement, PrefixIncrement, Typeof,
    UnaryNegation, UnaryPlus, Void,
  ] {
    add(op, PRECEDENCE_PREFIX, Right);
  }
  add(PostfixDecrement, PRECEDENCE_POSTFIX, Left);
  add(PostfixIncrement, PRECEDENCE_POSTFIX, Left);
  add(New, PRECEDENCE_NEW, Right);
  for op in [
    Call, ComputedMemberAccess, MemberAccess, OptionalChainingCall,
    OptionalChainingComputedMemberAccess, OptionalChainingMemberAccess,
  ] {
    add(op, PRECEDENCE_CALL_MEMBER, Left);
  }
  map
});
