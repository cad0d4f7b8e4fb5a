use crate::token::TT;
use ahash::HashMap;
use once_cell::sync::Lazy;

#[rustfmt::skip]
const KEYWORDS: &[(TT, &str)] = &[
  (TT::KeywordAccessor, "accessor"), (TT::KeywordAs, "as"), (TT::KeywordAsync, "async"),
  (TT::KeywordAwait, "await"), (TT::KeywordBreak, "break"), (TT::KeywordCase, "case"),
  (TT::KeywordCatch, "catch"), (TT::KeywordClass, "class"), (TT::KeywordConst, "const"),
  (TT::KeywordConstructor, "constructor"), (TT::KeywordContinue, "continue"),
  (TT::KeywordDebugger, "debugger"), (TT::KeywordDefault, "default"),
  (TT::KeywordDelete, "delete"), (TT::KeywordDo, "do"), (TT::KeywordElse, "else"),
  (TT::KeywordEnum, "enum"), (TT::KeywordExport, "export"), (TT::KeywordExtends, "extends"),
  (TT::KeywordFinally, "finally"), (TT::KeywordFor, "for"), (TT::KeywordFrom, "from"),
  (TT::KeywordFunction, "function"), (TT::KeywordGet, "get"), (TT::KeywordIf, "if"),
  (TT::KeywordImport, "import"), (TT::KeywordIn, "in"), (TT::KeywordInstanceof, "instanceof"),
  (TT::KeywordLet, "let"), (TT::KeywordNew, "new"), (TT::KeywordOf, "of"),
  (TT::KeywordReturn, "return"), (TT::KeywordSet, "set"), (TT::KeywordStatic, "static"),
  (TT::KeywordSuper, "super"), (TT::KeywordSwitch, "switch"), (TT::KeywordThis, "this"),
  (TT::KeywordThrow, "throw"), (TT::KeywordTry, "try"), (TT::KeywordTypeof, "typeof"),
  (TT::KeywordVar, "var"), (TT::KeywordVoid, "void"), (TT::KeywordWhile, "while"),
  (TT::KeywordWith, "with"), (TT::KeywordYield, "yield"), (TT::LiteralFalse, "false"),
  (TT::LiteralNull, "null"), (TT::LiteralTrue, "true"),
];

static BY_TYPE: Lazy<HashMap<TT, &'static str>> =
  Lazy::new(|| KEYWORDS.iter().copied().collect());

static BY_TEXT: Lazy<HashMap<&'static str, TT>> =
  Lazy::new(|| KEYWORDS.iter().map(|&(typ, text)| (text, typ)).collect());

/// How a keyword token is spelled. Keywords include the contextual ones and the `true`, `false`
/// and `null` literals.
pub fn keyword_text(typ: TT) -> Option<&'static str> {
  BY_TYPE.get(&typ).copied()
}

pub fn is_keyword(typ: TT) -> bool {
  BY_TYPE.contains_key(&typ)
}

/// The keyword an identifier-shaped word is, if any. Words containing escapes never are.
pub fn keyword_for_word(word: &str) -> Option<TT> {
  BY_TEXT.get(word).copied()
}
