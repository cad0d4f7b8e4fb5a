use crate::lex::lex_next;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::token::TT;
use crate::token::TT::*;

fn check<const N: usize>(code: &str, expecteds: [TT; N]) {
  let mut lexer = Lexer::new(code);
  for expected in expecteds {
    let t = lex_next(&mut lexer, LexMode::Standard);
    assert_eq!(t.typ, expected);
  }
  let t = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!(EOF, t.typ);
}

// Only the first token; what follows an invalid token depends on recovery.
fn check_first(code: &str, expected: TT) {
  let mut lexer = Lexer::new(code);
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).typ, expected);
}

#[test]
fn test_lex_keywords() {
  check("class", [KeywordClass]);
  check("instanceof", [KeywordInstanceof]);
  check("accessor", [KeywordAccessor]);
  check("classy", [Identifier]);
}

#[test]
fn test_lex_literal_numbers() {
  check("929", [LiteralNumber]);
  check(".929", [LiteralNumber]);
  check("1_000.5e-3", [LiteralNumber]);
  check("?.929", [Question, LiteralNumber]);
  check("?..929", [QuestionDot, LiteralNumber]);
}

#[test]
fn test_lex_literal_bigints() {
  check("929n", [LiteralBigInt]);
  check("1_000n", [LiteralBigInt]);
  check("0x800faceb00cn", [LiteralBigInt]);
  check("0b100101n", [LiteralBigInt]);
  check("0o12077n", [LiteralBigInt]);
}

#[test]
fn test_lex_optional_chain_and_nullish_operators() {
  check("a?.b", [Identifier, QuestionDot, Identifier]);
  check("a?.[b]", [Identifier, QuestionDotBracketOpen, Identifier, BracketClose]);
  check("a?.()", [Identifier, QuestionDotParenthesisOpen, ParenthesisClose]);
  check("a ??= b ?? c", [Identifier, QuestionQuestionEquals, Identifier, QuestionQuestion, Identifier]);
  check("a ||= b &&= c", [Identifier, BarBarEquals, Identifier, AmpersandAmpersandEquals, Identifier]);
}

#[test]
fn test_lex_private_member() {
  check("this.#x", [KeywordThis, Dot, PrivateMember]);
  check("#x in y", [PrivateMember, KeywordIn, Identifier]);
}

#[test]
fn test_lex_strings_and_templates() {
  check("'hello world'", [LiteralString]);
  check_first("'hello world\n'", Invalid);
  check("`abc`", [LiteralTemplatePartStringEnd]);
  check("`a${", [LiteralTemplatePartString]);
}

#[test]
fn test_lex_comments() {
  let mut lexer = Lexer::new("/* @__PURE__ */ foo\n/*! keep me */ bar // @license MIT\nbaz");
  let foo = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!(foo.typ, Identifier);
  assert!(foo.preceded_by_pure_comment);
  let bar = lex_next(&mut lexer, LexMode::Standard);
  assert!(bar.preceded_by_line_terminator);
  assert!(!bar.preceded_by_pure_comment);
  let baz = lex_next(&mut lexer, LexMode::Standard);
  assert!(baz.preceded_by_line_terminator);
  let legal = lexer.legal_comments_between(0, lexer.next());
  let texts: Vec<_> = legal.iter().map(|c| c.text.as_str()).collect();
  assert_eq!(texts, vec!["/*! keep me */", "// @license MIT"]);
}

#[test]
fn test_lex_regex_mode() {
  let mut lexer = Lexer::new("/a[/]b/g");
  assert_eq!(lex_next(&mut lexer, LexMode::SlashIsRegex).typ, LiteralRegex);
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).typ, EOF);
}

#[test]
fn test_lex_escaped_words_are_identifiers() {
  check("\\u0063lass", [Identifier]);
  check("cl\\u{61}ss", [Identifier]);
  check("classé", [Identifier]);
}

#[test]
fn test_lex_invalid_character_advances() {
  let mut lexer = Lexer::new("@x");
  let invalid = lex_next(&mut lexer, LexMode::Standard);
  assert_eq!(invalid.typ, Invalid);
  assert_eq!((invalid.loc.0, invalid.loc.1), (0, 1));
  assert_eq!(lex_next(&mut lexer, LexMode::Standard).typ, Identifier);
}

#[test]
fn test_lex_line_comment_stops_before_crlf() {
  let mut lexer = Lexer::new("//! keep\r\nx");
  let x = lex_next(&mut lexer, LexMode::Standard);
  assert!(x.preceded_by_line_terminator);
  let legal = lexer.legal_comments_between(0, lexer.next());
  assert_eq!(legal[0].text, "//! keep");
}
