use crate::char::CharFilter;
use crate::char::DIGIT_BIN;
use crate::char::DIGIT_HEX;
use crate::char::DIGIT_OCT;
use crate::char::ID_START;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;
use aho_corasick::AhoCorasick;
use aho_corasick::AhoCorasickBuilder;
use aho_corasick::AhoCorasickKind;
use aho_corasick::Anchored;
use aho_corasick::Input;
use aho_corasick::MatchKind;
use aho_corasick::StartKind;
use memchr::memchr2;
use memchr::memmem;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

pub use keyword::is_keyword;
pub use keyword::keyword_text;

mod keyword;
mod scan;
#[cfg(test)]
mod tests;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum LexMode {
  SlashIsRegex,
  Standard,
  TemplateStrContinue,
}

#[rustfmt::skip]
const PUNCTUATORS: &[(TT, &str)] = &[
  (TT::BraceOpen, "{"), (TT::BraceClose, "}"), (TT::BracketOpen, "["), (TT::BracketClose, "]"),
  (TT::ParenthesisOpen, "("), (TT::ParenthesisClose, ")"), (TT::Semicolon, ";"),
  (TT::Colon, ":"), (TT::Comma, ","), (TT::Tilde, "~"),
  (TT::Dot, "."), (TT::DotDotDot, "..."),
  (TT::Question, "?"), (TT::QuestionDot, "?."), (TT::QuestionDotBracketOpen, "?.["),
  (TT::QuestionDotParenthesisOpen, "?.("), (TT::QuestionQuestion, "??"),
  (TT::QuestionQuestionEquals, "??="),
  (TT::Equals, "="), (TT::EqualsEquals, "=="), (TT::EqualsEqualsEquals, "==="),
  (TT::EqualsChevronRight, "=>"),
  (TT::Exclamation, "!"), (TT::ExclamationEquals, "!="), (TT::ExclamationEqualsEquals, "!=="),
  (TT::Plus, "+"), (TT::PlusPlus, "++"), (TT::PlusEquals, "+="),
  (TT::Hyphen, "-"), (TT::HyphenHyphen, "--"), (TT::HyphenEquals, "-="),
  (TT::Asterisk, "*"), (TT::AsteriskEquals, "*="), (TT::AsteriskAsterisk, "**"),
  (TT::AsteriskAsteriskEquals, "**="),
  (TT::Slash, "/"), (TT::SlashEquals, "/="), (TT::Percent, "%"), (TT::PercentEquals, "%="),
  (TT::Ampersand, "&"), (TT::AmpersandEquals, "&="), (TT::AmpersandAmpersand, "&&"),
  (TT::AmpersandAmpersandEquals, "&&="),
  (TT::Bar, "|"), (TT::BarEquals, "|="), (TT::BarBar, "||"), (TT::BarBarEquals, "||="),
  (TT::Caret, "^"), (TT::CaretEquals, "^="),
  (TT::ChevronLeft, "<"), (TT::ChevronLeftEquals, "<="), (TT::ChevronLeftChevronLeft, "<<"),
  (TT::ChevronLeftChevronLeftEquals, "<<="),
  (TT::ChevronRight, ">"), (TT::ChevronRightEquals, ">="), (TT::ChevronRightChevronRight, ">>"),
  (TT::ChevronRightChevronRightEquals, ">>="),
  (TT::ChevronRightChevronRightChevronRight, ">>>"),
  (TT::ChevronRightChevronRightChevronRightEquals, ">>>="),
];

static PUNCTUATOR_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| {
  AhoCorasickBuilder::new()
    .start_kind(StartKind::Anchored)
    .kind(Some(AhoCorasickKind::DFA))
    .match_kind(MatchKind::LeftmostLongest)
    .build(PUNCTUATORS.iter().map(|&(_, text)| text))
    .unwrap_or_else(|err| unreachable!("punctuator matcher failed to build: {err}"))
});

/// A comment that must survive into the output: `/*! ... */`, `//! ...`, or any comment containing
/// `@license` or `@preserve`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegalComment {
  pub loc: Loc,
  pub text: String,
}

pub struct Lexer<'a> {
  source: &'a str,
  next: usize,
  // Keyed by start offset, as backtracking in the parser may lex the same comment more than once.
  legal_comments: BTreeMap<usize, LegalComment>,
}

impl<'a> Lexer<'a> {
  pub fn new(code: &'a str) -> Lexer<'a> {
    Lexer {
      source: code,
      next: 0,
      legal_comments: BTreeMap::new(),
    }
  }

  pub fn next(&self) -> usize {
    self.next
  }

  pub fn source(&self) -> &'a str {
    self.source
  }

  pub fn source_range(&self) -> Loc {
    Loc(0, self.source.len())
  }

  pub fn set_next(&mut self, next: usize) {
    self.next = next;
  }

  /// Legal comments found so far whose start lies in `[from, to)`.
  pub fn legal_comments_between(&self, from: usize, to: usize) -> Vec<LegalComment> {
    if from >= to {
      return Vec::new();
    }
    self
      .legal_comments
      .range(from..to)
      .map(|(_, c)| c.clone())
      .collect()
  }

  fn rest(&self) -> &'a str {
    &self.source[self.next..]
  }

  fn peek(&self) -> Option<char> {
    self.rest().chars().next()
  }

  fn peek_at(&self, n: usize) -> Option<char> {
    self.rest().chars().nth(n)
  }

  fn bump(&mut self, len: usize) {
    debug_assert!(self.next + len <= self.source.len());
    self.next += len;
  }

  fn bump_char(&mut self) -> Option<char> {
    let c = self.peek()?;
    self.bump(c.len_utf8());
    Some(c)
  }

  fn eat(&mut self, c: char) -> bool {
    let matched = self.peek() == Some(c);
    if matched {
      self.bump(c.len_utf8());
    };
    matched
  }

  fn eat_while(&mut self, chars: &CharFilter) {
    let len: usize = self
      .rest()
      .chars()
      .take_while(|&c| chars.has(c))
      .map(char::len_utf8)
      .sum();
    self.bump(len);
  }

  /// Records the comment if it is a legal comment, and returns whether it is a pure annotation.
  fn record_comment(&mut self, loc: Loc) -> bool {
    let text = &self.source[loc.0..loc.1];
    let legal = text.starts_with("/*!")
      || text.starts_with("//!")
      || text.contains("@license")
      || text.contains("@preserve");
    if legal {
      self
        .legal_comments
        .entry(loc.0)
        .or_insert_with(|| LegalComment {
          loc,
          text: text.to_string(),
        });
    };
    text.contains("@__PURE__") || text.contains("#__PURE__")
  }

  /// Skips whitespace and comments. Returns whether they contained a line terminator and whether
  /// one of the comments was a pure annotation.
  fn skip_trivia(&mut self) -> (bool, bool) {
    let mut line_terminator = false;
    let mut pure = false;
    while let Some(c) = self.peek() {
      match c {
        '\n' | '\r' | '\u{2028}' | '\u{2029}' => {
          line_terminator = true;
          self.bump(c.len_utf8());
        }
        '\t' | '\x0b' | '\x0c' | ' ' | '\u{00A0}' | '\u{FEFF}' => self.bump(c.len_utf8()),
        '/' if self.rest().starts_with("/*") => {
          let start = self.next;
          let body = &self.rest()[2..];
          // An unterminated comment runs to the end of the source.
          let len = memmem::find(body.as_bytes(), b"*/").map_or(body.len(), |p| p + 2);
          line_terminator |= body[..len].contains(['\n', '\r', '\u{2028}', '\u{2029}']);
          self.bump(2 + len);
          pure |= self.record_comment(Loc(start, self.next));
        }
        '/' if self.rest().starts_with("//") => {
          let start = self.next;
          let rest = self.rest();
          let len = memchr2(b'\n', b'\r', rest.as_bytes()).unwrap_or(rest.len());
          self.bump(len);
          pure |= self.record_comment(Loc(start, self.next));
        }
        _ => break,
      };
    }
    (line_terminator, pure)
  }

  fn punctuator(&mut self) -> Option<TT> {
    let m = PUNCTUATOR_MATCHER.find(Input::new(self.rest()).anchored(Anchored::Yes))?;
    self.bump(m.end());
    Some(PUNCTUATORS[m.pattern().as_usize()].0)
  }

  fn significant(&mut self, mode: LexMode) -> Option<TT> {
    let c = self.peek()?;
    let second = self.peek_at(1);
    match (c, second) {
      ('0', Some('b' | 'B')) => Some(scan::radix_number(self, &DIGIT_BIN)),
      ('0', Some('o' | 'O')) => Some(scan::radix_number(self, &DIGIT_OCT)),
      ('0', Some('x' | 'X')) => Some(scan::radix_number(self, &DIGIT_HEX)),
      ('0'..='9', _) => scan::number(self),
      ('.', Some('0'..='9')) => scan::number(self),
      ('"' | '\'', _) => scan::string(self),
      ('`', _) => {
        self.bump(1);
        scan::template_text(self)
      }
      ('#', _) => scan::private_name(self),
      ('/', _) if mode == LexMode::SlashIsRegex => scan::regex(self),
      // `a?.5:b` is a conditional, not an optional chain.
      ('?', Some('.')) if matches!(self.peek_at(2), Some('0'..='9')) => {
        self.bump(1);
        Some(TT::Question)
      }
      ('\\', _) => Some(scan::word(self)),
      (c, _) if !c.is_ascii() || ID_START.has(c) => Some(scan::word(self)),
      _ => self.punctuator(),
    }
  }
}

pub fn lex_next(lexer: &mut Lexer<'_>, mode: LexMode) -> Token {
  let (preceded_by_line_terminator, preceded_by_pure_comment) = match mode {
    LexMode::TemplateStrContinue => (false, false),
    _ => lexer.skip_trivia(),
  };
  let start = lexer.next;
  let typ = match mode {
    LexMode::TemplateStrContinue => scan::template_text(lexer),
    _ if start == lexer.source.len() => Some(TT::EOF),
    _ => lexer.significant(mode),
  }
  .unwrap_or(TT::Invalid);
  // An invalid token always covers at least one character, so lexing makes progress.
  if typ == TT::Invalid && lexer.next == start {
    lexer.bump_char();
  };
  Token {
    loc: Loc(start, lexer.next),
    typ,
    preceded_by_line_terminator,
    preceded_by_pure_comment,
  }
}
