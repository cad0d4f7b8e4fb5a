use super::keyword::keyword_for_word;
use super::Lexer;
use crate::char::CharFilter;
use crate::char::DIGIT;
use crate::char::ID_CONTINUE;
use crate::char::ID_START;
use crate::token::TT;
use memchr::memchr3;

// Scanners start at the first character of their token. `None` means the token is malformed and
// ends wherever scanning stopped.

/// Length of a `\uXXXX` or `\u{X...}` escape at the start of `rest`.
fn unicode_escape_len(rest: &str) -> Option<usize> {
  let body = rest.strip_prefix("\\u")?;
  let escape_len = match body.strip_prefix('{') {
    Some(braced) => {
      let digits = braced.bytes().take_while(u8::is_ascii_hexdigit).count();
      if digits == 0 || braced.as_bytes().get(digits) != Some(&b'}') {
        return None;
      };
      digits + 2
    }
    None => {
      let hex = body.as_bytes().get(..4)?;
      if !hex.iter().all(u8::is_ascii_hexdigit) {
        return None;
      };
      4
    }
  };
  Some(2 + escape_len)
}

pub(super) fn identifier_tail(lexer: &mut Lexer<'_>) {
  loop {
    lexer.eat_while(&ID_CONTINUE);
    match lexer.peek() {
      Some('\\') => match unicode_escape_len(lexer.rest()) {
        Some(len) => lexer.bump(len),
        None => break,
      },
      // Any other non-ASCII character except the line and BOM separators continues the word.
      Some(c) if !c.is_ascii() && !matches!(c, '\u{2028}' | '\u{2029}' | '\u{FEFF}') => {
        lexer.bump(c.len_utf8())
      }
      _ => break,
    }
  }
}

/// An identifier, or a keyword if the word is one and is spelled without escapes.
pub(super) fn word(lexer: &mut Lexer<'_>) -> TT {
  let start = lexer.next;
  match lexer.peek() {
    Some('\\') => match unicode_escape_len(lexer.rest()) {
      Some(len) => lexer.bump(len),
      None => return TT::Invalid,
    },
    Some(c) => lexer.bump(c.len_utf8()),
    None => return TT::Invalid,
  };
  identifier_tail(lexer);
  let word = &lexer.source[start..lexer.next];
  if word.contains('\\') {
    return TT::Identifier;
  };
  keyword_for_word(word).unwrap_or(TT::Identifier)
}

pub(super) fn private_name(lexer: &mut Lexer<'_>) -> Option<TT> {
  // The `#` is part of the token.
  lexer.bump(1);
  let c = lexer.peek()?;
  if c.is_ascii() && !ID_START.has(c) {
    return Some(TT::Invalid);
  };
  lexer.bump(c.len_utf8());
  identifier_tail(lexer);
  Some(TT::PrivateMember)
}

/// A decimal number or BigInt, possibly starting at a `.`.
pub(super) fn number(lexer: &mut Lexer<'_>) -> Option<TT> {
  lexer.eat_while(&DIGIT);
  if lexer.eat('n') {
    return Some(TT::LiteralBigInt);
  };
  if lexer.eat('.') {
    lexer.eat_while(&DIGIT);
  };
  if lexer.eat('e') || lexer.eat('E') {
    if matches!(lexer.peek()?, '+' | '-') {
      lexer.bump(1);
    };
    lexer.eat_while(&DIGIT);
  };
  Some(TT::LiteralNumber)
}

/// `0b`, `0o` or `0x` followed by `digits`.
pub(super) fn radix_number(lexer: &mut Lexer<'_>, digits: &CharFilter) -> TT {
  lexer.bump(2);
  lexer.eat_while(digits);
  if lexer.eat('n') {
    TT::LiteralBigInt
  } else {
    TT::LiteralNumber
  }
}

pub(super) fn string(lexer: &mut Lexer<'_>) -> Option<TT> {
  let quote = lexer.bump_char()?;
  loop {
    let rest = lexer.rest();
    let Some(stop) = memchr3(b'\\', b'\n', quote as u8, rest.as_bytes()) else {
      lexer.bump(rest.len());
      return None;
    };
    lexer.bump(stop);
    match lexer.peek()? {
      // The line break is not part of the token.
      '\n' => return Some(TT::Invalid),
      '\\' => {
        lexer.bump(1);
        lexer.bump_char()?;
      }
      _ => {
        lexer.bump(1);
        return Some(TT::LiteralString);
      }
    };
  }
}

/// Template text after a backtick or `}`, through the closing backtick or the next `${`.
pub(super) fn template_text(lexer: &mut Lexer<'_>) -> Option<TT> {
  loop {
    let rest = lexer.rest();
    let Some(stop) = memchr3(b'\\', b'`', b'$', rest.as_bytes()) else {
      lexer.bump(rest.len());
      return None;
    };
    lexer.bump(stop);
    match lexer.bump_char()? {
      '\\' => {
        lexer.bump_char()?;
      }
      '`' => return Some(TT::LiteralTemplatePartStringEnd),
      _ => {
        if lexer.eat('{') {
          return Some(TT::LiteralTemplatePartString);
        };
      }
    };
  }
}

pub(super) fn regex(lexer: &mut Lexer<'_>) -> Option<TT> {
  lexer.bump(1);
  let mut in_class = false;
  loop {
    match lexer.bump_char()? {
      '\n' => return Some(TT::Invalid),
      '\\' => {
        if lexer.bump_char()? == '\n' {
          return Some(TT::Invalid);
        };
      }
      '[' => in_class = true,
      ']' => in_class = false,
      '/' if !in_class => break,
      _ => {}
    };
  }
  // Flags.
  lexer.eat_while(&ID_CONTINUE);
  Some(TT::LiteralRegex)
}

#[cfg(test)]
mod tests {
  use super::unicode_escape_len;

  #[test]
  fn test_unicode_escape_len() {
    assert_eq!(unicode_escape_len("\\u0061bc"), Some(6));
    assert_eq!(unicode_escape_len("\\u{1F600}x"), Some(9));
    assert_eq!(unicode_escape_len("\\u{}"), None);
    assert_eq!(unicode_escape_len("\\u00"), None);
    assert_eq!(unicode_escape_len("\\x41"), None);
  }
}
