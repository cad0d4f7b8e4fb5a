use crate::char::ID_CONTINUE;
use crate::char::ID_START;

/// Writes a string literal delimited by double quotes, escaping characters that would otherwise
/// terminate or change the meaning of the literal. Non-ASCII characters are kept as UTF-8 except
/// for U+2028/U+2029, which are always escaped.
pub fn write_string_literal(out: &mut String, value: &str) {
  out.push('"');
  let mut chars = value.chars().peekable();
  while let Some(ch) = chars.next() {
    match ch {
      '\\' => out.push_str("\\\\"),
      '"' => out.push_str("\\\""),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      '\u{8}' => out.push_str("\\b"),
      '\u{b}' => out.push_str("\\v"),
      '\u{c}' => out.push_str("\\f"),
      '\0' => {
        // `\0` followed by a digit would be read as a legacy octal escape.
        if chars.peek().is_some_and(|c| c.is_ascii_digit()) {
          out.push_str("\\x00");
        } else {
          out.push_str("\\0");
        }
      }
      '\u{2028}' => out.push_str("\\u2028"),
      '\u{2029}' => out.push_str("\\u2029"),
      ch if ch < '\u{20}' => out.push_str(&format!("\\x{:02X}", ch as u32)),
      // Lone surrogates were already replaced when cooking.
      ch => out.push(ch),
    }
  }
  out.push('"');
}

pub fn to_string_literal(value: &str) -> String {
  let mut out = String::with_capacity(value.len() + 2);
  write_string_literal(&mut out, value);
  out
}

/// Whether `name` can be written as an identifier reference or binding, e.g. as an export alias.
pub fn is_identifier_name(name: &str) -> bool {
  let mut chars = name.chars();
  let Some(first) = chars.next() else {
    return false;
  };
  (ID_START.has(first) || !first.is_ascii()) && chars.all(|c| ID_CONTINUE.has(c) || !c.is_ascii())
}

#[cfg(test)]
mod tests {
  use super::is_identifier_name;
  use super::to_string_literal;

  #[test]
  fn escapes_quotes_and_backslashes() {
    assert_eq!(to_string_literal("a\"b\\c"), "\"a\\\"b\\\\c\"");
  }

  #[test]
  fn escapes_control_characters() {
    assert_eq!(to_string_literal("a\nb\tc"), "\"a\\nb\\tc\"");
    assert_eq!(to_string_literal("a\u{0007}b"), "\"a\\x07b\"");
  }

  #[test]
  fn escapes_zero_followed_by_digit() {
    assert_eq!(to_string_literal("\u{0000}9"), "\"\\x009\"");
    assert_eq!(to_string_literal("\u{0000}a"), "\"\\0a\"");
  }

  #[test]
  fn escapes_line_separators() {
    assert_eq!(to_string_literal("a\u{2028}b"), "\"a\\u2028b\"");
  }

  #[test]
  fn identifier_names() {
    assert!(is_identifier_name("_a"));
    assert!(is_identifier_name("$"));
    assert!(is_identifier_name("default"));
    assert!(!is_identifier_name("1a"));
    assert!(!is_identifier_name("d-e"));
    assert!(!is_identifier_name(""));
  }
}
