use super::super::ParseCtx;
use super::super::Parser;
use crate::ast::expr::lit::LitArrElem;
use crate::ast::expr::lit::LitArrExpr;
use crate::ast::expr::lit::LitBigIntExpr;
use crate::ast::expr::lit::LitObjExpr;
use crate::ast::expr::lit::LitRegexExpr;
use crate::ast::expr::lit::LitTemplateExpr;
use crate::ast::expr::lit::LitTemplatePart;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::loc::Loc;
use crate::operator::PRECEDENCE_ASSIGNMENT;
use crate::token::Token;
use crate::token::TT;

/// Decodes one escape sequence, where `raw` starts just after the backslash. Returns the number of
/// bytes consumed and the decoded character, which is `None` for a line continuation.
fn decode_escape_sequence(raw: &str) -> Option<(usize, Option<char>)> {
  let first = raw.chars().next()?;
  Some(match first {
    '\r' => (if raw[1..].starts_with('\n') { 2 } else { 1 }, None),
    '\n' | '\u{2028}' | '\u{2029}' => (first.len_utf8(), None),
    'b' => (1, Some('\x08')),
    'f' => (1, Some('\x0c')),
    'n' => (1, Some('\n')),
    'r' => (1, Some('\r')),
    't' => (1, Some('\t')),
    'v' => (1, Some('\x0b')),
    '0'..='7' => {
      let digits = raw
        .bytes()
        .take(3)
        .take_while(|b| (b'0'..=b'7').contains(b))
        .count();
      let value = u32::from_str_radix(&raw[..digits], 8).ok()?;
      (digits, Some(char::from_u32(value)?))
    }
    'x' => {
      let hex = raw.get(1..3)?;
      let value = u32::from_str_radix(hex, 16).ok()?;
      (3, Some(char::from_u32(value)?))
    }
    'u' => {
      let after_u = &raw[1..];
      if let Some(braced) = after_u.strip_prefix('{') {
        let end = braced.find('}')?;
        let value = u32::from_str_radix(&braced[..end], 16).ok()?;
        if value > 0x10FFFF {
          return None;
        };
        // Lone surrogates cannot be represented in a Rust string.
        (end + 3, Some(char::from_u32(value).unwrap_or('\u{FFFD}')))
      } else {
        let hex = after_u.get(..4)?;
        let value = u32::from_str_radix(hex, 16).ok()?;
        if (0xD800..=0xDBFF).contains(&value) {
          // Combine a surrogate pair like `\uD83D\uDE00`.
          if let Some(low) = after_u
            .get(4..10)
            .and_then(|s| s.strip_prefix("\\u"))
            .and_then(|s| u32::from_str_radix(s, 16).ok())
            .filter(|low| (0xDC00..=0xDFFF).contains(low))
          {
            let combined = 0x10000 + ((value - 0xD800) << 10) + (low - 0xDC00);
            return Some((11, char::from_u32(combined)));
          };
        };
        (5, Some(char::from_u32(value).unwrap_or('\u{FFFD}')))
      }
    }
    c => (c.len_utf8(), Some(c)),
  })
}

/// Processes the escapes in the raw contents of a string or template literal, without the
/// delimiters. Returns `None` if an escape is malformed.
pub fn cook_literal(raw: &str) -> Option<String> {
  let mut out = String::with_capacity(raw.len());
  let mut rest = raw;
  while let Some(i) = rest.find('\\') {
    out.push_str(&rest[..i]);
    let (consumed, c) = decode_escape_sequence(&rest[i + 1..])?;
    if let Some(c) = c {
      out.push(c);
    };
    rest = &rest[i + 1 + consumed..];
  }
  out.push_str(rest);
  Some(out)
}

impl<'a> Parser<'a> {
  pub fn lit_arr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Expr>> {
    let ctx = ctx.with_no_in(false);
    let arr = self.with_loc(|p| {
      p.require(TT::BracketOpen)?;
      let mut elements = Vec::<LitArrElem>::new();
      loop {
        if p.consume_if(TT::Comma).is_match() {
          elements.push(LitArrElem::Empty);
          continue;
        };
        if p.peek().typ == TT::BracketClose {
          break;
        };
        let rest = p.consume_if(TT::DotDotDot).is_match();
        let value = p.expr_with_min_prec(
          ctx,
          PRECEDENCE_ASSIGNMENT,
          &[TT::Comma, TT::BracketClose],
        )?;
        elements.push(if rest {
          LitArrElem::Rest(value)
        } else {
          LitArrElem::Single(value)
        });
        if p.peek().typ == TT::BracketClose {
          break;
        };
        p.require(TT::Comma)?;
      }
      p.require(TT::BracketClose)?;
      Ok(LitArrExpr { elements })
    })?;
    Ok(arr.wrap(Expr::from))
  }

  pub fn lit_bigint(&mut self, t: &Token) -> Node<Expr> {
    let raw = self.str(t.loc);
    Node::new(t.loc, LitBigIntExpr {
      value: raw.strip_suffix('n').unwrap_or(raw).to_string(),
    })
    .wrap(Expr::from)
  }

  pub fn lit_obj(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Expr>> {
    let ctx = ctx.with_no_in(false);
    let obj = self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let mut members = Vec::new();
      while p.peek().typ != TT::BraceClose {
        members.push(p.obj_member(ctx)?);
        if !p.consume_if(TT::Comma).is_match() {
          break;
        };
      }
      p.require(TT::BraceClose)?;
      Ok(LitObjExpr { members })
    })?;
    Ok(obj.wrap(Expr::from))
  }

  pub fn lit_regex(&mut self, t: &Token) -> Node<Expr> {
    Node::new(t.loc, LitRegexExpr {
      value: self.string(t.loc),
    })
    .wrap(Expr::from)
  }

  /// The decoded value of a string literal token.
  pub fn lit_str_val(&mut self, t: &Token) -> SyntaxResult<String> {
    let raw = self.str(t.loc);
    cook_literal(&raw[1..raw.len() - 1])
      .ok_or_else(|| t.error(SyntaxErrorType::ExpectedSyntax("valid string escape")))
  }

  pub fn lit_str(&mut self, t: &Token) -> SyntaxResult<Node<Expr>> {
    let value = self.lit_str_val(t)?;
    Ok(Expr::str(t.loc, value))
  }

  /// Parses the remaining parts of a template whose first token `first` was already consumed.
  pub fn lit_template_parts(
    &mut self,
    ctx: ParseCtx,
    first: Token,
  ) -> SyntaxResult<Vec<LitTemplatePart>> {
    let ctx = ctx.with_no_in(false);
    let mut parts = Vec::new();
    let mut t = first;
    // The first token starts with the opening backtick; continuations start after the `}`.
    let mut content_start = 1;
    loop {
      let is_end = match t.typ {
        TT::LiteralTemplatePartString => false,
        TT::LiteralTemplatePartStringEnd => true,
        TT::Invalid | TT::EOF => return Err(t.error(SyntaxErrorType::UnexpectedEnd)),
        _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("template string part"))),
      };
      let delimiter_len = if is_end { 1 } else { 2 };
      let raw = Loc(t.loc.0 + content_start, t.loc.1 - delimiter_len);
      parts.push(LitTemplatePart::String(self.string(raw)));
      if is_end {
        break;
      };
      let substitution = self.expr(ctx, [TT::BraceClose])?;
      self.require(TT::BraceClose)?;
      parts.push(LitTemplatePart::Substitution(substitution));
      t = self.consume_with_mode(LexMode::TemplateStrContinue);
      content_start = 0;
    }
    Ok(parts)
  }

  pub fn lit_template(&mut self, ctx: ParseCtx, first: Token) -> SyntaxResult<Node<Expr>> {
    let start = first.loc.0;
    let parts = self.lit_template_parts(ctx, first)?;
    Ok(Node::new(Loc(start, self.last_end()), LitTemplateExpr { parts }).wrap(Expr::from))
  }
}

#[cfg(test)]
mod tests {
  use super::cook_literal;

  #[test]
  fn test_cook_literal() {
    assert_eq!(cook_literal(r"a\nb").as_deref(), Some("a\nb"));
    assert_eq!(cook_literal(r"\x41B\u{43}").as_deref(), Some("ABC"));
    assert_eq!(cook_literal(r"\uD83D\uDE00").as_deref(), Some("\u{1F600}"));
    assert_eq!(cook_literal("a\\\nb").as_deref(), Some("ab"));
    assert_eq!(cook_literal(r"\0").as_deref(), Some("\0"));
    assert_eq!(cook_literal(r"\q").as_deref(), Some("q"));
    assert_eq!(cook_literal(r"\xZZ"), None);
  }
}
