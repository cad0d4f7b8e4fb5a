use crate::ast::node::Node;
use crate::ast::stmt::CommentStmt;
use crate::ast::stmt::Stmt;
use crate::ast::stx::TopLevel;
use crate::diag::Diagnostic;
use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::lex_next;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;
use derive_visitor::Drive;
use derive_visitor::DriveMut;

pub mod class_or_object;
pub mod expr;
pub mod func;
pub mod import_export;
pub mod operator;
pub mod stmt;
#[cfg(test)]
mod tests;
pub mod toplevel;

// Passed by value to almost every parse_* function. The with_* methods create an altered copy for
// passing into nested calls, so nothing needs to be unwound when a call returns.
#[derive(Clone, Copy, Default)]
pub struct ParseCtx {
  // Inside the init clause of a `for` head, where `in` is not a binary operator.
  pub no_in: bool,
  // `yield` is an operator only inside a generator body or its parameters.
  pub in_generator: bool,
}

impl ParseCtx {
  pub fn with_no_in(&self, no_in: bool) -> ParseCtx {
    ParseCtx { no_in, ..*self }
  }

  pub fn with_generator(&self, in_generator: bool) -> ParseCtx {
    ParseCtx {
      in_generator,
      ..*self
    }
  }
}

#[derive(Debug)]
#[must_use]
pub struct MaybeToken {
  typ: TT,
  loc: Loc,
  matched: bool,
}

impl MaybeToken {
  pub fn is_match(&self) -> bool {
    self.matched
  }

  pub fn match_loc(&self) -> Option<Loc> {
    if self.matched {
      Some(self.loc)
    } else {
      None
    }
  }

  pub fn error(&self, err: SyntaxErrorType) -> SyntaxError {
    debug_assert!(!self.matched);
    self.loc.error(err, Some(self.typ))
  }
}

pub struct ParserCheckpoint {
  next_tok_i: usize,
  diagnostics_len: usize,
}

/// To get the lexer's `next` after this token was lexed, use `token.loc.1`.
struct BufferedToken {
  token: Token,
  lex_mode: LexMode,
}

/// The result of parsing a whole source file.
pub struct ParseOutput {
  pub ast: Node<TopLevel>,
  // Non-fatal problems found while parsing, such as mixing `??` with `||` without parentheses.
  pub diagnostics: Vec<Diagnostic>,
}

pub struct Parser<'a> {
  lexer: Lexer<'a>,
  buf: Vec<BufferedToken>,
  next_tok_i: usize,
  diagnostics: Vec<Diagnostic>,
  // Legal comments starting before this offset have already been emitted or skipped.
  legal_comments_upto: usize,
}

// Methods for the various syntax kinds are added in the submodules, so that `self` can be used
// instead of threading `&mut Parser` through free functions.
impl<'a> Parser<'a> {
  pub fn new(lexer: Lexer<'a>) -> Parser<'a> {
    Parser {
      lexer,
      buf: Vec::new(),
      next_tok_i: 0,
      diagnostics: Vec::new(),
      legal_comments_upto: 0,
    }
  }

  pub fn source_range(&self) -> Loc {
    self.lexer.source_range()
  }

  pub fn str(&self, loc: Loc) -> &'a str {
    &self.lexer.source()[loc.0..loc.1]
  }

  pub fn string(&self, loc: Loc) -> String {
    self.str(loc).to_string()
  }

  pub fn report(&mut self, diagnostic: Diagnostic) {
    self.diagnostics.push(diagnostic);
  }

  pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
    std::mem::take(&mut self.diagnostics)
  }

  pub fn checkpoint(&self) -> ParserCheckpoint {
    ParserCheckpoint {
      next_tok_i: self.next_tok_i,
      diagnostics_len: self.diagnostics.len(),
    }
  }

  pub fn restore_checkpoint(&mut self, checkpoint: ParserCheckpoint) {
    self.next_tok_i = checkpoint.next_tok_i;
    // Diagnostics from an abandoned attempt would otherwise be reported twice.
    self.diagnostics.truncate(checkpoint.diagnostics_len);
  }

  /// End offset of the last consumed token.
  pub fn last_end(&self) -> usize {
    match self.next_tok_i {
      0 => 0,
      i => self.buf[i - 1].token.loc.1,
    }
  }

  /// Whether the consumed token starting at `offset` follows a `/* @__PURE__ */` comment.
  pub fn is_pure_start(&self, offset: usize) -> bool {
    let consumed = &self.buf[..self.next_tok_i];
    consumed
      .binary_search_by_key(&offset, |t| t.token.loc.0)
      .is_ok_and(|i| consumed[i].token.preceded_by_pure_comment)
  }

  /// Runs `f` and wraps its result in a node spanning every token it consumed.
  pub fn with_loc<S: Drive + DriveMut, F: FnOnce(&mut Self) -> SyntaxResult<S>>(
    &mut self,
    f: F,
  ) -> SyntaxResult<Node<S>> {
    let start = self.peek().loc.0;
    let stx = f(self)?;
    let end = self.last_end().max(start);
    Ok(Node::new(Loc(start, end), stx))
  }

  fn reset_to(&mut self, n: usize) {
    self.next_tok_i = n;
    self.buf.truncate(n);
    match self.buf.last() {
      Some(t) => self.lexer.set_next(t.token.loc.1),
      None => self.lexer.set_next(0),
    };
  }

  fn forward<K: FnOnce(&Token) -> bool>(&mut self, mode: LexMode, keep: K) -> (bool, Token) {
    if self
      .buf
      .get(self.next_tok_i)
      .is_some_and(|t| t.lex_mode != mode)
    {
      self.reset_to(self.next_tok_i);
    }
    debug_assert!(self.buf.len() >= self.next_tok_i);
    if self.buf.len() == self.next_tok_i {
      let token = lex_next(&mut self.lexer, mode);
      self.buf.push(BufferedToken {
        token,
        lex_mode: mode,
      });
    }
    let t = self.buf[self.next_tok_i].token.clone();
    let k = keep(&t);
    if k {
      self.next_tok_i += 1;
    };
    (k, t)
  }

  pub fn consume_with_mode(&mut self, mode: LexMode) -> Token {
    self.forward(mode, |_| true).1
  }

  pub fn consume(&mut self) -> Token {
    self.consume_with_mode(LexMode::Standard)
  }

  pub fn peek_with_mode(&mut self, mode: LexMode) -> Token {
    self.forward(mode, |_| false).1
  }

  pub fn peek(&mut self) -> Token {
    self.peek_with_mode(LexMode::Standard)
  }

  pub fn peek_2(&mut self) -> (Token, Token) {
    let cp = self.checkpoint();
    let a = self.forward(LexMode::Standard, |_| true).1;
    let b = self.forward(LexMode::Standard, |_| true).1;
    self.restore_checkpoint(cp);
    (a, b)
  }

  pub fn peek_3(&mut self) -> (Token, Token, Token) {
    let cp = self.checkpoint();
    let a = self.forward(LexMode::Standard, |_| true).1;
    let b = self.forward(LexMode::Standard, |_| true).1;
    let c = self.forward(LexMode::Standard, |_| true).1;
    self.restore_checkpoint(cp);
    (a, b, c)
  }

  pub fn consume_if(&mut self, typ: TT) -> MaybeToken {
    let (matched, t) = self.forward(LexMode::Standard, |t| t.typ == typ);
    MaybeToken {
      typ,
      matched,
      loc: t.loc,
    }
  }

  pub fn require_with_mode(&mut self, typ: TT, mode: LexMode) -> SyntaxResult<Token> {
    let t = self.consume_with_mode(mode);
    if t.typ != typ {
      Err(t.error(SyntaxErrorType::RequiredTokenNotFound(typ)))
    } else {
      Ok(t)
    }
  }

  pub fn require(&mut self, typ: TT) -> SyntaxResult<Token> {
    self.require_with_mode(typ, LexMode::Standard)
  }

  pub fn require_predicate<P: FnOnce(TT) -> bool>(
    &mut self,
    pred: P,
    expected: &'static str,
  ) -> SyntaxResult<Token> {
    let t = self.consume();
    if !pred(t.typ) {
      Err(t.error(SyntaxErrorType::ExpectedSyntax(expected)))
    } else {
      Ok(t)
    }
  }

  /// Ends a statement with `;` or automatic semicolon insertion: the next token is `}`, the end of
  /// input, or on a new line.
  pub fn require_semicolon(&mut self) -> SyntaxResult<()> {
    let t = self.peek();
    match t.typ {
      TT::Semicolon => {
        self.consume();
        Ok(())
      }
      TT::BraceClose | TT::EOF => Ok(()),
      _ if t.preceded_by_line_terminator => Ok(()),
      _ => Err(t.error(SyntaxErrorType::ExpectedSyntax("semicolon"))),
    }
  }

  /// Appends a comment statement for every legal comment found before `upto` that hasn't been
  /// emitted yet. Comments inside statements are skipped.
  pub fn emit_legal_comments(&mut self, body: &mut Vec<Node<Stmt>>, upto: usize) {
    for comment in self
      .lexer
      .legal_comments_between(self.legal_comments_upto, upto)
    {
      body.push(Node::new(comment.loc, CommentStmt { text: comment.text }).wrap(Stmt::Comment));
    }
    self.legal_comments_upto = self.legal_comments_upto.max(upto);
  }

  pub fn skip_legal_comments_upto(&mut self, upto: usize) {
    self.legal_comments_upto = upto;
  }
}

/// Parses a module. Syntax errors are fatal; ambiguity diagnostics are collected in the output.
pub fn parse(source: &str) -> SyntaxResult<ParseOutput> {
  let lexer = Lexer::new(source);
  let mut parser = Parser::new(lexer);
  let ast = parser.parse_top_level()?;
  Ok(ParseOutput {
    ast,
    diagnostics: parser.take_diagnostics(),
  })
}
