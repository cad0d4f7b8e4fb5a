//! Prints an AST as JavaScript in the layout esbuild uses for unminified output: two-space
//! indentation, one statement per line, double-quoted strings and single-line object literals.
//!
//! Parentheses are derived from precedence and from a few positional rules rather than stored in
//! the tree, so synthesized nodes print correctly without any bookkeeping by their producer.

pub mod escape;
mod expr;
pub mod precedence;
mod stmt;
#[cfg(test)]
mod tests;

use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::ast::stx::TopLevel;
use crate::operator::PRECEDENCE_COMMA;

pub struct Printer {
  out: String,
  indent: usize,
  // Offsets at which a leading token would be misread: `function`, `class` or `{` at the start of
  // an expression statement, `{` at the start of an arrow body, `function`/`class` after
  // `export default`.
  stmt_start: Option<usize>,
  arrow_body_start: Option<usize>,
  export_default_start: Option<usize>,
  // Inside a `for (...;` initializer, where a bare `in` would end the declaration.
  no_in: bool,
  // The next statement continues the current line, e.g. a non-block `if` body.
  inline_next: bool,
}

impl Printer {
  pub fn new() -> Printer {
    Printer {
      out: String::new(),
      indent: 0,
      stmt_start: None,
      arrow_body_start: None,
      export_default_start: None,
      no_in: false,
      inline_next: false,
    }
  }

  pub fn finish(self) -> String {
    self.out
  }

  fn at(&self, offset: Option<usize>) -> bool {
    offset == Some(self.out.len())
  }

  fn push(&mut self, s: &str) {
    self.out.push_str(s);
  }

  fn newline(&mut self) {
    self.out.push('\n');
  }

  fn print_indent(&mut self) {
    if self.inline_next {
      self.inline_next = false;
      self.out.push(' ');
      return;
    }
    for _ in 0..self.indent {
      self.out.push_str("  ");
    }
  }
}

impl Default for Printer {
  fn default() -> Self {
    Printer::new()
  }
}

pub fn emit(top_level: &Node<TopLevel>) -> String {
  let mut printer = Printer::new();
  printer.stmts(&top_level.stx.body);
  printer.finish()
}

/// Prints a lone expression, as it would appear on the right of an assignment.
pub fn emit_expr(expr: &Node<Expr>) -> String {
  let mut printer = Printer::new();
  printer.expr(expr, PRECEDENCE_COMMA);
  printer.finish()
}
