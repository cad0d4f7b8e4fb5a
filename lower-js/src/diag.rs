use crate::loc::Loc;
use serde::Serialize;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Write;

/// `??` mixed with `&&` or `||` without parentheses.
pub const CODE_AMBIGUOUS_NULLISH: &str = "LJ0001";
/// Syntax with no rewrite for the target, e.g. classes at ES5.
pub const CODE_UNSUPPORTED_SYNTAX: &str = "LJ0100";
pub const CODE_UNSUPPORTED_GENERATOR: &str = "LJ0101";
pub const CODE_UNSUPPORTED_ASYNC: &str = "LJ0102";
pub const CODE_UNSUPPORTED_FOR_AWAIT: &str = "LJ0103";
pub const CODE_UNSUPPORTED_TOP_LEVEL_AWAIT: &str = "LJ0104";

/// Diagnostic severity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  Error,
  Warning,
  Note,
}

impl Severity {
  pub const fn as_str(&self) -> &'static str {
    match self {
      Severity::Error => "error",
      Severity::Warning => "warning",
      Severity::Note => "note",
    }
  }
}

impl Display for Severity {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A secondary location attached to a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Label {
  pub loc: Loc,
  pub message: String,
  pub is_primary: bool,
}

impl Label {
  pub fn primary(loc: Loc, message: impl Into<String>) -> Self {
    Self {
      loc,
      message: message.into(),
      is_primary: true,
    }
  }

  pub fn secondary(loc: Loc, message: impl Into<String>) -> Self {
    Self {
      loc,
      message: message.into(),
      is_primary: false,
    }
  }
}

/// A user-facing problem found while parsing or lowering. Diagnostics are collected; producing one
/// never stops the pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
  pub code: &'static str,
  pub severity: Severity,
  pub message: String,
  pub primary: Loc,
  pub labels: Vec<Label>,
  pub notes: Vec<String>,
}

impl Diagnostic {
  pub fn new(
    severity: Severity,
    code: &'static str,
    message: impl Into<String>,
    primary: Loc,
  ) -> Self {
    Self {
      code,
      severity,
      message: message.into(),
      primary,
      labels: Vec::new(),
      notes: Vec::new(),
    }
  }

  pub fn error(code: &'static str, message: impl Into<String>, primary: Loc) -> Self {
    Self::new(Severity::Error, code, message, primary)
  }

  pub fn warning(code: &'static str, message: impl Into<String>, primary: Loc) -> Self {
    Self::new(Severity::Warning, code, message, primary)
  }

  pub fn with_label(mut self, label: Label) -> Self {
    self.labels.push(label);
    self
  }

  pub fn with_note(mut self, note: impl Into<String>) -> Self {
    self.notes.push(note.into());
    self
  }

  pub fn is_error(&self) -> bool {
    self.severity == Severity::Error
  }

  /// Renders the diagnostic with its position in `source`:
  ///
  /// ```text
  /// error[LJ0102]: Transforming async functions to the configured target environment is not supported yet
  ///  --> stdin:1:1
  ///   = note: ...
  /// ```
  pub fn render(&self, file_name: &str, source: &str) -> String {
    let mut out = String::new();
    let (line, col) = self.primary.line_col(source);
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{}[{}]: {}", self.severity, self.code, self.message);
    let _ = writeln!(out, " --> {}:{}:{}", file_name, line, col);
    for label in &self.labels {
      let (line, col) = label.loc.line_col(source);
      let _ = writeln!(out, "  | {}:{}: {}", line, col, label.message);
    }
    for note in &self.notes {
      let _ = writeln!(out, "  = note: {}", note);
    }
    out
  }
}

impl Display for Diagnostic {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
    for note in &self.notes {
      write!(f, "\nnote: {}", note)?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::Diagnostic;
  use super::Label;
  use crate::loc::Loc;

  #[test]
  fn test_render_diagnostic() {
    let source = "let a;\nasync function f() {}\n";
    let diag = Diagnostic::error("LJ0102", "Transforming async functions is hard", Loc(7, 12))
      .with_label(Label::secondary(Loc(0, 3), "declared here"))
      .with_note("try a newer target");
    assert_eq!(
      diag.render("stdin", source),
      "error[LJ0102]: Transforming async functions is hard\n --> stdin:2:1\n  | 1:1: declared here\n  = note: try a newer target\n"
    );
    assert_eq!(
      diag.to_string(),
      "error[LJ0102]: Transforming async functions is hard\nnote: try a newer target"
    );
  }
}
