//! Rewrites modern JavaScript syntax into equivalent code for older target environments, the way
//! esbuild lowers syntax for its `--target` option.
//!
//! ```
//! use lower_js::{lower_source, LowerOptions, Target, EsVersion};
//!
//! let options = LowerOptions {
//!   target: Target::es(EsVersion::Es2019),
//!   ..LowerOptions::default()
//! };
//! let output = lower_source("a()?.b()", &options).unwrap();
//! assert_eq!(output.code, "var _a;\n(_a = a()) == null ? void 0 : _a.b();\n");
//! assert!(output.diagnostics.is_empty());
//! ```

use ast::node::Node;
use ast::stx::TopLevel;
use diag::Diagnostic;
use error::SyntaxError;
use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::Utf8Error;
use tracing::debug;

pub mod ast;
pub mod char;
pub mod diag;
pub mod emit;
pub mod error;
pub mod lex;
pub mod loc;
pub mod lower;
pub mod operator;
pub mod parse;
pub mod scope;
pub mod target;
pub mod temp;
pub mod token;

pub use emit::emit;
pub use lower::lower;
pub use lower::ParamPurity;
pub use parse::parse;
pub use scope::compute_scopes;
pub use target::EsVersion;
pub use target::Feature;
pub use target::Target;

/// How to lower a file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LowerOptions {
  pub target: Target,
  pub param_purity: ParamPurity,
  /// Class fields are defined with `__publicField` (like `Object.defineProperty`) rather than
  /// assigned.
  pub use_define_for_class_fields: bool,
  /// Names an anonymous default-exported class that needs a binding: `<stem>_default`.
  pub file_stem: String,
}

impl Default for LowerOptions {
  fn default() -> Self {
    LowerOptions {
      target: Target::default(),
      param_purity: ParamPurity::default(),
      use_define_for_class_fields: true,
      file_stem: "stdin".to_string(),
    }
  }
}

#[derive(Clone, Debug)]
pub enum LowerError {
  Syntax(SyntaxError),
  InvalidUtf8(Utf8Error),
}

impl Display for LowerError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      LowerError::Syntax(err) => write!(f, "syntax error: {err}"),
      LowerError::InvalidUtf8(err) => write!(f, "input is not valid UTF-8: {err}"),
    }
  }
}

impl Error for LowerError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      LowerError::Syntax(err) => Some(err),
      LowerError::InvalidUtf8(err) => Some(err),
    }
  }
}

impl From<SyntaxError> for LowerError {
  fn from(err: SyntaxError) -> Self {
    LowerError::Syntax(err)
  }
}

#[derive(Clone, Debug)]
pub struct LowerOutput {
  pub code: String,
  /// Parse-time diagnostics first, then those of the lowering pass, each in order of discovery.
  pub diagnostics: Vec<Diagnostic>,
}

/// Parses `source`, lowers it for `options.target` and prints the result.
pub fn lower_source(source: &str, options: &LowerOptions) -> Result<LowerOutput, LowerError> {
  let (ast, diagnostics) = lower_to_ast(source, options)?;
  Ok(LowerOutput {
    code: emit(&ast),
    diagnostics,
  })
}

/// Like [`lower_source`], but returns the lowered tree instead of printing it.
pub fn lower_to_ast(
  source: &str,
  options: &LowerOptions,
) -> Result<(Node<TopLevel>, Vec<Diagnostic>), LowerError> {
  let parsed = parse(source)?;
  let mut ast = parsed.ast;
  let mut diagnostics = parsed.diagnostics;
  let mut scopes = compute_scopes(&ast);
  debug!(scopes = scopes.len(), "computed scopes");
  diagnostics.extend(lower(&mut ast, options, &mut scopes));
  Ok((ast, diagnostics))
}
