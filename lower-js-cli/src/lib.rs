use clap::Parser;
use lower_js::EsVersion;
use lower_js::Feature;
use lower_js::LowerOptions;
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
  name = "lower-js",
  about = "Rewrites modern JavaScript syntax for older environments"
)]
pub struct Cli {
  /// File to lower; omit for stdin.
  #[arg(short, long)]
  pub input: Option<PathBuf>,

  /// Output destination; omit for stdout.
  #[arg(short, long)]
  pub output: Option<PathBuf>,

  /// Edition the output must run in.
  #[arg(short, long, value_name = "es5|es2015..es2022|esnext")]
  pub target: Option<EsVersion>,

  /// Features to lower even if the target has them, e.g. `optional-chain`.
  #[arg(long, num_args = 1.., value_delimiter = ',', value_name = "FEATURE")]
  pub unsupported: Vec<Feature>,

  /// Features to keep even if the target lacks them.
  #[arg(long, num_args = 1.., value_delimiter = ',', value_name = "FEATURE")]
  pub supported: Vec<Feature>,

  /// JSON file with lowering options. Flags override its values.
  #[arg(long)]
  pub config: Option<PathBuf>,

  /// Assign class fields instead of defining them.
  #[arg(long)]
  pub assign_semantics: bool,

  /// Print the lowered syntax tree as JSON instead of code.
  #[arg(long)]
  pub ast: bool,

  /// Log filter, such as `debug` or `lower_js=trace`.
  #[arg(long, default_value = "warn")]
  pub log_level: String,

  /// Write logs as JSON lines.
  #[arg(long)]
  pub log_json: bool,
}

#[derive(Debug)]
pub enum CliError {
  Io { path: PathBuf, source: io::Error },
  Config { path: PathBuf, source: serde_json::Error },
}

impl Display for CliError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      CliError::Io { path, source } => write!(f, "failed to read {}: {source}", path.display()),
      CliError::Config { path, source } => {
        write!(f, "invalid config {}: {source}", path.display())
      }
    }
  }
}

impl Error for CliError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    match self {
      CliError::Io { source, .. } => Some(source),
      CliError::Config { source, .. } => Some(source),
    }
  }
}

/// Reads lowering options from a JSON file. Missing keys take their defaults.
pub fn read_config(path: &Path) -> Result<LowerOptions, CliError> {
  let raw = fs::read_to_string(path).map_err(|source| CliError::Io {
    path: path.to_path_buf(),
    source,
  })?;
  serde_json::from_str(&raw).map_err(|source| CliError::Config {
    path: path.to_path_buf(),
    source,
  })
}

/// A binding-safe name from the input's file name, e.g. `my-lib.min.js` becomes `my_lib_min`.
pub fn file_stem(path: &Path) -> Option<String> {
  let stem = path.file_stem()?.to_string_lossy();
  let mut name: String = stem
    .chars()
    .map(|c| {
      if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
        c
      } else {
        '_'
      }
    })
    .collect();
  if name.is_empty() {
    return None;
  };
  if name.starts_with(|c: char| c.is_ascii_digit()) {
    name.insert(0, '_');
  };
  Some(name)
}

/// The options for a run: the config file if given, then the flags on top.
pub fn options(cli: &Cli) -> Result<LowerOptions, CliError> {
  let mut options = match &cli.config {
    Some(path) => read_config(path)?,
    None => LowerOptions::default(),
  };
  if let Some(version) = cli.target {
    options.target.version = version;
  };
  for feature in cli.unsupported.iter() {
    options.target.forced_supported.remove(feature);
    options.target.forced_unsupported.insert(*feature);
  }
  for feature in cli.supported.iter() {
    options.target.forced_unsupported.remove(feature);
    options.target.forced_supported.insert(*feature);
  }
  if cli.assign_semantics {
    options.use_define_for_class_fields = false;
  };
  if options.file_stem == LowerOptions::default().file_stem {
    if let Some(stem) = cli.input.as_deref().and_then(file_stem) {
      options.file_stem = stem;
    };
  };
  Ok(options)
}
