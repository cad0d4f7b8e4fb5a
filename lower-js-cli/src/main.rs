use clap::Parser;
use lower_js::lower_to_ast;
use lower_js::LowerError;
use lower_js_cli::options;
use lower_js_cli::Cli;
use std::fs::File;
use std::io::stderr;
use std::io::stdin;
use std::io::stdout;
use std::io::Read;
use std::io::Write;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn init_tracing(level: &str, json: bool) {
  let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(stderr)
    .with_ansi(false);
  let _ = if json {
    builder.json().try_init()
  } else {
    builder.try_init()
  };
}

fn exit_with_error(message: impl std::fmt::Display) -> ! {
  eprintln!("error: {message}");
  process::exit(1);
}

fn main() {
  let args = Cli::parse();
  init_tracing(&args.log_level, args.log_json);
  let options = match options(&args) {
    Ok(options) => options,
    Err(err) => exit_with_error(err),
  };
  debug!(target = %options.target, "resolved options");

  let input_name = args
    .input
    .as_ref()
    .map(|p| p.to_string_lossy().into_owned())
    .unwrap_or_else(|| "stdin".to_string());
  let mut input = Vec::new();
  let read_result = match args.input.as_ref() {
    Some(p) => File::open(p).and_then(|mut f| f.read_to_end(&mut input)),
    None => stdin().read_to_end(&mut input),
  };
  if let Err(err) = read_result {
    exit_with_error(format!("failed to read {input_name}: {err}"));
  };
  let source = match std::str::from_utf8(&input) {
    Ok(source) => source,
    Err(err) => exit_with_error(LowerError::InvalidUtf8(err)),
  };

  let (ast, diagnostics) = match lower_to_ast(source, &options) {
    Ok(lowered) => lowered,
    Err(LowerError::Syntax(err)) => {
      eprint!("{}", err.to_diagnostic().render(&input_name, source));
      process::exit(1);
    }
    Err(err) => exit_with_error(err),
  };
  let output = if args.ast {
    match serde_json::to_string_pretty(&ast) {
      Ok(json) => json + "\n",
      Err(err) => exit_with_error(format!("failed to serialize the syntax tree: {err}")),
    }
  } else {
    lower_js::emit(&ast)
  };

  let write_result = match args.output.as_ref() {
    Some(p) => File::create(p)
      .and_then(|mut file| file.write_all(output.as_bytes()))
      .map_err(|err| (p.display().to_string(), err)),
    None => stdout()
      .write_all(output.as_bytes())
      .map_err(|err| ("stdout".to_string(), err)),
  };
  if let Err((dest, err)) = write_result {
    exit_with_error(format!("failed to write {dest}: {err}"));
  };

  let mut exit_code = 0;
  for diagnostic in diagnostics.iter() {
    if diagnostic.is_error() {
      exit_code = 1;
    };
    eprint!("{}", diagnostic.render(&input_name, source));
  }
  process::exit(exit_code);
}
