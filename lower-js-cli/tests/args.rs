use clap::Parser;
use lower_js::EsVersion;
use lower_js::Feature;
use lower_js::ParamPurity;
use lower_js_cli::file_stem;
use lower_js_cli::options;
use lower_js_cli::Cli;
use lower_js_cli::CliError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn parse(args: &[&str]) -> Cli {
  Cli::try_parse_from(std::iter::once("lower-js").chain(args.iter().copied())).unwrap()
}

fn write_config(dir: &TempDir, json: &str) -> String {
  let path = dir.path().join("lower.json");
  fs::write(&path, json).unwrap();
  path.to_string_lossy().into_owned()
}

#[test]
fn defaults_without_flags() {
  let cli = parse(&[]);
  assert_eq!(cli.log_level, "warn");
  assert!(!cli.ast);
  let options = options(&cli).unwrap();
  assert_eq!(options.target.version, EsVersion::EsNext);
  assert!(options.use_define_for_class_fields);
  assert_eq!(options.file_stem, "stdin");
  assert_eq!(options.param_purity, ParamPurity::Syntactic);
}

#[test]
fn target_and_feature_flags() {
  let cli = parse(&[
    "-t",
    "es2019",
    "--unsupported",
    "arrow,class-field",
    "--supported",
    "optional-chain",
    "--assign-semantics",
  ]);
  let options = options(&cli).unwrap();
  assert_eq!(options.target.version, EsVersion::Es2019);
  assert!(!options.target.supports(Feature::Arrow));
  assert!(!options.target.supports(Feature::ClassField));
  assert!(options.target.supports(Feature::OptionalChain));
  assert!(!options.use_define_for_class_fields);
}

#[test]
fn unknown_target_is_rejected() {
  let res = Cli::try_parse_from(["lower-js", "--target", "es1999"]);
  assert!(res.is_err());
  let res = Cli::try_parse_from(["lower-js", "--unsupported", "teleportation"]);
  assert!(res.is_err());
}

#[test]
fn flags_override_config() {
  let dir = TempDir::new().unwrap();
  let config = write_config(
    &dir,
    r#"{
      "target": { "version": "es2017", "unsupported": ["arrow"], "supported": ["nullish-coalescing"] },
      "param_purity": "conservative",
      "file_stem": "widget"
    }"#,
  );
  let cli = parse(&[
    "--config",
    &config,
    "--target",
    "es2020",
    "--supported",
    "arrow",
    "-i",
    "src/entry.js",
  ]);
  let options = options(&cli).unwrap();
  assert_eq!(options.target.version, EsVersion::Es2020);
  assert!(options.target.supports(Feature::Arrow));
  assert!(options.target.forced_unsupported.is_empty());
  assert!(options.target.forced_supported.contains(&Feature::NullishCoalescing));
  assert_eq!(options.param_purity, ParamPurity::Conservative);
  // An explicit stem in the config wins over the input's name.
  assert_eq!(options.file_stem, "widget");
  assert!(options.use_define_for_class_fields);
}

#[test]
fn config_keeps_defaults_for_missing_keys() {
  let dir = TempDir::new().unwrap();
  let config = write_config(&dir, r#"{ "use_define_for_class_fields": false }"#);
  let cli = parse(&["--config", &config, "-i", "my-lib.min.js"]);
  let options = options(&cli).unwrap();
  assert_eq!(options.target.version, EsVersion::EsNext);
  assert!(!options.use_define_for_class_fields);
  assert_eq!(options.file_stem, "my_lib_min");
}

#[test]
fn invalid_config_is_reported() {
  let dir = TempDir::new().unwrap();
  let config = write_config(&dir, r#"{ "target": { "version": "es3" } }"#);
  let cli = parse(&["--config", &config]);
  assert!(matches!(options(&cli), Err(CliError::Config { .. })));

  let cli = parse(&["--config", "does/not/exist.json"]);
  let err = options(&cli).unwrap_err();
  assert!(matches!(err, CliError::Io { .. }));
  assert!(err.to_string().starts_with("failed to read does/not/exist.json"));
}

#[test]
fn file_stems_are_bindings() {
  assert_eq!(file_stem(Path::new("a/b/index.js")), Some("index".to_string()));
  assert_eq!(file_stem(Path::new("2d-canvas.mjs")), Some("_2d_canvas".to_string()));
  assert_eq!(file_stem(Path::new("$jq.js")), Some("$jq".to_string()));
}
