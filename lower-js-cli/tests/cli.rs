use assert_cmd::Command;
use predicates::str::contains;
use predicates::str::is_empty;
use serde_json::Value;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

fn lower_js_cli() -> Command {
  let mut cmd = Command::cargo_bin("lower-js").unwrap();
  cmd.timeout(Duration::from_secs(5));
  cmd
}

#[test]
fn lowers_stdin_to_stdout() {
  lower_js_cli()
    .args(["--target", "es2019"])
    .write_stdin("x = a?.b;")
    .assert()
    .success()
    .stdout("x = a == null ? void 0 : a.b;\n")
    .stderr(is_empty());
}

#[test]
fn esnext_keeps_syntax() {
  lower_js_cli()
    .write_stdin("x = a?.b ?? c;")
    .assert()
    .success()
    .stdout("x = a?.b ?? c;\n");
}

#[test]
fn forced_unsupported_feature_is_lowered() {
  lower_js_cli()
    .args(["--unsupported", "nullish-coalescing"])
    .write_stdin("x = a ?? b;")
    .assert()
    .success()
    .stdout("x = a != null ? a : b;\n");
}

#[test]
fn reads_and_writes_files() {
  let dir = TempDir::new().unwrap();
  let input = dir.path().join("in.js");
  let output = dir.path().join("out.js");
  fs::write(&input, "x = 2 ** y;").unwrap();
  lower_js_cli()
    .arg("-i")
    .arg(&input)
    .arg("-o")
    .arg(&output)
    .args(["-t", "es2015"])
    .assert()
    .success()
    .stdout(is_empty());
  assert_eq!(fs::read_to_string(&output).unwrap(), "x = __pow(2, y);\n");
}

#[test]
fn unsupported_syntax_exits_with_error_but_writes_output() {
  lower_js_cli()
    .args(["--unsupported", "top-level-await"])
    .write_stdin("await x;")
    .assert()
    .failure()
    .code(1)
    .stdout("await x;\n")
    .stderr(contains(
      "Top-level await is not available in the configured target environment",
    ))
    .stderr(contains("--> stdin:1:1"));
}

#[test]
fn syntax_error_is_rendered() {
  lower_js_cli()
    .write_stdin("function {")
    .assert()
    .failure()
    .code(1)
    .stdout(is_empty())
    .stderr(contains("error["));
}

#[test]
fn invalid_utf8_is_rejected() {
  lower_js_cli()
    .write_stdin(vec![b'x', b'=', 0xff])
    .assert()
    .failure()
    .code(1)
    .stderr(contains("not valid UTF-8"));
}

#[test]
fn ast_is_printed_as_json() {
  let assert = lower_js_cli()
    .args(["--ast", "-t", "es2019"])
    .write_stdin("a?.b;")
    .assert()
    .success();
  let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
  let value: Value = serde_json::from_str(&stdout).expect("stdout to be valid JSON");
  assert!(value.is_object());
}

#[test]
fn bad_config_fails() {
  let dir = TempDir::new().unwrap();
  let config = dir.path().join("bad.json");
  fs::write(&config, "{ not json").unwrap();
  lower_js_cli()
    .arg("--config")
    .arg(&config)
    .write_stdin("x;")
    .assert()
    .failure()
    .code(1)
    .stderr(contains("invalid config"));
}
