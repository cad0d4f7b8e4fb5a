use super::expect_diagnostics;
use super::expect_diagnostics_with_unsupported;
use crate::diag::CODE_AMBIGUOUS_NULLISH;
use crate::diag::CODE_UNSUPPORTED_ASYNC;
use crate::diag::CODE_UNSUPPORTED_FOR_AWAIT;
use crate::diag::CODE_UNSUPPORTED_TOP_LEVEL_AWAIT;
use crate::lower_source;
use crate::target::EsVersion;
use crate::target::Feature;
use crate::target::Target;
use crate::LowerOptions;

fn unsupported(what: &str) -> String {
  format!("Transforming {what} to the configured target environment is not supported yet")
}

const TOP_LEVEL_AWAIT: &str = "Top-level await is not available in the configured target environment";

#[test]
fn test_async_generator_with_for_await_at_es5() {
  let async_functions = unsupported("async functions");
  let for_await = unsupported("for-await loops");
  expect_diagnostics(
    Target::es(EsVersion::Es5),
    "async function* f() { for await (x of y) ; }",
    &[async_functions.as_str(), for_await.as_str()],
  );
}

#[test]
fn test_diagnostic_codes() {
  let options = LowerOptions {
    target: Target::es(EsVersion::Es5),
    ..LowerOptions::default()
  };
  let output = lower_source("async function* f() { for await (x of y) ; }", &options).unwrap();
  let codes: Vec<_> = output.diagnostics.iter().map(|d| d.code).collect();
  assert_eq!(codes, vec![CODE_UNSUPPORTED_ASYNC, CODE_UNSUPPORTED_FOR_AWAIT]);
  assert!(output.diagnostics.iter().all(|d| d.is_error()));
}

#[test]
fn test_es5_syntax_without_lowering() {
  let generators = unsupported("generator functions");
  expect_diagnostics(Target::es(EsVersion::Es5), "function* f() {}", &[generators.as_str()]);
  let classes = unsupported("class syntax");
  expect_diagnostics(Target::es(EsVersion::Es5), "class A {}", &[classes.as_str()]);
  let consts = unsupported("const");
  expect_diagnostics(Target::es(EsVersion::Es5), "const x = 1;", &[consts.as_str()]);
  let rest = unsupported("rest arguments");
  expect_diagnostics(Target::es(EsVersion::Es5), "function f(...a) {}", &[rest.as_str()]);
  let for_of = unsupported("for-of loops");
  let lets = unsupported("let");
  expect_diagnostics(
    Target::es(EsVersion::Es5),
    "for (let x of y) ;",
    &[for_of.as_str(), lets.as_str()],
  );
}

#[test]
fn test_derived_constructor_without_top_level_super() {
  let message = unsupported("class fields in a constructor without a top-level super call");
  expect_diagnostics(
    Target::es(EsVersion::Es2021),
    "class A extends B { x = 1; constructor() { if (c) super(); } }",
    &[message.as_str()],
  );
}

#[test]
fn test_object_rest_without_a_split() {
  let nested = unsupported("nested object rest patterns");
  expect_diagnostics(
    Target::es(EsVersion::Es2017),
    "var { a: { ...b } } = c;",
    &[nested.as_str()],
  );
  let loop_binding = unsupported("object rest patterns in loop or catch bindings");
  expect_diagnostics(
    Target::es(EsVersion::Es2017),
    "for (const { ...a } of b) ;",
    &[loop_binding.as_str()],
  );
}

#[test]
fn test_top_level_await() {
  expect_diagnostics(Target::es(EsVersion::Es2017), "await x;", &[TOP_LEVEL_AWAIT]);
  expect_diagnostics(Target::esnext(), "await x;", &[]);
  expect_diagnostics_with_unsupported(&[Feature::TopLevelAwait], "await x;", &[TOP_LEVEL_AWAIT]);
}

#[test]
fn test_parse_diagnostics_come_first() {
  let options = LowerOptions {
    target: Target::es(EsVersion::Es2017),
    ..LowerOptions::default()
  };
  let output = lower_source("await x; a ?? b || c;", &options).unwrap();
  let codes: Vec<_> = output.diagnostics.iter().map(|d| d.code).collect();
  assert_eq!(codes, vec![CODE_AMBIGUOUS_NULLISH, CODE_UNSUPPORTED_TOP_LEVEL_AWAIT]);
  assert_eq!(
    output.diagnostics[0].message,
    "Cannot use \"||\" with \"??\" without parentheses"
  );
  assert_eq!(output.diagnostics[0].notes.len(), 1);
}
