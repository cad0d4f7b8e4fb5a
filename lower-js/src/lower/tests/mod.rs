use crate::lower_source;
use crate::target::EsVersion;
use crate::target::Feature;
use crate::target::Target;
use crate::LowerOptions;
use similar::ChangeTag;
use similar::TextDiff;

mod class;
mod diagnostics;
mod for_await;
mod func;
mod leaf;
mod logical;
mod optional_chain;

fn lowered(options: &LowerOptions, src: &str) -> (String, Vec<String>) {
  let output = lower_source(src, options).unwrap();
  let messages = output
    .diagnostics
    .iter()
    .map(|d| d.message.clone())
    .collect();
  (output.code, messages)
}

#[track_caller]
fn assert_same_code(src: &str, expected: &str, actual: &str) {
  if expected == actual {
    return;
  };
  let mut msg = format!("Lowering {src:?} gave:\n");
  let diff = TextDiff::from_lines(expected, actual);
  for change in diff.iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    msg.push_str(sign);
    msg.push_str(change.as_str().unwrap());
  }
  panic!("{}", msg);
}

#[track_caller]
pub(super) fn expect_lowered_with_options(options: &LowerOptions, src: &str, expected: &str) {
  let (code, messages) = lowered(options, src);
  assert!(messages.is_empty(), "unexpected diagnostics for {src:?}: {messages:?}");
  assert_same_code(src, expected, &code);
}

#[track_caller]
pub(super) fn expect_lowered(version: EsVersion, src: &str, expected: &str) {
  let options = LowerOptions {
    target: Target::es(version),
    ..LowerOptions::default()
  };
  expect_lowered_with_options(&options, src, expected);
}

#[track_caller]
pub(super) fn expect_lowered_with_unsupported(features: &[Feature], src: &str, expected: &str) {
  let options = LowerOptions {
    target: Target::esnext().with_unsupported(features.iter().copied()),
    ..LowerOptions::default()
  };
  expect_lowered_with_options(&options, src, expected);
}

/// Lowers `src` and checks the diagnostic messages, in order.
#[track_caller]
pub(super) fn expect_diagnostics(target: Target, src: &str, expected: &[&str]) {
  let options = LowerOptions {
    target,
    ..LowerOptions::default()
  };
  let (_, messages) = lowered(&options, src);
  assert_eq!(messages, expected, "diagnostics for {src:?}");
}

#[track_caller]
pub(super) fn expect_diagnostics_with_unsupported(features: &[Feature], src: &str, expected: &[&str]) {
  expect_diagnostics(
    Target::esnext().with_unsupported(features.iter().copied()),
    src,
    expected,
  );
}
