use super::expect_diagnostics;
use super::expect_lowered;
use super::lowered;
use crate::target::EsVersion;
use crate::target::Target;
use crate::LowerOptions;

#[test]
fn test_for_await_in_native_async_function() {
  expect_lowered(
    EsVersion::Es2017,
    "async function f() { for await (const x of y) g(x); }",
    "async function f() {
  try {
    for (var iter = __forAwait(y), more, temp, error; more = !(temp = await iter.next()).done; more = false) {
      const x = temp.value;
      g(x);
    }
  } catch (temp) {
    error = [temp];
  } finally {
    try {
      more && (temp = iter.return) && await temp.call(iter);
    } finally {
      if (error) throw error[0];
    }
  }
}
",
  );
}

#[test]
fn test_for_await_assigning_to_existing_binding() {
  expect_lowered(
    EsVersion::Es2017,
    "async function f() { for await (x of y) { g(x); h(); } }",
    "async function f() {
  try {
    for (var iter = __forAwait(y), more, temp, error; more = !(temp = await iter.next()).done; more = false) {
      x = temp.value;
      g(x);
      h();
    }
  } catch (temp) {
    error = [temp];
  } finally {
    try {
      more && (temp = iter.return) && await temp.call(iter);
    } finally {
      if (error) throw error[0];
    }
  }
}
",
  );
}

#[test]
fn test_for_await_inside_lowered_async_function() {
  let options = LowerOptions {
    target: Target::es(EsVersion::Es2016),
    ..LowerOptions::default()
  };
  let (code, messages) = lowered(&options, "async function f() { for await (const x of y) g(x); }");
  assert!(messages.is_empty(), "{messages:?}");
  assert!(code.contains("__async(this, null, function* ()"), "{code}");
  assert!(code.contains("var iter = __forAwait(y), more, temp, error"), "{code}");
  assert!(!code.contains("await"), "{code}");
}

#[test]
fn test_for_await_stays_when_supported() {
  expect_lowered(
    EsVersion::Es2018,
    "async function f() { for await (const x of y) ; }",
    "async function f() {\n  for await (const x of y) ;\n}\n",
  );
}

#[test]
fn test_top_level_for_await() {
  expect_lowered(EsVersion::EsNext, "for await (x of y) ;", "for await (x of y) ;\n");
  expect_diagnostics(
    Target::es(EsVersion::Es2017),
    "for await (x of y) ;",
    &["Top-level await is not available in the configured target environment"],
  );
}

#[test]
fn test_top_level_for_await_in_dead_branch() {
  expect_lowered(
    EsVersion::Es2017,
    "if (false) for await (x of y) ;",
    "if (false) for (x of y) ;\n",
  );
}
