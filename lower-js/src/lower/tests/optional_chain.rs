use super::expect_lowered;
use crate::target::EsVersion;

#[test]
fn test_member_chains() {
  expect_lowered(EsVersion::Es2019, "a?.b", "a == null ? void 0 : a.b;\n");
  expect_lowered(EsVersion::Es2019, "a?.b.c", "a == null ? void 0 : a.b.c;\n");
  expect_lowered(EsVersion::Es2019, "a?.[b]", "a == null ? void 0 : a[b];\n");
  expect_lowered(
    EsVersion::Es2019,
    "a.b?.c",
    "var _a;\n(_a = a.b) == null ? void 0 : _a.c;\n",
  );
  expect_lowered(
    EsVersion::Es2019,
    "a?.b?.c",
    "var _a;\n(_a = a == null ? void 0 : a.b) == null ? void 0 : _a.c;\n",
  );
  expect_lowered(EsVersion::Es2020, "a?.b?.c", "a?.b?.c;\n");
}

#[test]
fn test_call_chains() {
  expect_lowered(EsVersion::Es2019, "a?.()", "a == null ? void 0 : a();\n");
  expect_lowered(EsVersion::Es2019, "a?.b()", "a == null ? void 0 : a.b();\n");
  expect_lowered(
    EsVersion::Es2019,
    "a.b?.()",
    "var _a;\n(_a = a.b) == null ? void 0 : _a.call(a);\n",
  );
  expect_lowered(
    EsVersion::Es2019,
    "a.b.c?.()",
    "var _a, _b;\n(_b = (_a = a.b).c) == null ? void 0 : _b.call(_a);\n",
  );
  expect_lowered(
    EsVersion::Es2019,
    "x = a()?.b()",
    "var _a;\nx = (_a = a()) == null ? void 0 : _a.b();\n",
  );
}

#[test]
fn test_integer_base() {
  expect_lowered(
    EsVersion::Es2019,
    "123?.[b]?.(c)",
    "var _a;\n(_a = 123 == null ? void 0 : 123[b]) == null ? void 0 : _a.call(123, c);\n",
  );
}

#[test]
fn test_parenthesized_chain_callee_keeps_this() {
  expect_lowered(
    EsVersion::Es2019,
    "(a?.b)()",
    "(a == null ? void 0 : a.b).call(a);\n",
  );
}

#[test]
fn test_delete_chain() {
  expect_lowered(EsVersion::Es2019, "delete a?.b", "a == null ? true : delete a.b;\n");
}

#[test]
fn test_nullish_base() {
  expect_lowered(EsVersion::Es2019, "x = null?.a", "x = void 0;\n");
  expect_lowered(EsVersion::Es2019, "x = (foo(), null)?.a", "x = (foo(), void 0);\n");
}

#[test]
fn test_nullish_base_statements_are_dropped() {
  expect_lowered(EsVersion::Es2019, "null?.a; foo()", "foo();\n");
  expect_lowered(EsVersion::Es2019, "(foo(), null)?.a;", "foo();\n");
  expect_lowered(EsVersion::Es2019, "undefined?.[x]; foo()", "foo();\n");
}

#[test]
fn test_nullish_bases_with_native_chains() {
  expect_lowered(EsVersion::Es2020, "null?.x; undefined?.[x]; null?.(x); foo()", "foo();\n");
  expect_lowered(EsVersion::Es2020, "(foo(), null)?.x", "(foo(), null)?.x;\n");
  expect_lowered(EsVersion::Es2020, "(foo(), null)?.[x]", "(foo(), null)?.[x];\n");
  expect_lowered(EsVersion::Es2020, "(foo(), null)?.(x)", "(foo(), null)?.(x);\n");
  expect_lowered(EsVersion::Es2020, "(foo(), void 0)?.x", "(foo(), void 0)?.x;\n");
  expect_lowered(EsVersion::Es2020, "(foo(), void 0)?.[x]", "(foo(), void 0)?.[x];\n");
  expect_lowered(EsVersion::Es2020, "(foo(), void 0)?.(x)", "(foo(), void 0)?.(x);\n");
}

#[test]
fn test_optional_eval_stays_indirect() {
  expect_lowered(EsVersion::Es2019, "eval?.(x)", "eval == null ? void 0 : (0, eval)(x);\n");
}

#[test]
fn test_super_receiver() {
  expect_lowered(
    EsVersion::Es2019,
    "class A extends B { m() { super.x?.(); } }",
    "class A extends B {\n  m() {\n    var _a;\n    (_a = super.x) == null ? void 0 : _a.call(this);\n  }\n}\n",
  );
}

#[test]
fn test_temps_in_functions() {
  expect_lowered(
    EsVersion::Es2019,
    "function f() { return a.b?.c; }",
    "function f() {\n  var _a;\n  return (_a = a.b) == null ? void 0 : _a.c;\n}\n",
  );
}

#[test]
fn test_later_statements_avoid_earlier_temps() {
  expect_lowered(
    EsVersion::Es2019,
    "a.b?.c; x.y?.z",
    "var _a;\n(_a = a.b) == null ? void 0 : _a.c;\nvar _a2;\n(_a2 = x.y) == null ? void 0 : _a2.z;\n",
  );
}
