use super::expect_lowered;
use super::expect_lowered_with_unsupported;
use crate::target::EsVersion;
use crate::target::Feature;

#[test]
fn test_nullish_coalescing() {
  expect_lowered(EsVersion::Es2019, "a ?? b", "a != null ? a : b;\n");
  expect_lowered(
    EsVersion::Es2019,
    "x = a() ?? b",
    "var _a;\nx = (_a = a()) != null ? _a : b;\n",
  );
  expect_lowered(
    EsVersion::Es2019,
    "x = a ?? b ?? c",
    "var _a;\nx = (_a = a != null ? a : b) != null ? _a : c;\n",
  );
  expect_lowered(EsVersion::Es2020, "a ?? b", "a ?? b;\n");
}

#[test]
fn test_logical_assignment() {
  expect_lowered(
    EsVersion::Es2020,
    "a ||= b; a &&= b; a ??= b",
    "a || (a = b);\na && (a = b);\na ?? (a = b);\n",
  );
  expect_lowered(
    EsVersion::Es2019,
    "a.b ??= c",
    "var _a;\n(_a = a.b) != null ? _a : a.b = c;\n",
  );
  expect_lowered(
    EsVersion::Es2020,
    "a()[b()] ||= c",
    "var _a, _b;\n(_a = a())[_b = b()] || (_a[_b] = c);\n",
  );
  expect_lowered(EsVersion::Es2021, "a.b ||= c", "a.b ||= c;\n");
}

#[test]
fn test_exponent_operator() {
  expect_lowered(EsVersion::Es2015, "x = 2 ** y", "x = __pow(2, y);\n");
  expect_lowered(EsVersion::Es2015, "x = 2 ** 3 ** 2", "x = __pow(2, __pow(3, 2));\n");
  expect_lowered(EsVersion::Es2015, "x **= y", "x = __pow(x, y);\n");
  expect_lowered(EsVersion::Es2015, "a.b **= 2", "a.b = __pow(a.b, 2);\n");
  expect_lowered(
    EsVersion::Es2015,
    "a()[k] **= 2",
    "var _a;\n(_a = a())[k] = __pow(_a[k], 2);\n",
  );
}

#[test]
fn test_forced_unsupported() {
  expect_lowered_with_unsupported(&[Feature::NullishCoalescing], "x = a ?? b", "x = a != null ? a : b;\n");
  expect_lowered_with_unsupported(
    &[Feature::LogicalAssignment],
    "a ??= b",
    "a ?? (a = b);\n",
  );
}

#[test]
fn test_expression_statements_at_native_targets() {
  expect_lowered(EsVersion::EsNext, "a ?? b; f();", "a ?? b;\nf();\n");
  expect_lowered(EsVersion::Es2021, "a ||= b; if (c) d ?? e;", "a ||= b;\nif (c) d ?? e;\n");
}
