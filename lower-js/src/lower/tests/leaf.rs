use super::expect_lowered;
use super::expect_lowered_with_unsupported;
use crate::target::EsVersion;
use crate::target::Feature;

#[test]
fn test_template_to_concat() {
  expect_lowered(EsVersion::Es5, "x = `a${b}c`", "x = \"a\" + b + \"c\";\n");
  expect_lowered(EsVersion::Es5, "x = `${a}${b}`", "x = \"\" + a + b;\n");
  expect_lowered(EsVersion::Es5, "x = `plain`", "x = \"plain\";\n");
  expect_lowered(EsVersion::Es2015, "x = `a${b}c`", "x = `a${b}c`;\n");
}

#[test]
fn test_tagged_template() {
  expect_lowered(
    EsVersion::Es5,
    "x = tag`a${b}c`",
    "var _a;\nx = tag(_a || (_a = __template([\"a\", \"c\"])), b);\n",
  );
  expect_lowered(EsVersion::Es2015, "x = tag`a${b}c`", "x = tag`a${b}c`;\n");
}

#[test]
fn test_object_spread() {
  expect_lowered(
    EsVersion::Es2017,
    "x = {a, ...b, c}",
    "x = __spreadProps(__spreadValues({ a }, b), { c });\n",
  );
  expect_lowered(EsVersion::Es2017, "x = {...b}", "x = __spreadValues({}, b);\n");
  expect_lowered(
    EsVersion::Es2017,
    "x = {...a, ...b}",
    "x = __spreadValues(__spreadValues({}, a), b);\n",
  );
  expect_lowered(EsVersion::Es2018, "x = {a, ...b}", "x = { a, ...b };\n");
}

#[test]
fn test_object_rest_declarations() {
  expect_lowered(
    EsVersion::Es2017,
    "var { a, ...b } = c;",
    "var { a } = c, b = __objRest(c, [\"a\"]);\n",
  );
  expect_lowered(
    EsVersion::Es2017,
    "const { a, ...b } = f();",
    "const _a = f(), { a } = _a, b = __objRest(_a, [\"a\"]);\n",
  );
  expect_lowered(
    EsVersion::Es2017,
    "let { ...b } = f();",
    "let b = __objRest(f(), []);\n",
  );
}

#[test]
fn test_object_rest_parameters() {
  expect_lowered(
    EsVersion::Es2017,
    "function f({ a, ...b }) { return b; }",
    "function f(_a) {\n  var { a } = _a, b = __objRest(_a, [\"a\"]);\n  return b;\n}\n",
  );
}

#[test]
fn test_object_rest_assignment() {
  expect_lowered(
    EsVersion::Es2017,
    "x = ({ a, ...b } = c)",
    "var _a;\nx = (_a = c, { a } = _a, b = __objRest(_a, [\"a\"]), _a);\n",
  );
}

#[test]
fn test_export_star_as() {
  expect_lowered(
    EsVersion::Es2019,
    "export * as ns from \"m\";",
    "import * as ns from \"m\";\nexport { ns };\n",
  );
  expect_lowered(
    EsVersion::Es2019,
    "let ns; export * as ns from \"m\";",
    "let ns;\nimport * as ns2 from \"m\";\nexport { ns2 as ns };\n",
  );
  expect_lowered(
    EsVersion::Es2020,
    "export * as ns from \"m\";",
    "export * as ns from \"m\";\n",
  );
}

#[test]
fn test_bigint_literals() {
  expect_lowered(
    EsVersion::Es2019,
    "x = 10n",
    "x = /* @__PURE__ */ BigInt(\"10\");\n",
  );
  expect_lowered(
    EsVersion::Es2019,
    "x = 0b101n",
    "x = /* @__PURE__ */ BigInt(\"0b101\");\n",
  );
  expect_lowered(EsVersion::Es2020, "x = 10n", "x = 10n;\n");
}

#[test]
fn test_bigint_keys() {
  expect_lowered(EsVersion::Es2019, "x = { 0x10n: 1 }", "x = { \"16\": 1 };\n");
}

#[test]
fn test_optional_catch_binding() {
  expect_lowered(
    EsVersion::Es2018,
    "try { a(); } catch { b(); }",
    "try {\n  a();\n} catch (e) {\n  b();\n}\n",
  );
  expect_lowered(
    EsVersion::Es2018,
    "let e; try { a(); } catch { b(e); }",
    "let e;\ntry {\n  a();\n} catch (e2) {\n  b(e);\n}\n",
  );
  expect_lowered(
    EsVersion::Es2019,
    "try { a(); } catch { b(); }",
    "try {\n  a();\n} catch {\n  b();\n}\n",
  );
}

#[test]
fn test_forced_unsupported_template_literal() {
  expect_lowered_with_unsupported(&[Feature::TemplateLiteral], "x = `a${b}`", "x = \"a\" + b;\n");
}
