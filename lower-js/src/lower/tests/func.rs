use super::expect_lowered;
use super::expect_lowered_with_options;
use crate::lower::ParamPurity;
use crate::target::EsVersion;
use crate::target::Target;
use crate::LowerOptions;

#[test]
fn test_async_function() {
  expect_lowered(
    EsVersion::Es2016,
    "async function f() { await x; }",
    "function f() {\n  return __async(this, null, function* () {\n    yield x;\n  });\n}\n",
  );
  expect_lowered(
    EsVersion::Es2017,
    "async function f() { await x; }",
    "async function f() {\n  await x;\n}\n",
  );
}

#[test]
fn test_async_arrow() {
  expect_lowered(
    EsVersion::Es2016,
    "f = async () => { await x; }",
    "f = () => __async(null, null, function* () {\n  yield x;\n});\n",
  );
  expect_lowered(
    EsVersion::Es2016,
    "f = async () => this.x",
    "f = () => __async(this, null, function* () {\n  return this.x;\n});\n",
  );
}

#[test]
fn test_async_method() {
  expect_lowered(
    EsVersion::Es2016,
    "class A { async m() { await x; } }",
    "class A {\n  m() {\n    return __async(this, null, function* () {\n      yield x;\n    });\n  }\n}\n",
  );
}

#[test]
fn test_async_forwarding() {
  expect_lowered(
    EsVersion::Es2016,
    "async function f(a, b = g()) { await a; }",
    "function f(_0) {\n  return __async(this, arguments, function* (a, b = g()) {\n    yield a;\n  });\n}\n",
  );
  expect_lowered(
    EsVersion::Es2016,
    "async function f(a = 1) { return a; }",
    "function f(a = 1) {\n  return __async(this, null, function* () {\n    return a;\n  });\n}\n",
  );
  expect_lowered(
    EsVersion::Es2016,
    "async function f() { return arguments[0]; }",
    "function f() {\n  return __async(this, arguments, function* () {\n    return arguments[0];\n  });\n}\n",
  );
  expect_lowered(
    EsVersion::Es2016,
    "f = async (a, b = g()) => a",
    "f = (_0, ..._1) => __async(null, [_0, ..._1], function* (a, b = g()) {\n  return a;\n});\n",
  );
}

#[test]
fn test_conservative_purity_forwards_identifier_defaults() {
  let options = LowerOptions {
    target: Target::es(EsVersion::Es2016),
    param_purity: ParamPurity::Conservative,
    ..LowerOptions::default()
  };
  expect_lowered_with_options(
    &options,
    "async function f(a = b) { return a; }",
    "function f() {\n  return __async(this, arguments, function* (a = b) {\n    return a;\n  });\n}\n",
  );
  expect_lowered(
    EsVersion::Es2016,
    "async function f(a = b) { return a; }",
    "function f(a = b) {\n  return __async(this, null, function* () {\n    return a;\n  });\n}\n",
  );
}

#[test]
fn test_async_arrow_captures_arguments() {
  expect_lowered(
    EsVersion::Es2016,
    "function f() { return async () => arguments; }",
    "function f() {\n  var _arguments = arguments;\n  return () => __async(null, null, function* () {\n    return _arguments;\n  });\n}\n",
  );
}

#[test]
fn test_async_generator() {
  expect_lowered(
    EsVersion::Es2017,
    "async function* f() { await x; yield* y; }",
    "function f() {\n  return __asyncGenerator(this, null, function* () {\n    yield new __await(x);\n    yield* __yieldStar(y);\n  });\n}\n",
  );
  expect_lowered(
    EsVersion::Es2018,
    "async function* f() { await x; }",
    "async function* f() {\n  await x;\n}\n",
  );
}

#[test]
fn test_arrow_to_function() {
  expect_lowered(
    EsVersion::Es5,
    "function f() { return () => this; }",
    "function f() {\n  var _this = this;\n  return function() {\n    return _this;\n  };\n}\n",
  );
  expect_lowered(
    EsVersion::Es5,
    "function f() { return () => () => arguments[0]; }",
    "function f() {\n  var _arguments = arguments;\n  return function() {\n    return function() {\n      return _arguments[0];\n    };\n  };\n}\n",
  );
  expect_lowered(EsVersion::Es5, "f = () => this", "f = function() {\n  return this;\n};\n");
}

#[test]
fn test_param_default_temps() {
  expect_lowered(
    EsVersion::Es2019,
    "f = (x = a() ?? b) => {}",
    "f = (x = ((_a) => (_a = a()) != null ? _a : b)()) => {\n};\n",
  );
  expect_lowered(
    EsVersion::Es2019,
    "f = () => a?.b.c()?.d",
    "f = () => {\n  var _a;\n  return (_a = a == null ? void 0 : a.b.c()) == null ? void 0 : _a.d;\n};\n",
  );
}
