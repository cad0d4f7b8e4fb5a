use super::expect_lowered;
use super::expect_lowered_with_options;
use super::expect_lowered_with_unsupported;
use crate::target::EsVersion;
use crate::target::Feature;
use crate::target::Target;
use crate::LowerOptions;

#[test]
fn test_instance_fields() {
  expect_lowered(
    EsVersion::Es2021,
    "class Foo { x = 1; y; }",
    "class Foo {\n  constructor() {\n    __publicField(this, \"x\", 1);\n    __publicField(this, \"y\");\n  }\n}\n",
  );
  expect_lowered(
    EsVersion::Es2022,
    "class Foo { x = 1; y; }",
    "class Foo {\n  x = 1;\n  y;\n}\n",
  );
}

#[test]
fn test_assign_semantics() {
  let options = LowerOptions {
    target: Target::es(EsVersion::Es2021),
    use_define_for_class_fields: false,
    ..LowerOptions::default()
  };
  expect_lowered_with_options(
    &options,
    "class Foo { x = 1; y; 'a b' = 2; }",
    "class Foo {\n  constructor() {\n    this.x = 1;\n    this[\"a b\"] = 2;\n  }\n}\n",
  );
}

#[test]
fn test_fields_in_existing_constructor() {
  expect_lowered(
    EsVersion::Es2021,
    "class A extends B { x = 1; constructor() { super(); foo(); } }",
    "class A extends B {\n  constructor() {\n    super();\n    __publicField(this, \"x\", 1);\n    foo();\n  }\n}\n",
  );
  expect_lowered(
    EsVersion::Es2021,
    "class A extends B { x = 1; }",
    "class A extends B {\n  constructor() {\n    super(...arguments);\n    __publicField(this, \"x\", 1);\n  }\n}\n",
  );
  expect_lowered(
    EsVersion::Es2021,
    "class A { m() {} x = 1; constructor() { 'use strict'; foo(); } }",
    "class A {\n  constructor() {\n    \"use strict\";\n    __publicField(this, \"x\", 1);\n    foo();\n  }\n  m() {\n  }\n}\n",
  );
}

#[test]
fn test_static_fields() {
  expect_lowered(
    EsVersion::Es2021,
    "class Foo { static x = 1 }",
    "class Foo {\n}\n__publicField(Foo, \"x\", 1);\n",
  );
  expect_lowered(
    EsVersion::Es2021,
    "class Foo { static x = 1; static y = this.x }",
    "const _Foo = class _Foo {\n};\n__publicField(_Foo, \"x\", 1);\n__publicField(_Foo, \"y\", _Foo.x);\nlet Foo = _Foo;\n",
  );
  expect_lowered(
    EsVersion::Es2021,
    "export default class { static x = 1 }",
    "export default class stdin_default {\n}\n__publicField(stdin_default, \"x\", 1);\n",
  );
}

#[test]
fn test_static_fields_of_class_expressions() {
  expect_lowered(
    EsVersion::Es2021,
    "x = class { static y = 1 }",
    "var _a;\nx = (_a = class {\n}, __publicField(_a, \"y\", 1), _a);\n",
  );
  expect_lowered(
    EsVersion::Es2021,
    "x = class Foo { static y = Foo }",
    "var _a;\nx = (_a = class {\n}, __publicField(_a, \"y\", _a), _a);\n",
  );
}

#[test]
fn test_computed_keys_keep_order() {
  expect_lowered(
    EsVersion::Es2021,
    "class Foo { [a()] = 1; [b()]() {} }",
    "var _a;\nclass Foo {\n  constructor() {\n    __publicField(this, _a, 1);\n  }\n  [(_a = a(), b())]() {\n  }\n}\n",
  );
  expect_lowered(
    EsVersion::Es2021,
    "class Foo { [a()] = 1; }",
    "var _a;\n_a = a();\nclass Foo {\n  constructor() {\n    __publicField(this, _a, 1);\n  }\n}\n",
  );
}

#[test]
fn test_static_blocks() {
  expect_lowered(
    EsVersion::Es2021,
    "class Foo { static { foo(this); } }",
    "const _Foo = class _Foo {\n};\nfoo(_Foo);\nlet Foo = _Foo;\n",
  );
  expect_lowered(
    EsVersion::Es2021,
    "class Foo { static { let x = 1; foo(x); } }",
    "class Foo {\n}\n(() => {\n  let x = 1;\n  foo(x);\n})();\n",
  );
  expect_lowered(
    EsVersion::Es2022,
    "class Foo { static { foo(this); } }",
    "class Foo {\n  static {\n    foo(this);\n  }\n}\n",
  );
}

#[test]
fn test_private_fields() {
  expect_lowered(
    EsVersion::Es2021,
    "class Foo { #x = 1; foo() { return this.#x; } }",
    "var _x;\nclass Foo {\n  constructor() {\n    __privateAdd(this, _x, 1);\n  }\n  foo() {\n    return __privateGet(this, _x);\n  }\n}\n_x = new WeakMap();\n",
  );
  expect_lowered(
    EsVersion::Es2021,
    "class Foo { #x; foo() { this.#x ??= 1; } }",
    "var _x;\nclass Foo {\n  constructor() {\n    __privateAdd(this, _x);\n  }\n  foo() {\n    __privateGet(this, _x) ?? __privateSet(this, _x, 1);\n  }\n}\n_x = new WeakMap();\n",
  );
  expect_lowered(
    EsVersion::Es2021,
    "class Foo { #x; has(o) { return #x in o; } }",
    "var _x;\nclass Foo {\n  constructor() {\n    __privateAdd(this, _x);\n  }\n  has(o) {\n    return __privateIn(_x, o);\n  }\n}\n_x = new WeakMap();\n",
  );
}

#[test]
fn test_private_methods() {
  expect_lowered(
    EsVersion::Es2021,
    "class Foo { #m() { return 1; } foo() { return this.#m(); } }",
    "var _m, m_fn;\nclass Foo {\n  constructor() {\n    __privateAdd(this, _m);\n  }\n  foo() {\n    return __privateMethod(this, _m, m_fn).call(this);\n  }\n}\n_m = new WeakSet();\nm_fn = function() {\n  return 1;\n};\n",
  );
}

#[test]
fn test_private_update_uses_wrapper() {
  expect_lowered(
    EsVersion::Es2021,
    "class Foo { #x = 0; inc() { this.#x++; } }",
    "var _x;\nclass Foo {\n  constructor() {\n    __privateAdd(this, _x, 0);\n  }\n  inc() {\n    __privateWrapper(this, _x)._++;\n  }\n}\n_x = new WeakMap();\n",
  );
}

#[test]
fn test_auto_accessors() {
  expect_lowered(
    EsVersion::Es2022,
    "class Foo { accessor x = 1; }",
    "class Foo {\n  #x = 1;\n  get x() {\n    return this.#x;\n  }\n  set x(_) {\n    this.#x = _;\n  }\n}\n",
  );
  expect_lowered(
    EsVersion::Es2022,
    "class Foo { accessor [k] = 1; }",
    "var _a;\nclass Foo {\n  #a = 1;\n  get [_a = k]() {\n    return this.#a;\n  }\n  set [_a](_) {\n    this.#a = _;\n  }\n}\n",
  );
  expect_lowered(
    EsVersion::EsNext,
    "class Foo { accessor x = 1; }",
    "class Foo {\n  accessor x = 1;\n}\n",
  );
}

#[test]
fn test_auto_accessor_backing_avoids_existing_names() {
  expect_lowered(
    EsVersion::Es2022,
    "class Foo { #x = 0; accessor x; }",
    "class Foo {\n  #x = 0;\n  #x2;\n  get x() {\n    return this.#x2;\n  }\n  set x(_) {\n    this.#x2 = _;\n  }\n}\n",
  );
}

#[test]
fn test_forced_unsupported_class_field() {
  expect_lowered_with_unsupported(
    &[Feature::ClassField],
    "class Foo { x = 1; static y = 2; }",
    "class Foo {\n  constructor() {\n    __publicField(this, \"x\", 1);\n  }\n  static y = 2;\n}\n",
  );
}
