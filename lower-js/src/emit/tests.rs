use super::emit;
use super::emit_expr;
use crate::ast::expr::Expr;
use crate::loc::Loc;
use crate::operator::OperatorName;
use crate::parse::parse;

fn reprint(src: &str) -> String {
  emit(&parse(src).unwrap().ast)
}

#[track_caller]
fn check(src: &str, expected: &str) {
  assert_eq!(reprint(src), expected, "reprinting {src:?}");
}

#[test]
fn test_statement_layout() {
  check("a; b", "a;\nb;\n");
  check("{}", "{\n}\n");
  check("if (a) b(); else c()", "if (a) b();\nelse c();\n");
  check("if (a) {} else if (b) {} else {}", "if (a) {\n} else if (b) {\n} else {\n}\n");
  check("if (false) for (x of y) ;", "if (false) for (x of y) ;\n");
  check("for (;;) {}", "for (; ; ) {\n}\n");
  check("for (let i = 0; i < n; i++) f(i)", "for (let i = 0; i < n; i++) f(i);\n");
  check("for await (const x of y) {}", "for await (const x of y) {\n}\n");
  check("do {} while (x)", "do {\n} while (x);\n");
  check("label: for (;;) break label;", "label: for (; ; ) break label;\n");
  check(
    "switch (x) { case 1: a(); default: }",
    "switch (x) {\n  case 1:\n    a();\n  default:\n}\n",
  );
  check("try {} catch {}", "try {\n} catch {\n}\n");
  check(
    "try { a() } catch (e) {} finally { b() }",
    "try {\n  a();\n} catch (e) {\n} finally {\n  b();\n}\n",
  );
}

#[test]
fn test_functions_and_classes() {
  check("x = function () {}", "x = function() {\n};\n");
  check("x = function* () {}", "x = function* () {\n};\n");
  check("x = function named(a) { return a; }", "x = function named(a) {\n  return a;\n};\n");
  check(
    "async function* f() { yield* g(); await h; }",
    "async function* f() {\n  yield* g();\n  await h;\n}\n",
  );
  check("a => a", "(a) => a;\n");
  check("async (a, b = 1, ...c) => {}", "async (a, b = 1, ...c) => {\n};\n");
  check(
    "class A extends B { static x = 1; #y; get z() { return 1 } static { init() } }",
    "class A extends B {\n  static x = 1;\n  #y;\n  get z() {\n    return 1;\n  }\n  static {\n    init();\n  }\n}\n",
  );
  check("class A { accessor x = 1; static async *m() {} }", "class A {\n  accessor x = 1;\n  static async *m() {\n  }\n}\n");
  check("class A { 'a b' = 1; 2 = 2; [k] = 3; }", "class A {\n  \"a b\" = 1;\n  2 = 2;\n  [k] = 3;\n}\n");
}

#[test]
fn test_statement_start_parentheses() {
  check("(function () {})()", "(function() {\n})();\n");
  check("(class {})", "(class {\n});\n");
  check("({}).toString()", "({}).toString();\n");
  check("({a} = b)", "({ a } = b);\n");
  check("x = {a} = b", "x = { a } = b;\n");
  check("() => ({})", "() => ({});\n");
  check("() => ({a} = b)", "() => ({ a } = b);\n");
  check("export default (function () {})", "export default (function() {\n});\n");
}

#[test]
fn test_operator_parentheses() {
  check("(a ?? b) || c", "(a ?? b) || c;\n");
  check("a ?? (b && c)", "a ?? (b && c);\n");
  check("(-a) ** b", "(-a) ** b;\n");
  check("a ** -b", "a ** -b;\n");
  check("- -a; + +a; -(-a); typeof x", "- -a;\n+ +a;\n- -a;\ntypeof x;\n");
  check("(a, b) ? c : (d, e)", "(a, b) ? c : (d, e);\n");
  check("a = b ? c : d, e", "a = b ? c : d, e;\n");
  check("f((a, b), c)", "f((a, b), c);\n");
  check("(a + b) * c - (d - e)", "(a + b) * c - (d - e);\n");
  check("for (var i = ('x' in o); ;) ;", "for (var i = (\"x\" in o); ; ) ;\n");
  check("new (a())(); new a; new a.b()", "new (a())();\nnew a();\nnew a.b();\n");
  check("(0, eval)(x)", "(0, eval)(x);\n");
  check("(() => {})()", "(() => {\n})();\n");
}

#[test]
fn test_optional_chains() {
  check("a?.b.c(d)", "a?.b.c(d);\n");
  check("(a?.b).c", "(a?.b).c;\n");
  check("(a?.b)()", "(a?.b)();\n");
  check("a?.[0]?.(1)", "a?.[0]?.(1);\n");
}

#[test]
fn test_integer_objects() {
  check("(123).x", "(123).x;\n");
  check("123[x]", "123[x];\n");
  check("123?.x", "123?.x;\n");
}

#[test]
fn test_literals() {
  check("'a\"b'", "\"a\\\"b\";\n");
  check("[a, , b]", "[a, , b];\n");
  check("x = { a: 1, b, ...c, [d]: 2 }", "x = { a: 1, b, ...c, [d]: 2 };\n");
  check("x = {}", "x = {};\n");
  check("x = `a${b}c`", "x = `a${b}c`;\n");
  check("x = 0b101n", "x = 0b101n;\n");
  check("x = /a+/g", "x = /a+/g;\n");
  check("/* @__PURE__ */ foo(bar)", "/* @__PURE__ */ foo(bar);\n");
}

#[test]
fn test_module_syntax() {
  check(
    "import a, {b as c, \"d-e\" as f} from 'm'",
    "import a, { b as c, \"d-e\" as f } from \"m\";\n",
  );
  check("import * as ns from 'n'", "import * as ns from \"n\";\n");
  check("import 'side'", "import \"side\";\n");
  check("export * as ns from 'm'", "export * as ns from \"m\";\n");
  check("export {a as default, b}", "export { a as default, b };\n");
  check("export const x = 1", "export const x = 1;\n");
  check("export default function () {}", "export default function() {\n}\n");
}

#[test]
fn test_legal_comments() {
  check("/*! keep */\na();", "/*! keep */\na();\n");
}

#[test]
fn test_synthesized_expressions() {
  let loc = Loc(0, 0);
  let call = Expr::helper(loc, "__publicField", vec![
    Expr::this(loc),
    Expr::str(loc, "foo"),
  ]);
  assert_eq!(emit_expr(&call), "__publicField(this, \"foo\")");
  let seq = Expr::comma([Expr::id(loc, "a"), Expr::id(loc, "b")]).unwrap();
  let callee = Expr::member(loc, seq, "c");
  assert_eq!(emit_expr(&callee), "(a, b).c");
  let cond = Expr::cond(
    loc,
    Expr::binary(loc, OperatorName::Equality, Expr::id(loc, "a"), Expr::null(loc)),
    Expr::undefined(loc),
    Expr::member(loc, Expr::id(loc, "a"), "b"),
  );
  assert_eq!(emit_expr(&cond), "a == null ? void 0 : a.b");
}
