use super::parse;
use super::Parser;
use crate::ast::class_or_object::ClassOrObjVal;
use crate::ast::expr::lit::LitTemplatePart;
use crate::ast::expr::Expr;
use crate::ast::expr::OptionalChain;
use crate::ast::node::Node;
use crate::ast::stmt::ForInOfLhs;
use crate::ast::stmt::Stmt;
use crate::diag::CODE_AMBIGUOUS_NULLISH;
use crate::error::SyntaxErrorType;
use crate::lex::LexMode;
use crate::lex::Lexer;
use crate::operator::OperatorName;
use crate::token::TT;

fn parse_stmts(src: &str) -> Vec<Node<Stmt>> {
  parse(src).unwrap().ast.stx.body
}

fn parse_expr(src: &str) -> Node<Expr> {
  let mut body = parse_stmts(src);
  assert_eq!(body.len(), 1, "expected one statement in {src:?}");
  match *body.remove(0).stx {
    Stmt::Expr(e) => e.stx.expr,
    other => panic!("expected expression statement, got {:?}", other),
  }
}

fn nullish_messages(src: &str) -> Vec<String> {
  parse(src)
    .unwrap()
    .diagnostics
    .into_iter()
    .filter(|d| d.code == CODE_AMBIGUOUS_NULLISH)
    .map(|d| d.message)
    .collect()
}

#[test]
fn test_parser_token_buffer() {
  let lexer = Lexer::new("let x = /a/ / 1;");
  let mut p = Parser::new(lexer);
  let cp = p.checkpoint();
  assert_eq!(p.next_tok_i, 0);

  let t = p.peek();
  assert_eq!(p.next_tok_i, 0);
  assert_eq!(p.buf.len(), 1);
  assert_eq!(t.typ, TT::KeywordLet);

  let t = p.consume();
  assert_eq!(p.next_tok_i, 1);
  assert_eq!(t.typ, TT::KeywordLet);
  let t = p.consume();
  assert_eq!(p.next_tok_i, 2);
  assert_eq!(t.typ, TT::Identifier);

  p.restore_checkpoint(cp);
  assert_eq!(p.next_tok_i, 0);
  assert_eq!(p.buf.len(), 2);

  // Peeking with a different mode drops the buffered tokens lexed with the old one.
  let t = p.peek_with_mode(LexMode::SlashIsRegex);
  assert_eq!(p.buf.len(), 1);
  assert_eq!(t.typ, TT::KeywordLet);
}

#[test]
fn test_mixing_nullish_with_logical_operators() {
  assert_eq!(nullish_messages("a ?? b || c"), vec![
    "Cannot use \"||\" with \"??\" without parentheses"
  ]);
  assert_eq!(nullish_messages("a ?? b && c"), vec![
    "Cannot use \"&&\" with \"??\" without parentheses"
  ]);
  assert_eq!(nullish_messages("a || b ?? c"), vec![
    "Cannot use \"??\" with \"||\" without parentheses"
  ]);
  assert_eq!(nullish_messages("a && b ?? c"), vec![
    "Cannot use \"??\" with \"&&\" without parentheses"
  ]);
  assert!(nullish_messages("a ?? (b || c)").is_empty());
  assert!(nullish_messages("(a || b) ?? c").is_empty());
  assert!(nullish_messages("a ?? b ?? c").is_empty());
  assert!(nullish_messages("a || b && c").is_empty());
}

#[test]
fn test_nullish_diagnostic_has_note() {
  let out = parse("a ?? b || c").unwrap();
  let diag = &out.diagnostics[0];
  assert!(diag.is_error());
  assert_eq!(diag.notes, vec![
    "Expressions of the form \"x ?? y || z\" are not allowed in JavaScript. You must disambiguate between \"(x ?? y) || z\" and \"x ?? (y || z)\" by adding parentheses."
  ]);
}

#[test]
fn test_optional_chain_links() {
  let expr = parse_expr("a?.b.c(d)");
  let Expr::Call(call) = expr.stx.as_ref() else {
    panic!("expected call, got {:?}", expr);
  };
  assert_eq!(call.stx.optional_chaining, OptionalChain::Continue);
  let Expr::Member(c) = call.stx.callee.stx.as_ref() else {
    panic!("expected member");
  };
  assert_eq!(c.stx.optional_chaining, OptionalChain::Continue);
  let Expr::Member(b) = c.stx.left.stx.as_ref() else {
    panic!("expected member");
  };
  assert_eq!(b.stx.optional_chaining, OptionalChain::Start);
  assert_eq!(b.stx.right, "b");
}

#[test]
fn test_parentheses_end_optional_chain() {
  let expr = parse_expr("(a?.b).c");
  let Expr::Member(c) = expr.stx.as_ref() else {
    panic!("expected member");
  };
  assert_eq!(c.stx.optional_chaining, OptionalChain::None);
}

#[test]
fn test_pure_comment_marks_call() {
  let expr = parse_expr("/* @__PURE__ */ foo(bar)");
  let Expr::Call(call) = expr.stx.as_ref() else {
    panic!("expected call");
  };
  assert!(call.stx.pure);
  let expr = parse_expr("foo(bar)");
  let Expr::Call(call) = expr.stx.as_ref() else {
    panic!("expected call");
  };
  assert!(!call.stx.pure);
}

#[test]
fn test_arrow_function_and_grouping() {
  assert!(matches!(parse_expr("(a, b) => a + b").stx.as_ref(), Expr::ArrowFunc(_)));
  assert!(matches!(parse_expr("async (a) => a").stx.as_ref(), Expr::ArrowFunc(f) if f.stx.func.stx.async_));
  assert!(matches!(parse_expr("a => a").stx.as_ref(), Expr::ArrowFunc(_)));
  assert!(matches!(parse_expr("(a, b)").stx.as_ref(), Expr::Binary(_)));
  assert!(matches!(parse_expr("async(a)").stx.as_ref(), Expr::Call(_)));
  let err = parse("(a)\n=> a").err().unwrap();
  assert_eq!(err.typ, SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters);
}

#[test]
fn test_destructuring_assignment() {
  let expr = parse_expr("[a, b = 1, ...c] = d");
  let Expr::Binary(bin) = expr.stx.as_ref() else {
    panic!("expected assignment");
  };
  let Expr::ArrPat(arr) = bin.stx.left.stx.as_ref() else {
    panic!("expected array pattern, got {:?}", bin.stx.left);
  };
  assert_eq!(arr.stx.elements.len(), 2);
  assert!(arr.stx.elements[1].as_ref().unwrap().default_value.is_some());
  assert!(arr.stx.rest.is_some());

  let expr = parse_expr("({a, b: c = 2} = d)");
  let Expr::Binary(bin) = expr.stx.as_ref() else {
    panic!("expected assignment");
  };
  let Expr::ObjPat(obj) = bin.stx.left.stx.as_ref() else {
    panic!("expected object pattern");
  };
  assert!(obj.stx.properties[0].stx.shorthand);
  assert!(!obj.stx.properties[1].stx.shorthand);
  assert!(obj.stx.properties[1].stx.default_value.is_some());

  let err = parse("a + b = c").err().unwrap();
  assert_eq!(err.typ, SyntaxErrorType::InvalidAssigmentTarget);
}

#[test]
fn test_template_parts() {
  let expr = parse_expr("`a${b}c${d}`");
  let Expr::LitTemplate(t) = expr.stx.as_ref() else {
    panic!("expected template");
  };
  let strings: Vec<&str> = t
    .stx
    .parts
    .iter()
    .filter_map(|p| match p {
      LitTemplatePart::String(s) => Some(s.as_str()),
      LitTemplatePart::Substitution(_) => None,
    })
    .collect();
  assert_eq!(strings, vec!["a", "c", ""]);
  assert!(matches!(parse_expr("tag`x`").stx.as_ref(), Expr::TaggedTemplate(_)));
}

#[test]
fn test_for_of_heads() {
  let stmts = parse_stmts("for (const [a, b] of c) ; for ([x.y] of z) ; for await (x of y) ;");
  let Stmt::ForOf(first) = stmts[0].stx.as_ref() else {
    panic!("expected for-of");
  };
  assert!(matches!(first.stx.lhs, ForInOfLhs::Decl(_)));
  let Stmt::ForOf(second) = stmts[1].stx.as_ref() else {
    panic!("expected for-of");
  };
  assert!(matches!(second.stx.lhs, ForInOfLhs::Assign(_)));
  let Stmt::ForOf(third) = stmts[2].stx.as_ref() else {
    panic!("expected for-of");
  };
  assert!(third.stx.await_);
  assert!(matches!(parse_stmts("for (let i = 0; i < 1; i++) ;")[0].stx.as_ref(), Stmt::ForTriple(_)));
  assert!(matches!(parse_stmts("for (x in y) ;")[0].stx.as_ref(), Stmt::ForIn(_)));
}

#[test]
fn test_class_members() {
  let stmts = parse_stmts(
    "class A { static x = 1; #y; accessor z = 2; static { init() } get w() { return 1 } static() {} async *gen() {} }",
  );
  let Stmt::ClassDecl(class) = stmts[0].stx.as_ref() else {
    panic!("expected class");
  };
  let members = &class.stx.members;
  assert_eq!(members.len(), 7);
  assert!(members[0].stx.static_);
  assert!(matches!(members[0].stx.val, ClassOrObjVal::Prop(Some(_))));
  assert!(members[1].stx.key.is_private());
  assert!(matches!(members[2].stx.val, ClassOrObjVal::Accessor(Some(_))));
  assert!(matches!(members[3].stx.val, ClassOrObjVal::StaticBlock(_)));
  assert!(matches!(members[4].stx.val, ClassOrObjVal::Getter(_)));
  assert_eq!(members[5].stx.key.direct_name(), Some("static"));
  assert!(!members[5].stx.static_);
  let ClassOrObjVal::Method(gen) = &members[6].stx.val else {
    panic!("expected method");
  };
  assert!(gen.stx.func.stx.async_ && gen.stx.func.stx.generator);
}

#[test]
fn test_legal_comments_become_statements() {
  let stmts = parse_stmts("/*! keep */\na();\n// @license MIT\nb(/*! inner */);\n");
  assert_eq!(stmts.len(), 4);
  let Stmt::Comment(c) = stmts[0].stx.as_ref() else {
    panic!("expected comment");
  };
  assert_eq!(c.stx.text, "/*! keep */");
  assert!(matches!(stmts[2].stx.as_ref(), Stmt::Comment(c) if c.stx.text == "// @license MIT"));
}

#[test]
fn test_asi_and_restricted_productions() {
  let stmts = parse_stmts("a\nb\nreturn_ = 1");
  assert_eq!(stmts.len(), 3);
  let err = parse("throw\nx").err().unwrap();
  assert_eq!(err.typ, SyntaxErrorType::LineTerminatorAfterThrow);
  let err = parse("try {}").err().unwrap();
  assert_eq!(err.typ, SyntaxErrorType::TryStatementHasNoCatchOrFinally);
  assert!(parse("a b").is_err());
}

#[test]
fn test_import_export_forms() {
  let stmts = parse_stmts(
    "import a, {b as c, \"d-e\" as f} from 'm'; import * as ns from 'n'; export * as x from 'y'; export {a as default}; export default 1 + 2;",
  );
  assert_eq!(stmts.len(), 5);
  assert!(matches!(stmts[0].stx.as_ref(), Stmt::Import(_)));
  assert!(matches!(stmts[2].stx.as_ref(), Stmt::ExportList(e) if e.stx.from.as_deref() == Some("y")));
  assert!(matches!(stmts[4].stx.as_ref(), Stmt::ExportDefaultExpr(_)));
}

#[test]
fn test_prefix_and_binary_operators() {
  let expr = parse_expr("-a - typeof b;");
  let Expr::Binary(sub) = *expr.stx else {
    panic!("expected a binary expression");
  };
  assert_eq!(sub.stx.operator, OperatorName::Subtraction);
  assert!(matches!(&*sub.stx.left.stx, Expr::Unary(u) if u.stx.operator == OperatorName::UnaryNegation));
  assert!(matches!(&*sub.stx.right.stx, Expr::Unary(u) if u.stx.operator == OperatorName::Typeof));
}
