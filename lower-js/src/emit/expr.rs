use super::escape::write_string_literal;
use super::precedence::child_min_prec_for_binary;
use super::precedence::expr_prec;
use super::precedence::has_call_on_spine;
use super::precedence::is_chain_link;
use super::precedence::Side;
use super::Printer;
use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::class_or_object::ClassOrObjVal;
use crate::ast::class_or_object::ObjMember;
use crate::ast::class_or_object::ObjMemberType;
use crate::ast::expr::lit::LitArrElem;
use crate::ast::expr::lit::LitTemplatePart;
use crate::ast::expr::pat::ArrPat;
use crate::ast::expr::pat::ObjPat;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::CallArg;
use crate::ast::expr::Expr;
use crate::ast::expr::OptionalChain;
use crate::ast::node::Node;
use crate::operator::OperatorName;
use crate::operator::PRECEDENCE_ASSIGNMENT;
use crate::operator::PRECEDENCE_COMMA;
use crate::operator::PRECEDENCE_CONDITIONAL;
use crate::operator::PRECEDENCE_NEW;
use crate::operator::PRECEDENCE_POSTFIX;
use crate::operator::PRECEDENCE_PREFIX;
use crate::operator::PRECEDENCE_PRIMARY;
use crate::operator::PRECEDENCE_YIELD;
use crate::token::TT;

// Higher than any expression, so the operand is always parenthesized.
const FORCE_PARENS: u8 = PRECEDENCE_PRIMARY + 1;

fn is_logical_or_and(expr: &Node<Expr>) -> bool {
  matches!(
    expr.stx.as_ref(),
    Expr::Binary(b) if matches!(b.stx.operator, OperatorName::LogicalOr | OperatorName::LogicalAnd)
  )
}

fn is_keyword_operator(op: OperatorName) -> bool {
  matches!(
    op,
    OperatorName::Typeof | OperatorName::Void | OperatorName::Delete | OperatorName::Await
  )
}

impl Printer {
  pub(super) fn expr(&mut self, expr: &Node<Expr>, min_prec: u8) {
    if self.needs_parens(expr, min_prec) {
      let no_in = std::mem::replace(&mut self.no_in, false);
      self.push("(");
      self.expr_no_parens(expr);
      self.push(")");
      self.no_in = no_in;
    } else {
      self.expr_no_parens(expr);
    }
  }

  fn needs_parens(&self, expr: &Node<Expr>, min_prec: u8) -> bool {
    if expr_prec(expr) < min_prec {
      return true;
    };
    match expr.stx.as_ref() {
      Expr::Binary(b) => match b.stx.operator {
        OperatorName::In => self.no_in,
        OperatorName::Assignment => {
          matches!(b.stx.left.stx.as_ref(), Expr::ObjPat(_) | Expr::LitObj(_))
            && (self.at(self.stmt_start) || self.at(self.arrow_body_start))
        }
        _ => false,
      },
      Expr::Func(_) | Expr::Class(_) => {
        self.at(self.stmt_start) || self.at(self.export_default_start)
      }
      Expr::LitObj(_) => self.at(self.stmt_start) || self.at(self.arrow_body_start),
      Expr::Call(call) => call.stx.pure && min_prec >= PRECEDENCE_NEW,
      _ => false,
    }
  }

  /// Prints the object of a member access, call or tagged template. A chain link must be
  /// parenthesized unless the parent continues the chain. An integer followed by `.` must be too,
  /// or the dot would be read as a decimal point.
  fn target(&mut self, target: &Node<Expr>, parent_chain: OptionalChain, dot_follows: bool) {
    let breaks_chain = !parent_chain.is_chain() && is_chain_link(target);
    let digits_only = dot_follows
      && matches!(target.stx.as_ref(), Expr::LitNum(n) if n.stx.value.bytes().all(|b| b.is_ascii_digit()));
    self.expr(
      target,
      if breaks_chain || digits_only {
        FORCE_PARENS
      } else {
        PRECEDENCE_NEW
      },
    );
  }

  fn expr_no_parens(&mut self, expr: &Node<Expr>) {
    match expr.stx.as_ref() {
      Expr::ArrowFunc(arrow) => {
        let func = &arrow.stx.func;
        self.arrow(func);
      }
      Expr::Binary(binary) => self.binary(&binary.stx),
      Expr::Call(call) => {
        if call.stx.pure {
          self.push("/* @__PURE__ */ ");
        };
        self.target(&call.stx.callee, call.stx.optional_chaining, false);
        if call.stx.optional_chaining == OptionalChain::Start {
          self.push("?.");
        };
        self.args(&call.stx.arguments);
      }
      Expr::Class(class) => {
        let name = class.stx.name.as_ref().map(|n| n.stx.name.as_str());
        self.class(name, class.stx.extends.as_ref(), &class.stx.members);
      }
      Expr::ComputedMember(member) => {
        self.target(&member.stx.object, member.stx.optional_chaining, false);
        if member.stx.optional_chaining == OptionalChain::Start {
          self.push("?.");
        };
        self.push("[");
        self.expr(&member.stx.member, PRECEDENCE_COMMA);
        self.push("]");
      }
      Expr::Cond(cond) => {
        self.expr(&cond.stx.test, PRECEDENCE_CONDITIONAL + 1);
        self.push(" ? ");
        self.expr(&cond.stx.consequent, PRECEDENCE_ASSIGNMENT);
        self.push(" : ");
        self.expr(&cond.stx.alternate, PRECEDENCE_ASSIGNMENT);
      }
      Expr::Func(func) => {
        let name = func.stx.name.as_ref().map(|n| n.stx.name.as_str());
        self.func_header(&func.stx.func.stx, name);
        self.func_params_and_body(&func.stx.func.stx);
      }
      Expr::Id(id) => self.push(&id.stx.name),
      Expr::Import(import) => {
        self.push("import(");
        self.expr(&import.stx.module, PRECEDENCE_YIELD);
        self.push(")");
      }
      Expr::ImportMeta(_) => self.push("import.meta"),
      Expr::Member(member) => {
        self.target(
          &member.stx.left,
          member.stx.optional_chaining,
          member.stx.optional_chaining != OptionalChain::Start,
        );
        self.push(match member.stx.optional_chaining {
          OptionalChain::Start => "?.",
          _ => ".",
        });
        self.push(&member.stx.right);
      }
      Expr::New(new) => {
        self.push("new ");
        let callee = &new.stx.callee;
        let wrap = has_call_on_spine(callee) || is_chain_link(callee);
        self.expr(callee, if wrap { FORCE_PARENS } else { PRECEDENCE_NEW });
        self.args(&new.stx.arguments);
      }
      Expr::NewTarget(_) => self.push("new.target"),
      Expr::Super(_) => self.push("super"),
      Expr::TaggedTemplate(tagged) => {
        self.target(&tagged.stx.function, OptionalChain::None, false);
        self.template(&tagged.stx.parts);
      }
      Expr::This(_) => self.push("this"),
      Expr::Unary(unary) => {
        let op = unary.stx.operator;
        self.push(op.syntax());
        let arg = &unary.stx.argument;
        let needs_space = is_keyword_operator(op)
          || match arg.stx.as_ref() {
            Expr::Unary(inner) => matches!(
              (op, inner.stx.operator),
              (
                OperatorName::UnaryNegation | OperatorName::PrefixDecrement,
                OperatorName::UnaryNegation | OperatorName::PrefixDecrement
              ) | (
                OperatorName::UnaryPlus | OperatorName::PrefixIncrement,
                OperatorName::UnaryPlus | OperatorName::PrefixIncrement
              )
            ),
            _ => false,
          };
        if needs_space {
          self.push(" ");
        };
        self.expr(arg, PRECEDENCE_PREFIX);
      }
      Expr::UnaryPostfix(unary) => {
        self.expr(&unary.stx.argument, PRECEDENCE_POSTFIX);
        self.push(unary.stx.operator.syntax());
      }
      Expr::Yield(y) => {
        self.push(if y.stx.delegate { "yield*" } else { "yield" });
        if let Some(arg) = &y.stx.argument {
          self.push(" ");
          self.expr(arg, PRECEDENCE_YIELD);
        };
      }
      Expr::LitArr(arr) => {
        self.push("[");
        for (i, elem) in arr.stx.elements.iter().enumerate() {
          if i > 0 {
            self.push(", ");
          };
          match elem {
            LitArrElem::Single(value) => self.expr(value, PRECEDENCE_YIELD),
            LitArrElem::Rest(value) => {
              self.push("...");
              self.expr(value, PRECEDENCE_YIELD);
            }
            LitArrElem::Empty => {}
          };
        }
        if matches!(arr.stx.elements.last(), Some(LitArrElem::Empty)) {
          self.push(",");
        };
        self.push("]");
      }
      Expr::LitBigInt(v) => {
        self.push(&v.stx.value);
        self.push("n");
      }
      Expr::LitBool(v) => self.push(if v.stx.value { "true" } else { "false" }),
      Expr::LitNull(_) => self.push("null"),
      Expr::LitNum(v) => self.push(&v.stx.value),
      Expr::LitObj(obj) => self.obj_members(&obj.stx.members),
      Expr::LitRegex(v) => self.push(&v.stx.value),
      Expr::LitStr(v) => write_string_literal(&mut self.out, &v.stx.value),
      Expr::LitTemplate(v) => self.template(&v.stx.parts),
      Expr::ArrPat(pat) => self.arr_pat(&pat.stx),
      Expr::ObjPat(pat) => self.obj_pat(&pat.stx),
    }
  }

  fn binary(&mut self, binary: &BinaryExpr) {
    let op = binary.operator;
    let mut left_min = child_min_prec_for_binary(op, Side::Left);
    let mut right_min = child_min_prec_for_binary(op, Side::Right);
    if op == OperatorName::NullishCoalescing {
      if is_logical_or_and(&binary.left) {
        left_min = FORCE_PARENS;
      };
      if is_logical_or_and(&binary.right) {
        right_min = FORCE_PARENS;
      };
    };
    if op == OperatorName::Exponentiation
      && matches!(binary.left.stx.as_ref(), Expr::Unary(_))
    {
      left_min = PRECEDENCE_POSTFIX;
    };
    self.expr(&binary.left, left_min);
    if op == OperatorName::Comma {
      self.push(", ");
    } else {
      self.push(" ");
      self.push(op.syntax());
      self.push(" ");
    };
    self.expr(&binary.right, right_min);
  }

  fn args(&mut self, args: &[Node<CallArg>]) {
    self.push("(");
    for (i, arg) in args.iter().enumerate() {
      if i > 0 {
        self.push(", ");
      };
      if arg.stx.spread {
        self.push("...");
      };
      self.expr(&arg.stx.value, PRECEDENCE_YIELD);
    }
    self.push(")");
  }

  fn template(&mut self, parts: &[LitTemplatePart]) {
    self.push("`");
    for part in parts {
      match part {
        LitTemplatePart::String(raw) => self.push(raw),
        LitTemplatePart::Substitution(expr) => {
          self.push("${");
          self.expr(expr, PRECEDENCE_COMMA);
          self.push("}");
        }
      };
    }
    self.push("`");
  }

  pub(super) fn key(&mut self, key: &ClassOrObjKey) {
    match key {
      ClassOrObjKey::Direct(direct) => match direct.stx.tt {
        TT::LiteralString => write_string_literal(&mut self.out, &direct.stx.key),
        TT::LiteralBigInt => {
          self.push(&direct.stx.key);
          self.push("n");
        }
        _ => self.push(&direct.stx.key),
      },
      ClassOrObjKey::Computed(expr) => {
        self.push("[");
        self.expr(expr, PRECEDENCE_YIELD);
        self.push("]");
      }
    };
  }

  fn obj_members(&mut self, members: &[Node<ObjMember>]) {
    if members.is_empty() {
      self.push("{}");
      return;
    };
    self.push("{ ");
    for (i, member) in members.iter().enumerate() {
      if i > 0 {
        self.push(", ");
      };
      match &member.stx.typ {
        ObjMemberType::Valued { key, val } => match val {
          ClassOrObjVal::Prop(Some(value)) | ClassOrObjVal::Accessor(Some(value)) => {
            self.key(key);
            self.push(": ");
            self.expr(value, PRECEDENCE_YIELD);
          }
          ClassOrObjVal::Prop(None) | ClassOrObjVal::Accessor(None) => self.key(key),
          ClassOrObjVal::Method(m) => self.method("", key, &m.stx.func),
          ClassOrObjVal::Getter(g) => self.method("get ", key, &g.stx.func),
          ClassOrObjVal::Setter(s) => self.method("set ", key, &s.stx.func),
          ClassOrObjVal::StaticBlock(_) => {
            unreachable!("static block in object literal")
          }
        },
        ObjMemberType::Shorthand { id } => self.push(&id.stx.name),
        ObjMemberType::Rest { val } => {
          self.push("...");
          self.expr(val, PRECEDENCE_YIELD);
        }
      };
    }
    self.push(" }");
  }

  pub(super) fn pat(&mut self, pat: &Node<Pat>) {
    match pat.stx.as_ref() {
      Pat::Arr(arr) => self.arr_pat(&arr.stx),
      Pat::Id(id) => self.push(&id.stx.name),
      Pat::Obj(obj) => self.obj_pat(&obj.stx),
      Pat::AssignTarget(expr) => self.expr(expr, PRECEDENCE_NEW),
    }
  }

  fn default_value(&mut self, default_value: Option<&Node<Expr>>) {
    if let Some(value) = default_value {
      self.push(" = ");
      self.expr(value, PRECEDENCE_YIELD);
    };
  }

  fn arr_pat(&mut self, arr: &ArrPat) {
    self.push("[");
    for (i, elem) in arr.elements.iter().enumerate() {
      if i > 0 {
        self.push(", ");
      };
      if let Some(elem) = elem {
        self.pat(&elem.target);
        self.default_value(elem.default_value.as_ref());
      };
    }
    if let Some(rest) = &arr.rest {
      if !arr.elements.is_empty() {
        self.push(", ");
      };
      self.push("...");
      self.pat(rest);
    } else if matches!(arr.elements.last(), Some(None)) {
      self.push(",");
    };
    self.push("]");
  }

  fn obj_pat(&mut self, obj: &ObjPat) {
    if obj.properties.is_empty() && obj.rest.is_none() {
      self.push("{}");
      return;
    };
    self.push("{ ");
    for (i, prop) in obj.properties.iter().enumerate() {
      if i > 0 {
        self.push(", ");
      };
      if prop.stx.shorthand {
        self.pat(&prop.stx.target);
      } else {
        self.key(&prop.stx.key);
        self.push(": ");
        self.pat(&prop.stx.target);
      };
      self.default_value(prop.stx.default_value.as_ref());
    }
    if let Some(rest) = &obj.rest {
      if !obj.properties.is_empty() {
        self.push(", ");
      };
      self.push("...");
      self.pat(rest);
    };
    self.push(" }");
  }
}
