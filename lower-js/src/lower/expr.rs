use super::build::call_with_this;
use super::build::is_reusable;
use super::build::new_expr;
use super::build::take_expr;
use super::optional_chain::is_chain_link;
use super::optional_chain::ChainMode;
use super::AwaitAs;
use super::CtxKind;
use super::Lowerer;
use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::expr::lit::LitArrElem;
use crate::ast::expr::lit::LitTemplatePart;
use crate::ast::expr::Expr;
use crate::ast::expr::YieldExpr;
use crate::ast::node::Node;
use crate::diag::CODE_UNSUPPORTED_TOP_LEVEL_AWAIT;
use crate::loc::Loc;
use crate::operator::OperatorName;
use crate::target::Feature;
use crate::token::TT;
use tracing::debug;

impl Lowerer<'_> {
  pub(super) fn expr(&mut self, e: &mut Node<Expr>) {
    let loc = e.loc;
    if is_chain_link(e) {
      self.optional_chain(e, ChainMode::Value);
      return;
    };
    match e.stx.as_mut() {
      Expr::ArrowFunc(arrow) => {
        self.func(&mut arrow.stx.func);
        if !self.supports(Feature::Arrow) {
          self.arrow_to_function(e);
        };
      }
      Expr::Binary(_) => self.binary(e),
      Expr::Call(_) => self.call(e),
      Expr::Class(_) => self.class_expr(e),
      Expr::ComputedMember(m) => {
        self.expr(&mut m.stx.object);
        self.expr(&mut m.stx.member);
      }
      Expr::Cond(c) => {
        self.expr(&mut c.stx.test);
        self.expr(&mut c.stx.consequent);
        self.expr(&mut c.stx.alternate);
      }
      Expr::Func(f) => self.func(&mut f.stx.func),
      Expr::Id(id) => {
        if id.stx.name == "arguments" {
          if let Some(alias) = self.resolve_arguments() {
            *e = Expr::id(loc, alias);
          };
        };
      }
      Expr::Import(i) => self.expr(&mut i.stx.module),
      Expr::ImportMeta(_) | Expr::NewTarget(_) | Expr::Super(_) => {}
      Expr::Member(m) => {
        if m.stx.is_private() && self.private_info(&m.stx.right).is_some() {
          self.private_read(e);
        } else {
          self.expr(&mut m.stx.left);
        };
      }
      Expr::New(n) => {
        self.expr(&mut n.stx.callee);
        for arg in n.stx.arguments.iter_mut() {
          self.expr(&mut arg.stx.value);
        }
      }
      Expr::TaggedTemplate(_) => self.tagged_template(e),
      Expr::This(_) => {
        if let Some(alias) = self.resolve_this() {
          *e = Expr::id(loc, alias);
        };
      }
      Expr::Unary(_) => self.unary(e),
      Expr::UnaryPostfix(u) => self.update_target(&mut u.stx.argument),
      Expr::Yield(y) => {
        if let Some(argument) = &mut y.stx.argument {
          self.expr(argument);
          if y.stx.delegate && self.ctx().await_as == AwaitAs::YieldAwait {
            let inner = take_expr(argument);
            *argument = Expr::helper(loc, "__yieldStar", vec![inner]);
          };
        };
      }
      Expr::LitArr(arr) => {
        for elem in arr.stx.elements.iter_mut() {
          match elem {
            LitArrElem::Single(e) | LitArrElem::Rest(e) => self.expr(e),
            LitArrElem::Empty => {}
          };
        }
      }
      Expr::LitBigInt(b) => {
        if !self.supports(Feature::BigInt) {
          debug!("lowering bigint literal");
          let value = b.stx.value.replace('_', "");
          *e = bigint_call(loc, value);
        };
      }
      Expr::LitBool(_)
      | Expr::LitNull(_)
      | Expr::LitNum(_)
      | Expr::LitRegex(_)
      | Expr::LitStr(_) => {}
      Expr::LitObj(_) => self.object_literal(e),
      Expr::LitTemplate(t) => {
        for part in t.stx.parts.iter_mut() {
          if let LitTemplatePart::Substitution(sub) = part {
            self.expr(sub);
          };
        }
        if !self.supports(Feature::TemplateLiteral) {
          self.template_to_concat(e);
        };
      }
      Expr::ArrPat(_) | Expr::ObjPat(_) => self.assign_target(e),
    }
  }

  /// An expression at the root of a parameter default or pattern, whose temps cannot become
  /// `var`s of the function.
  pub(super) fn root_expr(&mut self, e: &mut Node<Expr>) {
    if self.ctx().in_params {
      self.hosted_param_expr(e);
    } else {
      self.expr(e);
    };
  }

  /// Visits a key. Computed keys are expressions; BigInt keys become their decimal string.
  pub(super) fn key(&mut self, key: &mut ClassOrObjKey) {
    match key {
      ClassOrObjKey::Computed(e) => self.root_expr(e),
      ClassOrObjKey::Direct(direct) => {
        if direct.stx.tt == TT::LiteralBigInt && !self.supports(Feature::BigInt) {
          if let Some(decimal) = bigint_decimal(&direct.stx.key) {
            debug!("lowering bigint key");
            direct.stx.key = decimal;
            direct.stx.tt = TT::LiteralString;
          };
        };
      }
    }
  }

  /// Evaluates `e` once into a temp if it cannot simply be repeated. Returns the expression for
  /// the first evaluation and one for each later reference.
  pub(super) fn capture(&mut self, e: Node<Expr>) -> (Node<Expr>, Node<Expr>) {
    if is_reusable(&e) {
      return (e.clone(), e);
    };
    let loc = e.loc;
    let name = self.temps.alloc(self.scopes);
    (
      Expr::assign(loc, Expr::id(loc, &name), e),
      Expr::id(loc, name),
    )
  }

  fn call(&mut self, e: &mut Node<Expr>) {
    let loc = e.loc;
    let Expr::Call(call) = e.stx.as_mut() else {
      unreachable!("call");
    };
    let callee = &mut call.stx.callee;
    let this_arg = if is_chain_link(callee) {
      self.optional_chain(callee, ChainMode::CallTarget)
    } else if matches!(callee.stx.as_ref(), Expr::Member(m) if m.stx.is_private() && self.private_info(&m.stx.right).is_some())
    {
      let (read, this_arg) = self.private_callee(take_expr(callee));
      *callee = read;
      Some(this_arg)
    } else {
      self.expr(callee);
      None
    };
    for arg in call.stx.arguments.iter_mut() {
      self.expr(&mut arg.stx.value);
    }
    if let Some(this_arg) = this_arg {
      let callee = take_expr(&mut call.stx.callee);
      let arguments = std::mem::take(&mut call.stx.arguments);
      *e = call_with_this(loc, callee, this_arg, arguments);
    };
  }

  fn unary(&mut self, e: &mut Node<Expr>) {
    let loc = e.loc;
    let Expr::Unary(u) = e.stx.as_mut() else {
      unreachable!("unary");
    };
    match u.stx.operator {
      OperatorName::Delete if is_chain_link(&u.stx.argument) => {
        if self.chain_needs_lowering(&u.stx.argument) {
          let chain = take_expr(&mut u.stx.argument);
          *e = self.lower_chain(chain, ChainMode::Delete).0;
        } else {
          self.visit_chain_natively(&mut u.stx.argument);
        };
      }
      OperatorName::PrefixIncrement | OperatorName::PrefixDecrement => {
        self.update_target(&mut u.stx.argument)
      }
      OperatorName::Await => {
        self.expr(&mut u.stx.argument);
        let ctx = self.ctx();
        if ctx.kind == CtxKind::Module && !self.supports(Feature::TopLevelAwait) {
          self.top_level_await_unsupported(loc);
        };
        if self.ctx().await_as != AwaitAs::Await {
          let argument = take_expr(&mut u.stx.argument);
          *e = self.awaited(loc, argument);
        };
      }
      _ => self.expr(&mut u.stx.argument),
    };
  }

  /// `await argument` in the form the current function uses.
  pub(super) fn awaited(&self, loc: Loc, argument: Node<Expr>) -> Node<Expr> {
    match self.ctx().await_as {
      AwaitAs::Await => Expr::unary(loc, OperatorName::Await, argument),
      AwaitAs::Yield => yield_expr(loc, argument),
      AwaitAs::YieldAwait => yield_expr(loc, new_expr(loc, "__await", vec![argument])),
    }
  }

  pub(super) fn top_level_await_unsupported(&mut self, loc: Loc) {
    self.report(
      CODE_UNSUPPORTED_TOP_LEVEL_AWAIT,
      "Top-level await is not available in the configured target environment",
      loc,
    );
  }

  /// The operand of `++`/`--`, which is read and written.
  fn update_target(&mut self, target: &mut Node<Expr>) {
    if matches!(target.stx.as_ref(), Expr::Member(m) if m.stx.is_private() && self.private_info(&m.stx.right).is_some())
    {
      self.private_wrapper(target);
    } else {
      self.assign_target(target);
    };
  }

  /// A place that is only written: the left of `=`, a destructuring target, a `for-in` binding.
  pub(super) fn assign_target(&mut self, target: &mut Node<Expr>) {
    match target.stx.as_mut() {
      Expr::Id(_) => {}
      Expr::Member(m) => {
        if m.stx.is_private() && self.private_info(&m.stx.right).is_some() {
          self.private_wrapper(target);
        } else {
          self.expr(&mut m.stx.left);
        };
      }
      Expr::ComputedMember(m) => {
        self.expr(&mut m.stx.object);
        self.expr(&mut m.stx.member);
      }
      Expr::ArrPat(arr) => {
        for elem in arr.stx.elements.iter_mut().flatten() {
          self.pat(&mut elem.target);
          if let Some(default) = &mut elem.default_value {
            self.expr(default);
          };
        }
        if let Some(rest) = &mut arr.stx.rest {
          self.pat(rest);
        };
      }
      Expr::ObjPat(obj) => {
        for prop in obj.stx.properties.iter_mut() {
          self.key(&mut prop.stx.key);
          self.pat(&mut prop.stx.target);
          if let Some(default) = &mut prop.stx.default_value {
            self.expr(default);
          };
        }
        if let Some(rest) = &mut obj.stx.rest {
          self.pat(rest);
        };
      }
      _ => self.expr(target),
    }
  }
}

fn yield_expr(loc: Loc, argument: Node<Expr>) -> Node<Expr> {
  Node::new(loc, YieldExpr {
    delegate: false,
    argument: Some(argument),
  })
  .wrap(Expr::from)
}

/// `/* @__PURE__ */ BigInt("digits")`.
pub(super) fn bigint_call(loc: Loc, digits: String) -> Node<Expr> {
  let mut call = Expr::helper(loc, "BigInt", vec![Expr::str(loc, digits)]);
  if let Expr::Call(c) = call.stx.as_mut() {
    c.stx.pure = true;
  };
  call
}

/// The decimal digits of a BigInt literal's value, e.g. `37` for `0b100101`.
pub(super) fn bigint_decimal(raw: &str) -> Option<String> {
  let digits = raw.replace('_', "");
  let lower = digits.to_ascii_lowercase();
  let (radix, body) = if let Some(rest) = lower.strip_prefix("0x") {
    (16, rest)
  } else if let Some(rest) = lower.strip_prefix("0o") {
    (8, rest)
  } else if let Some(rest) = lower.strip_prefix("0b") {
    (2, rest)
  } else {
    (10, lower.as_str())
  };
  num_bigint::BigUint::parse_bytes(body.as_bytes(), radix).map(|v| v.to_str_radix(10))
}

#[cfg(test)]
mod tests {
  use super::bigint_decimal;

  #[test]
  fn test_bigint_decimal() {
    assert_eq!(bigint_decimal("0b100101").as_deref(), Some("37"));
    assert_eq!(bigint_decimal("0XFF").as_deref(), Some("255"));
    assert_eq!(bigint_decimal("0o1_0").as_deref(), Some("8"));
    assert_eq!(bigint_decimal("1_000_000_000_000_000_000_000").as_deref(), Some("1000000000000000000000"));
    assert_eq!(bigint_decimal("0x"), None);
  }
}
