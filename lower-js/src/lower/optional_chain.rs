use super::build::call_with_this;
use super::build::is_reusable;
use super::build::take_expr;
use super::build::NullishChain;
use super::Lowerer;
use crate::ast::expr::CallArg;
use crate::ast::expr::CallExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::OptionalChain;
use crate::ast::node::Node;
use crate::loc::Loc;
use crate::operator::OperatorName;
use crate::target::Feature;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum ChainMode {
  Value,
  /// The operand of `delete`; short-circuits to `true`.
  Delete,
  /// The callee of a call or tag, which needs the receiver of its last member access.
  CallTarget,
}

enum Link {
  Member { loc: Loc, name: String },
  Computed { loc: Loc, member: Node<Expr> },
  Call { loc: Loc, pure: bool, arguments: Vec<Node<CallArg>> },
}

pub(super) fn is_chain_link(expr: &Node<Expr>) -> bool {
  chain_state(expr).is_chain()
}

fn chain_state(expr: &Node<Expr>) -> OptionalChain {
  match expr.stx.as_ref() {
    Expr::Member(m) => m.stx.optional_chaining,
    Expr::ComputedMember(m) => m.stx.optional_chaining,
    Expr::Call(c) => c.stx.optional_chaining,
    _ => OptionalChain::None,
  }
}

fn link_object(expr: &Node<Expr>) -> Option<&Node<Expr>> {
  match expr.stx.as_ref() {
    Expr::Member(m) => Some(&m.stx.left),
    Expr::ComputedMember(m) => Some(&m.stx.object),
    Expr::Call(c) => Some(&c.stx.callee),
    _ => None,
  }
}

/// Splits a chain into its links, innermost first, and the base before the `?.`.
fn unchain(mut expr: Node<Expr>) -> (Vec<Link>, Node<Expr>) {
  let mut links = Vec::new();
  loop {
    let loc = expr.loc;
    let (link, object, state) = match *expr.stx {
      Expr::Member(m) => {
        let m = *m.stx;
        (
          Link::Member {
            loc,
            name: m.right,
          },
          m.left,
          m.optional_chaining,
        )
      }
      Expr::ComputedMember(m) => {
        let m = *m.stx;
        (
          Link::Computed {
            loc,
            member: m.member,
          },
          m.object,
          m.optional_chaining,
        )
      }
      Expr::Call(c) => {
        let c = *c.stx;
        (
          Link::Call {
            loc,
            pure: c.pure,
            arguments: c.arguments,
          },
          c.callee,
          c.optional_chaining,
        )
      }
      _ => unreachable!("optional chain link"),
    };
    links.push(link);
    if state != OptionalChain::Continue {
      links.reverse();
      return (links, object);
    };
    expr = object;
  }
}

impl Lowerer<'_> {
  /// A literal `null` or an undeclared `undefined`. Chains on these vanish even when kept native.
  fn is_bare_nullish(&self, base: &Node<Expr>) -> bool {
    match base.stx.as_ref() {
      Expr::LitNull(_) => true,
      Expr::Id(id) => id.stx.name == "undefined" && !self.scopes.declares("undefined"),
      _ => false,
    }
  }

  /// Whether the base of a chain is `null`, `undefined`, `void x`, or a comma sequence ending in
  /// one of those.
  fn is_nullish_base(&self, base: &Node<Expr>) -> bool {
    if self.is_bare_nullish(base) {
      return true;
    };
    match base.stx.as_ref() {
      Expr::Unary(u) => u.stx.operator == OperatorName::Void,
      Expr::Binary(b) if b.stx.operator == OperatorName::Comma => self.is_nullish_base(&b.stx.right),
      _ => false,
    }
  }

  pub(super) fn chain_needs_lowering(&self, chain: &Node<Expr>) -> bool {
    let forced = !self.supports(Feature::OptionalChain);
    let mut link = chain;
    loop {
      if let Expr::Member(m) = link.stx.as_ref() {
        if m.stx.is_private() && self.private_info(&m.stx.right).is_some() {
          return true;
        };
      };
      let state = chain_state(link);
      let Some(object) = link_object(link) else {
        return forced;
      };
      if state != OptionalChain::Continue {
        return forced || self.is_bare_nullish(object);
      };
      link = object;
    }
  }

  /// Visits the parts of a chain that is kept as written.
  pub(super) fn visit_chain_natively(&mut self, expr: &mut Node<Expr>) {
    let state = chain_state(expr);
    match expr.stx.as_mut() {
      Expr::Member(m) => self.chain_object_natively(&mut m.stx.left, state),
      Expr::ComputedMember(m) => {
        self.chain_object_natively(&mut m.stx.object, state);
        self.expr(&mut m.stx.member);
      }
      Expr::Call(c) => {
        self.chain_object_natively(&mut c.stx.callee, state);
        for arg in c.stx.arguments.iter_mut() {
          self.expr(&mut arg.stx.value);
        }
      }
      _ => self.expr(expr),
    }
  }

  fn chain_object_natively(&mut self, object: &mut Node<Expr>, state: OptionalChain) {
    if state == OptionalChain::Continue {
      self.visit_chain_natively(object);
    } else {
      self.expr(object);
    };
  }

  /// Lowers the chain at `expr` if needed. In [`ChainMode::CallTarget`], returns the receiver the
  /// caller must pass as `this`.
  pub(super) fn optional_chain(&mut self, expr: &mut Node<Expr>, mode: ChainMode) -> Option<Node<Expr>> {
    if !self.chain_needs_lowering(expr) {
      self.visit_chain_natively(expr);
      return None;
    };
    let (lowered, this_arg) = self.lower_chain(take_expr(expr), mode);
    *expr = lowered;
    this_arg
  }

  pub(super) fn lower_chain(&mut self, chain: Node<Expr>, mode: ChainMode) -> (Node<Expr>, Option<Node<Expr>>) {
    let loc = chain.loc;
    debug!("lowering optional chain");
    let (mut links, mut base) = unchain(chain);
    let starts_with_call = matches!(links[0], Link::Call { .. });

    if self.is_nullish_base(&base) {
      self.expr(&mut base);
      for link in links.iter_mut() {
        self.visit_link(link);
      }
      let mut parts = nullish_effects(base);
      parts.push(match mode {
        ChainMode::Delete => Expr::bool(loc, true),
        _ => Expr::undefined(loc),
      });
      let mut collapsed = Expr::comma(parts).unwrap_or_else(|| unreachable!("nonempty"));
      collapsed.assoc.set(NullishChain);
      return (collapsed, None);
    };

    let mut start_this = None;
    if starts_with_call {
      let (callee, this_arg) = self.callee_with_this(base);
      base = callee;
      start_this = this_arg;
    } else {
      self.expr(&mut base);
    };
    for link in links.iter_mut() {
      self.visit_link(link);
    }

    let is_eval = starts_with_call && start_this.is_none() && base.stx.is_id("eval");
    let (first, mut current) = self.capture(base);
    if is_eval {
      current = Expr::comma([Expr::num(loc, "0"), current]).unwrap_or_else(|| unreachable!());
    };

    let last = links.len() - 1;
    let mut result_this = None;
    let mut pending_this = start_this;
    let mut links = links.into_iter().enumerate().peekable();
    while let Some((i, link)) = links.next() {
      let next_is_call = matches!(links.peek(), Some((_, Link::Call { .. })));
      current = match link {
        Link::Member { loc, name } => {
          let private = name.starts_with('#') && self.private_info(&name).is_some();
          if private && next_is_call {
            let (object, receiver) = self.capture(current);
            pending_this = Some(receiver);
            self.private_get(loc, object, &name)
          } else if mode == ChainMode::CallTarget && i == last {
            let (object, receiver) = self.capture(current);
            result_this = Some(receiver);
            self.member_or_private(loc, object, name)
          } else {
            self.member_or_private(loc, current, name)
          }
        }
        Link::Computed { loc, member } => {
          if mode == ChainMode::CallTarget && i == last {
            let (object, receiver) = self.capture(current);
            result_this = Some(receiver);
            Expr::computed_member(loc, object, member)
          } else {
            Expr::computed_member(loc, current, member)
          }
        }
        Link::Call {
          loc,
          pure,
          arguments,
        } => match pending_this.take() {
          Some(this_arg) => call_with_this(loc, current, this_arg, arguments),
          None => Node::new(loc, CallExpr {
            optional_chaining: OptionalChain::None,
            pure,
            callee: current,
            arguments,
          })
          .wrap(Expr::from),
        },
      };
    }

    let test = Expr::binary(loc, OperatorName::Equality, first, Expr::null(loc));
    let lowered = match mode {
      ChainMode::Delete => Expr::cond(
        loc,
        test,
        Expr::bool(loc, true),
        Expr::unary(loc, OperatorName::Delete, current),
      ),
      _ => Expr::cond(loc, test, Expr::undefined(loc), current),
    };
    (lowered, result_this)
  }

  fn visit_link(&mut self, link: &mut Link) {
    match link {
      Link::Member { .. } => {}
      Link::Computed { member, .. } => self.expr(member),
      Link::Call { arguments, .. } => {
        for arg in arguments.iter_mut() {
          self.expr(&mut arg.stx.value);
        }
      }
    }
  }

  fn member_or_private(&mut self, loc: Loc, object: Node<Expr>, name: String) -> Node<Expr> {
    if name.starts_with('#') && self.private_info(&name).is_some() {
      self.private_get(loc, object, &name)
    } else {
      Expr::member(loc, object, name)
    }
  }

  /// Visits a callee, splitting off the receiver a member access would have passed as `this`.
  pub(super) fn callee_with_this(&mut self, mut callee: Node<Expr>) -> (Node<Expr>, Option<Node<Expr>>) {
    let loc = callee.loc;
    if is_chain_link(&callee) {
      let this_arg = self.optional_chain(&mut callee, ChainMode::CallTarget);
      return (callee, this_arg);
    };
    match *callee.stx {
      Expr::Member(m) if m.stx.is_private() && self.private_info(&m.stx.right).is_some() => {
        let (read, this_arg) = self.private_callee(Node::new(loc, Expr::Member(m)));
        (read, Some(this_arg))
      }
      Expr::Member(mut m) => {
        if matches!(m.stx.left.stx.as_ref(), Expr::Super(_)) {
          let this_arg = self.this_value(loc);
          return (Node::new(loc, Expr::Member(m)), Some(this_arg));
        };
        self.expr(&mut m.stx.left);
        let (object, receiver) = self.capture(take_expr(&mut m.stx.left));
        m.stx.left = object;
        (Node::new(loc, Expr::Member(m)), Some(receiver))
      }
      Expr::ComputedMember(mut m) => {
        if matches!(m.stx.object.stx.as_ref(), Expr::Super(_)) {
          self.expr(&mut m.stx.member);
          let this_arg = self.this_value(loc);
          return (Node::new(loc, Expr::ComputedMember(m)), Some(this_arg));
        };
        self.expr(&mut m.stx.object);
        let (object, receiver) = self.capture(take_expr(&mut m.stx.object));
        m.stx.object = object;
        self.expr(&mut m.stx.member);
        (Node::new(loc, Expr::ComputedMember(m)), Some(receiver))
      }
      stx => {
        let mut callee = Node::new(loc, stx);
        self.expr(&mut callee);
        (callee, None)
      }
    }
  }
}

/// The parts of a nullish base that must still run.
fn nullish_effects(base: Node<Expr>) -> Vec<Node<Expr>> {
  match *base.stx {
    Expr::Binary(b) if b.stx.operator == OperatorName::Comma => {
      let b = *b.stx;
      let mut parts = comma_parts(b.left);
      parts.extend(nullish_effects(b.right));
      parts
    }
    Expr::Unary(u) if u.stx.operator == OperatorName::Void => {
      let argument = u.stx.argument;
      if is_reusable(&argument) {
        vec![]
      } else {
        vec![argument]
      }
    }
    _ => vec![],
  }
}

fn comma_parts(expr: Node<Expr>) -> Vec<Node<Expr>> {
  let loc = expr.loc;
  match *expr.stx {
    Expr::Binary(b) if b.stx.operator == OperatorName::Comma => {
      let b = *b.stx;
      let mut parts = comma_parts(b.left);
      parts.extend(comma_parts(b.right));
      parts
    }
    stx => vec![Node::new(loc, stx)],
  }
}
