//! Private names that cannot stay native, and the helper calls that replace their uses.

use super::build::take_expr;
use super::Lowerer;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::loc::Loc;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum PrivateKind {
  Field,
  Method,
  Accessor,
}

/// The bindings standing in for one lowered private name.
#[derive(Clone, Debug)]
pub(super) struct PrivateInfo {
  pub kind: PrivateKind,
  // The WeakMap of a field, or the WeakSet brand of a method or accessor.
  pub storage: String,
  pub method: Option<String>,
  pub getter: Option<String>,
  pub setter: Option<String>,
  pub static_: bool,
}

/// The private names a class declares. Names kept native map to `None`, so they shadow a lowered
/// name of an enclosing class.
#[derive(Debug, Default)]
pub(super) struct ClassCtx {
  pub privates: Vec<(String, Option<PrivateInfo>)>,
}

impl ClassCtx {
  fn lookup(&self, name: &str) -> Option<&Option<PrivateInfo>> {
    self.privates.iter().find(|(n, _)| n == name).map(|(_, info)| info)
  }
}

impl Lowerer<'_> {
  pub(super) fn private_info(&self, name: &str) -> Option<&PrivateInfo> {
    self
      .classes
      .iter()
      .rev()
      .find_map(|class| class.lookup(name))
      .and_then(Option::as_ref)
  }

  fn lowered_private(&self, name: &str) -> PrivateInfo {
    match self.private_info(name) {
      Some(info) => info.clone(),
      None => unreachable!("private name {name} is not lowered"),
    }
  }

  /// A read of `obj.#name`, with `obj` already lowered.
  pub(super) fn private_get(&mut self, loc: Loc, obj: Node<Expr>, name: &str) -> Node<Expr> {
    let info = self.lowered_private(name);
    let storage = Expr::id(loc, &info.storage);
    match (info.kind, &info.method, &info.getter) {
      (PrivateKind::Method, Some(method), _) => Expr::helper(loc, "__privateMethod", vec![
        obj,
        storage,
        Expr::id(loc, method),
      ]),
      (PrivateKind::Accessor, _, Some(getter)) => Expr::helper(loc, "__privateGet", vec![
        obj,
        storage,
        Expr::id(loc, getter),
      ]),
      _ => Expr::helper(loc, "__privateGet", vec![obj, storage]),
    }
  }

  /// A write of `value` to `obj.#name`, with both already lowered.
  pub(super) fn private_set(&mut self, loc: Loc, obj: Node<Expr>, name: &str, value: Node<Expr>) -> Node<Expr> {
    let info = self.lowered_private(name);
    let mut args = vec![obj, Expr::id(loc, &info.storage), value];
    if let (PrivateKind::Accessor, Some(setter)) = (info.kind, &info.setter) {
      args.push(Expr::id(loc, setter));
    };
    Expr::helper(loc, "__privateSet", args)
  }

  /// `#name in obj` as a brand check against the name's storage.
  pub(super) fn private_in(&mut self, loc: Loc, name: &str, obj: Node<Expr>) -> Node<Expr> {
    let info = self.lowered_private(name);
    Expr::helper(loc, "__privateIn", vec![Expr::id(loc, &info.storage), obj])
  }

  /// Replaces the private member read at `e`.
  pub(super) fn private_read(&mut self, e: &mut Node<Expr>) {
    let loc = e.loc;
    let Expr::Member(member) = e.stx.as_mut() else {
      unreachable!("private member");
    };
    debug!("lowering private member access");
    self.expr(&mut member.stx.left);
    let obj = take_expr(&mut member.stx.left);
    let name = std::mem::take(&mut member.stx.right);
    *e = self.private_get(loc, obj, &name);
  }

  /// Splits a private member callee into the read and the receiver to call it with.
  pub(super) fn private_callee(&mut self, member: Node<Expr>) -> (Node<Expr>, Node<Expr>) {
    let loc = member.loc;
    let Expr::Member(member) = *member.stx else {
      unreachable!("private member");
    };
    debug!("lowering private method call");
    let mut member = *member.stx;
    self.expr(&mut member.left);
    let (obj, receiver) = self.capture(member.left);
    (self.private_get(loc, obj, &member.right), receiver)
  }

  /// Replaces a private member that is both read and written, e.g. by `++` or destructuring, with
  /// the `_` property of a wrapper.
  pub(super) fn private_wrapper(&mut self, target: &mut Node<Expr>) {
    let loc = target.loc;
    let Expr::Member(member) = target.stx.as_mut() else {
      unreachable!("private member");
    };
    debug!("lowering private member update");
    self.expr(&mut member.stx.left);
    let obj = take_expr(&mut member.stx.left);
    let info = self.lowered_private(&member.stx.right);
    let mut args = vec![obj, Expr::id(loc, &info.storage)];
    if info.kind == PrivateKind::Accessor {
      for binding in [&info.setter, &info.getter] {
        args.push(match binding {
          Some(name) => Expr::id(loc, name),
          None => Expr::undefined(loc),
        });
      }
    };
    *target = Expr::member(loc, Expr::helper(loc, "__privateWrapper", args), "_");
  }
}
