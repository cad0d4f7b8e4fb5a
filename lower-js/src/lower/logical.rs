//! Binary operators: `??`, `**`, logical and compound assignment, private brand checks, and
//! assignments whose target needs a rewrite.

use super::build::take_expr;
use super::Lowerer;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::loc::Loc;
use crate::operator::OperatorName;
use crate::target::Feature;
use tracing::debug;

/// A place split into the parts evaluated once, so it can be read and then written.
enum Access {
  Id(String),
  Member { obj: Node<Expr>, name: String },
  Computed { obj: Node<Expr>, key: Node<Expr> },
}

fn is_logical_assignment(op: OperatorName) -> bool {
  matches!(
    op,
    OperatorName::AssignmentLogicalAnd
      | OperatorName::AssignmentLogicalOr
      | OperatorName::AssignmentNullishCoalescing
  )
}

fn is_splittable(target: &Node<Expr>) -> bool {
  matches!(
    target.stx.as_ref(),
    Expr::Id(_) | Expr::Member(_) | Expr::ComputedMember(_)
  )
}

impl Lowerer<'_> {
  fn is_lowered_private(&self, target: &Node<Expr>) -> bool {
    matches!(target.stx.as_ref(), Expr::Member(m) if m.stx.is_private() && self.private_info(&m.stx.right).is_some())
  }

  pub(super) fn binary(&mut self, e: &mut Node<Expr>) {
    let loc = e.loc;
    let Expr::Binary(b) = e.stx.as_mut() else {
      unreachable!("binary");
    };
    let op = b.stx.operator;
    let private_target = self.is_lowered_private(&b.stx.left);

    if is_logical_assignment(op)
      && is_splittable(&b.stx.left)
      && (private_target || !self.supports(Feature::LogicalAssignment))
    {
      *e = self.logical_assignment(loc, *take_binary(e));
      return;
    };

    if op == OperatorName::Assignment {
      if private_target {
        *e = self.private_assignment(loc, *take_binary(e));
        return;
      };
      self.assign_target(&mut b.stx.left);
      self.expr(&mut b.stx.right);
      if matches!(b.stx.left.stx.as_ref(), Expr::ObjPat(_)) && !self.supports(Feature::ObjectRestSpread) {
        self.lower_assign_rest(e);
      };
      return;
    };

    if let Some(binary_op) = op.compound_binary() {
      let pow = op == OperatorName::AssignmentExponentiation && !self.supports(Feature::ExponentOperator);
      if (private_target || pow) && is_splittable(&b.stx.left) {
        *e = self.compound_assignment(loc, *take_binary(e), binary_op);
        return;
      };
      self.assign_target(&mut b.stx.left);
      self.expr(&mut b.stx.right);
      return;
    };

    if op == OperatorName::In {
      if let Expr::Id(id) = b.stx.left.stx.as_ref() {
        if id.stx.name.starts_with('#') && self.private_info(&id.stx.name).is_some() {
          debug!("lowering private brand check");
          let name = id.stx.name.clone();
          self.expr(&mut b.stx.right);
          let obj = take_expr(&mut b.stx.right);
          *e = self.private_in(loc, &name, obj);
          return;
        };
      };
    };

    self.expr(&mut b.stx.left);
    self.expr(&mut b.stx.right);
    match op {
      OperatorName::NullishCoalescing if !self.supports(Feature::NullishCoalescing) => {
        debug!("lowering nullish coalescing");
        let b = *take_binary(e);
        *e = self.nullish_or(loc, b.left, b.right);
      }
      OperatorName::Exponentiation if !self.supports(Feature::ExponentOperator) => {
        debug!("lowering exponent operator");
        let b = *take_binary(e);
        *e = Expr::helper(loc, "__pow", vec![b.left, b.right]);
      }
      _ => {}
    };
  }

  /// `left ?? right` without the operator: `left != null ? left : right`, capturing `left`.
  fn nullish_or(&mut self, loc: Loc, left: Node<Expr>, right: Node<Expr>) -> Node<Expr> {
    let (first, again) = self.capture(left);
    Expr::cond(
      loc,
      Expr::binary(loc, OperatorName::Inequality, first, Expr::null(loc)),
      again,
      right,
    )
  }

  fn logical_assignment(&mut self, loc: Loc, b: BinaryExpr) -> Node<Expr> {
    debug!("lowering logical assignment");
    let (first, again) = self.split_target(b.left);
    let mut right = b.right;
    self.expr(&mut right);
    let read = self.access_read(loc, first);
    let write = self.access_write(loc, again, right);
    match b.operator {
      OperatorName::AssignmentLogicalAnd => Expr::binary(loc, OperatorName::LogicalAnd, read, write),
      OperatorName::AssignmentLogicalOr => Expr::binary(loc, OperatorName::LogicalOr, read, write),
      OperatorName::AssignmentNullishCoalescing => {
        if self.supports(Feature::NullishCoalescing) {
          Expr::binary(loc, OperatorName::NullishCoalescing, read, write)
        } else {
          self.nullish_or(loc, read, write)
        }
      }
      _ => unreachable!("logical assignment"),
    }
  }

  /// `a op= b` as `a = a op b`, for targets or operators that cannot stay compound.
  fn compound_assignment(&mut self, loc: Loc, b: BinaryExpr, binary_op: OperatorName) -> Node<Expr> {
    debug!("lowering compound assignment");
    // The target is evaluated before the right side, so the write takes the first evaluation.
    let (first, again) = self.split_target(b.left);
    let mut right = b.right;
    self.expr(&mut right);
    let read = self.access_read(loc, again);
    let value = if binary_op == OperatorName::Exponentiation && !self.supports(Feature::ExponentOperator) {
      Expr::helper(loc, "__pow", vec![read, right])
    } else {
      Expr::binary(loc, binary_op, read, right)
    };
    self.access_write(loc, first, value)
  }

  fn private_assignment(&mut self, loc: Loc, b: BinaryExpr) -> Node<Expr> {
    let Expr::Member(member) = *b.left.stx else {
      unreachable!("private member");
    };
    debug!("lowering private member assignment");
    let mut member = *member.stx;
    self.expr(&mut member.left);
    let mut right = b.right;
    self.expr(&mut right);
    self.private_set(loc, member.left, &member.right, right)
  }

  /// Lowers the parts of a place and splits it into the first access and a repeat of it.
  fn split_target(&mut self, target: Node<Expr>) -> (Access, Access) {
    match *target.stx {
      Expr::Id(id) => {
        let name = id.stx.name;
        (Access::Id(name.clone()), Access::Id(name))
      }
      Expr::Member(member) => {
        let mut member = *member.stx;
        self.expr(&mut member.left);
        let (obj, again) = self.capture(member.left);
        (
          Access::Member {
            obj,
            name: member.right.clone(),
          },
          Access::Member {
            obj: again,
            name: member.right,
          },
        )
      }
      Expr::ComputedMember(member) => {
        let mut member = *member.stx;
        self.expr(&mut member.object);
        let (obj, obj_again) = self.capture(member.object);
        self.expr(&mut member.member);
        let (key, key_again) = self.capture(member.member);
        (Access::Computed { obj, key }, Access::Computed {
          obj: obj_again,
          key: key_again,
        })
      }
      _ => unreachable!("assignment target"),
    }
  }

  fn access_read(&mut self, loc: Loc, access: Access) -> Node<Expr> {
    match access {
      Access::Id(name) => Expr::id(loc, name),
      Access::Member { obj, name } => {
        if name.starts_with('#') && self.private_info(&name).is_some() {
          self.private_get(loc, obj, &name)
        } else {
          Expr::member(loc, obj, name)
        }
      }
      Access::Computed { obj, key } => Expr::computed_member(loc, obj, key),
    }
  }

  fn access_write(&mut self, loc: Loc, access: Access, value: Node<Expr>) -> Node<Expr> {
    match access {
      Access::Id(name) => Expr::assign(loc, Expr::id(loc, name), value),
      Access::Member { obj, name } => {
        if name.starts_with('#') && self.private_info(&name).is_some() {
          self.private_set(loc, obj, &name, value)
        } else {
          Expr::assign(loc, Expr::member(loc, obj, name), value)
        }
      }
      Access::Computed { obj, key } => Expr::assign(loc, Expr::computed_member(loc, obj, key), value),
    }
  }
}

fn take_binary(e: &mut Node<Expr>) -> Box<BinaryExpr> {
  match *take_expr(e).stx {
    Expr::Binary(b) => b.stx,
    _ => unreachable!("binary"),
  }
}
