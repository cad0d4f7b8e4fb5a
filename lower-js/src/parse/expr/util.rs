use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::class_or_object::ClassOrObjVal;
use crate::ast::class_or_object::ObjMember;
use crate::ast::class_or_object::ObjMemberType;
use crate::ast::expr::lit::LitArrElem;
use crate::ast::expr::lit::LitArrExpr;
use crate::ast::expr::lit::LitObjExpr;
use crate::ast::expr::pat::ArrPat;
use crate::ast::expr::pat::ArrPatElem;
use crate::ast::expr::pat::ObjPat;
use crate::ast::expr::pat::ObjPatProp;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::operator::OperatorName;
use crate::token::TT;

fn split_default(node: Node<Expr>) -> SyntaxResult<(Node<Pat>, Option<Node<Expr>>)> {
  match *node.stx {
    Expr::Binary(n) if n.stx.operator == OperatorName::Assignment => {
      let BinaryExpr { left, right, .. } = *n.stx;
      Ok((lit_to_pat(left)?, Some(right)))
    }
    stx => Ok((lit_to_pat(Node::new(node.loc, stx))?, None)),
  }
}

/// Converts a literal expression subtree into a pattern (assignment target).
/// `{ a: [b] }` could be an object literal or object pattern. This function is useful for when a pattern was misinterpreted as a literal expression, without needing to rewind and reparse.
pub fn lit_to_pat(node: Node<Expr>) -> SyntaxResult<Node<Pat>> {
  let loc = node.loc;
  match *node.stx {
    Expr::LitArr(n) => {
      let LitArrExpr { elements } = *n.stx;
      let mut pat_elements = Vec::<Option<ArrPatElem>>::new();
      let mut rest = None;
      for element in elements {
        if rest.is_some() {
          return Err(loc.error(SyntaxErrorType::InvalidAssigmentTarget, None));
        };
        match element {
          LitArrElem::Single(elem) => {
            let (target, default_value) = split_default(elem)?;
            pat_elements.push(Some(ArrPatElem {
              target,
              default_value,
            }));
          }
          LitArrElem::Rest(expr) => rest = Some(lit_to_pat(expr)?),
          LitArrElem::Empty => pat_elements.push(None),
        };
      }
      Ok(
        Node::new(loc, ArrPat {
          elements: pat_elements,
          rest,
        })
        .wrap(Pat::Arr),
      )
    }
    Expr::LitObj(n) => {
      let LitObjExpr { members } = *n.stx;
      let mut properties = Vec::new();
      let mut rest = None;
      for member in members {
        let loc = member.loc;
        if rest.is_some() {
          return Err(loc.error(SyntaxErrorType::InvalidAssigmentTarget, None));
        };
        let ObjMember { typ } = *member.stx;
        match typ {
          ObjMemberType::Valued {
            key,
            val: ClassOrObjVal::Prop(Some(value)),
          } => {
            let (target, default_value) = split_default(value)?;
            let shorthand = matches!(
              (&key, target.stx.as_id()),
              (ClassOrObjKey::Direct(d), Some(name)) if d.stx.tt == TT::Identifier && d.stx.key == name
            );
            properties.push(Node::new(loc, ObjPatProp {
              key,
              target,
              shorthand,
              default_value,
            }));
          }
          ObjMemberType::Valued { .. } => {
            return Err(loc.error(SyntaxErrorType::InvalidAssigmentTarget, None));
          }
          ObjMemberType::Shorthand { id } => {
            let name = id.stx.name.clone();
            properties.push(Node::new(loc, ObjPatProp {
              key: ClassOrObjKey::direct(id.loc, name.clone(), TT::Identifier),
              target: Pat::id(id.loc, name),
              shorthand: true,
              default_value: None,
            }));
          }
          ObjMemberType::Rest { val } => rest = Some(lit_to_pat(val)?),
        };
      }
      Ok(Node::new(loc, ObjPat { properties, rest }).wrap(Pat::Obj))
    }
    Expr::Id(n) => Ok(Pat::id(loc, n.stx.name.clone())),
    Expr::ArrPat(n) => Ok(n.wrap(Pat::Arr)),
    Expr::ObjPat(n) => Ok(n.wrap(Pat::Obj)),
    stx @ (Expr::Member(_) | Expr::ComputedMember(_)) => {
      let target = Node::new(loc, stx);
      if is_optional_chain(&target) {
        return Err(loc.error(SyntaxErrorType::InvalidAssigmentTarget, None));
      };
      Ok(Node::new(loc, Pat::AssignTarget(target)))
    }
    _ => Err(loc.error(SyntaxErrorType::InvalidAssigmentTarget, None)),
  }
}

fn is_optional_chain(expr: &Node<Expr>) -> bool {
  match expr.stx.as_ref() {
    Expr::Member(m) => m.stx.optional_chaining.is_chain(),
    Expr::ComputedMember(m) => m.stx.optional_chaining.is_chain(),
    _ => false,
  }
}

// Trying to check if every object, array, or identifier expression operand is actually an assignment target first is too expensive and wasteful, so simply retroactively transform the LHS of a BinaryExpr with Assignment* operator into a target, raising an error if it can't (and is an invalid assignment target). A valid target is:
// - An identifier.
// - A non-optional member or computed member access.
// - A pattern, only for plain `=`.
pub fn lhs_expr_to_assign_target(
  lhs: Node<Expr>,
  operator_name: OperatorName,
) -> SyntaxResult<Node<Expr>> {
  match lhs.stx.as_ref() {
    Expr::Id(_) => Ok(lhs),
    Expr::Member(_) | Expr::ComputedMember(_) if !is_optional_chain(&lhs) => Ok(lhs),
    Expr::LitArr(_) | Expr::LitObj(_) if operator_name == OperatorName::Assignment => {
      let loc = lhs.loc;
      let pat = lit_to_pat(lhs)?;
      Ok(match *pat.stx {
        Pat::Arr(arr) => Node::new(loc, Expr::ArrPat(arr)),
        Pat::Obj(obj) => Node::new(loc, Expr::ObjPat(obj)),
        _ => unreachable!(),
      })
    }
    _ => Err(lhs.error(SyntaxErrorType::InvalidAssigmentTarget)),
  }
}
