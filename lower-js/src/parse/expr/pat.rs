use super::super::ParseCtx;
use super::super::Parser;
use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::expr::pat::ArrPat;
use crate::ast::expr::pat::ArrPatElem;
use crate::ast::expr::pat::ClassOrFuncName;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::pat::ObjPat;
use crate::ast::expr::pat::ObjPatProp;
use crate::ast::expr::pat::Pat;
use crate::ast::node::Node;
use crate::ast::stmt::decl::PatDecl;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::operator::PRECEDENCE_ASSIGNMENT;
use crate::token::TT;
use crate::token::UNRESERVED_KEYWORDS;

pub fn is_valid_pattern_identifier(typ: TT) -> bool {
  match typ {
    TT::Identifier => true,
    t => UNRESERVED_KEYWORDS.contains(&t),
  }
}

impl<'a> Parser<'a> {
  pub fn maybe_class_or_func_name(&mut self) -> Option<Node<ClassOrFuncName>> {
    let t = self.peek();
    if !is_valid_pattern_identifier(t.typ) {
      return None;
    };
    self.consume();
    Some(Node::new(t.loc, ClassOrFuncName {
      name: self.string(t.loc),
    }))
  }

  /// Parses an identifier pattern.
  pub fn id_pat(&mut self) -> SyntaxResult<Node<IdPat>> {
    self.with_loc(|p| {
      let t = p.consume();
      if !is_valid_pattern_identifier(t.typ) {
        return Err(t.error(SyntaxErrorType::ExpectedSyntax("identifier")));
      }
      Ok(IdPat {
        name: p.string(t.loc),
      })
    })
  }

  /// Parses an object pattern like `{ x, y: z, [computed]: value, ...rest }`.
  /// An object pattern may only contain one rest element, which must not have a trailing comma.
  pub fn obj_pat(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ObjPat>> {
    let ctx = ctx.with_no_in(false);
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let mut properties = Vec::new();
      let mut rest = None;
      while p.peek().typ != TT::BraceClose {
        // Check inside loop to ensure that it must come first or after a comma.
        if p.consume_if(TT::DotDotDot).is_match() {
          rest = Some(p.pat(ctx)?);
          break;
        };

        let prop = p.with_loc(|p| {
          let key = p.class_or_obj_key(ctx)?;
          let (shorthand, target) = if p.consume_if(TT::Colon).is_match() {
            (false, p.pat(ctx)?)
          } else {
            // The key must be a plain identifier to be a shorthand.
            match &key {
              ClassOrObjKey::Direct(n) if n.stx.tt == TT::Identifier => {
                (true, Pat::id(n.loc, n.stx.key.clone()))
              }
              ClassOrObjKey::Direct(n) => {
                return Err(n.error(SyntaxErrorType::ExpectedSyntax("identifier")));
              }
              ClassOrObjKey::Computed(name) => {
                return Err(name.error(SyntaxErrorType::ExpectedSyntax(
                  "object pattern property subpattern",
                )));
              }
            }
          };
          let default_value = if p.consume_if(TT::Equals).is_match() {
            Some(p.expr_with_min_prec(ctx, PRECEDENCE_ASSIGNMENT, &[TT::Comma, TT::BraceClose])?)
          } else {
            None
          };
          Ok(ObjPatProp {
            key,
            target,
            shorthand,
            default_value,
          })
        })?;
        properties.push(prop);
        // This will break if `}`.
        if !p.consume_if(TT::Comma).is_match() {
          break;
        };
      }
      p.require(TT::BraceClose)?;
      Ok(ObjPat { properties, rest })
    })
  }

  /// Parses an array pattern like `[a, b = c, ...rest]`.
  pub fn arr_pat(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ArrPat>> {
    let ctx = ctx.with_no_in(false);
    self.with_loc(|p| {
      p.require(TT::BracketOpen)?;
      let mut elements = Vec::<Option<ArrPatElem>>::new();
      let mut rest = None;
      while p.peek().typ != TT::BracketClose {
        if p.consume_if(TT::DotDotDot).is_match() {
          rest = Some(p.pat(ctx)?);
          break;
        };

        // An unnamed element is allowed to ignore that element.
        if p.consume_if(TT::Comma).is_match() {
          elements.push(None);
        } else {
          let target = p.pat(ctx)?;
          let default_value = if p.consume_if(TT::Equals).is_match() {
            Some(p.expr_with_min_prec(
              ctx,
              PRECEDENCE_ASSIGNMENT,
              &[TT::Comma, TT::BracketClose],
            )?)
          } else {
            None
          };
          elements.push(Some(ArrPatElem {
            target,
            default_value,
          }));
          // This will break if `]`.
          if !p.consume_if(TT::Comma).is_match() {
            break;
          };
        };
      }
      p.require(TT::BracketClose)?;
      Ok(ArrPat { elements, rest })
    })
  }

  /// Parses any binding pattern: an identifier, an object pattern, or an array pattern.
  pub fn pat(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Pat>> {
    let t = self.peek();
    let pat = match t.typ {
      TT::BraceOpen => self.obj_pat(ctx)?.wrap(Pat::Obj),
      TT::BracketOpen => self.arr_pat(ctx)?.wrap(Pat::Arr),
      t if is_valid_pattern_identifier(t) => self.id_pat()?.wrap(Pat::Id),
      _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("pattern"))),
    };
    Ok(pat)
  }

  pub fn pat_decl(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<PatDecl>> {
    let pat = self.pat(ctx)?;
    Ok(PatDecl::new(pat))
  }
}
