use super::expr::pat::is_valid_pattern_identifier;
use super::ParseCtx;
use super::Parser;
use crate::ast::class_or_object::ClassMember;
use crate::ast::class_or_object::ClassOrObjGetter;
use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::class_or_object::ClassOrObjMemberDirectKey;
use crate::ast::class_or_object::ClassOrObjMethod;
use crate::ast::class_or_object::ClassOrObjSetter;
use crate::ast::class_or_object::ClassOrObjVal;
use crate::ast::class_or_object::ClassStaticBlock;
use crate::ast::class_or_object::ObjMember;
use crate::ast::class_or_object::ObjMemberType;
use crate::ast::expr::pat::ClassOrFuncName;
use crate::ast::expr::ClassExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::IdExpr;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::is_keyword;
use crate::loc::Loc;
use crate::operator::OperatorName;
use crate::operator::PRECEDENCE_ASSIGNMENT;
use crate::token::TT;

#[derive(Clone, Copy, PartialEq, Eq)]
enum MethodKind {
  Method,
  Getter,
  Setter,
}

/// Modifiers seen before a class or object member key.
#[derive(Clone, Copy)]
struct MemberModifiers {
  async_: bool,
  generator: bool,
  kind: MethodKind,
}

impl MemberModifiers {
  fn is_plain(&self) -> bool {
    !self.async_ && !self.generator && self.kind == MethodKind::Method
  }
}

/// A class declaration or expression without its `class` keyword.
pub struct ClassParts {
  pub name: Option<Node<ClassOrFuncName>>,
  pub extends: Option<Node<Expr>>,
  pub members: Vec<Node<ClassMember>>,
}

impl<'a> Parser<'a> {
  // Whether the token after the current one shows that the current one is itself the member key,
  // as in `get() {}` or `static = 1`.
  fn modifier_is_key(&mut self) -> bool {
    let (_, next) = self.peek_2();
    matches!(
      next.typ,
      TT::ParenthesisOpen
        | TT::Equals
        | TT::Semicolon
        | TT::BraceClose
        | TT::Comma
        | TT::Colon
        | TT::EOF
    )
  }

  fn member_modifiers(&mut self) -> MemberModifiers {
    let mut modifiers = MemberModifiers {
      async_: false,
      generator: false,
      kind: MethodKind::Method,
    };
    if self.peek().typ == TT::KeywordAsync && !self.modifier_is_key() {
      let (_, next) = self.peek_2();
      if !next.preceded_by_line_terminator {
        self.consume();
        modifiers.async_ = true;
      };
    };
    if self.consume_if(TT::Asterisk).is_match() {
      modifiers.generator = true;
    };
    if modifiers.is_plain() {
      let typ = self.peek().typ;
      if (typ == TT::KeywordGet || typ == TT::KeywordSet) && !self.modifier_is_key() {
        self.consume();
        modifiers.kind = if typ == TT::KeywordGet {
          MethodKind::Getter
        } else {
          MethodKind::Setter
        };
      };
    };
    modifiers
  }

  /// Parses a class or object key like `a`, `'a'`, `#a`, `"a"`, `1`, `[1]`.
  pub fn class_or_obj_key(&mut self, ctx: ParseCtx) -> SyntaxResult<ClassOrObjKey> {
    if self.consume_if(TT::BracketOpen).is_match() {
      let key = self.expr_with_min_prec(
        ctx.with_no_in(false),
        PRECEDENCE_ASSIGNMENT,
        &[TT::BracketClose],
      )?;
      self.require(TT::BracketClose)?;
      return Ok(ClassOrObjKey::Computed(key));
    };
    let key = self.with_loc(|p| {
      let t = p.consume();
      let (key, tt) = match t.typ {
        TT::LiteralString => (p.lit_str_val(&t)?, TT::LiteralString),
        TT::LiteralNumber => (p.string(t.loc), TT::LiteralNumber),
        // There's no trailing `n`.
        TT::LiteralBigInt => {
          let raw = p.str(t.loc);
          (raw[..raw.len() - 1].to_string(), TT::LiteralBigInt)
        }
        TT::PrivateMember => (p.string(t.loc), TT::PrivateMember),
        // Any keyword is allowed as a key.
        typ if typ == TT::Identifier || is_keyword(typ) => {
          (p.string(t.loc), TT::Identifier)
        }
        _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("keyword or identifier"))),
      };
      Ok(ClassOrObjMemberDirectKey { key, tt })
    })?;
    Ok(ClassOrObjKey::Direct(key))
  }

  fn class_or_obj_method(
    &mut self,
    ctx: ParseCtx,
    modifiers: MemberModifiers,
  ) -> SyntaxResult<ClassOrObjVal> {
    let func = self.func_after_name(ctx, modifiers.async_, modifiers.generator)?;
    Ok(match modifiers.kind {
      MethodKind::Method => ClassOrObjVal::Method(func.wrap(|func| ClassOrObjMethod { func })),
      MethodKind::Getter => ClassOrObjVal::Getter(func.wrap(|func| ClassOrObjGetter { func })),
      MethodKind::Setter => ClassOrObjVal::Setter(func.wrap(|func| ClassOrObjSetter { func })),
    })
  }

  /// Parses one object literal member, not including any trailing comma.
  pub fn obj_member(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ObjMember>> {
    self.with_loc(|p| {
      if p.consume_if(TT::DotDotDot).is_match() {
        let val =
          p.expr_with_min_prec(ctx, PRECEDENCE_ASSIGNMENT, &[TT::Comma, TT::BraceClose])?;
        return Ok(ObjMember {
          typ: ObjMemberType::Rest { val },
        });
      };
      let modifiers = p.member_modifiers();
      let key_token = p.peek();
      let key = p.class_or_obj_key(ctx)?;
      if p.peek().typ == TT::ParenthesisOpen {
        let val = p.class_or_obj_method(ctx, modifiers)?;
        return Ok(ObjMember {
          typ: ObjMemberType::Valued { key, val },
        });
      };
      if !modifiers.is_plain() {
        return Err(p.peek().error(SyntaxErrorType::RequiredTokenNotFound(TT::ParenthesisOpen)));
      };
      if p.consume_if(TT::Colon).is_match() {
        let value =
          p.expr_with_min_prec(ctx, PRECEDENCE_ASSIGNMENT, &[TT::Comma, TT::BraceClose])?;
        return Ok(ObjMember {
          typ: ObjMemberType::Valued {
            key,
            val: ClassOrObjVal::Prop(Some(value)),
          },
        });
      };
      if !is_valid_pattern_identifier(key_token.typ) {
        return Err(key_token.error(SyntaxErrorType::ExpectedSyntax("identifier")));
      };
      let name = p.string(key_token.loc);
      if p.consume_if(TT::Equals).is_match() {
        // `{ a = 1 }` is only valid once reinterpreted as a pattern.
        let default =
          p.expr_with_min_prec(ctx, PRECEDENCE_ASSIGNMENT, &[TT::Comma, TT::BraceClose])?;
        let loc = key_token.loc + default.loc;
        let target = Expr::id(key_token.loc, name);
        return Ok(ObjMember {
          typ: ObjMemberType::Valued {
            key,
            val: ClassOrObjVal::Prop(Some(Expr::binary(
              loc,
              OperatorName::Assignment,
              target,
              default,
            ))),
          },
        });
      };
      Ok(ObjMember {
        typ: ObjMemberType::Shorthand {
          id: Node::new(key_token.loc, IdExpr { name }),
        },
      })
    })
  }

  fn class_member(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ClassMember>> {
    self.with_loc(|p| {
      let static_ = p.peek().typ == TT::KeywordStatic && !p.modifier_is_key();
      if static_ {
        p.consume();
        if p.peek().typ == TT::BraceOpen {
          let block = p.with_loc(|p| {
            let body = p.func_body(ctx.with_generator(false))?;
            Ok(ClassStaticBlock { body })
          })?;
          return Ok(ClassMember {
            key: ClassOrObjKey::direct(Loc(block.loc.0, block.loc.0), "", TT::Identifier),
            static_,
            val: ClassOrObjVal::StaticBlock(block),
          });
        };
      };
      let accessor = {
        let (a, b) = p.peek_2();
        a.typ == TT::KeywordAccessor && !b.preceded_by_line_terminator && !p.modifier_is_key()
      };
      if accessor {
        p.consume();
      };
      let modifiers = if accessor {
        MemberModifiers {
          async_: false,
          generator: false,
          kind: MethodKind::Method,
        }
      } else {
        p.member_modifiers()
      };
      let key = p.class_or_obj_key(ctx)?;
      if !accessor && p.peek().typ == TT::ParenthesisOpen {
        let val = p.class_or_obj_method(ctx.with_generator(false), modifiers)?;
        return Ok(ClassMember { key, static_, val });
      };
      if !modifiers.is_plain() {
        return Err(p.peek().error(SyntaxErrorType::RequiredTokenNotFound(TT::ParenthesisOpen)));
      };
      let initializer = if p.consume_if(TT::Equals).is_match() {
        Some(p.expr_with_min_prec(
          ctx.with_no_in(false).with_generator(false),
          PRECEDENCE_ASSIGNMENT,
          &[TT::Semicolon, TT::BraceClose],
        )?)
      } else {
        None
      };
      p.require_semicolon()?;
      let val = if accessor {
        ClassOrObjVal::Accessor(initializer)
      } else {
        ClassOrObjVal::Prop(initializer)
      };
      Ok(ClassMember { key, static_, val })
    })
  }

  pub fn class_body(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<Node<ClassMember>>> {
    self.require(TT::BraceOpen)?;
    let mut members = Vec::new();
    loop {
      match self.peek().typ {
        TT::BraceClose => break,
        TT::Semicolon => {
          self.consume();
        }
        _ => members.push(self.class_member(ctx)?),
      };
    }
    self.require(TT::BraceClose)?;
    Ok(members)
  }

  /// Parses `class [name] [extends X] { ... }`.
  pub fn class_parts(&mut self, ctx: ParseCtx) -> SyntaxResult<ClassParts> {
    self.require(TT::KeywordClass)?;
    let name = if self.peek().typ == TT::KeywordExtends {
      None
    } else {
      self.maybe_class_or_func_name()
    };
    let extends = if self.consume_if(TT::KeywordExtends).is_match() {
      Some(self.class_heritage(ctx)?)
    } else {
      None
    };
    let members = self.class_body(ctx)?;
    Ok(ClassParts {
      name,
      extends,
      members,
    })
  }

  pub fn class_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Expr>> {
    let class = self.with_loc(|p| {
      let ClassParts {
        name,
        extends,
        members,
      } = p.class_parts(ctx)?;
      Ok(ClassExpr {
        name,
        extends,
        members,
      })
    })?;
    Ok(class.wrap(Expr::from))
  }
}
