use super::ParseCtx;
use super::Parser;
use crate::ast::expr::pat::ClassOrFuncName;
use crate::ast::expr::Expr;
use crate::ast::expr::FuncExpr;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ParamDecl;
use crate::ast::stmt::Stmt;
use crate::error::SyntaxResult;
use crate::operator::PRECEDENCE_ASSIGNMENT;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn func_params(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<Node<ParamDecl>>> {
    let ctx = ctx.with_no_in(false);
    self.require(TT::ParenthesisOpen)?;
    let mut parameters = Vec::new();
    while self.peek().typ != TT::ParenthesisClose {
      let param = self.with_loc(|p| {
        let rest = p.consume_if(TT::DotDotDot).is_match();
        let pattern = p.pat_decl(ctx)?;
        let default_value = if p.consume_if(TT::Equals).is_match() {
          Some(p.expr_with_min_prec(
            ctx,
            PRECEDENCE_ASSIGNMENT,
            &[TT::Comma, TT::ParenthesisClose],
          )?)
        } else {
          None
        };
        Ok(ParamDecl {
          rest,
          pattern,
          default_value,
        })
      })?;
      let rest = param.stx.rest;
      parameters.push(param);
      // A rest parameter must be last.
      if rest || !self.consume_if(TT::Comma).is_match() {
        break;
      };
    }
    self.require(TT::ParenthesisClose)?;
    Ok(parameters)
  }

  pub fn func_body(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<Node<Stmt>>> {
    self.require(TT::BraceOpen)?;
    let body = self.stmt_list(ctx.with_no_in(false), &[TT::BraceClose])?;
    self.require(TT::BraceClose)?;
    Ok(body)
  }

  /// Parses the parameters and body of a non-arrow function, starting at the opening parenthesis.
  pub fn func_after_name(
    &mut self,
    ctx: ParseCtx,
    async_: bool,
    generator: bool,
  ) -> SyntaxResult<Node<Func>> {
    self.with_loc(|p| {
      let fn_ctx = ctx.with_generator(generator);
      let parameters = p.func_params(fn_ctx)?;
      let body = p.func_body(fn_ctx)?;
      Ok(Func {
        arrow: false,
        async_,
        generator,
        parameters,
        body: FuncBody::Block(body),
      })
    })
  }

  /// Parses `[async] function [*] [name]`, returning the flags and the optional name.
  pub fn func_header(
    &mut self,
  ) -> SyntaxResult<(bool, bool, Option<Node<ClassOrFuncName>>)> {
    let async_ = self.consume_if(TT::KeywordAsync).is_match();
    self.require(TT::KeywordFunction)?;
    let generator = self.consume_if(TT::Asterisk).is_match();
    let name = self.maybe_class_or_func_name();
    Ok((async_, generator, name))
  }

  pub fn func_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Expr>> {
    let expr = self.with_loc(|p| {
      let (async_, generator, name) = p.func_header()?;
      let func = p.func_after_name(ctx, async_, generator)?;
      Ok(FuncExpr { name, func })
    })?;
    Ok(expr.wrap(Expr::from))
  }
}
