use super::super::ParseCtx;
use super::super::Parser;
use crate::ast::stmt::decl::ClassDecl;
use crate::ast::stmt::decl::FuncDecl;
use crate::ast::stmt::decl::PatDecl;
use crate::ast::stmt::decl::VarDecl;
use crate::ast::stmt::decl::VarDeclMode;
use crate::ast::stmt::decl::VarDeclarator;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::operator::PRECEDENCE_ASSIGNMENT;
use crate::parse::class_or_object::ClassParts;
use crate::token::TT;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum VarDeclParseMode {
  // Standard parsing mode for var/let/const statement.
  Asi,
  // Parse as many valid declarators as possible, then break before the first invalid token (i.e. not a comma). Used by for-loop parser.
  Leftmost,
}

impl<'a> Parser<'a> {
  pub fn var_decl_mode(&mut self) -> SyntaxResult<VarDeclMode> {
    let t = self.consume();
    Ok(match t.typ {
      TT::KeywordLet => VarDeclMode::Let,
      TT::KeywordConst => VarDeclMode::Const,
      TT::KeywordVar => VarDeclMode::Var,
      _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("variable declaration"))),
    })
  }

  /// Parses the optional initializer of a declarator whose pattern was already parsed.
  pub fn var_declarator_after_pattern(
    &mut self,
    ctx: ParseCtx,
    pattern: Node<PatDecl>,
  ) -> SyntaxResult<VarDeclarator> {
    let initializer = if self.consume_if(TT::Equals).is_match() {
      Some(self.expr_with_min_prec(
        ctx,
        PRECEDENCE_ASSIGNMENT,
        &[TT::Semicolon, TT::Comma],
      )?)
    } else {
      None
    };
    Ok(VarDeclarator {
      pattern,
      initializer,
    })
  }

  /// Parses the declarators after the first, which is already in `declarators`.
  pub fn var_declarators_rest(
    &mut self,
    ctx: ParseCtx,
    declarators: &mut Vec<VarDeclarator>,
  ) -> SyntaxResult<()> {
    while self.consume_if(TT::Comma).is_match() {
      let pattern = self.pat_decl(ctx)?;
      declarators.push(self.var_declarator_after_pattern(ctx, pattern)?);
    }
    Ok(())
  }

  /// Parses a variable declaration, which contains one or more declarators, each with an optional initializer. Examples of variable declarations:
  /// - `const a = 1`
  /// - `let a, b = 2, c`
  /// - `export var a`
  pub fn var_decl(
    &mut self,
    ctx: ParseCtx,
    parse_mode: VarDeclParseMode,
  ) -> SyntaxResult<Node<VarDecl>> {
    self.with_loc(|p| {
      let export = p.consume_if(TT::KeywordExport).is_match();
      let mode = p.var_decl_mode()?;
      let pattern = p.pat_decl(ctx)?;
      let mut declarators = vec![p.var_declarator_after_pattern(ctx, pattern)?];
      p.var_declarators_rest(ctx, &mut declarators)?;
      if parse_mode == VarDeclParseMode::Asi {
        p.require_semicolon()?;
      };
      Ok(VarDecl {
        export,
        mode,
        declarators,
      })
    })
  }

  /// Parses `[export [default]] [async] function [*] name (...) {...}`.
  pub fn func_decl(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<FuncDecl>> {
    self.with_loc(|p| {
      let export = p.consume_if(TT::KeywordExport).is_match();
      let export_default = export && p.consume_if(TT::KeywordDefault).is_match();
      let start = p.peek();
      let (async_, generator, name) = p.func_header()?;
      if name.is_none() && !export_default {
        return Err(start.error(SyntaxErrorType::ExpectedSyntax("function name")));
      };
      let function = p.func_after_name(ctx, async_, generator)?;
      Ok(FuncDecl {
        export,
        export_default,
        name,
        function,
      })
    })
  }

  /// Parses `[export [default]] class name [extends X] {...}`.
  pub fn class_decl(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ClassDecl>> {
    self.with_loc(|p| {
      let export = p.consume_if(TT::KeywordExport).is_match();
      let export_default = export && p.consume_if(TT::KeywordDefault).is_match();
      let start = p.peek();
      let ClassParts {
        name,
        extends,
        members,
      } = p.class_parts(ctx)?;
      if name.is_none() && !export_default {
        return Err(start.error(SyntaxErrorType::ExpectedSyntax("class name")));
      };
      Ok(ClassDecl {
        export,
        export_default,
        name,
        extends,
        members,
      })
    })
  }
}
