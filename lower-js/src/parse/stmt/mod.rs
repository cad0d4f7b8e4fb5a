pub mod decl;

use super::expr::pat::is_valid_pattern_identifier;
use super::expr::util::lit_to_pat;
use super::ParseCtx;
use super::Parser;
use crate::ast::node::Node;
use crate::ast::stmt::decl::VarDecl;
use crate::ast::stmt::BlockStmt;
use crate::ast::stmt::BreakStmt;
use crate::ast::stmt::CatchBlock;
use crate::ast::stmt::ContinueStmt;
use crate::ast::stmt::DebuggerStmt;
use crate::ast::stmt::DoWhileStmt;
use crate::ast::stmt::EmptyStmt;
use crate::ast::stmt::ExprStmt;
use crate::ast::stmt::ForInOfLhs;
use crate::ast::stmt::ForInStmt;
use crate::ast::stmt::ForOfStmt;
use crate::ast::stmt::ForTripleStmt;
use crate::ast::stmt::ForTripleStmtInit;
use crate::ast::stmt::IfStmt;
use crate::ast::stmt::LabelStmt;
use crate::ast::stmt::ReturnStmt;
use crate::ast::stmt::Stmt;
use crate::ast::stmt::SwitchBranch;
use crate::ast::stmt::SwitchStmt;
use crate::ast::stmt::ThrowStmt;
use crate::ast::stmt::TryStmt;
use crate::ast::stmt::WhileStmt;
use crate::ast::stmt::WithStmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::operator::PRECEDENCE_ASSIGNMENT;
use crate::token::TT;
use decl::VarDeclParseMode;

impl<'a> Parser<'a> {
  /// Parses statements until one of `ends`, which is not consumed. Legal comments between
  /// statements become comment statements.
  pub fn stmt_list(&mut self, ctx: ParseCtx, ends: &[TT]) -> SyntaxResult<Vec<Node<Stmt>>> {
    let mut body = Vec::new();
    self.skip_legal_comments_upto(self.last_end());
    loop {
      let t = self.peek();
      self.emit_legal_comments(&mut body, t.loc.0);
      if ends.contains(&t.typ) {
        break;
      };
      if t.typ == TT::EOF {
        return Err(t.error(SyntaxErrorType::UnexpectedEnd));
      };
      body.push(self.stmt(ctx)?);
      self.skip_legal_comments_upto(self.last_end());
    }
    Ok(body)
  }

  pub fn stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Stmt>> {
    let (t0, t1) = self.peek_2();
    #[rustfmt::skip]
    let stmt: Node<Stmt> = match t0.typ {
      TT::BraceOpen => self.block_stmt(ctx)?.wrap(Stmt::from),
      TT::KeywordBreak => self.break_stmt()?.wrap(Stmt::from),
      TT::KeywordClass => self.class_decl(ctx)?.wrap(Stmt::from),
      TT::KeywordConst | TT::KeywordVar => self.var_decl(ctx, VarDeclParseMode::Asi)?.wrap(Stmt::from),
      TT::KeywordContinue => self.continue_stmt()?.wrap(Stmt::from),
      TT::KeywordDebugger => self.debugger_stmt()?.wrap(Stmt::from),
      TT::KeywordDo => self.do_while_stmt(ctx)?.wrap(Stmt::from),
      TT::KeywordExport => self.export_stmt(ctx)?,
      TT::KeywordFor => self.for_stmt(ctx)?,
      TT::KeywordFunction => self.func_decl(ctx)?.wrap(Stmt::from),
      TT::KeywordAsync if t1.typ == TT::KeywordFunction && !t1.preceded_by_line_terminator => self.func_decl(ctx)?.wrap(Stmt::from),
      TT::KeywordIf => self.if_stmt(ctx)?.wrap(Stmt::from),
      TT::KeywordImport if !matches!(t1.typ, TT::ParenthesisOpen | TT::Dot) => self.import_stmt()?,
      TT::KeywordLet if is_let_decl(t1.typ) => self.var_decl(ctx, VarDeclParseMode::Asi)?.wrap(Stmt::from),
      TT::KeywordReturn => self.return_stmt(ctx)?.wrap(Stmt::from),
      TT::KeywordSwitch => self.switch_stmt(ctx)?.wrap(Stmt::from),
      TT::KeywordThrow => self.throw_stmt(ctx)?.wrap(Stmt::from),
      TT::KeywordTry => self.try_stmt(ctx)?.wrap(Stmt::from),
      TT::KeywordWhile => self.while_stmt(ctx)?.wrap(Stmt::from),
      TT::KeywordWith => self.with_stmt(ctx)?.wrap(Stmt::from),
      TT::Semicolon => self.empty_stmt()?.wrap(Stmt::from),
      t if is_valid_pattern_identifier(t) && t1.typ == TT::Colon => self.label_stmt(ctx)?.wrap(Stmt::from),
      _ => self.expr_stmt(ctx)?.wrap(Stmt::from),
    };
    Ok(stmt)
  }

  pub fn label_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<LabelStmt>> {
    self.with_loc(|p| {
      let label = p.consume();
      p.require(TT::Colon)?;
      let statement = p.stmt(ctx)?;
      Ok(LabelStmt {
        name: p.string(label.loc),
        statement,
      })
    })
  }

  pub fn empty_stmt(&mut self) -> SyntaxResult<Node<EmptyStmt>> {
    self.with_loc(|p| p.require(TT::Semicolon).map(|_| EmptyStmt {}))
  }

  pub fn block_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<BlockStmt>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let body = p.stmt_list(ctx, &[TT::BraceClose])?;
      p.require(TT::BraceClose)?;
      Ok(BlockStmt { body })
    })
  }

  fn break_or_continue_label(&mut self) -> SyntaxResult<Option<String>> {
    let t = self.peek();
    let label = if is_valid_pattern_identifier(t.typ) && !t.preceded_by_line_terminator {
      self.consume();
      Some(self.string(t.loc))
    } else {
      None
    };
    self.require_semicolon()?;
    Ok(label)
  }

  pub fn break_stmt(&mut self) -> SyntaxResult<Node<BreakStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordBreak)?;
      let label = p.break_or_continue_label()?;
      Ok(BreakStmt { label })
    })
  }

  pub fn continue_stmt(&mut self) -> SyntaxResult<Node<ContinueStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordContinue)?;
      let label = p.break_or_continue_label()?;
      Ok(ContinueStmt { label })
    })
  }

  pub fn debugger_stmt(&mut self) -> SyntaxResult<Node<DebuggerStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordDebugger)?;
      p.require_semicolon()?;
      Ok(DebuggerStmt {})
    })
  }

  pub fn expr_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ExprStmt>> {
    self.with_loc(|p| {
      let expr = p.expr(ctx, [TT::Semicolon])?;
      p.require_semicolon()?;
      Ok(ExprStmt { expr })
    })
  }

  // Parses everything after `for (` up to and including the closing parenthesis, then the body.
  fn for_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Stmt>> {
    let start = self.require(TT::KeywordFor)?;
    let await_ = self.consume_if(TT::KeywordAwait).is_match();
    self.require(TT::ParenthesisOpen)?;
    let head_ctx = ctx.with_no_in(true);
    let (t0, t1) = self.peek_2();
    let is_decl = matches!(t0.typ, TT::KeywordVar | TT::KeywordConst)
      || (t0.typ == TT::KeywordLet && is_let_decl(t1.typ));

    let init = if is_decl {
      let decl_start = self.peek().loc.0;
      let mode = self.var_decl_mode()?;
      let pattern = self.pat_decl(head_ctx)?;
      if matches!(self.peek().typ, TT::KeywordOf | TT::KeywordIn) {
        return self.for_in_of_rest(ctx, start.loc.0, await_, ForInOfLhs::Decl((mode, pattern)));
      };
      let mut declarators = vec![self.var_declarator_after_pattern(head_ctx, pattern)?];
      self.var_declarators_rest(head_ctx, &mut declarators)?;
      let loc = Loc(decl_start, self.last_end());
      ForTripleStmtInit::Decl(Node::new(loc, VarDecl {
        export: false,
        mode,
        declarators,
      }))
    } else if self.peek().typ == TT::Semicolon {
      ForTripleStmtInit::None
    } else {
      let expr = self.expr(head_ctx, [TT::Semicolon])?;
      if matches!(self.peek().typ, TT::KeywordOf | TT::KeywordIn) {
        let target = lit_to_pat(expr)?;
        return self.for_in_of_rest(ctx, start.loc.0, await_, ForInOfLhs::Assign(target));
      };
      ForTripleStmtInit::Expr(expr)
    };

    self.require(TT::Semicolon)?;
    let cond = if self.peek().typ == TT::Semicolon {
      None
    } else {
      Some(self.expr(ctx, [TT::Semicolon])?)
    };
    self.require(TT::Semicolon)?;
    let post = if self.peek().typ == TT::ParenthesisClose {
      None
    } else {
      Some(self.expr(ctx, [TT::ParenthesisClose])?)
    };
    self.require(TT::ParenthesisClose)?;
    let body = self.stmt(ctx)?;
    let loc = start.loc + body.loc;
    Ok(
      Node::new(loc, ForTripleStmt {
        init,
        cond,
        post,
        body,
      })
      .wrap(Stmt::from),
    )
  }

  fn for_in_of_rest(
    &mut self,
    ctx: ParseCtx,
    start: usize,
    await_: bool,
    lhs: ForInOfLhs,
  ) -> SyntaxResult<Node<Stmt>> {
    let t = self.consume();
    let of = t.typ == TT::KeywordOf;
    let rhs = if of {
      self.expr_with_min_prec(ctx, PRECEDENCE_ASSIGNMENT, &[TT::ParenthesisClose])?
    } else {
      self.expr(ctx, [TT::ParenthesisClose])?
    };
    self.require(TT::ParenthesisClose)?;
    let body = self.stmt(ctx)?;
    let loc = Loc(start, body.loc.1);
    Ok(if of {
      Node::new(loc, ForOfStmt {
        await_,
        lhs,
        rhs,
        body,
      })
      .wrap(Stmt::from)
    } else {
      if await_ {
        return Err(t.error(SyntaxErrorType::RequiredTokenNotFound(TT::KeywordOf)));
      };
      Node::new(loc, ForInStmt { lhs, rhs, body }).wrap(Stmt::from)
    })
  }

  pub fn if_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<IfStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordIf)?;
      p.require(TT::ParenthesisOpen)?;
      let test = p.expr(ctx, [TT::ParenthesisClose])?;
      p.require(TT::ParenthesisClose)?;
      let consequent = p.stmt(ctx)?;
      let alternate = if p.consume_if(TT::KeywordElse).is_match() {
        Some(p.stmt(ctx)?)
      } else {
        None
      };
      Ok(IfStmt {
        test,
        consequent,
        alternate,
      })
    })
  }

  pub fn return_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ReturnStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordReturn)?;
      let t = p.peek();
      let value = if t.preceded_by_line_terminator
        || matches!(t.typ, TT::Semicolon | TT::BraceClose | TT::EOF)
      {
        // Automatic Semicolon Insertion.
        None
      } else {
        Some(p.expr(ctx, [TT::Semicolon])?)
      };
      p.require_semicolon()?;
      Ok(ReturnStmt { value })
    })
  }

  pub fn throw_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<ThrowStmt>> {
    self.with_loc(|p| {
      let start = p.require(TT::KeywordThrow)?;
      if p.peek().preceded_by_line_terminator {
        // Illegal under Automatic Semicolon Insertion rules.
        return Err(start.error(SyntaxErrorType::LineTerminatorAfterThrow));
      }
      let value = p.expr(ctx, [TT::Semicolon])?;
      p.require_semicolon()?;
      Ok(ThrowStmt { value })
    })
  }

  pub fn try_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<TryStmt>> {
    self.with_loc(|p| {
      let start = p.require(TT::KeywordTry)?;
      let wrapped = p.block_stmt(ctx)?;
      let catch = if p.consume_if(TT::KeywordCatch).is_match() {
        let parameter = if p.consume_if(TT::ParenthesisOpen).is_match() {
          let pattern = p.pat_decl(ctx)?;
          p.require(TT::ParenthesisClose)?;
          Some(pattern)
        } else {
          None
        };
        Some(p.with_loc(|p| {
          p.require(TT::BraceOpen)?;
          let body = p.stmt_list(ctx, &[TT::BraceClose])?;
          p.require(TT::BraceClose)?;
          Ok(CatchBlock { parameter, body })
        })?)
      } else {
        None
      };
      let finally = if p.consume_if(TT::KeywordFinally).is_match() {
        Some(p.block_stmt(ctx)?)
      } else {
        None
      };
      if catch.is_none() && finally.is_none() {
        return Err(start.error(SyntaxErrorType::TryStatementHasNoCatchOrFinally));
      }
      Ok(TryStmt {
        wrapped,
        catch,
        finally,
      })
    })
  }

  pub fn while_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<WhileStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordWhile)?;
      p.require(TT::ParenthesisOpen)?;
      let condition = p.expr(ctx, [TT::ParenthesisClose])?;
      p.require(TT::ParenthesisClose)?;
      let body = p.stmt(ctx)?;
      Ok(WhileStmt { condition, body })
    })
  }

  pub fn with_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<WithStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordWith)?;
      p.require(TT::ParenthesisOpen)?;
      let object = p.expr(ctx, [TT::ParenthesisClose])?;
      p.require(TT::ParenthesisClose)?;
      let body = p.stmt(ctx)?;
      Ok(WithStmt { object, body })
    })
  }

  pub fn do_while_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<DoWhileStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordDo)?;
      let body = p.stmt(ctx)?;
      p.require(TT::KeywordWhile)?;
      p.require(TT::ParenthesisOpen)?;
      let condition = p.expr(ctx, [TT::ParenthesisClose])?;
      p.require(TT::ParenthesisClose)?;
      // The semicolon after `do ... while (x)` is always optional.
      let _ = p.consume_if(TT::Semicolon);
      Ok(DoWhileStmt { condition, body })
    })
  }

  pub fn switch_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<SwitchStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordSwitch)?;
      p.require(TT::ParenthesisOpen)?;
      let test = p.expr(ctx, [TT::ParenthesisClose])?;
      p.require(TT::ParenthesisClose)?;
      p.require(TT::BraceOpen)?;
      let mut branches = Vec::new();
      while p.peek().typ != TT::BraceClose {
        let branch = p.with_loc(|p| {
          let case = if p.consume_if(TT::KeywordCase).is_match() {
            Some(p.expr(ctx, [TT::Colon])?)
          } else {
            p.require(TT::KeywordDefault)?;
            None
          };
          p.require(TT::Colon)?;
          let body = p.stmt_list(ctx, &[TT::KeywordCase, TT::KeywordDefault, TT::BraceClose])?;
          Ok(SwitchBranch { case, body })
        })?;
        branches.push(branch);
      }
      p.require(TT::BraceClose)?;
      Ok(SwitchStmt { test, branches })
    })
  }
}

// `let` starts a declaration only when followed by a binding; otherwise it's an identifier.
fn is_let_decl(next: TT) -> bool {
  matches!(next, TT::BracketOpen | TT::BraceOpen) || is_valid_pattern_identifier(next)
}
