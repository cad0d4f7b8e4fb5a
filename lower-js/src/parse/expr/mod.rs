pub mod lit;
pub mod pat;
pub mod util;

use pat::is_valid_pattern_identifier;
use util::lhs_expr_to_assign_target;

use super::ParseCtx;
use super::Parser;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::ArrowFuncExpr;
use crate::ast::expr::CallArg;
use crate::ast::expr::CallExpr;
use crate::ast::expr::ComputedMemberExpr;
use crate::ast::expr::CondExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::ImportExpr;
use crate::ast::expr::ImportMeta;
use crate::ast::expr::MemberExpr;
use crate::ast::expr::NewExpr;
use crate::ast::expr::NewTarget;
use crate::ast::expr::OptionalChain;
use crate::ast::expr::SuperExpr;
use crate::ast::expr::TaggedTemplateExpr;
use crate::ast::expr::ThisExpr;
use crate::ast::expr::UnaryPostfixExpr;
use crate::ast::expr::YieldExpr;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ParamDecl;
use crate::ast::stmt::decl::PatDecl;
use crate::diag::Diagnostic;
use crate::diag::CODE_AMBIGUOUS_NULLISH;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::LexMode;
use crate::lex::is_keyword;
use crate::loc::Loc;
use crate::operator::Associativity;
use crate::operator::OperatorName;
use crate::operator::PRECEDENCE_ASSIGNMENT;
use crate::operator::PRECEDENCE_COMMA;
use crate::operator::PRECEDENCE_CONDITIONAL;
use crate::operator::PRECEDENCE_LOGICAL_OR;
use crate::operator::PRECEDENCE_NEW;
use crate::operator::PRECEDENCE_NULLISH;
use crate::operator::PRECEDENCE_POSTFIX;
use crate::operator::PRECEDENCE_PREFIX;
use crate::parse::operator::binary_operator;
use crate::parse::operator::prefix_operator;
use crate::token::Token;
use crate::token::TT;

/// Whether `typ` can follow `.` or `?.` as a property name.
pub fn is_member_name(typ: TT) -> bool {
  typ == TT::Identifier || typ == TT::PrivateMember || is_keyword(typ)
}

impl<'a> Parser<'a> {
  /// Parses call arguments after the opening parenthesis, including the closing one.
  pub fn call_args(&mut self, ctx: ParseCtx) -> SyntaxResult<Vec<Node<CallArg>>> {
    let ctx = ctx.with_no_in(false);
    let mut args = Vec::new();
    while self.peek().typ != TT::ParenthesisClose {
      let arg = self.with_loc(|p| {
        let spread = p.consume_if(TT::DotDotDot).is_match();
        let value =
          p.expr_with_min_prec(ctx, PRECEDENCE_ASSIGNMENT, &[TT::Comma, TT::ParenthesisClose])?;
        Ok(CallArg { spread, value })
      })?;
      args.push(arg);
      if !self.consume_if(TT::Comma).is_match() {
        break;
      };
    }
    self.require(TT::ParenthesisClose)?;
    Ok(args)
  }

  pub fn expr<const N: usize>(
    &mut self,
    ctx: ParseCtx,
    terminators: [TT; N],
  ) -> SyntaxResult<Node<Expr>> {
    self.expr_with_min_prec(ctx, PRECEDENCE_COMMA, &terminators)
  }

  pub fn expr_with_min_prec(
    &mut self,
    ctx: ParseCtx,
    min_prec: u8,
    terminators: &[TT],
  ) -> SyntaxResult<Node<Expr>> {
    let operand = self.expr_operand(ctx, terminators)?;
    self.expr_suffix(ctx, operand, min_prec, terminators)
  }

  /// Parses a parenthesised expression like `(a + b)`.
  pub fn grouping(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Expr>> {
    self.require(TT::ParenthesisOpen)?;
    let expr = self.expr(ctx.with_no_in(false), [TT::ParenthesisClose])?;
    self.require(TT::ParenthesisClose)?;
    Ok(expr)
  }

  fn arrow_param_single(&mut self, name: Token) -> Node<ParamDecl> {
    let pattern = PatDecl::new(Pat::id(name.loc, self.string(name.loc)));
    Node::new(name.loc, ParamDecl {
      rest: false,
      pattern,
      default_value: None,
    })
  }

  /// Parses an arrow function starting at its parameters (or `async`).
  pub fn arrow_func_expr(
    &mut self,
    ctx: ParseCtx,
    terminators: &[TT],
  ) -> SyntaxResult<Node<Expr>> {
    let func = self.with_loc(|p| {
      let async_ = {
        let (a, b) = p.peek_2();
        a.typ == TT::KeywordAsync
          && b.typ != TT::EqualsChevronRight
          && !b.preceded_by_line_terminator
      };
      if async_ {
        p.consume();
      }
      let parameters = if is_valid_pattern_identifier(p.peek().typ) {
        let name = p.consume();
        vec![p.arrow_param_single(name)]
      } else {
        p.func_params(ctx.with_generator(false))?
      };
      let arrow = p.require(TT::EqualsChevronRight)?;
      if arrow.preceded_by_line_terminator {
        return Err(arrow.error(SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters));
      };
      let body_ctx = ctx.with_generator(false);
      let body = if p.peek().typ == TT::BraceOpen {
        FuncBody::Block(p.func_body(body_ctx)?)
      } else {
        FuncBody::Expression(p.expr_with_min_prec(body_ctx, PRECEDENCE_ASSIGNMENT, terminators)?)
      };
      Ok(Func {
        arrow: true,
        async_,
        generator: false,
        parameters,
        body,
      })
    })?;
    Ok(Node::new(func.loc, ArrowFuncExpr { func }).wrap(Expr::from))
  }

  fn try_arrow_func_expr(
    &mut self,
    ctx: ParseCtx,
    terminators: &[TT],
  ) -> SyntaxResult<Option<Node<Expr>>> {
    let cp = self.checkpoint();
    match self.arrow_func_expr(ctx, terminators) {
      Ok(expr) => Ok(Some(expr)),
      Err(err) if err.typ == SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters => {
        Err(err)
      }
      Err(_) => {
        self.restore_checkpoint(cp);
        Ok(None)
      }
    }
  }

  fn id_expr(&mut self, t: &Token) -> Node<Expr> {
    Expr::id(t.loc, self.string(t.loc))
  }

  pub fn expr_operand(&mut self, ctx: ParseCtx, terminators: &[TT]) -> SyntaxResult<Node<Expr>> {
    let cp = self.checkpoint();
    let t = self.consume_with_mode(LexMode::SlashIsRegex);

    if let Some(operator) = prefix_operator(t.typ) {
      let argument = self.expr_with_min_prec(ctx, PRECEDENCE_PREFIX, terminators)?;
      let loc = t.loc + argument.loc;
      return Ok(Expr::unary(loc, operator, argument));
    };

    let expr = match t.typ {
      TT::KeywordYield if ctx.in_generator => {
        let delegate = self.consume_if(TT::Asterisk).is_match();
        let next = self.peek_with_mode(LexMode::SlashIsRegex);
        let has_argument = !next.preceded_by_line_terminator
          && !terminators.contains(&next.typ)
          && !matches!(
            next.typ,
            TT::ParenthesisClose
              | TT::BracketClose
              | TT::BraceClose
              | TT::Comma
              | TT::Semicolon
              | TT::Colon
              | TT::EOF
          );
        let argument = if has_argument || delegate {
          Some(self.expr_with_min_prec(ctx, PRECEDENCE_ASSIGNMENT, terminators)?)
        } else {
          None
        };
        let loc = argument.as_ref().map_or(t.loc, |a| t.loc + a.loc);
        Node::new(loc, YieldExpr { delegate, argument }).wrap(Expr::from)
      }
      TT::KeywordNew => {
        self.restore_checkpoint(cp);
        self.new_expr(ctx)?
      }
      TT::KeywordAsync => {
        let next = self.peek();
        if next.typ == TT::KeywordFunction && !next.preceded_by_line_terminator {
          self.restore_checkpoint(cp);
          self.func_expr(ctx)?
        } else if next.typ == TT::EqualsChevronRight && !next.preceded_by_line_terminator {
          // `async => x`, where `async` is the parameter name.
          self.restore_checkpoint(cp);
          self.arrow_func_expr(ctx, terminators)?
        } else if !next.preceded_by_line_terminator
          && (next.typ == TT::ParenthesisOpen || is_valid_pattern_identifier(next.typ))
        {
          self.restore_checkpoint(cp);
          let cp = self.checkpoint();
          match self.try_arrow_func_expr(ctx, terminators)? {
            Some(arrow) => arrow,
            None => {
              self.restore_checkpoint(cp);
              let t = self.consume();
              self.id_expr(&t)
            }
          }
        } else {
          self.id_expr(&t)
        }
      }
      TT::ParenthesisOpen => {
        self.restore_checkpoint(cp);
        match self.try_arrow_func_expr(ctx, terminators)? {
          Some(arrow) => arrow,
          None => self.grouping(ctx)?,
        }
      }
      TT::BracketOpen => {
        self.restore_checkpoint(cp);
        self.lit_arr(ctx)?
      }
      TT::BraceOpen => {
        self.restore_checkpoint(cp);
        self.lit_obj(ctx)?
      }
      TT::KeywordFunction => {
        self.restore_checkpoint(cp);
        self.func_expr(ctx)?
      }
      TT::KeywordClass => {
        self.restore_checkpoint(cp);
        self.class_expr(ctx)?
      }
      TT::KeywordThis => Node::new(t.loc, ThisExpr {}).wrap(Expr::from),
      TT::KeywordSuper => Node::new(t.loc, SuperExpr {}).wrap(Expr::from),
      TT::KeywordImport => {
        if self.consume_if(TT::Dot).is_match() {
          let prop = self.require(TT::Identifier)?;
          if self.str(prop.loc) != "meta" {
            return Err(prop.error(SyntaxErrorType::ExpectedSyntax("`meta`")));
          };
          Node::new(t.loc + prop.loc, ImportMeta {}).wrap(Expr::from)
        } else {
          self.require(TT::ParenthesisOpen)?;
          let module = self.expr_with_min_prec(
            ctx.with_no_in(false),
            PRECEDENCE_ASSIGNMENT,
            &[TT::ParenthesisClose],
          )?;
          let end = self.require(TT::ParenthesisClose)?;
          Node::new(t.loc + end.loc, ImportExpr { module }).wrap(Expr::from)
        }
      }
      TT::LiteralNull => Expr::null(t.loc),
      TT::LiteralTrue => Expr::bool(t.loc, true),
      TT::LiteralFalse => Expr::bool(t.loc, false),
      TT::LiteralNumber => Expr::num(t.loc, self.string(t.loc)),
      TT::LiteralBigInt => self.lit_bigint(&t),
      TT::LiteralString => self.lit_str(&t)?,
      TT::LiteralRegex => self.lit_regex(&t),
      TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => {
        self.lit_template(ctx, t)?
      }
      // The left operand of a private brand check, e.g. `#x in obj`.
      TT::PrivateMember => self.id_expr(&t),
      typ if is_valid_pattern_identifier(typ) => {
        let next = self.peek();
        if next.typ == TT::EqualsChevronRight && !next.preceded_by_line_terminator {
          self.restore_checkpoint(cp);
          self.arrow_func_expr(ctx, terminators)?
        } else {
          self.id_expr(&t)
        }
      }
      TT::EOF => return Err(t.error(SyntaxErrorType::UnexpectedEnd)),
      _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("expression operand"))),
    };
    Ok(expr)
  }

  /// Parses `new X(...)`, or `new.target`.
  pub fn new_expr(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Expr>> {
    let new = self.require(TT::KeywordNew)?;
    if self.consume_if(TT::Dot).is_match() {
      let prop = self.require(TT::Identifier)?;
      if self.str(prop.loc) != "target" {
        return Err(prop.error(SyntaxErrorType::ExpectedSyntax("`target`")));
      };
      return Ok(Node::new(new.loc + prop.loc, NewTarget {}).wrap(Expr::from));
    };
    let callee = if self.peek().typ == TT::KeywordNew {
      self.new_expr(ctx)?
    } else {
      self.expr_operand(ctx, &[])?
    };
    // Only member accesses belong to the callee; the first call is the constructor's arguments.
    let callee = self.member_chain(ctx, callee)?;
    let (arguments, end) = if self.consume_if(TT::ParenthesisOpen).is_match() {
      let args = self.call_args(ctx)?;
      (args, self.last_end())
    } else {
      (Vec::new(), callee.loc.1)
    };
    Ok(Node::new(Loc(new.loc.0, end), NewExpr { callee, arguments }).wrap(Expr::from))
  }

  fn member_chain(&mut self, ctx: ParseCtx, mut left: Node<Expr>) -> SyntaxResult<Node<Expr>> {
    loop {
      let t = self.peek();
      left = match t.typ {
        TT::Dot => {
          self.consume();
          self.member_access(left, OptionalChain::None)?
        }
        TT::BracketOpen => {
          self.consume();
          self.computed_member_access(ctx, left, OptionalChain::None)?
        }
        TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => {
          self.consume();
          self.tagged_template(ctx, left, t)?
        }
        _ => break,
      };
    }
    Ok(left)
  }

  fn member_access(
    &mut self,
    left: Node<Expr>,
    optional_chaining: OptionalChain,
  ) -> SyntaxResult<Node<Expr>> {
    let prop = self.consume();
    if !is_member_name(prop.typ) {
      return Err(prop.error(SyntaxErrorType::ExpectedSyntax("member name")));
    };
    let loc = left.loc + prop.loc;
    Ok(
      Node::new(loc, MemberExpr {
        optional_chaining,
        left,
        right: self.string(prop.loc),
      })
      .wrap(Expr::from),
    )
  }

  fn computed_member_access(
    &mut self,
    ctx: ParseCtx,
    object: Node<Expr>,
    optional_chaining: OptionalChain,
  ) -> SyntaxResult<Node<Expr>> {
    let member = self.expr(ctx.with_no_in(false), [TT::BracketClose])?;
    let end = self.require(TT::BracketClose)?;
    let loc = object.loc + end.loc;
    Ok(
      Node::new(loc, ComputedMemberExpr {
        optional_chaining,
        object,
        member,
      })
      .wrap(Expr::from),
    )
  }

  fn tagged_template(
    &mut self,
    ctx: ParseCtx,
    function: Node<Expr>,
    first: Token,
  ) -> SyntaxResult<Node<Expr>> {
    let parts = self.lit_template_parts(ctx, first)?;
    let loc = Loc(function.loc.0, self.last_end());
    Ok(Node::new(loc, TaggedTemplateExpr { function, parts }).wrap(Expr::from))
  }

  fn report_ambiguous_nullish(&mut self, loc: Loc, later: &str, earlier: &str) {
    self.report(
      Diagnostic::error(
        CODE_AMBIGUOUS_NULLISH,
        format!("Cannot use \"{later}\" with \"{earlier}\" without parentheses"),
        loc,
      )
      .with_note(format!(
        "Expressions of the form \"x {earlier} y {later} z\" are not allowed in JavaScript. You must disambiguate between \"(x {earlier} y) {later} z\" and \"x {earlier} (y {later} z)\" by adding parentheses."
      )),
    );
  }

  /// Extends `left` with every postfix, member, call, and binary operator that binds at least as
  /// tightly as `min_prec`.
  pub fn expr_suffix(
    &mut self,
    ctx: ParseCtx,
    mut left: Node<Expr>,
    min_prec: u8,
    terminators: &[TT],
  ) -> SyntaxResult<Node<Expr>> {
    // Set after `?.`; later links short-circuit along with it until a non-link operator.
    let mut in_chain = false;
    let link = |in_chain: bool| {
      if in_chain {
        OptionalChain::Continue
      } else {
        OptionalChain::None
      }
    };
    loop {
      let t = self.peek();
      if terminators.contains(&t.typ) {
        break;
      };
      match t.typ {
        TT::Dot => {
          self.consume();
          left = self.member_access(left, link(in_chain))?;
        }
        TT::QuestionDot => {
          self.consume();
          in_chain = true;
          let next = self.peek().typ;
          // `?.` followed by a template is a syntax error, so only names remain.
          if next == TT::BracketOpen || next == TT::ParenthesisOpen {
            return Err(t.error(SyntaxErrorType::ExpectedSyntax("member name")));
          };
          left = self.member_access(left, OptionalChain::Start)?;
        }
        TT::BracketOpen | TT::QuestionDotBracketOpen => {
          self.consume();
          let chain = if t.typ == TT::QuestionDotBracketOpen {
            in_chain = true;
            OptionalChain::Start
          } else {
            link(in_chain)
          };
          left = self.computed_member_access(ctx, left, chain)?;
        }
        TT::ParenthesisOpen | TT::QuestionDotParenthesisOpen => {
          self.consume();
          let optional_chaining = if t.typ == TT::QuestionDotParenthesisOpen {
            in_chain = true;
            OptionalChain::Start
          } else {
            link(in_chain)
          };
          let pure = !matches!(left.stx.as_ref(), Expr::Call(_)) && self.is_pure_start(left.loc.0);
          let arguments = self.call_args(ctx)?;
          let loc = Loc(left.loc.0, self.last_end());
          left = Node::new(loc, CallExpr {
            optional_chaining,
            pure,
            callee: left,
            arguments,
          })
          .wrap(Expr::from);
        }
        TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => {
          self.consume();
          left = self.tagged_template(ctx, left, t)?;
        }
        TT::PlusPlus | TT::HyphenHyphen if !t.preceded_by_line_terminator => {
          if PRECEDENCE_POSTFIX < min_prec {
            break;
          };
          self.consume();
          in_chain = false;
          let operator = if t.typ == TT::PlusPlus {
            OperatorName::PostfixIncrement
          } else {
            OperatorName::PostfixDecrement
          };
          let loc = left.loc + t.loc;
          left = Node::new(loc, UnaryPostfixExpr {
            operator,
            argument: left,
          })
          .wrap(Expr::from);
        }
        TT::Question => {
          if PRECEDENCE_CONDITIONAL < min_prec {
            break;
          };
          self.consume();
          in_chain = false;
          let consequent =
            self.expr_with_min_prec(ctx.with_no_in(false), PRECEDENCE_ASSIGNMENT, &[TT::Colon])?;
          self.require(TT::Colon)?;
          let alternate = self.expr_with_min_prec(ctx, PRECEDENCE_ASSIGNMENT, terminators)?;
          let loc = left.loc + alternate.loc;
          left = Node::new(loc, CondExpr {
            test: left,
            consequent,
            alternate,
          })
          .wrap(Expr::from);
        }
        TT::KeywordIn if ctx.no_in => break,
        typ => {
          let Some(operator) = binary_operator(typ) else {
            break;
          };
          if operator.precedence < min_prec {
            break;
          };
          self.consume();
          in_chain = false;

          if operator.name.is_assignment() {
            let target = lhs_expr_to_assign_target(left, operator.name)?;
            let right = self.expr_with_min_prec(ctx, PRECEDENCE_ASSIGNMENT, terminators)?;
            let loc = target.loc + right.loc;
            left = Expr::binary(loc, operator.name, target, right);
            continue;
          };

          let is_logical = matches!(
            operator.name,
            OperatorName::LogicalAnd | OperatorName::LogicalOr
          );
          // `&&` or `||` directly inside the right operand of `??`.
          if is_logical && min_prec == PRECEDENCE_NULLISH + 1 {
            self.report_ambiguous_nullish(t.loc, operator.name.syntax(), "??");
          };
          let next_min_prec =
            operator.precedence + (operator.associativity == Associativity::Left) as u8;
          let right = self.expr_with_min_prec(ctx, next_min_prec, terminators)?;
          let loc = left.loc + right.loc;
          left = Expr::binary(loc, operator.name, left, right);
          // `&&` or `||` as the left operand of `??`.
          if is_logical && min_prec <= PRECEDENCE_NULLISH {
            left = self.expr_suffix(ctx, left, PRECEDENCE_LOGICAL_OR + 1, terminators)?;
            let next = self.peek();
            if next.typ == TT::QuestionQuestion {
              self.report_ambiguous_nullish(next.loc, "??", operator.name.syntax());
            };
          };
        }
      };
    }
    Ok(left)
  }

  /// Parses the heritage of a class, which is a left-hand-side expression.
  pub fn class_heritage(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Expr>> {
    self.expr_with_min_prec(ctx, PRECEDENCE_NEW, &[TT::BraceOpen])
  }
}
