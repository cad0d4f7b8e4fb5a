use super::expr::pat::is_valid_pattern_identifier;
use super::stmt::decl::VarDeclParseMode;
use super::ParseCtx;
use super::Parser;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::pat::Pat;
use crate::ast::import_export::ExportName;
use crate::ast::import_export::ExportNames;
use crate::ast::import_export::ImportName;
use crate::ast::import_export::ImportNames;
use crate::ast::import_export::ModuleExportImportName;
use crate::ast::node::Node;
use crate::ast::stmt::decl::PatDecl;
use crate::ast::stmt::ExportDefaultExprStmt;
use crate::ast::stmt::ExportListStmt;
use crate::ast::stmt::ImportStmt;
use crate::ast::stmt::Stmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::is_keyword;
use crate::operator::PRECEDENCE_ASSIGNMENT;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Parses `target`, `target as alias`, `default as alias`, `"target" as alias`.
  fn import_or_export_name(
    &mut self,
    is_export: bool,
  ) -> SyntaxResult<(ModuleExportImportName, Node<IdPat>)> {
    let t0 = self.consume();
    #[rustfmt::skip]
    let (target, alias_is_required) = match t0.typ {
      TT::LiteralString => (ModuleExportImportName::Str(self.lit_str_val(&t0)?), !is_export),
      t if is_valid_pattern_identifier(t) => (ModuleExportImportName::Ident(self.string(t0.loc)), false),
      // Any other keyword is allowed, but in imports it can't be a binding.
      t if is_keyword(t) => (ModuleExportImportName::Ident(self.string(t0.loc)), !is_export),
      _ => return Err(t0.error(SyntaxErrorType::ExpectedNotFound)),
    };
    let alias = if self.consume_if(TT::KeywordAs).is_match() {
      let t = self.consume();
      let name = match t.typ {
        TT::LiteralString if is_export => self.lit_str_val(&t)?,
        typ if is_valid_pattern_identifier(typ) => self.string(t.loc),
        typ if is_export && is_keyword(typ) => self.string(t.loc),
        _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("identifier"))),
      };
      Node::new(t.loc, IdPat { name })
    } else {
      if alias_is_required {
        return Err(t0.error(SyntaxErrorType::RequiredTokenNotFound(TT::KeywordAs)));
      };
      Node::new(t0.loc, IdPat {
        name: target.as_str().to_string(),
      })
    };
    Ok((target, alias))
  }

  fn module_specifier(&mut self) -> SyntaxResult<String> {
    let t = self.require(TT::LiteralString)?;
    self.lit_str_val(&t)
  }

  fn import_binding(&mut self) -> SyntaxResult<Node<PatDecl>> {
    let id = self.id_pat()?;
    Ok(PatDecl::new(id.wrap(Pat::Id)))
  }

  /// Parses every static import form, e.g. `import a, {b as c} from "m"` and `import "m"`.
  pub fn import_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let stmt = self.with_loc(|p| {
      p.require(TT::KeywordImport)?;
      if p.peek().typ == TT::LiteralString {
        let module = p.module_specifier()?;
        p.require_semicolon()?;
        return Ok(ImportStmt {
          default: None,
          names: None,
          module,
        });
      };
      let default = if is_valid_pattern_identifier(p.peek().typ) {
        Some(p.import_binding()?)
      } else {
        None
      };
      let names = if default.is_none() || p.consume_if(TT::Comma).is_match() {
        if p.consume_if(TT::Asterisk).is_match() {
          p.require(TT::KeywordAs)?;
          Some(ImportNames::All(p.import_binding()?))
        } else {
          p.require(TT::BraceOpen)?;
          let mut names = Vec::new();
          while p.peek().typ != TT::BraceClose {
            let name = p.with_loc(|p| {
              let (importable, alias) = p.import_or_export_name(false)?;
              Ok(ImportName {
                importable,
                alias: PatDecl::new(alias.wrap(Pat::Id)),
              })
            })?;
            names.push(name);
            if !p.consume_if(TT::Comma).is_match() {
              break;
            };
          }
          p.require(TT::BraceClose)?;
          Some(ImportNames::Specific(names))
        }
      } else {
        None
      };
      p.require(TT::KeywordFrom)?;
      let module = p.module_specifier()?;
      p.require_semicolon()?;
      Ok(ImportStmt {
        default,
        names,
        module,
      })
    })?;
    Ok(stmt.wrap(Stmt::from))
  }

  fn export_list_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let stmt = self.with_loc(|p| {
      p.require(TT::KeywordExport)?;
      let names = if p.consume_if(TT::Asterisk).is_match() {
        let alias = if p.consume_if(TT::KeywordAs).is_match() {
          let t = p.consume();
          let name = match t.typ {
            TT::LiteralString => p.lit_str_val(&t)?,
            typ if typ == TT::Identifier || is_keyword(typ) => p.string(t.loc),
            _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("identifier"))),
          };
          Some(Node::new(t.loc, IdPat { name }))
        } else {
          None
        };
        ExportNames::All(alias)
      } else {
        p.require(TT::BraceOpen)?;
        let mut names = Vec::new();
        while p.peek().typ != TT::BraceClose {
          let name = p.with_loc(|p| {
            let (exportable, alias) = p.import_or_export_name(true)?;
            Ok(ExportName { exportable, alias })
          })?;
          names.push(name);
          if !p.consume_if(TT::Comma).is_match() {
            break;
          };
        }
        p.require(TT::BraceClose)?;
        ExportNames::Specific(names)
      };
      let from = if p.consume_if(TT::KeywordFrom).is_match() {
        Some(p.module_specifier()?)
      } else {
        if matches!(names, ExportNames::All(_)) {
          return Err(p.peek().error(SyntaxErrorType::RequiredTokenNotFound(TT::KeywordFrom)));
        };
        None
      };
      p.require_semicolon()?;
      Ok(ExportListStmt { names, from })
    })?;
    Ok(stmt.wrap(Stmt::from))
  }

  fn export_default_expr_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Stmt>> {
    let stmt = self.with_loc(|p| {
      p.require(TT::KeywordExport)?;
      p.require(TT::KeywordDefault)?;
      let expression = p.expr_with_min_prec(ctx, PRECEDENCE_ASSIGNMENT, &[TT::Semicolon])?;
      p.require_semicolon()?;
      Ok(ExportDefaultExprStmt { expression })
    })?;
    Ok(stmt.wrap(Stmt::from))
  }

  /// Parses any statement starting with `export`.
  pub fn export_stmt(&mut self, ctx: ParseCtx) -> SyntaxResult<Node<Stmt>> {
    let (_, t1, t2) = self.peek_3();
    #[rustfmt::skip]
    let stmt = match t1.typ {
      TT::KeywordDefault => match t2.typ {
        TT::KeywordFunction => self.func_decl(ctx)?.wrap(Stmt::from),
        TT::KeywordClass => self.class_decl(ctx)?.wrap(Stmt::from),
        TT::KeywordAsync => {
          let cp = self.checkpoint();
          self.consume();
          self.consume();
          let (_, next) = self.peek_2();
          let is_func = self.peek().typ == TT::KeywordAsync && next.typ == TT::KeywordFunction && !next.preceded_by_line_terminator;
          self.restore_checkpoint(cp);
          if is_func {
            self.func_decl(ctx)?.wrap(Stmt::from)
          } else {
            self.export_default_expr_stmt(ctx)?
          }
        }
        _ => self.export_default_expr_stmt(ctx)?,
      },
      TT::KeywordVar | TT::KeywordLet | TT::KeywordConst => self.var_decl(ctx, VarDeclParseMode::Asi)?.wrap(Stmt::from),
      TT::KeywordFunction | TT::KeywordAsync => self.func_decl(ctx)?.wrap(Stmt::from),
      TT::KeywordClass => self.class_decl(ctx)?.wrap(Stmt::from),
      TT::BraceOpen | TT::Asterisk => self.export_list_stmt()?,
      _ => return Err(t1.error(SyntaxErrorType::ExpectedSyntax("exportable"))),
    };
    Ok(stmt)
  }
}
