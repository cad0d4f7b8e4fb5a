use super::escape::is_identifier_name;
use super::escape::write_string_literal;
use super::Printer;
use crate::ast::class_or_object::ClassMember;
use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::class_or_object::ClassOrObjVal;
use crate::ast::expr::Expr;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::import_export::ExportNames;
use crate::ast::import_export::ImportNames;
use crate::ast::import_export::ModuleExportImportName;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ParamDecl;
use crate::ast::stmt::decl::VarDecl;
use crate::ast::stmt::ForInOfLhs;
use crate::ast::stmt::ForTripleStmtInit;
use crate::ast::stmt::Stmt;
use crate::operator::PRECEDENCE_COMMA;
use crate::operator::PRECEDENCE_NEW;
use crate::operator::PRECEDENCE_YIELD;

impl Printer {
  pub(super) fn stmts(&mut self, stmts: &[Node<Stmt>]) {
    for stmt in stmts {
      self.stmt(stmt);
    }
  }

  /// Prints `{`, the indented statements, and `}` at the current indent, with no trailing newline.
  fn block(&mut self, stmts: &[Node<Stmt>]) {
    self.push("{");
    self.newline();
    self.indent += 1;
    self.stmts(stmts);
    self.indent -= 1;
    self.print_indent();
    self.push("}");
  }

  /// Prints the body of an `if`, loop, `with` or label. Blocks stay on the header line; other
  /// statements continue it.
  fn body(&mut self, body: &Node<Stmt>) {
    match body.stx.as_ref() {
      Stmt::Block(block) => {
        self.push(" ");
        self.block(&block.stx.body);
        self.newline();
      }
      _ => {
        self.inline_next = true;
        self.stmt(body);
      }
    }
  }

  fn semicolon(&mut self) {
    self.push(";");
    self.newline();
  }

  fn module_name(&mut self, name: &ModuleExportImportName) {
    match name {
      ModuleExportImportName::Ident(name) => self.push(name),
      ModuleExportImportName::Str(name) if is_identifier_name(name) => self.push(name),
      ModuleExportImportName::Str(name) => write_string_literal(&mut self.out, name),
    };
  }

  fn alias(&mut self, name: &str) {
    if is_identifier_name(name) {
      self.push(name);
    } else {
      write_string_literal(&mut self.out, name);
    }
  }

  fn var_decl(&mut self, decl: &VarDecl) {
    self.push(decl.mode.keyword());
    self.push(" ");
    for (i, declarator) in decl.declarators.iter().enumerate() {
      if i > 0 {
        self.push(", ");
      };
      self.pat(&declarator.pattern.stx.pat);
      if let Some(init) = &declarator.initializer {
        self.push(" = ");
        self.expr(init, PRECEDENCE_YIELD);
      };
    }
  }

  fn for_in_of_lhs(&mut self, lhs: &ForInOfLhs) {
    match lhs {
      ForInOfLhs::Assign(pat) => self.pat(pat),
      ForInOfLhs::Decl((mode, pat)) => {
        self.push(mode.keyword());
        self.push(" ");
        self.pat(&pat.stx.pat);
      }
    };
  }

  pub(super) fn stmt(&mut self, stmt: &Node<Stmt>) {
    if let Stmt::Comment(comment) = stmt.stx.as_ref() {
      self.print_indent();
      self.push(&comment.stx.text);
      self.newline();
      return;
    };
    self.print_indent();
    match stmt.stx.as_ref() {
      Stmt::Block(block) => {
        self.block(&block.stx.body);
        self.newline();
      }
      Stmt::Break(s) => {
        self.push("break");
        if let Some(label) = &s.stx.label {
          self.push(" ");
          self.push(label);
        };
        self.semicolon();
      }
      Stmt::Comment(_) => unreachable!("comment statement already printed"),
      Stmt::Continue(s) => {
        self.push("continue");
        if let Some(label) = &s.stx.label {
          self.push(" ");
          self.push(label);
        };
        self.semicolon();
      }
      Stmt::Debugger(_) => {
        self.push("debugger");
        self.semicolon();
      }
      Stmt::DoWhile(s) => {
        self.push("do");
        match s.stx.body.stx.as_ref() {
          Stmt::Block(block) => {
            self.push(" ");
            self.block(&block.stx.body);
            self.push(" ");
          }
          _ => {
            self.inline_next = true;
            self.stmt(&s.stx.body);
            self.print_indent();
          }
        };
        self.push("while (");
        self.expr(&s.stx.condition, PRECEDENCE_COMMA);
        self.push(")");
        self.semicolon();
      }
      Stmt::Empty(_) => self.semicolon(),
      Stmt::ExportDefaultExpr(s) => {
        self.push("export default ");
        self.export_default_start = Some(self.out.len());
        self.expr(&s.stx.expression, PRECEDENCE_YIELD);
        self.semicolon();
      }
      Stmt::ExportList(s) => {
        self.push("export ");
        match &s.stx.names {
          ExportNames::All(alias) => {
            self.push("*");
            if let Some(alias) = alias {
              self.push(" as ");
              self.alias(&alias.stx.name);
            };
          }
          ExportNames::Specific(names) => {
            if names.is_empty() {
              self.push("{}");
            } else {
              self.push("{ ");
              for (i, name) in names.iter().enumerate() {
                if i > 0 {
                  self.push(", ");
                };
                self.module_name(&name.stx.exportable);
                if name.stx.exportable.as_str() != name.stx.alias.stx.name {
                  self.push(" as ");
                  self.alias(&name.stx.alias.stx.name);
                };
              }
              self.push(" }");
            };
          }
        };
        if let Some(from) = &s.stx.from {
          self.push(" from ");
          write_string_literal(&mut self.out, from);
        };
        self.semicolon();
      }
      Stmt::Expr(s) => {
        self.stmt_start = Some(self.out.len());
        self.expr(&s.stx.expr, PRECEDENCE_COMMA);
        self.semicolon();
      }
      Stmt::ForIn(s) => {
        self.push("for (");
        self.for_in_of_lhs(&s.stx.lhs);
        self.push(" in ");
        self.expr(&s.stx.rhs, PRECEDENCE_COMMA);
        self.push(")");
        self.body(&s.stx.body);
      }
      Stmt::ForOf(s) => {
        self.push(if s.stx.await_ { "for await (" } else { "for (" });
        self.for_in_of_lhs(&s.stx.lhs);
        self.push(" of ");
        self.expr(&s.stx.rhs, PRECEDENCE_YIELD);
        self.push(")");
        self.body(&s.stx.body);
      }
      Stmt::ForTriple(s) => {
        self.push("for (");
        self.no_in = true;
        match &s.stx.init {
          ForTripleStmtInit::None => {}
          ForTripleStmtInit::Expr(e) => self.expr(e, PRECEDENCE_COMMA),
          ForTripleStmtInit::Decl(d) => self.var_decl(&d.stx),
        };
        self.no_in = false;
        self.push("; ");
        if let Some(cond) = &s.stx.cond {
          self.expr(cond, PRECEDENCE_COMMA);
        };
        self.push("; ");
        if let Some(post) = &s.stx.post {
          self.expr(post, PRECEDENCE_COMMA);
        };
        self.push(")");
        self.body(&s.stx.body);
      }
      Stmt::If(s) => self.if_stmt(s),
      Stmt::Import(s) => {
        self.push("import ");
        let mut any = false;
        if let Some(default) = &s.stx.default {
          self.pat(&default.stx.pat);
          any = true;
        };
        match &s.stx.names {
          Some(ImportNames::All(alias)) => {
            if any {
              self.push(", ");
            };
            self.push("* as ");
            self.pat(&alias.stx.pat);
            any = true;
          }
          Some(ImportNames::Specific(names)) => {
            if any {
              self.push(", ");
            };
            if names.is_empty() {
              self.push("{}");
            } else {
              self.push("{ ");
              for (i, name) in names.iter().enumerate() {
                if i > 0 {
                  self.push(", ");
                };
                self.module_name(&name.stx.importable);
                let alias = name.stx.alias.stx.pat.stx.as_id().unwrap_or_default();
                if name.stx.importable.as_str() != alias {
                  self.push(" as ");
                  self.push(alias);
                };
              }
              self.push(" }");
            };
            any = true;
          }
          None => {}
        };
        if any {
          self.push(" from ");
        };
        write_string_literal(&mut self.out, &s.stx.module);
        self.semicolon();
      }
      Stmt::Label(s) => {
        self.push(&s.stx.name);
        self.push(":");
        self.body(&s.stx.statement);
      }
      Stmt::Return(s) => {
        self.push("return");
        if let Some(value) = &s.stx.value {
          self.push(" ");
          self.expr(value, PRECEDENCE_COMMA);
        };
        self.semicolon();
      }
      Stmt::Switch(s) => {
        self.push("switch (");
        self.expr(&s.stx.test, PRECEDENCE_COMMA);
        self.push(") {");
        self.newline();
        self.indent += 1;
        for branch in s.stx.branches.iter() {
          self.print_indent();
          match &branch.stx.case {
            Some(case) => {
              self.push("case ");
              self.expr(case, PRECEDENCE_COMMA);
              self.push(":");
            }
            None => self.push("default:"),
          };
          self.newline();
          self.indent += 1;
          self.stmts(&branch.stx.body);
          self.indent -= 1;
        }
        self.indent -= 1;
        self.print_indent();
        self.push("}");
        self.newline();
      }
      Stmt::Throw(s) => {
        self.push("throw ");
        self.expr(&s.stx.value, PRECEDENCE_COMMA);
        self.semicolon();
      }
      Stmt::Try(s) => {
        self.push("try ");
        self.block(&s.stx.wrapped.stx.body);
        if let Some(catch) = &s.stx.catch {
          self.push(" catch ");
          if let Some(param) = &catch.stx.parameter {
            self.push("(");
            self.pat(&param.stx.pat);
            self.push(") ");
          };
          self.block(&catch.stx.body);
        };
        if let Some(finally) = &s.stx.finally {
          self.push(" finally ");
          self.block(&finally.stx.body);
        };
        self.newline();
      }
      Stmt::While(s) => {
        self.push("while (");
        self.expr(&s.stx.condition, PRECEDENCE_COMMA);
        self.push(")");
        self.body(&s.stx.body);
      }
      Stmt::With(s) => {
        self.push("with (");
        self.expr(&s.stx.object, PRECEDENCE_COMMA);
        self.push(")");
        self.body(&s.stx.body);
      }
      Stmt::ClassDecl(s) => {
        if s.stx.export_default {
          self.push("export default ");
        } else if s.stx.export {
          self.push("export ");
        };
        let name = s.stx.name.as_ref().map(|n| n.stx.name.as_str());
        self.class(name, s.stx.extends.as_ref(), &s.stx.members);
        self.newline();
      }
      Stmt::FunctionDecl(s) => {
        if s.stx.export_default {
          self.push("export default ");
        } else if s.stx.export {
          self.push("export ");
        };
        let name = s.stx.name.as_ref().map(|n| n.stx.name.as_str());
        self.func_header(&s.stx.function.stx, name);
        self.func_params_and_body(&s.stx.function.stx);
        self.newline();
      }
      Stmt::VarDecl(s) => {
        if s.stx.export {
          self.push("export ");
        };
        self.var_decl(&s.stx);
        self.semicolon();
      }
    };
  }

  fn if_stmt(&mut self, s: &Node<crate::ast::stmt::IfStmt>) {
    self.push("if (");
    self.expr(&s.stx.test, PRECEDENCE_COMMA);
    self.push(")");
    let alternate = s.stx.alternate.as_ref();
    match s.stx.consequent.stx.as_ref() {
      Stmt::Block(block) => {
        self.push(" ");
        self.block(&block.stx.body);
        if alternate.is_some() {
          self.push(" ");
        } else {
          self.newline();
        };
      }
      _ => {
        self.inline_next = true;
        self.stmt(&s.stx.consequent);
        if alternate.is_some() {
          self.print_indent();
        };
      }
    };
    if let Some(alternate) = alternate {
      self.push("else");
      match alternate.stx.as_ref() {
        Stmt::If(nested) => {
          self.push(" ");
          self.if_stmt(nested);
        }
        _ => self.body(alternate),
      };
    };
  }

  fn params(&mut self, params: &[Node<ParamDecl>]) {
    self.push("(");
    for (i, param) in params.iter().enumerate() {
      if i > 0 {
        self.push(", ");
      };
      if param.stx.rest {
        self.push("...");
      };
      self.pat(&param.stx.pattern.stx.pat);
      if let Some(default) = &param.stx.default_value {
        self.push(" = ");
        self.expr(default, PRECEDENCE_YIELD);
      };
    }
    self.push(")");
  }

  /// `function`, `async function* name`, etc., up to the parameter list.
  pub(super) fn func_header(&mut self, func: &Func, name: Option<&str>) {
    if func.async_ {
      self.push("async ");
    };
    self.push("function");
    if func.generator {
      self.push("*");
    };
    match name {
      Some(name) => {
        self.push(" ");
        self.push(name);
      }
      None if func.generator => self.push(" "),
      None => {}
    };
  }

  pub(super) fn func_params_and_body(&mut self, func: &Func) {
    self.params(&func.parameters);
    self.push(" ");
    self.func_body(&func.body);
  }

  fn func_body(&mut self, body: &FuncBody) {
    match body {
      FuncBody::Block(stmts) => self.block(stmts),
      FuncBody::Expression(expr) => {
        self.arrow_body_start = Some(self.out.len());
        self.expr(expr, PRECEDENCE_YIELD);
      }
    };
  }

  pub(super) fn arrow(&mut self, func: &Node<Func>) {
    if func.stx.async_ {
      self.push("async ");
    };
    self.params(&func.stx.parameters);
    self.push(" => ");
    self.func_body(&func.stx.body);
  }

  /// Methods of objects and classes, e.g. `async *key(a) {`, with `prefix` being `get ` or `set `.
  pub(super) fn method(&mut self, prefix: &str, key: &ClassOrObjKey, func: &Node<Func>) {
    self.push(prefix);
    if func.stx.async_ {
      self.push("async ");
    };
    if func.stx.generator {
      self.push("*");
    };
    self.key(key);
    self.func_params_and_body(&func.stx);
  }

  pub(super) fn class(
    &mut self,
    name: Option<&str>,
    extends: Option<&Node<Expr>>,
    members: &[Node<ClassMember>],
  ) {
    self.push("class");
    if let Some(name) = name {
      self.push(" ");
      self.push(name);
    };
    if let Some(extends) = extends {
      self.push(" extends ");
      self.expr(extends, PRECEDENCE_NEW);
    };
    self.push(" {");
    self.newline();
    self.indent += 1;
    for member in members {
      self.class_member(&member.stx);
    }
    self.indent -= 1;
    self.print_indent();
    self.push("}");
  }

  fn class_member(&mut self, member: &ClassMember) {
    self.print_indent();
    if member.static_ {
      self.push("static ");
    };
    match &member.val {
      ClassOrObjVal::Getter(g) => self.method("get ", &member.key, &g.stx.func),
      ClassOrObjVal::Setter(s) => self.method("set ", &member.key, &s.stx.func),
      ClassOrObjVal::Method(m) => self.method("", &member.key, &m.stx.func),
      ClassOrObjVal::Prop(init) | ClassOrObjVal::Accessor(init) => {
        if matches!(member.val, ClassOrObjVal::Accessor(_)) {
          self.push("accessor ");
        };
        self.key(&member.key);
        if let Some(init) = init {
          self.push(" = ");
          self.expr(init, PRECEDENCE_YIELD);
        };
        self.push(";");
      }
      ClassOrObjVal::StaticBlock(block) => self.block(&block.stx.body),
    };
    self.newline();
  }
}
