use crate::ast::class_or_object::ClassStaticBlock;
use crate::ast::expr::pat::ClassOrFuncName;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::ClassExpr;
use crate::ast::expr::IdExpr;
use crate::ast::func::Func;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ClassDecl;
use crate::ast::stmt::decl::VarDecl;
use crate::ast::stmt::decl::VarDeclMode;
use crate::ast::stmt::BlockStmt;
use crate::ast::stmt::CatchBlock;
use crate::ast::stmt::ExportListStmt;
use crate::ast::stmt::ForInOfLhs;
use crate::ast::stmt::ForInStmt;
use crate::ast::stmt::ForOfStmt;
use crate::ast::stmt::ForTripleStmt;
use crate::ast::stmt::SwitchStmt;
use crate::ast::stx::TopLevel;
use crate::loc::Loc;
use ahash::HashMap;
use ahash::HashMapExt;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use derive_visitor::Visitor;
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u32);

impl ScopeId {
  pub fn raw(self) -> u32 {
    self.0
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
  Module,
  /// Function bodies and class static blocks, which own their `var` declarations.
  Function,
  Block,
  Class,
}

#[derive(Clone, Debug)]
pub struct ScopeData {
  pub kind: ScopeKind,
  pub parent: Option<ScopeId>,
  pub declared: BTreeSet<String>,
}

/// Scopes of one file in an arena, plus every name the file declares or references. Synthesized
/// bindings are registered here too, so later ones never shadow earlier ones.
#[derive(Clone, Debug)]
pub struct ScopeTree {
  scopes: Vec<ScopeData>,
  // Keyed by the location of the node that opens the scope. A function and a block can share one.
  by_loc: HashMap<(usize, usize, ScopeKind), ScopeId>,
  names: BTreeSet<String>,
}

impl ScopeTree {
  pub fn new() -> ScopeTree {
    ScopeTree {
      scopes: vec![ScopeData {
        kind: ScopeKind::Module,
        parent: None,
        declared: BTreeSet::new(),
      }],
      by_loc: HashMap::new(),
      names: BTreeSet::new(),
    }
  }

  pub fn root(&self) -> ScopeId {
    ScopeId(0)
  }

  pub fn get(&self, id: ScopeId) -> &ScopeData {
    &self.scopes[id.0 as usize]
  }

  pub fn len(&self) -> usize {
    self.scopes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.scopes.is_empty()
  }

  pub fn add_scope(&mut self, parent: ScopeId, kind: ScopeKind) -> ScopeId {
    let id = ScopeId(self.scopes.len() as u32);
    self.scopes.push(ScopeData {
      kind,
      parent: Some(parent),
      declared: BTreeSet::new(),
    });
    id
  }

  fn add_scope_at(&mut self, parent: ScopeId, kind: ScopeKind, loc: Loc) -> ScopeId {
    let id = self.add_scope(parent, kind);
    self.by_loc.insert((loc.0, loc.1, kind), id);
    id
  }

  /// The scope opened by the node at `loc`, e.g. a function.
  pub fn scope_at(&self, loc: Loc, kind: ScopeKind) -> Option<ScopeId> {
    self.by_loc.get(&(loc.0, loc.1, kind)).copied()
  }

  pub fn declare(&mut self, scope: ScopeId, name: &str) {
    self.scopes[scope.0 as usize].declared.insert(name.to_string());
    self.names.insert(name.to_string());
  }

  /// Records a name without binding it, e.g. a synthesized binding or a global reference.
  pub fn reserve(&mut self, name: &str) {
    self.names.insert(name.to_string());
  }

  pub fn is_used(&self, name: &str) -> bool {
    self.names.contains(name)
  }

  /// Whether any scope of the file binds `name`, e.g. a local named `undefined`.
  pub fn declares(&self, name: &str) -> bool {
    self.scopes.iter().any(|s| s.declared.contains(name))
  }

  /// Whether `name` is declared in `scope` or any of its ancestors.
  pub fn resolves(&self, mut scope: ScopeId, name: &str) -> bool {
    loop {
      let data = self.get(scope);
      if data.declared.contains(name) {
        return true;
      };
      match data.parent {
        Some(parent) => scope = parent,
        None => return false,
      };
    }
  }

  /// The nearest function or module scope enclosing `scope`, i.e. where `var` declarations land.
  pub fn var_scope(&self, mut scope: ScopeId) -> ScopeId {
    loop {
      let data = self.get(scope);
      if matches!(data.kind, ScopeKind::Module | ScopeKind::Function) {
        return scope;
      };
      match data.parent {
        Some(parent) => scope = parent,
        None => return scope,
      };
    }
  }
}

impl Default for ScopeTree {
  fn default() -> Self {
    ScopeTree::new()
  }
}

type BlockStmtNode = Node<BlockStmt>;
type CatchBlockNode = Node<CatchBlock>;
type ClassDeclNode = Node<ClassDecl>;
type ClassExprNode = Node<ClassExpr>;
type ClassOrFuncNameNode = Node<ClassOrFuncName>;
type ClassStaticBlockNode = Node<ClassStaticBlock>;
type ExportListStmtNode = Node<ExportListStmt>;
type ForInStmtNode = Node<ForInStmt>;
type ForOfStmtNode = Node<ForOfStmt>;
type ForTripleStmtNode = Node<ForTripleStmt>;
type FuncNode = Node<Func>;
type IdExprNode = Node<IdExpr>;
type IdPatNode = Node<IdPat>;
type SwitchStmtNode = Node<SwitchStmt>;
type VarDeclNode = Node<VarDecl>;

#[derive(Visitor)]
#[visitor(
  BlockStmtNode(enter, exit),
  CatchBlockNode(enter, exit),
  ClassDeclNode(enter, exit),
  ClassExprNode(enter, exit),
  ClassOrFuncNameNode(enter),
  ClassStaticBlockNode(enter, exit),
  ExportListStmtNode(enter, exit),
  ForInOfLhs(enter, exit),
  ForInStmtNode(enter, exit),
  ForOfStmtNode(enter, exit),
  ForTripleStmtNode(enter, exit),
  FuncNode(enter, exit),
  IdExprNode(enter),
  IdPatNode(enter),
  SwitchStmtNode(enter, exit),
  VarDeclNode(enter, exit)
)]
struct ScopeVisitor {
  tree: ScopeTree,
  stack: Vec<ScopeId>,
  // Declaration kinds being visited; `var` bindings go to the var scope.
  modes: Vec<VarDeclMode>,
  // Export aliases are names in the module's interface, not local bindings.
  in_export_list: bool,
}

impl ScopeVisitor {
  fn current(&self) -> ScopeId {
    *self.stack.last().unwrap_or(&ScopeId(0))
  }

  fn push<S: Drive + DriveMut>(&mut self, node: &Node<S>, kind: ScopeKind) {
    let parent = self.current();
    let id = self.tree.add_scope_at(parent, kind, node.loc);
    self.stack.push(id);
  }

  fn pop(&mut self) {
    self.stack.pop();
  }

  fn enter_block_stmt_node(&mut self, node: &BlockStmtNode) {
    self.push(node, ScopeKind::Block);
  }

  fn exit_block_stmt_node(&mut self, _node: &BlockStmtNode) {
    self.pop();
  }

  fn enter_catch_block_node(&mut self, node: &CatchBlockNode) {
    self.push(node, ScopeKind::Block);
  }

  fn exit_catch_block_node(&mut self, _node: &CatchBlockNode) {
    self.pop();
  }

  fn enter_class_decl_node(&mut self, node: &ClassDeclNode) {
    // The declared name also binds in the enclosing scope.
    if let Some(name) = &node.stx.name {
      let scope = self.current();
      self.tree.declare(scope, &name.stx.name);
    };
    self.push(node, ScopeKind::Class);
  }

  fn exit_class_decl_node(&mut self, _node: &ClassDeclNode) {
    self.pop();
  }

  fn enter_class_expr_node(&mut self, node: &ClassExprNode) {
    self.push(node, ScopeKind::Class);
  }

  fn exit_class_expr_node(&mut self, _node: &ClassExprNode) {
    self.pop();
  }

  fn enter_class_or_func_name_node(&mut self, node: &ClassOrFuncNameNode) {
    let scope = self.current();
    self.tree.declare(scope, &node.stx.name);
  }

  fn enter_class_static_block_node(&mut self, node: &ClassStaticBlockNode) {
    self.push(node, ScopeKind::Function);
  }

  fn exit_class_static_block_node(&mut self, _node: &ClassStaticBlockNode) {
    self.pop();
  }

  fn enter_for_in_of_lhs(&mut self, node: &ForInOfLhs) {
    if let ForInOfLhs::Decl((mode, _)) = node {
      self.modes.push(*mode);
    };
  }

  fn exit_for_in_of_lhs(&mut self, node: &ForInOfLhs) {
    if let ForInOfLhs::Decl(_) = node {
      self.modes.pop();
    };
  }

  fn enter_for_in_stmt_node(&mut self, node: &ForInStmtNode) {
    self.push(node, ScopeKind::Block);
  }

  fn exit_for_in_stmt_node(&mut self, _node: &ForInStmtNode) {
    self.pop();
  }

  fn enter_for_of_stmt_node(&mut self, node: &ForOfStmtNode) {
    self.push(node, ScopeKind::Block);
  }

  fn exit_for_of_stmt_node(&mut self, _node: &ForOfStmtNode) {
    self.pop();
  }

  fn enter_for_triple_stmt_node(&mut self, node: &ForTripleStmtNode) {
    self.push(node, ScopeKind::Block);
  }

  fn exit_for_triple_stmt_node(&mut self, _node: &ForTripleStmtNode) {
    self.pop();
  }

  fn enter_func_node(&mut self, node: &FuncNode) {
    self.push(node, ScopeKind::Function);
    // Parameters are not inside a `var` declaration even when the function is.
    self.modes.push(VarDeclMode::Let);
  }

  fn exit_func_node(&mut self, _node: &FuncNode) {
    self.modes.pop();
    self.pop();
  }

  fn enter_id_expr_node(&mut self, node: &IdExprNode) {
    self.tree.reserve(&node.stx.name);
  }

  fn enter_export_list_stmt_node(&mut self, _node: &ExportListStmtNode) {
    self.in_export_list = true;
  }

  fn exit_export_list_stmt_node(&mut self, _node: &ExportListStmtNode) {
    self.in_export_list = false;
  }

  fn enter_id_pat_node(&mut self, node: &IdPatNode) {
    if self.in_export_list {
      return;
    };
    let scope = match self.modes.last() {
      Some(VarDeclMode::Var) => self.tree.var_scope(self.current()),
      _ => self.current(),
    };
    self.tree.declare(scope, &node.stx.name);
  }

  fn enter_switch_stmt_node(&mut self, node: &SwitchStmtNode) {
    self.push(node, ScopeKind::Block);
  }

  fn exit_switch_stmt_node(&mut self, _node: &SwitchStmtNode) {
    self.pop();
  }

  fn enter_var_decl_node(&mut self, node: &VarDeclNode) {
    self.modes.push(node.stx.mode);
  }

  fn exit_var_decl_node(&mut self, _node: &VarDeclNode) {
    self.modes.pop();
  }
}

/// Builds the scope tree of a parsed file.
pub fn compute_scopes(top_level: &Node<TopLevel>) -> ScopeTree {
  let mut visitor = ScopeVisitor {
    tree: ScopeTree::new(),
    stack: vec![ScopeId(0)],
    modes: Vec::new(),
    in_export_list: false,
  };
  top_level.drive(&mut visitor);
  visitor.tree
}

#[cfg(test)]
mod tests {
  use super::compute_scopes;
  use super::ScopeKind;
  use crate::parse::parse;

  #[test]
  fn test_var_declarations_hoist_to_function() {
    let ast = parse("function f(a) { { var b; let c; } } let d;").unwrap().ast;
    let tree = compute_scopes(&ast);
    let root = tree.root();
    assert!(tree.get(root).declared.contains("f"));
    assert!(tree.get(root).declared.contains("d"));
    assert!(!tree.get(root).declared.contains("b"));
    let func = (0..tree.len() as u32)
      .map(super::ScopeId)
      .find(|id| tree.get(*id).kind == ScopeKind::Function)
      .unwrap();
    assert!(tree.get(func).declared.contains("a"));
    assert!(tree.get(func).declared.contains("b"));
    assert!(!tree.get(func).declared.contains("c"));
  }

  #[test]
  fn test_references_are_recorded() {
    let ast = parse("foo(bar); x.y;").unwrap().ast;
    let tree = compute_scopes(&ast);
    assert!(tree.is_used("foo"));
    assert!(tree.is_used("bar"));
    assert!(tree.is_used("x"));
    assert!(!tree.is_used("y"));
  }

  #[test]
  fn test_export_aliases_are_not_bindings() {
    let ast = parse("export * as ns from \"m\"; export { a as b };").unwrap().ast;
    let tree = compute_scopes(&ast);
    assert!(!tree.declares("ns"));
    assert!(!tree.declares("b"));
    let ast = parse("import * as ns from \"m\";").unwrap().ast;
    assert!(compute_scopes(&ast).declares("ns"));
  }

  #[test]
  fn test_scope_lookup_by_location() {
    let src = "try {} catch (e) { e }";
    let ast = parse(src).unwrap().ast;
    let tree = compute_scopes(&ast);
    let catch = (0..tree.len() as u32)
      .map(super::ScopeId)
      .find(|id| tree.get(*id).declared.contains("e"))
      .unwrap();
    assert_eq!(tree.get(catch).kind, ScopeKind::Block);
    assert!(tree.resolves(catch, "e"));
    assert!(!tree.resolves(tree.root(), "e"));
  }
}
