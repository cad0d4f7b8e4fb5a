//! Synthesized bindings that hold intermediate values, so that an expression the lowered code
//! needs twice is still evaluated once.
//!
//! Temps live in frames. A frame is a module, a function body, a class static block, or the root
//! of a parameter expression (whose temps become parameters of a wrapping arrow). Names come from
//! the minified-name sequence `_a`, `_b`, ... and never shadow a name of the file, a temp of an
//! enclosing frame, or a temp a nested frame already handed out.

use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::ast::stmt::decl::VarDecl;
use crate::ast::stmt::decl::VarDeclMode;
use crate::ast::stmt::decl::VarDeclarator;
use crate::ast::stmt::Stmt;
use crate::loc::Loc;
use crate::scope::ScopeId;
use crate::scope::ScopeTree;
use std::collections::BTreeSet;
use tracing::trace;

const HEAD: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_$";
const TAIL: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_$0123456789";

/// The `i`-th name of esbuild's minified-name sequence: `a`..`z`, `A`..`Z`, `_`, `$`, `aa`, `ba`, ...
pub fn minified_name(i: u32) -> String {
  let mut i = i as usize;
  let mut name = String::new();
  name.push(HEAD[i % HEAD.len()] as char);
  i /= HEAD.len();
  while i > 0 {
    i -= 1;
    name.push(TAIL[i % TAIL.len()] as char);
    i /= TAIL.len();
  }
  name
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameKind {
  Module,
  Function,
  Params,
}

#[derive(Clone, Debug)]
pub struct TempVar {
  pub owner: ScopeId,
  pub name: String,
  pub seq: u32,
  pub init: Option<Node<Expr>>,
}

#[derive(Debug)]
struct Frame {
  kind: FrameKind,
  owner: ScopeId,
  next_seq: u32,
  // Names handed out by this frame, hidden from nested frames.
  own: BTreeSet<String>,
  // Names handed out by frames nested in this one that have already closed.
  nested: BTreeSet<String>,
  declared: Vec<TempVar>,
}

impl Frame {
  fn new(kind: FrameKind, owner: ScopeId) -> Frame {
    Frame {
      kind,
      owner,
      next_seq: 0,
      own: BTreeSet::new(),
      nested: BTreeSet::new(),
      declared: Vec::new(),
    }
  }
}

#[derive(Debug)]
pub struct TempManager {
  frames: Vec<Frame>,
  handed_out: BTreeSet<String>,
}

impl TempManager {
  pub fn new(root: ScopeId) -> TempManager {
    TempManager {
      frames: vec![Frame::new(FrameKind::Module, root)],
      handed_out: BTreeSet::new(),
    }
  }

  pub fn push(&mut self, kind: FrameKind, owner: ScopeId) {
    self.frames.push(Frame::new(kind, owner));
  }

  /// Closes the innermost frame and returns the temps it must declare, in allocation order.
  pub fn pop(&mut self) -> Vec<TempVar> {
    if self.frames.len() == 1 {
      unreachable!("popped the module frame");
    };
    let Some(frame) = self.frames.pop() else {
      unreachable!("no temp frame");
    };
    let parent = self.frames.last_mut().unwrap_or_else(|| unreachable!());
    parent.nested.extend(frame.own);
    parent.nested.extend(frame.nested);
    frame.declared
  }

  /// The index of the innermost frame, for allocating into it later from a nested one.
  pub fn current(&self) -> usize {
    self.frames.len() - 1
  }

  /// The scope owning the innermost frame's declarations.
  pub fn owner(&self) -> ScopeId {
    self.frames[self.current()].owner
  }

  pub fn kind(&self, frame: usize) -> FrameKind {
    self.frames[frame].kind
  }

  /// The innermost frame that declares `var`s, skipping parameter roots.
  pub fn nearest_body(&self) -> usize {
    self
      .frames
      .iter()
      .rposition(|f| f.kind != FrameKind::Params)
      .unwrap_or(0)
  }

  /// Ends the lowering group of one top-level statement. Its temps are returned and the naming
  /// sequence restarts; the names stay taken for the rest of the file.
  pub fn finish_group(&mut self) -> Vec<TempVar> {
    let module = &mut self.frames[0];
    module.next_seq = 0;
    std::mem::take(&mut module.declared)
  }

  fn is_taken(&self, frame: usize, scopes: &ScopeTree, name: &str) -> bool {
    // Frames above `frame` are still open and nested in it, so their names are live there too.
    scopes.is_used(name)
      || self.frames[frame].nested.contains(name)
      || self.frames.iter().any(|f| f.own.contains(name))
  }

  fn unique(&self, frame: usize, scopes: &ScopeTree, base: String) -> String {
    if !self.is_taken(frame, scopes, &base) {
      return base;
    };
    for suffix in 2u32.. {
      let candidate = format!("{base}{suffix}");
      if !self.is_taken(frame, scopes, &candidate) {
        return candidate;
      };
    }
    unreachable!();
  }

  /// Allocates a temp in `frame`. With a `base`, the name is derived from it (`_this`, `_x`);
  /// otherwise it is the frame's next sequence name. A declared temp gets a `var` from the frame's
  /// owner; an undeclared one is bound by the caller, e.g. as a parameter.
  pub fn alloc_in(
    &mut self,
    frame: usize,
    scopes: &ScopeTree,
    base: Option<&str>,
    init: Option<Node<Expr>>,
    declare: bool,
  ) -> String {
    let seq = self.frames[frame].next_seq;
    let base = match base {
      Some(base) => base.to_string(),
      None => {
        self.frames[frame].next_seq += 1;
        format!("_{}", minified_name(seq))
      }
    };
    let name = self.unique(frame, scopes, base);
    let f = &mut self.frames[frame];
    trace!(name = name.as_str(), seq, frame, declare, "allocated temp");
    f.own.insert(name.clone());
    self.handed_out.insert(name.clone());
    if declare {
      f.declared.push(TempVar {
        owner: f.owner,
        name: name.clone(),
        seq,
        init,
      });
    };
    name
  }

  /// The next sequence name, declared by the innermost frame.
  pub fn alloc(&mut self, scopes: &ScopeTree) -> String {
    self.alloc_in(self.current(), scopes, None, None, true)
  }

  /// A sequence name the caller binds itself.
  pub fn alloc_bound(&mut self, scopes: &ScopeTree) -> String {
    self.alloc_in(self.current(), scopes, None, None, false)
  }

  /// A name derived from `base`, declared by the innermost frame.
  pub fn alloc_named(&mut self, scopes: &ScopeTree, base: &str) -> String {
    self.alloc_in(self.current(), scopes, Some(base), None, true)
  }

  /// A name derived from `base` that the caller binds itself, e.g. `const _Foo = ...`.
  pub fn alloc_named_bound(&mut self, scopes: &ScopeTree, base: &str) -> String {
    self.alloc_in(self.current(), scopes, Some(base), None, false)
  }

  /// Every name allocated so far, in name order.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.handed_out.iter().map(String::as_str)
  }

  /// Whether the temps of `frame` include `name`.
  pub fn declares(&self, frame: usize, name: &str) -> bool {
    self.frames[frame].declared.iter().any(|t| t.name == name)
  }
}

/// `var _a, _b = init;` for the temps of one frame.
pub fn var_decl_stmt(loc: Loc, temps: Vec<TempVar>) -> Node<Stmt> {
  Node::new(loc, VarDecl {
    export: false,
    mode: VarDeclMode::Var,
    declarators: temps
      .into_iter()
      .map(|t| VarDeclarator::new(loc, t.name, t.init))
      .collect(),
  })
  .wrap(Stmt::from)
}

/// Where a body's temp declaration goes: after the directive prologue and the comments around it.
pub fn prologue_end(body: &[Node<Stmt>]) -> usize {
  body
    .iter()
    .position(|s| !matches!(s.stx.as_ref(), Stmt::Comment(_)) && !s.stx.is_directive())
    .unwrap_or(body.len())
}

/// Inserts the temps' merged declaration into a function or static block body.
pub fn insert_var_decl(body: &mut Vec<Node<Stmt>>, loc: Loc, temps: Vec<TempVar>) {
  if temps.is_empty() {
    return;
  };
  let at = prologue_end(body);
  body.insert(at, var_decl_stmt(loc, temps));
}

#[cfg(test)]
mod tests {
  use super::insert_var_decl;
  use super::minified_name;
  use super::FrameKind;
  use super::TempManager;
  use crate::emit::emit;
  use crate::loc::Loc;
  use crate::parse::parse;
  use crate::scope::compute_scopes;
  use crate::scope::ScopeTree;

  #[test]
  fn test_minified_name_sequence() {
    let names: Vec<String> = [0, 1, 25, 26, 51, 52, 53, 54, 55, 107, 108]
      .into_iter()
      .map(minified_name)
      .collect();
    assert_eq!(names, vec![
      "a", "b", "z", "A", "Z", "_", "$", "aa", "ba", "$a", "ab"
    ]);
  }

  #[test]
  fn test_collisions_get_suffix() {
    let ast = parse("let _a, _b2; _b;").unwrap().ast;
    let scopes = compute_scopes(&ast);
    let mut temps = TempManager::new(scopes.root());
    assert_eq!(temps.alloc(&scopes), "_a2");
    assert_eq!(temps.alloc(&scopes), "_b3");
    assert_eq!(temps.alloc(&scopes), "_c");
    assert_eq!(temps.alloc_named(&scopes, "_this"), "_this");
    assert_eq!(temps.alloc_named(&scopes, "_this"), "_this2");
  }

  #[test]
  fn test_frames_restart_and_avoid_enclosing_names() {
    let scopes = ScopeTree::new();
    let root = scopes.root();
    let mut temps = TempManager::new(root);
    assert_eq!(temps.alloc(&scopes), "_a");
    temps.push(FrameKind::Function, root);
    assert_eq!(temps.alloc(&scopes), "_a2");
    assert_eq!(temps.alloc(&scopes), "_b");
    let inner = temps.pop();
    assert_eq!(inner.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(), [
      "_a2", "_b"
    ]);
    // Siblings may reuse a closed frame's names; its parent may not.
    temps.push(FrameKind::Function, root);
    assert_eq!(temps.alloc(&scopes), "_a2");
    temps.pop();
    assert_eq!(temps.alloc(&scopes), "_b2");
    let group = temps.finish_group();
    assert_eq!(group.len(), 2);
    assert_eq!(temps.alloc(&scopes), "_a3");
  }

  #[test]
  fn test_bound_temps_are_not_declared() {
    let scopes = ScopeTree::new();
    let mut temps = TempManager::new(scopes.root());
    temps.push(FrameKind::Params, scopes.root());
    assert_eq!(temps.nearest_body(), 0);
    let param = temps.alloc_bound(&scopes);
    assert_eq!(param, "_a");
    assert!(temps.pop().is_empty());
  }

  #[test]
  fn test_declaration_goes_after_prologue() {
    let mut ast = parse("function f() { /*! @license */ 'use strict'; a() }")
      .unwrap()
      .ast;
    let scopes = ScopeTree::new();
    let mut temps = TempManager::new(scopes.root());
    temps.alloc(&scopes);
    let decls = temps.finish_group();
    let crate::ast::stmt::Stmt::FunctionDecl(decl) = ast.stx.body[0].stx.as_mut() else {
      panic!("expected function");
    };
    let crate::ast::func::FuncBody::Block(body) = &mut decl.stx.function.stx.body else {
      panic!("expected block body");
    };
    insert_var_decl(body, Loc(0, 0), decls);
    assert_eq!(
      emit(&ast),
      "function f() {\n  /*! @license */\n  \"use strict\";\n  var _a;\n  a();\n}\n"
    );
  }
}
