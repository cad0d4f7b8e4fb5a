use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::token::TT;
use serde::Serialize;
use std::cmp::max;
use std::cmp::min;
use std::ops::Add;
use std::ops::AddAssign;

/// A location within the current source file expressed as UTF-8 byte offsets.
///
/// Nodes synthesized by lowering borrow the location of the construct they replace, so diagnostics
/// raised against rewritten code still point into the original source.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  pub fn error(self, typ: SyntaxErrorType, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError::new(typ, self, actual_token)
  }

  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  pub fn len(&self) -> usize {
    self.1.saturating_sub(self.0)
  }

  pub fn extend(&mut self, other: Loc) {
    self.0 = min(self.0, other.0);
    self.1 = max(self.1, other.1);
  }

  /// Zero-width location at the start of this one.
  pub fn start(&self) -> Loc {
    Loc(self.0, self.0)
  }

  /// 1-based line and column of the start offset.
  pub fn line_col(&self, source: &str) -> (usize, usize) {
    let before = &source[..self.0.min(source.len())];
    let line = before.bytes().filter(|&b| b == b'\n').count() + 1;
    let col = before.rfind('\n').map(|i| self.0 - i).unwrap_or(self.0 + 1);
    (line, col)
  }
}

impl Add for Loc {
  type Output = Loc;

  fn add(self, rhs: Self) -> Self::Output {
    let mut new = self;
    new.extend(rhs);
    new
  }
}

impl AddAssign for Loc {
  fn add_assign(&mut self, rhs: Self) {
    self.extend(rhs);
  }
}

#[cfg(test)]
mod tests {
  use super::Loc;

  #[test]
  fn test_extend_and_line_col() {
    let mut loc = Loc(4, 6);
    loc += Loc(1, 2);
    assert_eq!(loc, Loc(1, 6));
    assert_eq!(Loc(4, 5) + Loc(8, 9), Loc(4, 9));
    let src = "ab\ncd\nef";
    assert_eq!(Loc(4, 5).line_col(src), (2, 2));
    assert_eq!(Loc(0, 1).line_col(src), (1, 1));
  }
}
