use std::fmt;
use std::ops::Range;

/// Total number of addressable cells
pub const MEMORY_SIZE: usize = 256;

/// First address of the instruction region, and where the program counter
/// starts
pub const MEMORY_SHIFT: usize = 8;

/// One of the two address windows memory is split into.
///
/// Nothing physically separates them, the accessors in
/// [`Memory`](crate::memory::Memory) simply refuse to cross over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
  /// `[0, MEMORY_SHIFT)`, readable and writable by handlers
  Data,
  /// `[MEMORY_SHIFT, MEMORY_SIZE)`, read only, holds the encoded program
  Instruction,
}

impl Region {
  pub fn range(self) -> Range<usize> {
    match self {
      Self::Data => 0..MEMORY_SHIFT,
      Self::Instruction => MEMORY_SHIFT..MEMORY_SIZE,
    }
  }

  #[inline]
  pub fn contains(self, address: usize) -> bool {
    self.range().contains(&address)
  }
}

impl fmt::Display for Region {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let range = self.range();
    match self {
      Self::Data => write!(f, "data region [{:#04x}, {:#04x})", range.start, range.end),
      Self::Instruction => write!(
        f,
        "instruction region [{:#04x}, {:#05x})",
        range.start, range.end
      ),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn regions_are_disjoint_and_cover_memory() {
    for address in 0..MEMORY_SIZE {
      assert_ne!(
        Region::Data.contains(address),
        Region::Instruction.contains(address)
      );
    }
    assert!(!Region::Data.contains(MEMORY_SIZE));
    assert!(!Region::Instruction.contains(MEMORY_SIZE));
  }

  #[test]
  fn boundary_sits_at_shift() {
    assert!(Region::Data.contains(MEMORY_SHIFT - 1));
    assert!(Region::Instruction.contains(MEMORY_SHIFT));
  }
}
