use crate::region::MEMORY_SHIFT;

/// Operand byte naming one of the two general purpose registers
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
  R1 = 0x01,
  R2 = 0x02,
}

impl TryFrom<u8> for Selector {
  type Error = u8;

  fn try_from(byte: u8) -> Result<Self, Self::Error> {
    [Self::R1, Self::R2]
      .into_iter()
      .find(|selector| *selector as u8 == byte)
      .ok_or(byte)
  }
}

/// The register file: a program counter and two byte accumulators.
///
/// The program counter is kept wide so that stepping past the last cell shows
/// up as an out of range fetch rather than wrapping back into data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
  pc: usize,
  r1: u8,
  r2: u8,
}

impl Registers {
  pub fn new() -> Self {
    Self {
      pc: MEMORY_SHIFT,
      r1: 0,
      r2: 0,
    }
  }

  #[inline]
  pub fn pc(&self) -> usize {
    self.pc
  }

  #[inline]
  pub fn set_pc(&mut self, pc: usize) {
    self.pc = pc;
  }

  pub fn get(&self, selector: Selector) -> u8 {
    match selector {
      Selector::R1 => self.r1,
      Selector::R2 => self.r2,
    }
  }

  pub fn set(&mut self, selector: Selector, value: u8) {
    match selector {
      Selector::R1 => self.r1 = value,
      Selector::R2 => self.r2 = value,
    }
  }
}

impl Default for Registers {
  fn default() -> Self {
    Self::new()
  }
}
