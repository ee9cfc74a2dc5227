use crate::region::{Region, MEMORY_SIZE};
use crate::vm::Fault;

/// A view over a caller owned memory image.
///
/// The accessors are split by [`Region`]: data cells can be read and written,
/// instruction bytes can only be read. Every access is bounds checked and
/// reports [`Fault::OutOfRange`] instead of wrapping.
#[derive(Debug)]
pub struct Memory<'m> {
  cells: &'m mut [u8; MEMORY_SIZE],
}

impl<'m> Memory<'m> {
  pub fn new(cells: &'m mut [u8; MEMORY_SIZE]) -> Self {
    Self { cells }
  }

  pub fn get_data(&self, address: usize) -> Result<u8, Fault> {
    check(Region::Data, address)?;
    Ok(self.cells[address])
  }

  pub fn set_data(&mut self, address: usize, value: u8) -> Result<(), Fault> {
    check(Region::Data, address)?;
    self.cells[address] = value;
    Ok(())
  }

  pub fn get_instruction_byte(&self, address: usize) -> Result<u8, Fault> {
    check(Region::Instruction, address)?;
    Ok(self.cells[address])
  }

  /// The whole data region, mostly for diagnostics
  pub fn data(&self) -> &[u8] {
    &self.cells[Region::Data.range()]
  }
}

fn check(region: Region, address: usize) -> Result<(), Fault> {
  if region.contains(address) {
    Ok(())
  } else {
    Err(Fault::OutOfRange { address, region })
  }
}
