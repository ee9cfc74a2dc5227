#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
  /// Loads a data cell into a register.
  ///
  /// | Operation | Semantics/RTL | Encoding     |
  /// |-----------|---------------|--------------|
  /// | Load      | `r[s] ← m[a]` | `01 ss aa`   |
  Load = 0x01,

  /// Stores a register into a data cell.
  ///
  /// | Operation | Semantics/RTL | Encoding     |
  /// |-----------|---------------|--------------|
  /// | Store     | `m[a] ← r[s]` | `02 ss aa`   |
  Store = 0x02,

  /// | Operation | Semantics/RTL               | Encoding   |
  /// |-----------|-----------------------------|------------|
  /// | Add       | `r[d] ← (r[d] + r[s]) % 256` | `03 dd ss` |
  Add = 0x03,

  /// | Operation | Semantics/RTL               | Encoding   |
  /// |-----------|-----------------------------|------------|
  /// | Subtract  | `r[d] ← (r[d] − r[s]) % 256` | `04 dd ss` |
  Sub = 0x04,

  /// Only available with [`InstructionSet::Extended`](crate::vm::InstructionSet).
  ///
  /// | Operation     | Semantics/RTL            | Encoding   |
  /// |---------------|--------------------------|------------|
  /// | Add Immediate | `r[d] ← (r[d] + v) % 256` | `05 dd vv` |
  Addi = 0x05,

  /// Only available with [`InstructionSet::Extended`](crate::vm::InstructionSet).
  ///
  /// | Operation          | Semantics/RTL            | Encoding   |
  /// |--------------------|--------------------------|------------|
  /// | Subtract Immediate | `r[d] ← (r[d] − v) % 256` | `06 dd vv` |
  Subi = 0x06,

  /// Only available with [`InstructionSet::Extended`](crate::vm::InstructionSet).
  ///
  /// | Operation | Semantics/RTL | Encoding |
  /// |-----------|---------------|----------|
  /// | Jump      | `pc ← a`      | `07 aa`  |
  Jump = 0x07,

  /// Only available with [`InstructionSet::Extended`](crate::vm::InstructionSet).
  /// The offset is unsigned and relative to the following instruction.
  ///
  /// | Operation              | Semantics/RTL                   | Encoding   |
  /// |------------------------|---------------------------------|------------|
  /// | Branch If Equal Zero   | `if r[s] == 0 : pc ← pc + 3 + o` | `08 ss oo` |
  Beqz = 0x08,

  /// | Operation | Semantics/RTL      | Encoding |
  /// |-----------|--------------------|----------|
  /// | Halt      | `(stop execution)` | `ff`     |
  Halt = 0xFF,
}

impl Opcode {
  pub const ALL: [Opcode; 9] = [
    Self::Load,
    Self::Store,
    Self::Add,
    Self::Sub,
    Self::Addi,
    Self::Subi,
    Self::Jump,
    Self::Beqz,
    Self::Halt,
  ];

  /// Encoded length of the instruction in bytes, opcode included
  pub fn width(self) -> usize {
    match self {
      Self::Halt => 1,
      Self::Jump => 2,
      _ => 3,
    }
  }
}

impl TryFrom<u8> for Opcode {
  type Error = u8;

  fn try_from(byte: u8) -> Result<Self, Self::Error> {
    Self::ALL.into_iter().find(|op| *op as u8 == byte).ok_or(byte)
  }
}
