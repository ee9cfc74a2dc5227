use tracing::{debug, trace};

use crate::memory::Memory;
use crate::opcode::Opcode;
use crate::region::{Region, MEMORY_SIZE};
use crate::register::{Registers, Selector};

/// Everything that can stop the machine short of a `HALT`.
///
/// None of these are recoverable. Writes made by earlier instructions are
/// left in memory as they were when the fault hit.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
  #[error("address {address:#04x} is outside the {region}")]
  OutOfRange { address: usize, region: Region },

  #[error("operand {operand:#04x} at {address:#04x} is not a register selector")]
  InvalidOperand { operand: u8, address: usize },

  #[error("unknown opcode {opcode:#04x} at {address:#04x}")]
  UnknownOpcode { opcode: u8, address: usize },

  #[error("step limit of {limit} reached")]
  StepLimitExceeded { limit: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
  Running,
  Halted,
  Faulted,
}

/// Which opcodes get a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstructionSet {
  /// `LOAD`, `STORE`, `ADD`, `SUB` and `HALT`
  #[default]
  Base,
  /// The base set plus `ADDI`, `SUBI`, `JUMP` and `BEQZ`
  Extended,
}

impl InstructionSet {
  fn table(self) -> &'static Table {
    match self {
      Self::Base => &BASE_TABLE,
      Self::Extended => &EXTENDED_TABLE,
    }
  }
}

#[derive(Debug, Clone, Default)]
pub struct VmConfig {
  /// Maximum number of instructions to execute, `HALT` excluded. `None` runs
  /// forever if the program never halts.
  pub step_limit: Option<u64>,
  pub instruction_set: InstructionSet,
}

impl VmConfig {
  pub fn with_step_limit(mut self, limit: u64) -> Self {
    self.step_limit = Some(limit);
    self
  }

  pub fn with_instruction_set(mut self, instruction_set: InstructionSet) -> Self {
    self.instruction_set = instruction_set;
    self
  }
}

/// Summary of a run that reached `HALT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
  pub steps: u64,
  pub registers: Registers,
}

/// Run the program stored in `memory` until it halts, modifying the data
/// region in place.
pub fn compute(memory: &mut [u8; MEMORY_SIZE]) -> Result<(), Fault> {
  compute_with(memory, &VmConfig::default()).map(|_| ())
}

pub fn compute_with(
  memory: &mut [u8; MEMORY_SIZE],
  config: &VmConfig,
) -> Result<Outcome, Fault> {
  Vm::new(memory, config.clone()).run()
}

/// A machine bound to one memory image for its whole life.
#[derive(Debug)]
pub struct Vm<'m> {
  memory: Memory<'m>,
  registers: Registers,
  state: State,
  steps: u64,
  config: VmConfig,
}

impl<'m> Vm<'m> {
  pub fn new(cells: &'m mut [u8; MEMORY_SIZE], config: VmConfig) -> Self {
    Self {
      memory: Memory::new(cells),
      registers: Registers::new(),
      state: State::Running,
      steps: 0,
      config,
    }
  }

  pub fn state(&self) -> State {
    self.state
  }

  pub fn registers(&self) -> &Registers {
    &self.registers
  }

  pub fn memory(&self) -> &Memory<'m> {
    &self.memory
  }

  /// Instructions executed so far
  pub fn steps(&self) -> u64 {
    self.steps
  }

  /// Fetch and execute a single instruction. Does nothing once the machine
  /// has halted or faulted.
  pub fn step(&mut self) -> Result<State, Fault> {
    if self.state != State::Running {
      return Ok(self.state);
    }
    match self.execute() {
      Ok(state) => {
        self.state = state;
        Ok(state)
      }
      Err(fault) => {
        debug!(pc = self.registers.pc(), steps = self.steps, %fault, "faulted");
        self.state = State::Faulted;
        Err(fault)
      }
    }
  }

  /// Keep stepping, like a clock, until the machine stops
  pub fn run(&mut self) -> Result<Outcome, Fault> {
    while self.step()? == State::Running {}
    Ok(Outcome {
      steps: self.steps,
      registers: self.registers,
    })
  }

  fn execute(&mut self) -> Result<State, Fault> {
    let pc = self.registers.pc();
    let opcode = self.memory.get_instruction_byte(pc)?;
    if opcode == Opcode::Halt as u8 {
      debug!(pc, steps = self.steps, "halted");
      return Ok(State::Halted);
    }
    let handler = self.config.instruction_set.table()[opcode as usize]
      .ok_or(Fault::UnknownOpcode { opcode, address: pc })?;
    if let Some(limit) = self.config.step_limit {
      if self.steps >= limit {
        return Err(Fault::StepLimitExceeded { limit });
      }
    }
    let decoded = Opcode::try_from(opcode).ok();
    trace!(
      pc,
      opcode = ?decoded,
      width = ?decoded.map(Opcode::width),
      steps = self.steps,
      "execute"
    );
    let next = handler(&mut self.memory, &mut self.registers, pc)?;
    self.registers.set_pc(next);
    self.steps += 1;
    Ok(State::Running)
  }
}

/// Executes the instruction at the given address, returning the next pc
type Handler = fn(&mut Memory<'_>, &mut Registers, usize) -> Result<usize, Fault>;

type Table = [Option<Handler>; MEMORY_SIZE];

static BASE_TABLE: Table = base_table();
static EXTENDED_TABLE: Table = extended_table();

const fn base_table() -> Table {
  let mut table: Table = [None; MEMORY_SIZE];
  table[Opcode::Load as usize] = Some(load as Handler);
  table[Opcode::Store as usize] = Some(store as Handler);
  table[Opcode::Add as usize] = Some(add as Handler);
  table[Opcode::Sub as usize] = Some(sub as Handler);
  table
}

const fn extended_table() -> Table {
  let mut table = base_table();
  table[Opcode::Addi as usize] = Some(addi as Handler);
  table[Opcode::Subi as usize] = Some(subi as Handler);
  table[Opcode::Jump as usize] = Some(jump as Handler);
  table[Opcode::Beqz as usize] = Some(beqz as Handler);
  table
}

const WIDTH: usize = 3;

fn selector(memory: &Memory<'_>, address: usize) -> Result<Selector, Fault> {
  let operand = memory.get_instruction_byte(address)?;
  Selector::try_from(operand).map_err(|operand| Fault::InvalidOperand { operand, address })
}

fn operand(memory: &Memory<'_>, address: usize) -> Result<usize, Fault> {
  Ok(memory.get_instruction_byte(address)? as usize)
}

fn branch_target(address: usize) -> Result<usize, Fault> {
  if Region::Instruction.contains(address) {
    Ok(address)
  } else {
    Err(Fault::OutOfRange {
      address,
      region: Region::Instruction,
    })
  }
}

// r[s] ← m[a]
fn load(memory: &mut Memory<'_>, registers: &mut Registers, pc: usize) -> Result<usize, Fault> {
  let s = selector(memory, pc + 1)?;
  let a = operand(memory, pc + 2)?;
  registers.set(s, memory.get_data(a)?);
  Ok(pc + WIDTH)
}

// m[a] ← r[s]
fn store(memory: &mut Memory<'_>, registers: &mut Registers, pc: usize) -> Result<usize, Fault> {
  let s = selector(memory, pc + 1)?;
  let a = operand(memory, pc + 2)?;
  memory.set_data(a, registers.get(s))?;
  Ok(pc + WIDTH)
}

// r[d] ← r[d] op r[s]
fn arithmetic(
  memory: &Memory<'_>,
  registers: &mut Registers,
  pc: usize,
  op: fn(u8, u8) -> u8,
) -> Result<usize, Fault> {
  let d = selector(memory, pc + 1)?;
  let s = selector(memory, pc + 2)?;
  registers.set(d, op(registers.get(d), registers.get(s)));
  Ok(pc + WIDTH)
}

fn add(memory: &mut Memory<'_>, registers: &mut Registers, pc: usize) -> Result<usize, Fault> {
  arithmetic(memory, registers, pc, u8::wrapping_add)
}

fn sub(memory: &mut Memory<'_>, registers: &mut Registers, pc: usize) -> Result<usize, Fault> {
  arithmetic(memory, registers, pc, u8::wrapping_sub)
}

// r[d] ← r[d] op v
fn arithmetic_immediate(
  memory: &Memory<'_>,
  registers: &mut Registers,
  pc: usize,
  op: fn(u8, u8) -> u8,
) -> Result<usize, Fault> {
  let d = selector(memory, pc + 1)?;
  let v = memory.get_instruction_byte(pc + 2)?;
  registers.set(d, op(registers.get(d), v));
  Ok(pc + WIDTH)
}

fn addi(memory: &mut Memory<'_>, registers: &mut Registers, pc: usize) -> Result<usize, Fault> {
  arithmetic_immediate(memory, registers, pc, u8::wrapping_add)
}

fn subi(memory: &mut Memory<'_>, registers: &mut Registers, pc: usize) -> Result<usize, Fault> {
  arithmetic_immediate(memory, registers, pc, u8::wrapping_sub)
}

// pc ← a
fn jump(memory: &mut Memory<'_>, _registers: &mut Registers, pc: usize) -> Result<usize, Fault> {
  branch_target(operand(memory, pc + 1)?)
}

// if r[s] == 0 : pc ← pc + 3 + o
fn beqz(memory: &mut Memory<'_>, registers: &mut Registers, pc: usize) -> Result<usize, Fault> {
  let s = selector(memory, pc + 1)?;
  let o = operand(memory, pc + 2)?;
  if registers.get(s) == 0 {
    branch_target(pc + WIDTH + o)
  } else {
    Ok(pc + WIDTH)
  }
}
