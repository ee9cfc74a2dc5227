//! A tiny byte-addressable virtual machine.
//!
//! Memory is a single 256 byte image. The low [`MEMORY_SHIFT`] bytes hold data,
//! everything above holds the program:
//!
//! ```text
//! 00 01 02 03 04 05 06 07 08 09 0a 0b 0c ... ff
//! ^========== data =====^ ^===== instructions =^
//! ```
//!
//! Execution starts at address `0x08` and runs until a `HALT` (`0xff`) byte
//! is fetched, or until something goes wrong.

pub mod memory;
pub mod opcode;
pub mod region;
pub mod register;
pub mod vm;

pub use region::{MEMORY_SHIFT, MEMORY_SIZE};
pub use vm::{compute, compute_with, Fault, InstructionSet, Outcome, State, Vm, VmConfig};
