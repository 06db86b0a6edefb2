//! The simulated processor.
//!
//! This module implements the whole semantic core of the simulator:
//! - a fixed bank of eight 32-bit unsigned registers with NZCV flags
//! - pure flag-derivation arithmetic (ADD/SUB realistic, MUL didactic)
//! - instruction execution with turn counting and the zeroed-register
//!   signal consumed by the display layer

pub mod alu;
pub mod execute;
pub mod registers;

pub use execute::{ExecError, Instruction};
pub use registers::{Flags, RegisterBank, Snapshot, NUM_REGS, RESET_VALUE};
