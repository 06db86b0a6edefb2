//! # ARM Invaders
//!
//! A didactic simulator of a tiny fixed-register processor that executes
//! four arithmetic/move instructions and derives the NZCV condition flags
//! after each one, mimicking a reduced ARM-like instruction set.
//!
//! The point of the tool is teaching how flags fall out of 32-bit unsigned
//! arithmetic: ADD and SUB use the real ARM rules, while MUL's carry and
//! overflow are deliberately didactic ("did the full product fit?"). An
//! interactive command loop drives the simulator; scripts, save files, and
//! a terminal HUD round it out.

pub mod cpu;
pub mod hud;
pub mod repl;
pub mod save;

// Re-export commonly used types
pub use cpu::{alu, Flags, Instruction, RegisterBank, Snapshot, NUM_REGS, RESET_VALUE};
pub use repl::{run_script, Action, Command, CommandError, ScriptReport, Session, SessionError};
pub use save::{load_state, save_state, SaveError};
