//! Instruction execution against the register bank.
//!
//! The interpreter parses a command into an [`Instruction`] and hands it
//! here. Execution reads the operands, calls the pure ALU, writes the
//! destination, replaces the flags, bumps the turn counter exactly once,
//! and latches the "register just became zero" signal for the display.

use crate::cpu::alu;
use crate::cpu::registers::{RegisterBank, NUM_REGS};
use thiserror::Error;

/// One executable instruction. RAND is resolved to a MOV of the drawn
/// immediate before it reaches this type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// `r[x] = r[x] + k`
    Add { x: usize, k: u32 },
    /// `r[x] = r[x] - k`
    Sub { x: usize, k: u32 },
    /// `r[x] = r[x] * r[y]` (low 32 bits)
    Mul { x: usize, y: usize },
    /// `r[x] = k`
    Mov { x: usize, k: u32 },
}

impl Instruction {
    /// Index of the destination register.
    pub fn dest(&self) -> usize {
        match *self {
            Instruction::Add { x, .. }
            | Instruction::Sub { x, .. }
            | Instruction::Mul { x, .. }
            | Instruction::Mov { x, .. } => x,
        }
    }
}

impl std::fmt::Display for Instruction {
    /// ARM-style assembly echo, e.g. `ADD r2, r2, #10`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Instruction::Add { x, k } => write!(f, "ADD r{}, r{}, #{}", x, x, k),
            Instruction::Sub { x, k } => write!(f, "SUB r{}, r{}, #{}", x, x, k),
            Instruction::Mul { x, y } => write!(f, "MUL r{}, r{}, r{}", x, x, y),
            Instruction::Mov { x, k } => write!(f, "MOV r{}, #{}", x, k),
        }
    }
}

/// Errors from executing an instruction.
#[derive(Debug, Clone, Error)]
pub enum ExecError {
    #[error("register index {0} out of range (0-{})", NUM_REGS - 1)]
    BadRegister(usize),
}

impl RegisterBank {
    /// Execute one instruction: write the destination, replace the flags,
    /// advance the turn counter, and latch the zeroed signal.
    ///
    /// Returns the value written to the destination register.
    pub fn execute(&mut self, instr: Instruction) -> Result<u32, ExecError> {
        let x = instr.dest();
        let (res, flags) = match instr {
            Instruction::Add { x, k } => {
                let a = self.get(x).ok_or(ExecError::BadRegister(x))?;
                alu::add(a, k)
            }
            Instruction::Sub { x, k } => {
                let a = self.get(x).ok_or(ExecError::BadRegister(x))?;
                alu::sub(a, k)
            }
            Instruction::Mul { x, y } => {
                let a = self.get(x).ok_or(ExecError::BadRegister(x))?;
                let b = self.get(y).ok_or(ExecError::BadRegister(y))?;
                alu::mul_didactic(a, b)
            }
            Instruction::Mov { x, k } => {
                // Validate even though MOV ignores the old value
                let _ = self.get(x).ok_or(ExecError::BadRegister(x))?;
                alu::mov_immediate(k)
            }
        };

        self.set(x, res);
        self.flags = flags;
        self.turns += 1;
        self.set_zeroed((res == 0).then_some(x));

        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_writes_register_and_flags() {
        let mut bank = RegisterBank::new();
        let res = bank.execute(Instruction::Add { x: 2, k: 10 }).unwrap();

        assert_eq!(res, 110);
        assert_eq!(bank.get(2), Some(110));
        assert!(!bank.flags.z);
        assert!(!bank.flags.c);
        assert_eq!(bank.turns, 1);
        assert!(!bank.was_zeroed(2));
    }

    #[test]
    fn test_sub_to_zero_latches_signal() {
        // From reset, `sub r0 100` drains the register exactly to zero
        let mut bank = RegisterBank::new();
        let res = bank.execute(Instruction::Sub { x: 0, k: 100 }).unwrap();

        assert_eq!(res, 0);
        assert_eq!(bank.get(0), Some(0));
        assert!(!bank.flags.n);
        assert!(bank.flags.z);
        assert!(bank.flags.c);
        assert!(!bank.flags.v);
        assert_eq!(bank.turns, 1);
        assert!(bank.was_zeroed(0));
    }

    #[test]
    fn test_mov_then_add_wraps() {
        // `mov r1 4294967295` then `add r1 1` wraps to 0 with C set
        let mut bank = RegisterBank::new();
        bank.execute(Instruction::Mov { x: 1, k: u32::MAX }).unwrap();
        assert!(!bank.flags.c);

        bank.execute(Instruction::Add { x: 1, k: 1 }).unwrap();
        assert_eq!(bank.get(1), Some(0));
        assert!(bank.flags.c);
        assert!(bank.flags.z);
        assert_eq!(bank.turns, 2);
        assert!(bank.was_zeroed(1));
    }

    #[test]
    fn test_mul_uses_both_registers() {
        let mut bank = RegisterBank::new();
        bank.execute(Instruction::Mov { x: 3, k: 6 }).unwrap();
        bank.execute(Instruction::Mov { x: 4, k: 7 }).unwrap();
        bank.execute(Instruction::Mul { x: 3, y: 4 }).unwrap();

        assert_eq!(bank.get(3), Some(42));
        assert_eq!(bank.get(4), Some(7));
        assert_eq!(bank.turns, 3);
    }

    #[test]
    fn test_bad_register_leaves_state_untouched() {
        let mut bank = RegisterBank::new();
        let before = bank.snapshot();

        let err = bank.execute(Instruction::Add { x: NUM_REGS, k: 1 });
        assert!(err.is_err());
        assert_eq!(bank.snapshot(), before);
    }

    #[test]
    fn test_zeroed_signal_overwritten_by_next_instruction() {
        let mut bank = RegisterBank::new();
        bank.execute(Instruction::Mov { x: 5, k: 0 }).unwrap();
        assert!(bank.was_zeroed(5));

        bank.execute(Instruction::Mov { x: 5, k: 9 }).unwrap();
        assert!(!bank.was_zeroed(5));
        assert_eq!(bank.take_zeroed(), None);
    }

    #[test]
    fn test_display_echo() {
        assert_eq!(Instruction::Add { x: 2, k: 10 }.to_string(), "ADD r2, r2, #10");
        assert_eq!(Instruction::Sub { x: 0, k: 5 }.to_string(), "SUB r0, r0, #5");
        assert_eq!(Instruction::Mul { x: 3, y: 1 }.to_string(), "MUL r3, r3, r1");
        assert_eq!(Instruction::Mov { x: 7, k: 0 }.to_string(), "MOV r7, #0");
    }
}
