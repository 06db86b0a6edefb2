//! The simulated register bank.
//!
//! Eight 32-bit unsigned registers, the NZCV condition flags, and a turn
//! counter that ticks once per executed instruction. Register values always
//! use wraparound (mod 2^32) semantics; the flags describe only the most
//! recent instruction.

/// Number of registers in the bank.
pub const NUM_REGS: usize = 8;

/// Value every register holds after a reset.
pub const RESET_VALUE: u32 = 100;

/// The four condition flags, each derived anew by every instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    /// Negative: bit 31 of the result.
    pub n: bool,
    /// Zero: the result was 0.
    pub z: bool,
    /// Carry. For SUB this is the no-borrow convention (set iff a >= b).
    pub c: bool,
    /// Overflow: two's-complement signed overflow.
    pub v: bool,
}

impl Flags {
    /// All flags cleared.
    pub const fn clear() -> Self {
        Self { n: false, z: false, c: false, v: false }
    }
}

impl std::fmt::Display for Flags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "N={} Z={} C={} V={}",
            u8::from(self.n),
            u8::from(self.z),
            u8::from(self.c),
            u8::from(self.v)
        )
    }
}

/// A read-only copy of the bank for the display layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Register values r0..r7.
    pub registers: [u32; NUM_REGS],
    /// Flags from the latest instruction.
    pub flags: Flags,
    /// Instructions executed since the last reset.
    pub turns: u64,
}

/// The register bank: register values, flags, and the turn counter.
///
/// Created once per session, mutated in place by every instruction, and
/// fully reinitialized by [`RegisterBank::reset`].
#[derive(Clone, Debug)]
pub struct RegisterBank {
    regs: [u32; NUM_REGS],
    /// Condition flags from the latest instruction.
    pub flags: Flags,
    /// Instructions executed since the last reset. Not persisted.
    pub turns: u64,
    /// One-shot latch: the register the latest instruction drove to zero.
    zeroed: Option<usize>,
}

impl RegisterBank {
    /// Create a bank in the reset state (all registers at 100).
    pub fn new() -> Self {
        Self {
            regs: [RESET_VALUE; NUM_REGS],
            flags: Flags::clear(),
            turns: 0,
            zeroed: None,
        }
    }

    /// Reinitialize: all registers to 100, flags cleared, turns zeroed.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Read register `x`, or `None` if the index is out of range.
    pub fn get(&self, x: usize) -> Option<u32> {
        self.regs.get(x).copied()
    }

    /// Write register `x`. Out-of-range indices are silently ignored;
    /// instruction execution and the save-file loader both validate the
    /// index before reaching this.
    pub(crate) fn set(&mut self, x: usize, value: u32) {
        if let Some(slot) = self.regs.get_mut(x) {
            *slot = value;
        }
    }

    /// Take a read-only snapshot for rendering.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            registers: self.regs,
            flags: self.flags,
            turns: self.turns,
        }
    }

    /// Whether the latest instruction left register `x` at exactly zero.
    pub fn was_zeroed(&self, x: usize) -> bool {
        self.zeroed == Some(x)
    }

    /// Consume the one-shot zeroed signal, clearing it.
    pub fn take_zeroed(&mut self) -> Option<usize> {
        self.zeroed.take()
    }

    /// Latch the zeroed signal for the instruction that just ran.
    pub(crate) fn set_zeroed(&mut self, zeroed: Option<usize>) {
        self.zeroed = zeroed;
    }
}

impl Default for RegisterBank {
    fn default() -> Self {
        Self::new()
    }
}
