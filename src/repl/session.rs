//! The interpreter session.
//!
//! A [`Session`] owns the one [`RegisterBank`] and an injected random
//! source, and turns parsed [`Command`]s into effects on it. Every outcome
//! is a value: successes are [`Action`]s for the caller to render, failures
//! are [`SessionError`]s to report. No failure ends the session; only
//! `quit`/`exit` (or end of input, which the caller observes) does.

use crate::cpu::{alu, ExecError, Instruction, RegisterBank, Snapshot};
use crate::repl::command::{Command, CommandError};
use crate::repl::script::{self, ScriptReport};
use crate::save::{self, SaveError};
use rand_core::RngCore;
use thiserror::Error;

/// What a successfully handled line did.
#[derive(Debug)]
pub enum Action {
    /// Blank line; nothing happened.
    Nothing,
    /// An instruction ran. `zeroed` is set when it drove its destination
    /// register to exactly zero (the display layer's explosion cue).
    Executed { instr: Instruction, zeroed: bool },
    /// State was written to `path`.
    Saved { path: String },
    /// State was merged in from `path`.
    Loaded { path: String },
    /// A script was replayed through this interpreter.
    ScriptReplayed { path: String, report: ScriptReport },
    /// Redraw requested.
    Show,
    /// Redraw with the command reference.
    Help,
    /// The bank was reinitialized.
    Reset,
    /// End the session.
    Quit,
}

/// A reportable, non-fatal failure of one command.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error("failed to save state to '{path}': {source}")]
    Save { path: String, source: SaveError },

    #[error("failed to load state from '{path}': {source}")]
    Load { path: String, source: SaveError },

    #[error("failed to run script '{path}': {source}")]
    Script { path: String, source: std::io::Error },
}

/// One interactive (or scripted) simulator session.
pub struct Session<R: RngCore> {
    bank: RegisterBank,
    rng: R,
}

impl<R: RngCore> Session<R> {
    /// Create a session with a freshly reset register bank.
    pub fn new(rng: R) -> Self {
        Self { bank: RegisterBank::new(), rng }
    }

    /// The register bank, read-only.
    pub fn bank(&self) -> &RegisterBank {
        &self.bank
    }

    /// Snapshot for the display layer.
    pub fn snapshot(&self) -> Snapshot {
        self.bank.snapshot()
    }

    /// Consume the one-shot zeroed-register signal.
    pub fn take_zeroed(&mut self) -> Option<usize> {
        self.bank.take_zeroed()
    }

    /// Parse and run one line of input.
    pub fn execute(&mut self, line: &str) -> Result<Action, SessionError> {
        match Command::parse(line) {
            None => Ok(Action::Nothing),
            Some(parsed) => self.dispatch(parsed?),
        }
    }

    /// Run one already-parsed command.
    pub fn dispatch(&mut self, cmd: Command) -> Result<Action, SessionError> {
        match cmd {
            Command::Add { x, k } => self.run_instr(Instruction::Add { x, k }),
            Command::Sub { x, k } => self.run_instr(Instruction::Sub { x, k }),
            Command::Mul { x, y } => self.run_instr(Instruction::Mul { x, y }),
            Command::Mov { x, k } => self.run_instr(Instruction::Mov { x, k }),
            Command::Rand { x, lo, hi } => {
                // RAND is sugar: draw the immediate, then dispatch as MOV
                let k = alu::random_in_range(&mut self.rng, lo, hi);
                self.run_instr(Instruction::Mov { x, k })
            }
            Command::Save { path } => {
                save::save_state(&path, &self.bank)
                    .map_err(|source| SessionError::Save { path: path.clone(), source })?;
                Ok(Action::Saved { path })
            }
            Command::Load { path } => {
                save::load_state(&path, &mut self.bank)
                    .map_err(|source| SessionError::Load { path: path.clone(), source })?;
                Ok(Action::Loaded { path })
            }
            Command::Script { path } => {
                let report = script::run_script(self, &path)
                    .map_err(|source| SessionError::Script { path: path.clone(), source })?;
                Ok(Action::ScriptReplayed { path, report })
            }
            Command::Show => Ok(Action::Show),
            Command::Help => Ok(Action::Help),
            Command::Reset => {
                self.bank.reset();
                Ok(Action::Reset)
            }
            Command::Quit => Ok(Action::Quit),
        }
    }

    fn run_instr(&mut self, instr: Instruction) -> Result<Action, SessionError> {
        let res = self.bank.execute(instr)?;
        Ok(Action::Executed { instr, zeroed: res == 0 })
    }
}
