//! Command parsing.
//!
//! One line of input becomes one [`Command`] variant in a single parse
//! step; the interpreter then matches on it exhaustively. Keywords are
//! case-insensitive and tokens are whitespace-delimited. A register
//! operand is either a bare index (`2`) or prefixed (`r2` / `R2`) and must
//! land in `0..NUM_REGS`.
//!
//! Any malformed operand or wrong operand count is a usage error for that
//! command alone; nothing about the session changes.

use crate::cpu::NUM_REGS;
use thiserror::Error;

/// A fully parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `add x k` — add immediate to register
    Add { x: usize, k: u32 },
    /// `sub x k` — subtract immediate from register
    Sub { x: usize, k: u32 },
    /// `mul x y` — multiply register by register
    Mul { x: usize, y: usize },
    /// `mov x k` — load immediate
    Mov { x: usize, k: u32 },
    /// `rand x a b` — load a random value from `[a, b]`
    Rand { x: usize, lo: u32, hi: u32 },
    /// `save path` — persist the register bank
    Save { path: String },
    /// `load path` — restore the register bank (merge)
    Load { path: String },
    /// `script path` — replay commands from a file
    Script { path: String },
    /// `show` — redraw the current state
    Show,
    /// `help` — redraw state and command reference
    Help,
    /// `reset` — reinitialize the register bank
    Reset,
    /// `quit` / `exit` — end the session
    Quit,
}

/// Why a line failed to parse.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("unrecognized command '{0}'; type 'help' for the command list")]
    Unknown(String),
}

impl Command {
    /// Parse one line. Returns `None` for a blank line, otherwise the
    /// command or the error to report.
    pub fn parse(line: &str) -> Option<Result<Command, CommandError>> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let (keyword, args) = tokens.split_first()?;
        Some(Self::parse_tokens(&keyword.to_ascii_lowercase(), args))
    }

    fn parse_tokens(keyword: &str, args: &[&str]) -> Result<Command, CommandError> {
        match keyword {
            "add" => match args {
                [x, k] => parse_reg(x)
                    .zip(parse_u32(k))
                    .map(|(x, k)| Command::Add { x, k })
                    .ok_or(CommandError::Usage(USAGE_ADD)),
                _ => Err(CommandError::Usage(USAGE_ADD)),
            },
            "sub" => match args {
                [x, k] => parse_reg(x)
                    .zip(parse_u32(k))
                    .map(|(x, k)| Command::Sub { x, k })
                    .ok_or(CommandError::Usage(USAGE_SUB)),
                _ => Err(CommandError::Usage(USAGE_SUB)),
            },
            "mul" => match args {
                [x, y] => parse_reg(x)
                    .zip(parse_reg(y))
                    .map(|(x, y)| Command::Mul { x, y })
                    .ok_or(CommandError::Usage(USAGE_MUL)),
                _ => Err(CommandError::Usage(USAGE_MUL)),
            },
            "mov" => match args {
                [x, k] => parse_reg(x)
                    .zip(parse_u32(k))
                    .map(|(x, k)| Command::Mov { x, k })
                    .ok_or(CommandError::Usage(USAGE_MOV)),
                _ => Err(CommandError::Usage(USAGE_MOV)),
            },
            "rand" => match args {
                [x, a, b] => match (parse_reg(x), parse_u32(a), parse_u32(b)) {
                    (Some(x), Some(lo), Some(hi)) => Ok(Command::Rand { x, lo, hi }),
                    _ => Err(CommandError::Usage(USAGE_RAND)),
                },
                _ => Err(CommandError::Usage(USAGE_RAND)),
            },
            "save" => match args {
                [path] => Ok(Command::Save { path: (*path).to_string() }),
                _ => Err(CommandError::Usage(USAGE_SAVE)),
            },
            "load" => match args {
                [path] => Ok(Command::Load { path: (*path).to_string() }),
                _ => Err(CommandError::Usage(USAGE_LOAD)),
            },
            "script" => match args {
                [path] => Ok(Command::Script { path: (*path).to_string() }),
                _ => Err(CommandError::Usage(USAGE_SCRIPT)),
            },
            "show" => expect_bare(args, Command::Show, "show"),
            "help" => expect_bare(args, Command::Help, "help"),
            "reset" => expect_bare(args, Command::Reset, "reset"),
            "quit" => expect_bare(args, Command::Quit, "quit"),
            "exit" => expect_bare(args, Command::Quit, "exit"),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

const USAGE_ADD: &str = "add x k        (ex: add r2 10)";
const USAGE_SUB: &str = "sub x k        (ex: sub 2 5)";
const USAGE_MUL: &str = "mul x y        (ex: mul r3 r1)";
const USAGE_MOV: &str = "mov x k        (ex: mov 7 0)";
const USAGE_RAND: &str = "rand x min max (ex: rand r0 0 500)";
const USAGE_SAVE: &str = "save file.txt";
const USAGE_LOAD: &str = "load file.txt";
const USAGE_SCRIPT: &str = "script file.txt";

fn expect_bare(args: &[&str], cmd: Command, usage: &'static str) -> Result<Command, CommandError> {
    if args.is_empty() {
        Ok(cmd)
    } else {
        Err(CommandError::Usage(usage))
    }
}

/// Parse a register reference: `3`, `r3`, or `R3`, in `0..NUM_REGS`.
fn parse_reg(tok: &str) -> Option<usize> {
    let digits = tok.strip_prefix(['r', 'R']).unwrap_or(tok);
    let idx: usize = digits.parse().ok()?;
    (idx < NUM_REGS).then_some(idx)
}

/// Parse an unsigned 32-bit decimal immediate.
fn parse_u32(tok: &str) -> Option<u32> {
    tok.parse().ok()
}
