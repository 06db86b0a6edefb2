//! Script replay.
//!
//! A script is a plain text file with one command per line. Lines that are
//! empty (after trimming leading whitespace) or start with `#` are skipped
//! without dispatch. Every other line goes through the same interpreter as
//! interactive input, so casing and error behavior are identical for both
//! sources. Per-line failures are collected, not fatal; `quit`/`exit`
//! stops the replay (and any enclosing replays).

use crate::repl::session::{Action, Session, SessionError};
use rand_core::RngCore;
use std::fs::File;
use std::io::{self, BufRead, BufReader};

/// What happened during one script replay.
#[derive(Debug, Default)]
pub struct ScriptReport {
    /// Lines dispatched to the interpreter successfully.
    pub dispatched: usize,
    /// Blank and comment lines skipped.
    pub skipped: usize,
    /// Failed lines: (1-based line number, error).
    pub errors: Vec<(usize, SessionError)>,
    /// A `quit`/`exit` line ended the replay early.
    pub halted: bool,
}

/// Replay the script at `path` through `session`.
///
/// An unopenable path is the only error; it leaves the session untouched
/// (zero lines processed).
pub fn run_script<R: RngCore>(
    session: &mut Session<R>,
    path: &str,
) -> io::Result<ScriptReport> {
    let file = File::open(path)?;
    replay(session, BufReader::new(file))
}

/// Replay commands from any line source.
pub fn replay<R: RngCore, L: BufRead>(
    session: &mut Session<R>,
    lines: L,
) -> io::Result<ScriptReport> {
    let mut report = ScriptReport::default();

    for (num, line) in lines.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            report.skipped += 1;
            continue;
        }

        match session.execute(trimmed) {
            Ok(Action::Quit) => {
                report.halted = true;
                break;
            }
            Ok(Action::ScriptReplayed { report: inner, .. }) => {
                report.dispatched += 1;
                // A quit inside a nested script unwinds the whole replay
                if inner.halted {
                    report.halted = true;
                    break;
                }
            }
            Ok(_) => report.dispatched += 1,
            Err(e) => report.errors.push((num + 1, e)),
        }
    }

    Ok(report)
}
