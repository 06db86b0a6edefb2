//! State persistence.
//!
//! Save files are newline-separated `key=value` text:
//!
//! ```text
//! # arm-invaders save
//! r0=100
//! ...
//! r7=100
//! N=0 Z=1 C=1 V=0
//! ```
//!
//! Loading is a merge, not a reset: every `key=value` token found updates
//! its field, and everything else keeps its prior value. Unknown keys,
//! out-of-range register indices, and unparseable values are ignored. The
//! turn counter is never written and never touched by a load. Saving then
//! loading into a reset bank reproduces registers and flags exactly.

use crate::cpu::{RegisterBank, NUM_REGS};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use thiserror::Error;

/// Errors from save/load.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Persist the bank to the file at `path`.
pub fn save_state<P: AsRef<Path>>(path: P, bank: &RegisterBank) -> Result<(), SaveError> {
    let mut file = File::create(path.as_ref())?;
    write_state(&mut file, bank)?;
    Ok(())
}

/// Merge the file at `path` into the bank.
pub fn load_state<P: AsRef<Path>>(path: P, bank: &mut RegisterBank) -> Result<(), SaveError> {
    let file = File::open(path.as_ref())?;
    read_state(BufReader::new(file), bank)?;
    Ok(())
}

/// Write the save format to any writer.
pub fn write_state<W: Write>(w: &mut W, bank: &RegisterBank) -> io::Result<()> {
    let snap = bank.snapshot();

    writeln!(w, "# arm-invaders save")?;
    for (i, value) in snap.registers.iter().enumerate() {
        writeln!(w, "r{}={}", i, value)?;
    }
    // Flags render as "N=.. Z=.. C=.. V=.." already
    writeln!(w, "{}", snap.flags)?;

    Ok(())
}

/// Merge the save format from any line source into the bank.
pub fn read_state<L: BufRead>(reader: L, bank: &mut RegisterBank) -> io::Result<()> {
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        for token in trimmed.split_whitespace() {
            if let Some((key, value)) = token.split_once('=') {
                apply(bank, key, value);
            }
        }
    }
    Ok(())
}

fn apply(bank: &mut RegisterBank, key: &str, value: &str) {
    match key {
        "N" => set_flag(&mut bank.flags.n, value),
        "Z" => set_flag(&mut bank.flags.z, value),
        "C" => set_flag(&mut bank.flags.c, value),
        "V" => set_flag(&mut bank.flags.v, value),
        _ => {
            let Some(idx) = key.strip_prefix('r').and_then(|d| d.parse::<usize>().ok()) else {
                return;
            };
            if idx < NUM_REGS {
                if let Ok(v) = value.parse::<u32>() {
                    bank.set(idx, v);
                }
            }
        }
    }
}

fn set_flag(flag: &mut bool, value: &str) {
    if let Ok(v) = value.parse::<u32>() {
        *flag = v != 0;
    }
}
