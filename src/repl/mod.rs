//! The command interpreter.
//!
//! Parsing ([`command`]), dispatch against the register bank ([`session`]),
//! and script replay ([`script`]). Interactive and scripted input go
//! through the same path.

pub mod command;
pub mod script;
pub mod session;

pub use command::{Command, CommandError};
pub use script::{run_script, ScriptReport};
pub use session::{Action, Session, SessionError};
