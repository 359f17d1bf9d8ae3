//! Subcommand implementations
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod list;
mod run;

pub use list::{ListEncounters, ListSaves};
pub use run::Run;
