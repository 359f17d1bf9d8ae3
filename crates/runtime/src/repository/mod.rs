//! Persistence of the hero and the party inventory between encounters.
//!
//! Saves are addressed by slot name. The file repository writes one JSON
//! document per slot; the in-memory repository backs tests and local runs.
mod error;
mod file;
mod memory;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepository;
pub use traits::SaveRepository;
pub use types::{SaveData, SavedStat};

/// Slot names become file names, so they are restricted to a safe alphabet.
pub(crate) fn validate_slot(slot: &str) -> Result<()> {
    let valid = !slot.is_empty()
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(RepositoryError::InvalidSlot(slot.to_string()))
    }
}
