//! Repository contract for save slots.

use super::{Result, SaveData};

/// Repository for hero saves.
///
/// This is for DYNAMIC data that outlives an encounter:
/// - Hero stats and learned commands
/// - Party gold and items
pub trait SaveRepository: Send + Sync {
    /// Save data under a slot, replacing any previous save.
    fn save(&self, slot: &str, data: &SaveData) -> Result<()>;

    /// Load a slot, `None` if it was never written.
    fn load(&self, slot: &str) -> Result<Option<SaveData>>;

    fn exists(&self, slot: &str) -> bool;

    /// Delete a slot. Deleting a missing slot is not an error.
    fn delete(&self, slot: &str) -> Result<()>;

    /// List all slots, sorted.
    fn list_slots(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}
