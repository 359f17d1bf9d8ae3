//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use super::{Result, SaveData, SaveRepository, validate_slot};

/// File-based implementation of SaveRepository.
///
/// # File Format
///
/// Each slot is stored as `{slot}.json`, pretty-printed so that saves can be
/// inspected and edited by hand. Writes go to a temp file that is renamed
/// over the slot, so a crash never leaves a half-written save.
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    /// Create a new file-based save repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", slot))
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, slot: &str, data: &SaveData) -> Result<()> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);
        let temp_path = path.with_extension("json.tmp");

        let json = serde_json::to_vec_pretty(data)?;

        // Write to temp file
        fs::write(&temp_path, json)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        tracing::debug!(target: "runtime::repository", slot, path = %path.display(), "saved");

        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<SaveData>> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let data: SaveData = serde_json::from_slice(&bytes)?;

        tracing::debug!(target: "runtime::repository", slot, path = %path.display(), "loaded");

        Ok(Some(data))
    }

    fn exists(&self, slot: &str) -> bool {
        validate_slot(slot).is_ok() && self.slot_path(slot).exists()
    }

    fn delete(&self, slot: &str) -> Result<()> {
        validate_slot(slot)?;
        let path = self.slot_path(slot);

        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!(target: "runtime::repository", slot, "deleted");
        }

        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<String>> {
        let mut slots = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(slot) = filename.strip_suffix(".json")
                && validate_slot(slot).is_ok()
            {
                slots.push(slot.to_string());
            }
        }

        slots.sort();
        Ok(slots)
    }
}
