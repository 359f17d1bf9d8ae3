//! Listing commands for content and saves.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use game_content::ContentFactory;
use runtime::{FileSaveRepository, SaveRepository};

use crate::dirs;

/// List the bundled encounters
#[derive(Parser, Debug)]
pub struct ListEncounters {
    /// Content directory (default: `$CONTENT_DATA_DIR` or the bundled data)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

impl ListEncounters {
    pub fn execute(self) -> Result<()> {
        let factory = ContentFactory::new(self.data_dir.unwrap_or_else(dirs::content_dir));
        for name in factory.encounter_names()? {
            let spec = factory.load_encounter(&name)?;
            let party: Vec<&str> = spec.party().map(|c| c.name.as_str()).collect();
            let opponents: Vec<&str> = spec.opponents().map(|c| c.name.as_str()).collect();
            println!(
                "{name:<16} {} vs {}",
                party.join(", "),
                opponents.join(", ")
            );
        }
        Ok(())
    }
}

/// List save slots
#[derive(Parser, Debug)]
pub struct ListSaves {
    /// Save directory (default: `$SAVE_DATA_DIR` or the platform data dir)
    #[arg(long)]
    pub save_dir: Option<PathBuf>,
}

impl ListSaves {
    pub fn execute(self) -> Result<()> {
        let repository = FileSaveRepository::new(self.save_dir.unwrap_or_else(dirs::save_dir))?;
        let slots = repository.list_slots()?;
        if slots.is_empty() {
            println!("no saves in {}", repository.base_dir().display());
        }
        for slot in slots {
            if let Some(save) = repository.load(&slot)? {
                println!(
                    "{slot:<16} level {:<3} gold {:<5} {} items",
                    save.dungeon_level,
                    save.gold,
                    save.items.len()
                );
            }
        }
        Ok(())
    }
}
