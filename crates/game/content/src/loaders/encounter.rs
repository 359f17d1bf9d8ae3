//! Encounter roster loader.

use std::path::Path;

use game_core::{CombatantTemplate, Roster};

use crate::loaders::{LoadResult, read_file};

/// A data-driven encounter: the party and the opponents it faces.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EncounterSpec {
    pub name: String,
    /// Dungeon depth the encounter belongs to.
    #[serde(default)]
    pub dungeon_level: u32,
    pub combatants: Vec<CombatantTemplate>,
}

impl EncounterSpec {
    pub fn party(&self) -> impl Iterator<Item = &CombatantTemplate> {
        self.combatants.iter().filter(|c| c.player_controlled)
    }

    pub fn opponents(&self) -> impl Iterator<Item = &CombatantTemplate> {
        self.combatants.iter().filter(|c| !c.player_controlled)
    }

    /// Spawns every combatant into a fresh roster, in file order.
    pub fn build_roster(&self) -> Roster {
        let mut roster = Roster::new();
        for template in &self.combatants {
            roster.spawn(template);
        }
        roster
    }
}

/// Loader for encounter files.
pub struct EncounterLoader;

impl EncounterLoader {
    /// Load an encounter from a RON file.
    ///
    /// Both sides must be represented.
    pub fn load(path: &Path) -> LoadResult<EncounterSpec> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EncounterSpec> {
        let spec: EncounterSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter RON: {}", e))?;

        if spec.party().next().is_none() {
            anyhow::bail!("Encounter '{}' has no player-controlled combatant", spec.name);
        }
        if spec.opponents().next().is_none() {
            anyhow::bail!("Encounter '{}' has no opponent", spec.name);
        }
        for template in &spec.combatants {
            if template.learned.iter().any(|kind| !kind.is_orderable()) {
                anyhow::bail!(
                    "Combatant '{}' lists a command only the resolver may assign",
                    template.name
                );
            }
        }

        Ok(spec)
    }
}
