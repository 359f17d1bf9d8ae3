use serde::{Deserialize, Serialize};

use game_core::{CommandKind, Combatant, CombatantTemplate, StatKind, StatSheet, Stats};

use super::{RepositoryError, Result};
use crate::inventory::{Inventory, ItemStack};

/// One persisted base stat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavedStat {
    pub kind: StatKind,
    pub value: f32,
}

/// Everything that survives between encounters.
///
/// Commands are stored by name so that a save stays readable when kinds
/// are reordered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub dungeon_level: u32,
    pub gold: u32,
    pub items: Vec<ItemStack>,
    pub commands: Vec<String>,
    /// Base stats only; gear bonuses are rebuilt from equipped items.
    pub stats: Vec<SavedStat>,
}

impl SaveData {
    pub fn capture(dungeon_level: u32, inventory: &Inventory, hero: &Combatant) -> Self {
        Self {
            dungeon_level,
            gold: inventory.gold(),
            items: inventory.stacks().to_vec(),
            commands: hero.learned.iter().map(ToString::to_string).collect(),
            stats: hero
                .stats
                .base()
                .iter()
                .filter(|(_, value)| *value != 0.0)
                .map(|(kind, value)| SavedStat { kind, value })
                .collect(),
        }
    }

    pub fn inventory(&self) -> Inventory {
        Inventory::from_stacks(self.gold, self.items.iter().copied())
    }

    pub fn stat(&self, kind: StatKind) -> f32 {
        self.stats
            .iter()
            .find(|s| s.kind == kind)
            .map_or(0.0, |s| s.value)
    }

    /// Parses the stored command names.
    pub fn learned(&self) -> Result<Vec<CommandKind>> {
        self.commands
            .iter()
            .map(|name| {
                let kind: CommandKind = name.parse().map_err(|_| {
                    RepositoryError::CorruptedData(format!("unknown command {name:?}"))
                })?;
                if !kind.is_orderable() {
                    return Err(RepositoryError::CorruptedData(format!(
                        "{name} cannot be learned"
                    )));
                }
                Ok(kind)
            })
            .collect()
    }

    fn base_stats(&self) -> StatSheet {
        self.stats.iter().map(|s| (s.kind, s.value)).collect()
    }

    /// Builds a player-controlled template for a fresh roster.
    pub fn template(&self, name: impl Into<String>) -> Result<CombatantTemplate> {
        let mut template = CombatantTemplate::new(name, self.base_stats().iter().collect());
        template.player_controlled = true;
        template.learned = self.learned()?;
        Ok(template)
    }

    /// Overwrites a combatant's base stats and learned commands.
    ///
    /// Bonuses are cleared; the caller re-applies gear and then
    /// [`SaveData::restore_resources`] so that life above the base maximum
    /// survives.
    pub fn apply_to(&self, combatant: &mut Combatant) -> Result<()> {
        combatant.learned = self.learned()?;
        combatant.stats = Stats::from_base(self.base_stats());
        combatant.player_controlled = true;
        Ok(())
    }

    pub fn restore_resources(&self, stats: &mut Stats) {
        stats.set(StatKind::Life, self.stat(StatKind::Life));
        stats.set(StatKind::Mana, self.stat(StatKind::Mana));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero() -> Combatant {
        let stats = Stats::new()
            .with(StatKind::MaxLife, 40.0)
            .with(StatKind::Life, 31.0)
            .with(StatKind::Agility, 6.0);
        Combatant::new(Default::default(), "Knight", stats)
            .with_player_control(true)
            .with_learned(vec![CommandKind::Attack, CommandKind::Protect])
    }

    #[test]
    fn capture_keeps_base_values_and_command_names() {
        let inventory = Inventory::new().with_gold(12).with_item(game_core::ItemKind::Elixir, 2);
        let save = SaveData::capture(3, &inventory, &hero());

        assert_eq!(save.commands, vec!["Attack", "Protect"]);
        assert_eq!(save.stat(StatKind::Life), 31.0);
        assert_eq!(save.stat(StatKind::Strength), 0.0);
        assert!(save.stats.iter().all(|s| s.value != 0.0));
        assert_eq!(save.inventory(), inventory);
    }

    #[test]
    fn template_rebuilds_the_hero() {
        let save = SaveData::capture(1, &Inventory::new(), &hero());
        let template = save.template("Knight").unwrap();
        let rebuilt = Combatant::from_template(Default::default(), &template);

        assert!(rebuilt.player_controlled);
        assert_eq!(rebuilt.stats.life(), 31.0);
        assert!(rebuilt.has_learned(CommandKind::Protect));
    }

    #[test]
    fn unknown_command_is_corruption() {
        let save = SaveData {
            commands: vec!["Fireball".into()],
            ..SaveData::default()
        };
        assert!(matches!(
            save.learned(),
            Err(RepositoryError::CorruptedData(_))
        ));

        let save = SaveData {
            commands: vec!["Death".into()],
            ..SaveData::default()
        };
        assert!(save.learned().is_err());
    }
}
