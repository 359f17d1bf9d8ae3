//! Combatant records and their data-driven templates.

use core::fmt;

use crate::buff::{BuffKind, BuffSet};
use crate::command::{Command, CommandKind};

use super::{EntityId, StatKind, StatSheet, Stats};

/// A participant in an encounter, player- or AI-controlled.
///
/// The record is owned by the [`super::Roster`] of the surrounding session.
/// The resolver only touches it through the roster while a tick runs.
pub struct Combatant {
    pub id: EntityId,
    pub name: String,
    pub stats: Stats,
    pub player_controlled: bool,
    /// Remaining boss phase transformations. A combatant with phases left
    /// transforms instead of dying when its life reaches zero.
    pub phases: u8,
    /// Command kinds this combatant may issue.
    pub learned: Vec<CommandKind>,
    pending: Option<Command>,
    buffs: BuffSet,
}

impl Combatant {
    pub fn new(id: EntityId, name: impl Into<String>, stats: Stats) -> Self {
        Self {
            id,
            name: name.into(),
            stats,
            player_controlled: false,
            phases: 0,
            learned: vec![CommandKind::Attack, CommandKind::Defend],
            pending: None,
            buffs: BuffSet::new(),
        }
    }

    pub fn from_template(id: EntityId, template: &CombatantTemplate) -> Self {
        let base: StatSheet = template.stats.iter().copied().collect();
        Self {
            id,
            name: template.name.clone(),
            stats: Stats::from_base(base),
            player_controlled: template.player_controlled,
            phases: template.phases,
            learned: template.learned.clone(),
            pending: None,
            buffs: BuffSet::new(),
        }
    }

    #[must_use]
    pub fn with_player_control(mut self, player_controlled: bool) -> Self {
        self.player_controlled = player_controlled;
        self
    }

    #[must_use]
    pub fn with_learned(mut self, learned: Vec<CommandKind>) -> Self {
        self.learned = learned;
        self
    }

    #[must_use]
    pub fn with_phases(mut self, phases: u8) -> Self {
        self.phases = phases;
        self
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }

    /// Down and not about to come back through a phase transformation.
    pub fn is_defeated(&self) -> bool {
        !self.is_alive() && self.pending_kind() != Some(CommandKind::Transform)
    }

    #[inline]
    pub fn agility(&self) -> f32 {
        self.stats.total(StatKind::Agility)
    }

    pub fn has_learned(&self, kind: CommandKind) -> bool {
        self.learned.contains(&kind)
    }

    pub fn pending(&self) -> Option<&Command> {
        self.pending.as_ref()
    }

    #[inline]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_kind(&self) -> Option<CommandKind> {
        self.pending.as_ref().map(Command::kind)
    }

    /// Installs a new pending command, returning the one it replaced.
    pub(crate) fn replace_pending(&mut self, command: Command) -> Option<Command> {
        self.pending.replace(command)
    }

    pub(crate) fn take_pending(&mut self) -> Option<Command> {
        self.pending.take()
    }

    pub fn buffs(&self) -> &BuffSet {
        &self.buffs
    }

    pub(crate) fn buffs_mut(&mut self) -> &mut BuffSet {
        &mut self.buffs
    }

    pub fn has_buff(&self, kind: BuffKind) -> bool {
        self.buffs.get(kind).is_some()
    }
}

impl fmt::Debug for Combatant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Combatant")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("life", &self.stats.life())
            .field("mana", &self.stats.mana())
            .field("player_controlled", &self.player_controlled)
            .field("phases", &self.phases)
            .field("pending", &self.pending_kind())
            .field("buffs", &self.buffs)
            .finish()
    }
}

/// Data-driven description of a combatant, loaded from content files.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantTemplate {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub player_controlled: bool,
    /// Base stat values; unlisted stats start at zero.
    pub stats: Vec<(StatKind, f32)>,
    #[cfg_attr(feature = "serde", serde(default = "default_learned"))]
    pub learned: Vec<CommandKind>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub phases: u8,
}

#[cfg(feature = "serde")]
fn default_learned() -> Vec<CommandKind> {
    vec![CommandKind::Attack, CommandKind::Defend]
}

impl CombatantTemplate {
    pub fn new(name: impl Into<String>, stats: Vec<(StatKind, f32)>) -> Self {
        Self {
            name: name.into(),
            player_controlled: false,
            stats,
            learned: vec![CommandKind::Attack, CommandKind::Defend],
            phases: 0,
        }
    }
}
