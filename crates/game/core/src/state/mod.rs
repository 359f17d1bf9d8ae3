//! Mutable encounter state.
//!
//! [`CombatState`] bundles everything the resolver mutates during a tick:
//! the roster, the turn bookkeeping, the event dispatcher and the command and
//! buff pools. It is the only state handed to [`crate::engine::CombatEngine`].
mod combatant;
mod common;
mod item;
mod roster;
mod stats;
mod turn;

pub use combatant::{Combatant, CombatantTemplate};
pub use common::EntityId;
pub use item::{ItemKind, ItemUse};
pub use roster::Roster;
pub use stats::{StatKind, StatSheet, Stats};
pub use turn::{InFlight, Outcome, TurnPhase, TurnState};

use crate::buff::BuffPool;
use crate::command::{Command, CommandPool};
use crate::config::CombatConfig;
use crate::event::{EventDispatcher, EventKind, Subscriber};

/// Complete state of one encounter.
pub struct CombatState {
    pub roster: Roster,
    pub turn: TurnState,
    pub(crate) events: EventDispatcher,
    pub(crate) commands: CommandPool,
    pub(crate) buffs: BuffPool,
    /// Player orders submitted while a round was executing.
    pub(crate) deferred: Vec<Command>,
    pub(crate) consumptions: Vec<ItemUse>,
    config: CombatConfig,
}

impl CombatState {
    /// Creates an empty encounter with the default command and buff factories.
    pub fn new(config: CombatConfig) -> Self {
        let commands = CommandPool::with_defaults(&config);
        let buffs = BuffPool::with_defaults(&config);
        Self::with_pools(config, commands, buffs)
    }

    /// Creates an empty encounter with caller-provided factory registrations.
    pub fn with_pools(config: CombatConfig, commands: CommandPool, buffs: BuffPool) -> Self {
        let mut events = EventDispatcher::new();
        events.subscribe(EventKind::Death, Subscriber::Termination);

        Self {
            roster: Roster::new(),
            turn: TurnState::default(),
            events,
            commands,
            buffs,
            deferred: Vec::new(),
            consumptions: Vec::new(),
            config,
        }
    }

    /// Builds an encounter from a roster prepared by the session.
    #[must_use]
    pub fn with_roster(mut self, roster: Roster) -> Self {
        self.roster = roster;
        self
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn events(&self) -> &EventDispatcher {
        &self.events
    }

    /// Mutable access for registering observers.
    pub fn events_mut(&mut self) -> &mut EventDispatcher {
        &mut self.events
    }

    pub fn commands(&self) -> &CommandPool {
        &self.commands
    }

    /// Mutable access for registering factories or stepping commands directly.
    pub fn commands_mut(&mut self) -> &mut CommandPool {
        &mut self.commands
    }

    pub fn buffs(&self) -> &BuffPool {
        &self.buffs
    }

    pub fn buffs_mut(&mut self) -> &mut BuffPool {
        &mut self.buffs
    }

    /// Player orders waiting for the next round.
    pub fn deferred_orders(&self) -> impl Iterator<Item = &Command> {
        self.deferred.iter()
    }

    /// Drains item consumptions queued by UseItem commands.
    pub fn take_consumptions(&mut self) -> Vec<ItemUse> {
        std::mem::take(&mut self.consumptions)
    }
}

impl core::fmt::Debug for CombatState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CombatState")
            .field("roster", &self.roster)
            .field("turn", &self.turn)
            .field("deferred", &self.deferred.len())
            .field("consumptions", &self.consumptions)
            .finish_non_exhaustive()
    }
}
