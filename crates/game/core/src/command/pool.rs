//! Kind-keyed command pool.

use std::collections::HashMap;

use tracing::trace;

use crate::config::CombatConfig;
use crate::engine::CombatError;
use crate::state::EntityId;

use super::kinds::{
    AttackCommand, DeathCommand, DefendCommand, FireCommand, HealCommand, ProtectCommand,
    TransformCommand, UseItemCommand,
};
use super::{Command, CommandBehavior, CommandKind};

/// Constructs a fresh behavior for one command kind.
pub type CommandFactory = Box<dyn Fn() -> Box<dyn CommandBehavior> + Send + Sync>;

/// Amortizes command allocation, keyed by [`CommandKind`].
///
/// Factories are registered up front; requesting a kind without a factory
/// is a configuration error. Released commands are reset and reused in
/// unspecified order.
#[derive(Default)]
pub struct CommandPool {
    factories: HashMap<CommandKind, CommandFactory>,
    free: HashMap<CommandKind, Vec<Command>>,
    constructed: usize,
}

impl CommandPool {
    /// Creates a pool with no registered factories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pool with a factory for every built-in kind.
    pub fn with_defaults(config: &CombatConfig) -> Self {
        let mut pool = Self::new();

        let impact = config.attack_impact_delay;
        pool.register(CommandKind::Attack, move || Box::new(AttackCommand::new(impact)));

        let defend = config.defend_duration;
        pool.register(CommandKind::Defend, move || Box::new(DefendCommand::new(defend)));

        let (life, mana) = (config.heal_life, config.heal_mana);
        pool.register(CommandKind::Heal, move || Box::new(HealCommand::new(life, mana)));

        pool.register(CommandKind::Protect, || Box::new(ProtectCommand));

        let bonus = config.fire_bonus;
        pool.register(CommandKind::Fire, move || Box::new(FireCommand::new(bonus)));

        pool.register(CommandKind::UseItem, || Box::new(UseItemCommand::default()));

        let fade = config.death_duration;
        pool.register(CommandKind::Death, move || Box::new(DeathCommand::new(fade)));

        let (duration, fraction) = (config.transform_duration, config.transform_life_fraction);
        pool.register(CommandKind::Transform, move || {
            Box::new(TransformCommand::new(duration, fraction))
        });

        pool
    }

    /// Registers (or replaces) the factory for `kind`.
    pub fn register<F>(&mut self, kind: CommandKind, factory: F)
    where
        F: Fn() -> Box<dyn CommandBehavior> + Send + Sync + 'static,
    {
        self.factories.insert(kind, Box::new(factory));
    }

    pub fn is_registered(&self, kind: CommandKind) -> bool {
        self.factories.contains_key(&kind)
    }

    /// Returns a reset command of `kind` bound to `source`.
    pub fn obtain(&mut self, kind: CommandKind, source: EntityId) -> Result<Command, CombatError> {
        if let Some(mut command) = self.free.get_mut(&kind).and_then(Vec::pop) {
            command.rebind(source);
            trace!(target: "combat::pool", kind = ?kind, source = %source, "reused command");
            return Ok(command);
        }

        let factory = self
            .factories
            .get(&kind)
            .ok_or(CombatError::UnregisteredCommand(kind))?;
        self.constructed += 1;
        Ok(Command::new(kind, source, factory()))
    }

    /// Resets a command and returns it to its kind's free list.
    pub fn release(&mut self, mut command: Command) {
        command.reset();
        self.free.entry(command.kind()).or_default().push(command);
    }

    /// Number of pooled (idle) commands of `kind`.
    pub fn idle(&self, kind: CommandKind) -> usize {
        self.free.get(&kind).map_or(0, Vec::len)
    }

    /// Total number of commands ever constructed by this pool.
    pub fn constructed(&self) -> usize {
        self.constructed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unregistered_kind_is_a_configuration_error() {
        let mut pool = CommandPool::new();
        let result = pool.obtain(CommandKind::Attack, EntityId(0));
        assert!(matches!(
            result,
            Err(CombatError::UnregisteredCommand(CommandKind::Attack))
        ));
    }

    #[test]
    fn released_commands_are_reset_and_reused() {
        let mut pool = CommandPool::with_defaults(&CombatConfig::default());
        let command = pool
            .obtain(CommandKind::Attack, EntityId(1))
            .unwrap()
            .with_targets(vec![EntityId(2)]);
        pool.release(command);
        assert_eq!(pool.idle(CommandKind::Attack), 1);

        let reused = pool.obtain(CommandKind::Attack, EntityId(3)).unwrap();
        assert_eq!(pool.constructed(), 1);
        assert_eq!(reused.source(), EntityId(3));
        assert!(reused.targets().is_empty());
        assert!(!reused.order().is_started());
    }

    #[test]
    fn pools_are_kept_per_kind() {
        let mut pool = CommandPool::with_defaults(&CombatConfig::default());
        let defend = pool.obtain(CommandKind::Defend, EntityId(0)).unwrap();
        pool.release(defend);

        let attack = pool.obtain(CommandKind::Attack, EntityId(0)).unwrap();
        assert_eq!(attack.kind(), CommandKind::Attack);
        assert_eq!(pool.idle(CommandKind::Defend), 1);
        assert_eq!(pool.constructed(), 2);
    }

    #[test]
    fn mana_cost_comes_from_the_profile() {
        let mut pool = CommandPool::with_defaults(&CombatConfig::default());
        let fire = pool.obtain(CommandKind::Fire, EntityId(0)).unwrap();
        assert_eq!(fire.mana_cost(), CommandKind::Fire.mana_cost());
    }
}
