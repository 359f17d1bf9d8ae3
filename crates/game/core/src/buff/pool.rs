//! Kind-keyed buff pool.

use std::collections::HashMap;

use tracing::trace;

use crate::config::CombatConfig;
use crate::engine::CombatError;
use crate::state::EntityId;

use super::{Buff, BuffBehavior, BuffKind, ProtectBuff};

/// Constructs a fresh behavior for one buff kind.
pub type BuffFactory = Box<dyn Fn() -> Box<dyn BuffBehavior> + Send + Sync>;

/// Amortizes buff allocation, keyed by [`BuffKind`].
///
/// Factories capture the encounter configuration when they are registered,
/// so `obtain` only needs the kind and the holder.
#[derive(Default)]
pub struct BuffPool {
    factories: HashMap<BuffKind, BuffFactory>,
    free: HashMap<BuffKind, Vec<Buff>>,
    constructed: usize,
}

impl BuffPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a pool with a factory for every built-in kind.
    pub fn with_defaults(config: &CombatConfig) -> Self {
        let mut pool = Self::new();
        let (charges, multiplier) = (config.protect_charges, config.protect_physical_multiplier);
        pool.register(BuffKind::Protect, move || {
            Box::new(ProtectBuff::new(charges, multiplier))
        });
        pool
    }

    pub fn register<F>(&mut self, kind: BuffKind, factory: F)
    where
        F: Fn() -> Box<dyn BuffBehavior> + Send + Sync + 'static,
    {
        self.factories.insert(kind, Box::new(factory));
    }

    pub fn is_registered(&self, kind: BuffKind) -> bool {
        self.factories.contains_key(&kind)
    }

    /// Returns a reset buff of `kind` bound to `target`.
    pub fn obtain(&mut self, kind: BuffKind, target: EntityId) -> Result<Buff, CombatError> {
        if let Some(mut buff) = self.free.get_mut(&kind).and_then(Vec::pop) {
            buff.rebind(target);
            trace!(target: "combat::pool", kind = %kind, target = %target, "reused buff");
            return Ok(buff);
        }

        let factory = self
            .factories
            .get(&kind)
            .ok_or(CombatError::UnregisteredBuff(kind))?;
        self.constructed += 1;
        Ok(Buff::new(kind, target, factory()))
    }

    pub fn release(&mut self, mut buff: Buff) {
        buff.reset();
        self.free.entry(buff.kind()).or_default().push(buff);
    }

    pub fn idle(&self, kind: BuffKind) -> usize {
        self.free.get(&kind).map_or(0, Vec::len)
    }

    pub fn constructed(&self) -> usize {
        self.constructed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unregistered_kind_is_a_configuration_error() {
        let mut pool = BuffPool::new();
        assert!(matches!(
            pool.obtain(BuffKind::Protect, EntityId(0)),
            Err(CombatError::UnregisteredBuff(BuffKind::Protect))
        ));
    }

    #[test]
    fn factories_use_the_configured_charges() {
        let config = CombatConfig {
            protect_charges: 5,
            ..CombatConfig::default()
        };
        let mut pool = BuffPool::with_defaults(&config);
        let buff = pool.obtain(BuffKind::Protect, EntityId(2)).unwrap();
        assert_eq!(buff.counter(), 5);
        assert_eq!(buff.target(), EntityId(2));
    }

    #[test]
    fn released_buffs_come_back_reset() {
        let mut pool = BuffPool::with_defaults(&CombatConfig::default());
        let mut buff = pool.obtain(BuffKind::Protect, EntityId(0)).unwrap();
        let holder = buff.target();
        let mut hit = crate::event::CombatEvent {
            target: Some(holder),
            physical: 2.0,
            ..crate::event::CombatEvent::new(crate::event::EventKind::PreDamage)
        };
        buff.behavior_mut().on_event(holder, &mut hit);
        assert_eq!(buff.counter(), 2);

        pool.release(buff);
        let reused = pool.obtain(BuffKind::Protect, EntityId(7)).unwrap();
        assert_eq!(reused.counter(), 3);
        assert_eq!(reused.target(), EntityId(7));
        assert_eq!(pool.constructed(), 1);
    }
}
