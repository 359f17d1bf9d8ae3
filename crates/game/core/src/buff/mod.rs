//! Event-reactive modifiers attached to combatants.
//!
//! A [`Buff`] is created from the [`BuffPool`] when a command attaches it,
//! subscribed to the event kinds its behavior lists, and torn down once
//! [`BuffBehavior::is_finished`] holds. A combatant carries at most one buff
//! per [`BuffKind`]; attaching a kind that is already present resets the
//! existing instance.
mod pool;
mod protect;

pub use pool::{BuffFactory, BuffPool};
pub use protect::ProtectBuff;

use core::fmt;

use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::env::AudioSink;
use crate::event::{CombatEvent, EventKind};
use crate::state::EntityId;

/// Types of buffs.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuffKind {
    /// Halves incoming physical damage for a number of hits.
    Protect,
}

/// Behavior of one buff kind.
pub trait BuffBehavior: Send {
    /// Event kinds the buff reacts to while attached.
    fn subscriptions(&self) -> &'static [EventKind];

    fn on_add(&mut self, _holder: EntityId, _audio: &mut dyn AudioSink) {}

    fn on_remove(&mut self, _holder: EntityId, _audio: &mut dyn AudioSink) {}

    /// Reacts to a subscribed event. The event may be rewritten in place;
    /// only events addressed to `holder` should be touched.
    fn on_event(&mut self, holder: EntityId, event: &mut CombatEvent);

    fn is_finished(&self) -> bool;

    /// Restores the initial countdown.
    fn reset(&mut self);

    /// Remaining uses or ticks, for display and tests.
    fn counter(&self) -> u32 {
        0
    }
}

/// A buff instance bound to its holder.
pub struct Buff {
    kind: BuffKind,
    target: EntityId,
    behavior: Box<dyn BuffBehavior>,
}

impl Buff {
    pub(crate) fn new(kind: BuffKind, target: EntityId, behavior: Box<dyn BuffBehavior>) -> Self {
        Self {
            kind,
            target,
            behavior,
        }
    }

    #[inline]
    pub fn kind(&self) -> BuffKind {
        self.kind
    }

    #[inline]
    pub fn target(&self) -> EntityId {
        self.target
    }

    pub fn counter(&self) -> u32 {
        self.behavior.counter()
    }

    pub fn is_finished(&self) -> bool {
        self.behavior.is_finished()
    }

    pub fn subscriptions(&self) -> &'static [EventKind] {
        self.behavior.subscriptions()
    }

    pub(crate) fn behavior_mut(&mut self) -> &mut dyn BuffBehavior {
        self.behavior.as_mut()
    }

    pub(crate) fn rebind(&mut self, target: EntityId) {
        self.target = target;
    }

    pub(crate) fn reset(&mut self) {
        self.behavior.reset();
    }
}

impl fmt::Debug for Buff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buff")
            .field("kind", &self.kind)
            .field("target", &self.target)
            .field("counter", &self.counter())
            .finish()
    }
}

/// Active buffs of one combatant, at most one per kind.
#[derive(Default)]
pub struct BuffSet {
    buffs: ArrayVec<Buff, { CombatConfig::MAX_BUFFS }>,
}

impl BuffSet {
    pub fn new() -> Self {
        Self {
            buffs: ArrayVec::new(),
        }
    }

    pub fn get(&self, kind: BuffKind) -> Option<&Buff> {
        self.buffs.iter().find(|b| b.kind == kind)
    }

    pub(crate) fn get_mut(&mut self, kind: BuffKind) -> Option<&mut Buff> {
        self.buffs.iter_mut().find(|b| b.kind == kind)
    }

    /// Adds a buff of a kind not yet present. Hands the buff back when the
    /// set is full or already holds that kind.
    pub(crate) fn insert(&mut self, buff: Buff) -> Result<(), Buff> {
        if self.get(buff.kind).is_some() {
            return Err(buff);
        }
        self.buffs.try_push(buff).map_err(|full| full.element())
    }

    pub(crate) fn remove(&mut self, kind: BuffKind) -> Option<Buff> {
        let index = self.buffs.iter().position(|b| b.kind == kind)?;
        Some(self.buffs.remove(index))
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = Buff> + '_ {
        self.buffs.drain(..)
    }

    /// Kinds whose behavior reports finished.
    pub fn finished(&self) -> Vec<BuffKind> {
        self.buffs
            .iter()
            .filter(|b| b.is_finished())
            .map(|b| b.kind)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Buff> {
        self.buffs.iter()
    }

    pub fn len(&self) -> usize {
        self.buffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffs.is_empty()
    }
}

impl fmt::Debug for BuffSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.buffs.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn protect(target: EntityId) -> Buff {
        Buff::new(BuffKind::Protect, target, Box::new(ProtectBuff::new(3, 0.5)))
    }

    #[test]
    fn set_holds_one_buff_per_kind() {
        let mut set = BuffSet::new();
        assert!(set.insert(protect(EntityId(0))).is_ok());
        assert!(set.insert(protect(EntityId(0))).is_err());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn remove_returns_the_instance() {
        let mut set = BuffSet::new();
        set.insert(protect(EntityId(4))).ok();
        let removed = set.remove(BuffKind::Protect).map(|b| b.target());
        assert_eq!(removed, Some(EntityId(4)));
        assert!(set.is_empty());
    }
}
