//! Poolable combat commands.
//!
//! A [`Command`] is one discrete action a combatant performs over one or
//! more ticks. It pairs the [`Order`] data (who, against whom, how long it
//! has been running) with a per-kind [`CommandBehavior`] that supplies the
//! start / per-update / completion / finish hooks.
//!
//! # Lifecycle
//!
//! ```text
//! CommandPool::obtain ──► pending slot ──► CombatEngine::advance (ticks) ──► CommandPool::release
//!                                              start  (once)
//!                                              per_update (every tick)
//!                                              is_finished ─► on_finish (once) ─► mana deduction
//! ```
mod behavior;
mod kind;
pub mod kinds;
mod pool;

pub use behavior::CommandBehavior;
pub use kind::{AiCategory, CommandKind, CommandProfile, TargetPolicy};
pub use pool::{CommandFactory, CommandPool};

use core::fmt;

use crate::state::{EntityId, ItemKind};

/// Data half of a command: the order as issued plus its execution clock.
#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    pub kind: CommandKind,
    pub source: EntityId,
    pub targets: Vec<EntityId>,
    /// Item consumed by [`CommandKind::UseItem`].
    pub item: Option<ItemKind>,
    pub mana_cost: u32,
    elapsed: Option<f32>,
    finished: bool,
}

impl Order {
    fn new(kind: CommandKind, source: EntityId) -> Self {
        Self {
            kind,
            source,
            targets: Vec::new(),
            item: None,
            mana_cost: kind.mana_cost(),
            elapsed: None,
            finished: false,
        }
    }

    /// Seconds since execution began, `0.0` before the first tick.
    pub fn elapsed(&self) -> f32 {
        self.elapsed.unwrap_or(0.0)
    }

    pub fn is_started(&self) -> bool {
        self.elapsed.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// A poolable unit of combat work bound to one source combatant.
pub struct Command {
    order: Order,
    behavior: Box<dyn CommandBehavior>,
}

impl Command {
    pub(crate) fn new(kind: CommandKind, source: EntityId, behavior: Box<dyn CommandBehavior>) -> Self {
        Self {
            order: Order::new(kind, source),
            behavior,
        }
    }

    #[inline]
    pub fn kind(&self) -> CommandKind {
        self.order.kind
    }

    #[inline]
    pub fn source(&self) -> EntityId {
        self.order.source
    }

    pub fn targets(&self) -> &[EntityId] {
        &self.order.targets
    }

    pub fn item(&self) -> Option<ItemKind> {
        self.order.item
    }

    pub fn mana_cost(&self) -> u32 {
        self.order.mana_cost
    }

    pub fn ai_category(&self) -> AiCategory {
        self.order.kind.ai_category()
    }

    pub fn elapsed(&self) -> f32 {
        self.order.elapsed()
    }

    pub fn is_finished(&self) -> bool {
        self.order.finished
    }

    pub fn order(&self) -> &Order {
        &self.order
    }

    /// Sets the targets (builder pattern).
    #[must_use]
    pub fn with_targets(mut self, targets: Vec<EntityId>) -> Self {
        self.order.targets = targets;
        self
    }

    /// Sets the consumed item (builder pattern).
    #[must_use]
    pub fn with_item(mut self, item: Option<ItemKind>) -> Self {
        self.order.item = item;
        self
    }

    pub(crate) fn rebind(&mut self, source: EntityId) {
        self.order.source = source;
    }

    /// Clears per-use state so the instance can be handed out again.
    pub(crate) fn reset(&mut self) {
        self.order.targets.clear();
        self.order.item = None;
        self.order.mana_cost = self.order.kind.mana_cost();
        self.order.elapsed = None;
        self.order.finished = false;
        self.behavior.reset();
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut Order, &mut dyn CommandBehavior) {
        (&mut self.order, self.behavior.as_mut())
    }

    pub(crate) fn start_clock(order: &mut Order) {
        order.elapsed = Some(0.0);
    }

    pub(crate) fn advance_clock(order: &mut Order, delta: f32) {
        order.elapsed = Some(order.elapsed() + delta);
    }

    pub(crate) fn mark_finished(order: &mut Order) {
        order.finished = true;
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command").field("order", &self.order).finish_non_exhaustive()
    }
}
