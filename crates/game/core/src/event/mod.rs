//! Synchronous combat events.
//!
//! Events are small `Copy` records dispatched by the engine to every listener
//! registered for their exact [`EventKind`], in registration order. A single
//! record shape covers every kind; fields irrelevant to a kind keep their
//! default values.
//!
//! Listeners come in three flavors (see [`Subscriber`]): buffs attached to a
//! combatant, the encounter's termination check, and external observer
//! closures registered by the session (UI, audio, loot).
mod dispatcher;
mod pool;

pub use dispatcher::{EventDispatcher, Observer, ObserverId, Subscriber};
pub use pool::EventPool;

use crate::buff::BuffKind;
use crate::command::CommandKind;
use crate::state::{EntityId, ItemKind};

/// Kinds of events dispatched during an encounter.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// Execution order fixed for a new round.
    #[default]
    RoundStarted,
    /// AI orders are in; the resolver waits for the party.
    PlayersTurn,
    CommandStarted,
    CommandFinished,
    /// Raw damage about to be applied. Listeners may rescale it.
    PreDamage,
    /// Mitigated damage that was applied.
    PostDamage,
    Heal,
    /// A combatant's life crossed to zero and it received a death order.
    Death,
    /// A boss's life crossed to zero and it received a transform order.
    PhaseChange,
    BuffAdded,
    BuffRemoved,
    /// A combatant left the encounter.
    Removed,
    ItemConsumed,
    Victory,
    Defeat,
}

/// One dispatched event.
///
/// Damage events carry amounts in `physical`/`magic`; heal events in
/// `life`/`mana`. `source` is `None` for engine-originated events.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatEvent {
    pub kind: EventKind,
    pub round: u32,
    pub source: Option<EntityId>,
    pub target: Option<EntityId>,
    pub command: Option<CommandKind>,
    pub buff: Option<BuffKind>,
    pub item: Option<ItemKind>,
    pub physical: f32,
    pub magic: f32,
    pub life: f32,
    pub mana: f32,
}

impl CombatEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Clears every field and sets a new kind.
    pub fn reset(&mut self, kind: EventKind) {
        *self = Self::new(kind);
    }

    /// True if the event is about `entity`.
    pub fn targets(&self, entity: EntityId) -> bool {
        self.target == Some(entity)
    }
}
