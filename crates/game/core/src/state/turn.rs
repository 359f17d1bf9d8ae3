use crate::command::CommandKind;

use super::EntityId;

/// Phases of the combat resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnPhase {
    /// Initial phase, and the phase after the encounter terminates.
    #[default]
    Undefined,
    UpdateAiOrders,
    WaitForPlayerOrder,
    ExecuteOrders,
}

/// How an encounter ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Victory,
    Defeat,
}

/// Snapshot of the order currently being executed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InFlight {
    pub source: EntityId,
    pub kind: CommandKind,
    pub targets: Vec<EntityId>,
}

/// Resolver bookkeeping carried between ticks.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    pub phase: TurnPhase,
    /// Monotonic round counter, only used to annotate events.
    pub round: u32,
    /// Agility-sorted execution order, fixed for the duration of a round.
    pub order: Vec<EntityId>,
    /// Every live combatant had an order when execution began.
    pub execute_orders: bool,
    /// The last combatant in `order` completed its command.
    pub all_orders_executed: bool,
    pub in_flight: Option<InFlight>,
    pub outcome: Option<Outcome>,
}

impl TurnState {
    /// Drops every per-round flag and returns to [`TurnPhase::Undefined`].
    pub fn reset(&mut self) {
        self.phase = TurnPhase::Undefined;
        self.execute_orders = false;
        self.all_orders_executed = false;
        self.in_flight = None;
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }
}
