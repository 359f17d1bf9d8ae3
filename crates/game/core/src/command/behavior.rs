//! Per-kind command hooks.

use crate::engine::{CombatEngine, CombatError};

use super::Order;

/// Behavior of one command kind.
///
/// The engine drives every hook; implementations never call each other.
/// Hooks receive the [`Order`] they belong to and the engine that is
/// executing it, through which they can damage, heal, attach buffs, play
/// animations or remove combatants.
///
/// Implementations hold only per-use scratch state (e.g. "hit already
/// landed"), which [`CommandBehavior::reset`] must clear.
pub trait CommandBehavior: Send {
    /// Invoked once, the instant execution begins.
    fn start(&mut self, _order: &Order, _engine: &mut CombatEngine<'_>) -> Result<(), CombatError> {
        Ok(())
    }

    /// Invoked every tick the command is active, after the clock advanced.
    fn per_update(
        &mut self,
        _order: &Order,
        _engine: &mut CombatEngine<'_>,
    ) -> Result<(), CombatError> {
        Ok(())
    }

    /// Completion predicate over the elapsed time and internal flags.
    fn is_finished(&self, order: &Order, engine: &CombatEngine<'_>) -> bool;

    /// Invoked once, when [`CommandBehavior::is_finished`] first returns true.
    fn on_finish(
        &mut self,
        _order: &Order,
        _engine: &mut CombatEngine<'_>,
    ) -> Result<(), CombatError> {
        Ok(())
    }

    /// Clears per-use state before the instance returns to its pool.
    fn reset(&mut self) {}
}
