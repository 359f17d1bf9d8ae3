//! Tick-driven combat resolution.
//!
//! The [`CombatEngine`] borrows a [`CombatState`] together with the external
//! collaborators for the duration of one call. Every mutation of an
//! encounter flows through it: the per-tick resolver ([`CombatEngine::tick`]),
//! player order injection ([`CombatEngine::submit_order`]) and the effect
//! primitives commands use (damage, heal, buffs, removal).
//!
//! # Round state machine
//!
//! ```text
//!            ┌────────────┐ begin_round ┌────────────────┐      ┌─────────────────────┐
//!  start ──► │ Undefined  │ ──────────► │ UpdateAiOrders │ ───► │ WaitForPlayerOrder  │
//!            └────────────┘             └────────────────┘      └─────────────────────┘
//!                  ▲                            ▲                          │ every live
//!   victory/defeat │                            │ round done               ▼ combatant ordered
//!                  │                     ┌───────────────┐                 │
//!                  └──────────────────── │ ExecuteOrders │ ◄───────────────┘
//!                                        └───────────────┘
//! ```
//!
//! Within `ExecuteOrders` exactly one command advances per tick, in the
//! agility order fixed when the round began.
mod errors;
mod events;
mod orders;
mod resolve;
mod turns;

pub use errors::{CombatError, OrderError};
pub use resolve::Damage;

use tracing::{debug, warn};

use crate::command::Command;
use crate::config::CombatConfig;
use crate::env::{AnimationKind, CombatEnv, SoundId};
use crate::event::EventKind;
use crate::state::{CombatState, EntityId, Roster, StatKind, TurnState};

/// Combat resolver bound to one encounter for the duration of a call.
pub struct CombatEngine<'a> {
    state: &'a mut CombatState,
    env: CombatEnv<'a>,
}

impl<'a> CombatEngine<'a> {
    pub fn new(state: &'a mut CombatState, env: CombatEnv<'a>) -> Self {
        Self { state, env }
    }

    pub fn state(&self) -> &CombatState {
        &*self.state
    }

    pub fn roster(&self) -> &Roster {
        &self.state.roster
    }

    /// Stat mutation sink. Resource writes clamp to `[0, max]`.
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.state.roster
    }

    pub fn turn(&self) -> &TurnState {
        &self.state.turn
    }

    pub fn config(&self) -> &CombatConfig {
        self.state.config()
    }

    pub fn play_animation(&mut self, entity: EntityId, kind: AnimationKind) {
        self.env.animation.play(entity, kind);
    }

    pub fn animation_finished(&self, entity: EntityId) -> bool {
        self.env.animation.is_finished(entity)
    }

    pub fn play_sound(&mut self, sound: SoundId) {
        self.env.audio.play(sound);
    }

    /// Steps one command by `delta` seconds.
    ///
    /// The first call starts the command. Returns true exactly once, on the
    /// call during which the command completes; its mana cost is deducted
    /// at that moment. Advancing a finished command is a no-op.
    pub fn advance(&mut self, command: &mut Command, delta: f32) -> Result<bool, CombatError> {
        let (order, behavior) = command.parts_mut();
        if order.is_finished() {
            return Ok(false);
        }

        if !order.is_started() {
            Command::start_clock(order);
            self.dispatch(EventKind::CommandStarted, |event| {
                event.source = Some(order.source);
                event.target = order.targets.first().copied();
                event.command = Some(order.kind);
                event.item = order.item;
            });
            behavior.start(order, self)?;
        }

        Command::advance_clock(order, delta);
        behavior.per_update(order, self)?;

        if !behavior.is_finished(order, self) {
            return Ok(false);
        }

        behavior.on_finish(order, self)?;
        self.deduct_mana(order.source, order.mana_cost);
        Command::mark_finished(order);

        debug!(
            target: "combat::resolver",
            source = %order.source,
            kind = %order.kind,
            elapsed = order.elapsed(),
            "command finished"
        );
        self.dispatch(EventKind::CommandFinished, |event| {
            event.source = Some(order.source);
            event.target = order.targets.first().copied();
            event.command = Some(order.kind);
        });
        Ok(true)
    }

    /// Subtracts a finished command's cost from its source.
    ///
    /// Orders are expected to be affordable when issued. A cost exceeding
    /// the available mana is reported and the pool is clamped at zero.
    fn deduct_mana(&mut self, source: EntityId, cost: u32) {
        if cost == 0 {
            return;
        }
        let Some(combatant) = self.state.roster.get_mut(source) else {
            return;
        };
        let mana = combatant.stats.mana();
        let cost = cost as f32;
        if mana < cost {
            warn!(
                target: "combat::resolver",
                source = %source,
                mana,
                cost,
                "command cost exceeds available mana"
            );
        }
        combatant.stats.set(StatKind::Mana, mana - cost);
    }
}
