//! Event routing and termination detection.

use tracing::info;

use crate::event::{CombatEvent, EventKind, Subscriber};
use crate::state::{Combatant, Outcome};

use super::CombatEngine;

impl<'a> CombatEngine<'a> {
    /// Dispatches one event synchronously.
    ///
    /// `populate` fills the pooled record before delivery. Listeners run in
    /// registration order against a snapshot of the registrations taken
    /// when the dispatch begins, and buff listeners may rewrite the event.
    /// Returns the event as the last listener left it.
    pub fn dispatch<F>(&mut self, kind: EventKind, populate: F) -> CombatEvent
    where
        F: FnOnce(&mut CombatEvent),
    {
        let mut event = self.state.events.pool_mut().obtain(kind);
        event.round = self.state.turn.round;
        populate(&mut event);

        for subscriber in self.state.events.listeners(kind) {
            match subscriber {
                Subscriber::Buff { holder, kind: buff_kind } => {
                    let buff = self
                        .state
                        .roster
                        .get_mut(holder)
                        .and_then(|c| c.buffs_mut().get_mut(buff_kind));
                    if let Some(buff) = buff {
                        buff.behavior_mut().on_event(holder, &mut event);
                    }
                }
                Subscriber::Termination => self.check_termination(),
                Subscriber::Observer(id) => self.state.events.notify(id, &event),
            }
        }

        self.state.events.pool_mut().release(event);
        event
    }

    /// Ends the encounter once one side is entirely down.
    ///
    /// Opponents are checked first, so a mutual wipe is a victory.
    pub(crate) fn check_termination(&mut self) {
        if self.state.turn.is_over() {
            return;
        }

        let roster = &self.state.roster;
        let outcome = if roster.opponents().all(Combatant::is_defeated) {
            Outcome::Victory
        } else if roster.party().all(Combatant::is_defeated) {
            Outcome::Defeat
        } else {
            return;
        };

        info!(
            target: "combat::resolver",
            outcome = %outcome,
            round = self.state.turn.round,
            "encounter finished"
        );
        self.state.turn.outcome = Some(outcome);
        let kind = match outcome {
            Outcome::Victory => EventKind::Victory,
            Outcome::Defeat => EventKind::Defeat,
        };
        self.dispatch(kind, |_| {});
        self.state.turn.reset();
    }
}
