//! Per-tick round scheduling.

use tracing::{debug, warn};

use crate::env::Decision;
use crate::error::CombatFault;
use crate::event::EventKind;
use crate::state::{Combatant, EntityId, InFlight, TurnPhase};

use super::{CombatEngine, CombatError};

/// Round scheduling methods for CombatEngine.
impl<'a> CombatEngine<'a> {
    /// Advances the encounter by `delta` seconds.
    ///
    /// While every live combatant holds an order, exactly one command is
    /// stepped. Otherwise a finished (or not yet started) round gives way to
    /// a new one. Finished buffs are torn down at the end of every tick.
    /// Ticks after victory or defeat do nothing.
    pub fn tick(&mut self, delta: f32) -> Result<(), CombatError> {
        if self.state.turn.is_over() {
            return Ok(());
        }

        self.check_all_orders();

        if self.state.turn.execute_orders {
            self.state.turn.phase = TurnPhase::ExecuteOrders;
            self.execute_single_order(delta)?;
        } else if matches!(
            self.state.turn.phase,
            TurnPhase::ExecuteOrders | TurnPhase::Undefined
        ) {
            self.begin_round()?;
        }

        self.expire_buffs();
        Ok(())
    }

    /// Updates `execute_orders`.
    ///
    /// A round in progress keeps executing. Once its last order completed,
    /// any order still pending (a death or transform order handed out
    /// mid-round) reopens execution within the same round.
    fn check_all_orders(&mut self) {
        let turn = &mut self.state.turn;
        if turn.execute_orders && !turn.all_orders_executed {
            return;
        }

        let roster = &self.state.roster;
        let any_pending = roster.iter().any(Combatant::has_pending);
        if turn.execute_orders && any_pending {
            turn.all_orders_executed = false;
            return;
        }

        turn.execute_orders =
            any_pending && roster.iter().all(|c| c.has_pending() || !c.is_alive());
    }

    /// Steps the first pending order in agility order.
    fn execute_single_order(&mut self, delta: f32) -> Result<(), CombatError> {
        let order = self.state.turn.order.clone();
        let last = order.last().copied();
        let mut blocked = false;

        for id in order {
            let Some(kind) = self.state.roster.get(id).and_then(Combatant::pending_kind) else {
                continue;
            };

            let bound = self.state.turn.in_flight.as_ref().map(|f| f.source);
            match bound {
                Some(source) if source != id => {
                    blocked = true;
                    continue;
                }
                Some(_) => {}
                None => {
                    let targets = self
                        .state
                        .roster
                        .get(id)
                        .and_then(Combatant::pending)
                        .map(|c| c.targets().to_vec())
                        .unwrap_or_default();
                    debug!(target: "combat::resolver", source = %id, kind = %kind, "order in flight");
                    self.state.turn.in_flight = Some(InFlight {
                        source: id,
                        kind,
                        targets,
                    });
                }
            }

            if self.step_pending(id, delta)? && !self.state.turn.is_over() {
                self.state.turn.all_orders_executed = Some(id) == last;
            }
            return Ok(());
        }

        if blocked {
            // The in-flight source lost its order without completing it.
            self.state.turn.in_flight = None;
        } else {
            self.state.turn.all_orders_executed = true;
        }
        Ok(())
    }

    /// Advances `id`'s pending command and files it away afterwards.
    ///
    /// Returns true if the command completed or its source left the
    /// encounter. A command whose source received a new order while it ran
    /// is abandoned in favor of that order.
    fn step_pending(&mut self, id: EntityId, delta: f32) -> Result<bool, CombatError> {
        let Some(mut command) = self.state.roster.get_mut(id).and_then(|c| c.take_pending()) else {
            return Ok(false);
        };

        let stepped = self.advance(&mut command, delta);
        let finished = command.is_finished();

        let done = match self.state.roster.get_mut(id) {
            Some(combatant) if !finished && !combatant.has_pending() => {
                combatant.replace_pending(command);
                false
            }
            Some(_) if !finished => {
                debug!(target: "combat::resolver", source = %id, "order superseded");
                self.state.commands.release(command);
                self.state.turn.in_flight = None;
                false
            }
            _ => {
                self.state.commands.release(command);
                self.state.turn.in_flight = None;
                true
            }
        };

        stepped?;
        Ok(done)
    }

    /// Starts a new round: fixes the execution order and collects AI orders.
    fn begin_round(&mut self) -> Result<(), CombatError> {
        self.apply_deferred_orders();

        let turn = &mut self.state.turn;
        turn.round += 1;
        turn.execute_orders = false;
        turn.all_orders_executed = false;
        turn.in_flight = None;
        self.sort_by_agility();

        debug!(
            target: "combat::resolver",
            round = self.state.turn.round,
            order = ?self.state.turn.order,
            "round started"
        );
        self.dispatch(EventKind::RoundStarted, |_| {});

        self.state.turn.phase = TurnPhase::UpdateAiOrders;
        self.update_ai_orders()?;

        self.state.turn.phase = TurnPhase::WaitForPlayerOrder;
        self.dispatch(EventKind::PlayersTurn, |_| {});
        Ok(())
    }

    /// Re-sorts combatants by descending agility.
    ///
    /// The sort is stable over the previous round's order, with newcomers
    /// appended in roster order, so ties keep their relative position.
    fn sort_by_agility(&mut self) {
        let roster = &self.state.roster;
        let previous = &self.state.turn.order;

        let mut ranked: Vec<(EntityId, f32)> = previous
            .iter()
            .copied()
            .chain(roster.ids().filter(|id| !previous.contains(id)))
            .filter_map(|id| roster.get(id).map(|c| (id, c.agility())))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        self.state.turn.order = ranked.into_iter().map(|(id, _)| id).collect();
    }

    /// Asks the decision provider for every live AI combatant without an
    /// order. Failures and invalid choices fall back to Defend.
    fn update_ai_orders(&mut self) -> Result<(), CombatError> {
        let actors: Vec<EntityId> = self
            .state
            .roster
            .iter()
            .filter(|c| !c.player_controlled && c.is_alive() && !c.has_pending())
            .map(|c| c.id)
            .collect();

        for actor in actors {
            let decision = self
                .env
                .decisions
                .decide(actor, &self.state.roster)
                .and_then(|decision| {
                    self.validate_decision(actor, &decision)?;
                    Ok(decision)
                });

            let decision = match decision {
                Ok(decision) => decision,
                Err(err) => {
                    warn!(
                        target: "combat::resolver",
                        actor = %actor,
                        code = err.error_code(),
                        error = %err,
                        "AI decision failed, defending"
                    );
                    Decision::defend()
                }
            };

            self.assign_order(actor, decision.kind, decision.targets, decision.item)?;
        }
        Ok(())
    }
}
