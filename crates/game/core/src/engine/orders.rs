//! Order injection and replacement.

use tracing::{debug, info};

use crate::command::{Command, CommandKind};
use crate::env::{Decision, DecisionError};
use crate::event::EventKind;
use crate::state::{EntityId, ItemKind, TurnPhase};

use super::{CombatEngine, CombatError, OrderError};

impl<'a> CombatEngine<'a> {
    /// Injects a player's choice for one party member.
    ///
    /// Orders arriving while a round is executing are held and applied when
    /// the next round begins. From then on they are indistinguishable from
    /// AI-produced orders.
    pub fn submit_order(
        &mut self,
        source: EntityId,
        kind: CommandKind,
        targets: Vec<EntityId>,
        item: Option<ItemKind>,
    ) -> Result<(), OrderError> {
        if self.state.turn.is_over() {
            return Err(OrderError::EncounterOver);
        }

        let combatant = self
            .state
            .roster
            .get(source)
            .ok_or(OrderError::UnknownCombatant(source))?;
        if !combatant.player_controlled {
            return Err(OrderError::NotPlayerControlled(source));
        }
        if !combatant.is_alive() {
            return Err(OrderError::Defeated(source));
        }
        if combatant.has_pending() || self.state.deferred.iter().any(|c| c.source() == source) {
            return Err(OrderError::AlreadyOrdered(source));
        }
        if !kind.is_orderable() {
            return Err(OrderError::NotOrderable(kind));
        }
        if !combatant.has_learned(kind) {
            return Err(OrderError::NotLearned {
                combatant: source,
                kind,
            });
        }
        self.check_targets(kind, &targets)?;
        if kind == CommandKind::UseItem && item.is_none() {
            return Err(OrderError::MissingItem(kind));
        }

        if self.state.turn.phase == TurnPhase::ExecuteOrders {
            let command = self.build_command(source, kind, targets, item)?;
            debug!(target: "combat::orders", source = %source, kind = %kind, "order deferred to next round");
            self.state.deferred.push(command);
        } else {
            self.assign_order(source, kind, targets, item)?;
        }
        Ok(())
    }

    fn check_targets(&self, kind: CommandKind, targets: &[EntityId]) -> Result<(), OrderError> {
        let policy = kind.target_policy();
        if !policy.accepts(targets.len()) {
            return Err(OrderError::TargetArity {
                kind,
                expected: policy,
                got: targets.len(),
            });
        }
        if let Some(&unknown) = targets.iter().find(|&&t| !self.state.roster.contains(t)) {
            return Err(OrderError::UnknownTarget(unknown));
        }
        // Every listed target is struck once per entry.
        let repeated = targets
            .iter()
            .enumerate()
            .find(|&(i, t)| targets[..i].contains(t));
        match repeated {
            Some((_, &twice)) => Err(OrderError::DuplicateTarget(twice)),
            None => Ok(()),
        }
    }

    /// Checks an AI decision with the same rules as a player order.
    pub(crate) fn validate_decision(
        &self,
        actor: EntityId,
        decision: &Decision,
    ) -> Result<(), DecisionError> {
        let invalid = |reason: &'static str| DecisionError::InvalidDecision {
            actor,
            kind: decision.kind,
            reason,
        };
        let combatant = self
            .state
            .roster
            .get(actor)
            .ok_or(DecisionError::UnknownActor(actor))?;

        if !decision.kind.is_orderable() {
            return Err(invalid("kind is reserved for the resolver"));
        }
        if !combatant.has_learned(decision.kind) {
            return Err(invalid("kind not learned"));
        }
        if decision.kind == CommandKind::UseItem && decision.item.is_none() {
            return Err(invalid("no item"));
        }
        self.check_targets(decision.kind, &decision.targets)
            .map_err(|_| invalid("bad targets"))
    }

    fn build_command(
        &mut self,
        source: EntityId,
        kind: CommandKind,
        targets: Vec<EntityId>,
        item: Option<ItemKind>,
    ) -> Result<Command, CombatError> {
        Ok(self
            .state
            .commands
            .obtain(kind, source)?
            .with_targets(targets)
            .with_item(item))
    }

    /// Installs a pending command, releasing whatever it replaces.
    pub(crate) fn assign_order(
        &mut self,
        source: EntityId,
        kind: CommandKind,
        targets: Vec<EntityId>,
        item: Option<ItemKind>,
    ) -> Result<(), CombatError> {
        let command = self.build_command(source, kind, targets, item)?;
        let Some(combatant) = self.state.roster.get_mut(source) else {
            self.state.commands.release(command);
            return Ok(());
        };
        if let Some(replaced) = combatant.replace_pending(command) {
            self.state.commands.release(replaced);
        }
        Ok(())
    }

    /// Replaces the order of a combatant whose life just crossed to zero.
    ///
    /// Combatants with boss phases left transform; everyone else dies. The
    /// new order supersedes anything pending or deferred for the combatant.
    pub(crate) fn on_downed(&mut self, id: EntityId) -> Result<(), CombatError> {
        let Some(phases) = self.state.roster.get(id).map(|c| c.phases) else {
            return Ok(());
        };
        let (kind, event) = if phases > 0 {
            (CommandKind::Transform, EventKind::PhaseChange)
        } else {
            (CommandKind::Death, EventKind::Death)
        };

        self.discard_deferred(id);
        self.assign_order(id, kind, Vec::new(), None)?;
        info!(target: "combat::resolver", entity = %id, order = %kind, "combatant downed");
        self.dispatch(event, |e| {
            e.target = Some(id);
            e.command = Some(kind);
        });
        Ok(())
    }

    pub(crate) fn discard_deferred(&mut self, id: EntityId) {
        let (dropped, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.state.deferred)
            .into_iter()
            .partition(|c| c.source() == id);
        self.state.deferred = kept;
        for command in dropped {
            self.state.commands.release(command);
        }
    }

    /// Moves held player orders into their pending slots.
    pub(crate) fn apply_deferred_orders(&mut self) {
        for command in std::mem::take(&mut self.state.deferred) {
            let slot = self
                .state
                .roster
                .get_mut(command.source())
                .filter(|c| c.is_alive() && !c.has_pending());
            match slot {
                Some(combatant) => {
                    combatant.replace_pending(command);
                }
                None => self.state.commands.release(command),
            }
        }
    }
}
