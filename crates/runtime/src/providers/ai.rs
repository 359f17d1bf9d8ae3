//! Category-based combat AI.
//!
//! Each decision starts by picking an [`AiCategory`] from the situation:
//!
//! 1. `Defensive` when the actor itself is below a third of its life
//! 2. `Supportive` when an ally (self included) is below half life
//! 3. `Offensive` otherwise
//!
//! Candidates are the learned, orderable, affordable kinds of that category,
//! costliest first. When the preferred category has no candidate the others
//! are tried, offense first. Defend is the last resort: it is only chosen
//! when nothing else is possible, so that a battle of wounded combatants
//! still ends. Items are never chosen.

use std::cmp::Reverse;

use tracing::trace;

use game_core::{
    AiCategory, BuffKind, CommandKind, Decision, DecisionError, DecisionProvider, EntityId, Roster,
    TargetPolicy,
};

use crate::session::CombatantView;

#[derive(Clone, Debug)]
pub struct CategoryAi {
    support_threshold: f32,
    defend_threshold: f32,
}

impl CategoryAi {
    pub const SUPPORT_THRESHOLD: f32 = 0.5;
    pub const DEFEND_THRESHOLD: f32 = 1.0 / 3.0;

    pub fn new() -> Self {
        Self {
            support_threshold: Self::SUPPORT_THRESHOLD,
            defend_threshold: Self::DEFEND_THRESHOLD,
        }
    }

    /// Chooses an order for `actor` among `combatants`.
    pub fn choose(
        &self,
        actor: EntityId,
        combatants: &[CombatantView],
    ) -> Result<Decision, DecisionError> {
        let me = combatants
            .iter()
            .find(|c| c.id == actor)
            .ok_or(DecisionError::UnknownActor(actor))?;

        let allies: Vec<&CombatantView> = combatants
            .iter()
            .filter(|c| c.player_controlled == me.player_controlled && c.is_alive())
            .collect();
        let enemies: Vec<&CombatantView> = combatants
            .iter()
            .filter(|c| c.player_controlled != me.player_controlled && c.is_alive())
            .collect();

        let preferred = if me.life_ratio() < self.defend_threshold {
            AiCategory::Defensive
        } else if allies
            .iter()
            .any(|a| a.life_ratio() < self.support_threshold)
        {
            AiCategory::Supportive
        } else {
            AiCategory::Offensive
        };

        let order = [
            preferred,
            AiCategory::Offensive,
            AiCategory::Supportive,
            AiCategory::Defensive,
        ];
        for category in order {
            if let Some(decision) = self.pick(category, me, &allies, &enemies) {
                trace!(
                    target: "runtime::ai",
                    actor = %actor,
                    category = %category,
                    kind = %decision.kind,
                    "decision"
                );
                return Ok(decision);
            }
        }

        if me.learned.contains(&CommandKind::Defend) {
            return Ok(Decision::defend());
        }
        Err(DecisionError::NoEligibleAction { actor })
    }

    fn pick(
        &self,
        category: AiCategory,
        me: &CombatantView,
        allies: &[&CombatantView],
        enemies: &[&CombatantView],
    ) -> Option<Decision> {
        let mut candidates: Vec<CommandKind> = me
            .learned
            .iter()
            .copied()
            .filter(|kind| {
                kind.is_orderable()
                    && !matches!(kind, CommandKind::UseItem | CommandKind::Defend)
                    && kind.ai_category() == category
                    && kind.mana_cost() as f32 <= me.mana
            })
            .collect();
        // Costlier kinds first.
        candidates.sort_by_key(|kind| Reverse(kind.mana_cost()));

        for kind in candidates {
            if let Some(targets) = self.targets(kind, me, allies, enemies) {
                return Some(Decision::new(kind, targets));
            }
        }
        None
    }

    fn targets(
        &self,
        kind: CommandKind,
        me: &CombatantView,
        allies: &[&CombatantView],
        enemies: &[&CombatantView],
    ) -> Option<Vec<EntityId>> {
        let weakest = |side: &[&CombatantView]| {
            side.iter()
                .min_by(|a, b| a.life_ratio().total_cmp(&b.life_ratio()))
                .map(|c| c.id)
        };

        match (kind, kind.target_policy()) {
            (_, TargetPolicy::NoTarget) => Some(Vec::new()),
            (CommandKind::Heal, _) => allies
                .iter()
                .filter(|a| a.life_ratio() < 1.0)
                .min_by(|a, b| a.life_ratio().total_cmp(&b.life_ratio()))
                .map(|a| vec![a.id]),
            (CommandKind::Protect, _) => {
                let unprotected = |c: &&&CombatantView| !c.has_buff(BuffKind::Protect);
                if !me.has_buff(BuffKind::Protect) {
                    Some(vec![me.id])
                } else {
                    allies.iter().find(unprotected).map(|a| vec![a.id])
                }
            }
            (_, TargetPolicy::All) => {
                let all: Vec<EntityId> = enemies.iter().map(|e| e.id).collect();
                (!all.is_empty()).then_some(all)
            }
            (_, TargetPolicy::Single) => weakest(enemies).map(|id| vec![id]),
        }
    }
}

impl Default for CategoryAi {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionProvider for CategoryAi {
    fn decide(&mut self, actor: EntityId, roster: &Roster) -> Result<Decision, DecisionError> {
        let combatants: Vec<CombatantView> = roster.iter().map(CombatantView::from).collect();
        self.choose(actor, &combatants)
    }
}
