//! Plain-text rendering of published events.

use std::collections::HashMap;

use game_core::{CombatEvent, EntityId, EventKind};
use runtime::{Event, SessionEvent, SessionSnapshot};

/// Resolves combatant ids to names for the log.
pub struct Narrator {
    names: HashMap<EntityId, String>,
}

impl Narrator {
    pub fn new(snapshot: &SessionSnapshot) -> Self {
        Self {
            names: snapshot
                .combatants
                .iter()
                .map(|view| (view.id, view.name.clone()))
                .collect(),
        }
    }

    fn name(&self, id: Option<EntityId>) -> String {
        match id {
            Some(id) => self
                .names
                .get(&id)
                .cloned()
                .unwrap_or_else(|| format!("#{id}")),
            None => "?".to_string(),
        }
    }

    /// One line per event worth showing; bookkeeping events yield `None`.
    pub fn describe(&self, event: &Event) -> Option<String> {
        match event {
            Event::Combat(event) => self.describe_combat(event),
            Event::Session(event) => Some(self.describe_session(event)),
        }
    }

    fn describe_combat(&self, e: &CombatEvent) -> Option<String> {
        let line = match e.kind {
            EventKind::RoundStarted => format!("── round {} ──", e.round),
            EventKind::CommandStarted => match e.item {
                Some(item) => format!("{} uses {}", self.name(e.source), item),
                None => match (e.command, e.target) {
                    (Some(kind), Some(_)) => {
                        format!("{} → {} on {}", self.name(e.source), kind, self.name(e.target))
                    }
                    (Some(kind), None) => format!("{} → {}", self.name(e.source), kind),
                    (None, _) => return None,
                },
            },
            EventKind::PostDamage => format!(
                "  {} takes {:.1} damage (life {:.1})",
                self.name(e.target),
                e.physical + e.magic,
                e.life
            ),
            EventKind::Heal => format!(
                "  {} recovers {:.1} life, {:.1} mana",
                self.name(e.target),
                e.life,
                e.mana
            ),
            EventKind::Death => format!("  {} falls", self.name(e.target)),
            EventKind::PhaseChange => format!("  {} transforms!", self.name(e.target)),
            EventKind::BuffAdded => match e.buff {
                Some(buff) => format!("  {} gains {}", self.name(e.target), buff),
                None => return None,
            },
            EventKind::BuffRemoved => match e.buff {
                Some(buff) => format!("  {} loses {}", self.name(e.target), buff),
                None => return None,
            },
            EventKind::Victory => "Victory!".to_string(),
            EventKind::Defeat => "Defeat...".to_string(),
            _ => return None,
        };
        Some(line)
    }

    fn describe_session(&self, event: &SessionEvent) -> String {
        match event {
            SessionEvent::OrderRejected {
                source,
                kind,
                code,
                message,
            } => format!(
                "  ! {} cannot {}: {} ({})",
                self.name(Some(*source)),
                kind,
                message,
                code
            ),
            SessionEvent::ItemUsed {
                item, remaining, ..
            } => format!("  {item} used, {remaining} left"),
            SessionEvent::EncounterEnded { outcome, round } => {
                format!("encounter ended in round {round}: {outcome:?}")
            }
        }
    }
}
