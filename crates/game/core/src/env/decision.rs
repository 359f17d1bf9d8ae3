//! AI decision seam.

use crate::command::CommandKind;
use crate::error::{CombatFault, ErrorSeverity};
use crate::state::{EntityId, ItemKind, Roster};

/// A command choice made on behalf of an AI-controlled combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decision {
    pub kind: CommandKind,
    pub targets: Vec<EntityId>,
    pub item: Option<ItemKind>,
}

impl Decision {
    pub fn new(kind: CommandKind, targets: Vec<EntityId>) -> Self {
        Self {
            kind,
            targets,
            item: None,
        }
    }

    /// The fallback the resolver substitutes when a provider fails.
    pub fn defend() -> Self {
        Self::new(CommandKind::Defend, Vec::new())
    }
}

/// Chooses commands for AI-controlled combatants.
pub trait DecisionProvider {
    fn decide(&mut self, actor: EntityId, roster: &Roster) -> Result<Decision, DecisionError>;
}

/// Why a provider could not produce a usable decision.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecisionError {
    #[error("{actor} has no eligible action")]
    NoEligibleAction { actor: EntityId },

    #[error("{actor} chose an invalid {kind}: {reason}")]
    InvalidDecision {
        actor: EntityId,
        kind: CommandKind,
        reason: &'static str,
    },

    #[error("{0} is not part of the encounter")]
    UnknownActor(EntityId),
}

impl CombatFault for DecisionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoEligibleAction { .. } | Self::InvalidDecision { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::UnknownActor(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoEligibleAction { .. } => "DECISION_NO_ELIGIBLE_ACTION",
            Self::InvalidDecision { .. } => "DECISION_INVALID",
            Self::UnknownActor(_) => "DECISION_UNKNOWN_ACTOR",
        }
    }
}
