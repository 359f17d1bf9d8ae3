//! Error types raised by the combat engine.

use crate::buff::BuffKind;
use crate::command::{CommandKind, TargetPolicy};
use crate::error::{CombatFault, ErrorSeverity};
use crate::state::EntityId;

/// Setup errors that stop an encounter.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatError {
    #[error("no factory registered for command kind {0}")]
    UnregisteredCommand(CommandKind),

    #[error("no factory registered for buff kind {0}")]
    UnregisteredBuff(BuffKind),
}

impl CombatFault for CombatError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnregisteredCommand(_) => "COMBAT_UNREGISTERED_COMMAND",
            Self::UnregisteredBuff(_) => "COMBAT_UNREGISTERED_BUFF",
        }
    }
}

/// Reasons a player order is rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("the encounter is over")]
    EncounterOver,

    #[error("{0} is not part of the encounter")]
    UnknownCombatant(EntityId),

    #[error("{0} is not player-controlled")]
    NotPlayerControlled(EntityId),

    #[error("{0} cannot act at zero life")]
    Defeated(EntityId),

    #[error("{0} already has an order this round")]
    AlreadyOrdered(EntityId),

    #[error("{0} cannot be ordered directly")]
    NotOrderable(CommandKind),

    #[error("{combatant} has not learned {kind}")]
    NotLearned { combatant: EntityId, kind: CommandKind },

    #[error("{kind} expects {expected} targeting, got {got} targets")]
    TargetArity {
        kind: CommandKind,
        expected: TargetPolicy,
        got: usize,
    },

    #[error("target {0} is not part of the encounter")]
    UnknownTarget(EntityId),

    #[error("target {0} is listed more than once")]
    DuplicateTarget(EntityId),

    #[error("{0} requires an item")]
    MissingItem(CommandKind),

    #[error(transparent)]
    Combat(#[from] CombatError),
}

impl CombatFault for OrderError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Combat(inner) => inner.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EncounterOver => "ORDER_ENCOUNTER_OVER",
            Self::UnknownCombatant(_) => "ORDER_UNKNOWN_COMBATANT",
            Self::NotPlayerControlled(_) => "ORDER_NOT_PLAYER_CONTROLLED",
            Self::Defeated(_) => "ORDER_DEFEATED",
            Self::AlreadyOrdered(_) => "ORDER_ALREADY_ORDERED",
            Self::NotOrderable(_) => "ORDER_NOT_ORDERABLE",
            Self::NotLearned { .. } => "ORDER_NOT_LEARNED",
            Self::TargetArity { .. } => "ORDER_TARGET_ARITY",
            Self::UnknownTarget(_) => "ORDER_UNKNOWN_TARGET",
            Self::DuplicateTarget(_) => "ORDER_DUPLICATE_TARGET",
            Self::MissingItem(_) => "ORDER_MISSING_ITEM",
            Self::Combat(inner) => inner.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_are_fatal_through_order_errors() {
        let err = OrderError::from(CombatError::UnregisteredBuff(BuffKind::Protect));
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
        assert_eq!(err.error_code(), "COMBAT_UNREGISTERED_BUFF");
        assert!(OrderError::EncounterOver.severity() == ErrorSeverity::Validation);
    }
}
