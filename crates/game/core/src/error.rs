//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (`CombatError`, `OrderError`, `DecisionError`) are
//! defined next to the code that raises them. This module provides the shared
//! classification used by the runtime to decide how loudly to react.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each failure surface has its own error enum
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **Stable Codes**: Every variant exposes a static identifier for logs and tests

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: The resolver substitutes a fallback and keeps going
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Setup errors; the encounter cannot proceed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Degraded but handled, e.g. an AI with no affordable action defends instead.
    Recoverable,

    /// Invalid input, e.g. a player order targeting an unknown combatant.
    Validation,

    /// Unexpected state inconsistency.
    Internal,

    /// Configuration error, e.g. a command kind without a registered factory.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug or a broken setup.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait CombatFault: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
