//! Error infrastructure for battle-core.
//!
//! Every failure the engine can surface is a [`BattleError`]. None of them are
//! expected during normal play: they indicate a caller bug (misconstructed
//! events, double application, missing character binding) or a degenerate
//! dice source, and they are meant to propagate rather than be swallowed.
//!
//! # Design Principles
//!
//! - **Single enum**: The engine is small enough that one error type covers
//!   every operation, so `?` composes across events, turns and battles.
//! - **Severity Classification**: Errors are categorized for recovery strategies
//!   through the [`GameError`] trait.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: The caller can pick another action and carry on
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected misuse of the engine that requires investigation
/// - **Fatal**: The battle cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with an alternative action.
    ///
    /// Examples: fleeing is not allowed in this fight
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: event context missing a required key
    Validation,

    /// Internal error - the engine was driven out of order.
    ///
    /// Examples: event applied twice, decoration before application
    Internal,

    /// Fatal error - the battle cannot make progress.
    ///
    /// Examples: dice source never produces damage
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

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common classification trait for battle-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for error categorization, metrics, and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors surfaced by events, turns and the battle orchestrator.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    /// Event construction data is missing or has the wrong type.
    #[error("invalid {event} context: `{key}` {reason}")]
    InvalidEventContext {
        event: &'static str,
        key: &'static str,
        reason: &'static str,
    },

    #[error("{event} has already been applied")]
    DoubleApply { event: &'static str },

    #[error("{event} must be applied before it can be decorated")]
    DecorateBeforeApply { event: &'static str },

    #[error("precondition failed: {0}")]
    Precondition(&'static str),

    /// The dice source produced only zero-damage half-turn pairs.
    #[error("no damage produced after {attempts} half-turn attempts")]
    HalfTurnRetriesExhausted { attempts: u32 },

    #[error("battle is already over")]
    BattleAlreadyOver,

    #[error("fleeing is not allowed in this battle")]
    FleeNotAllowed,
}

impl BattleError {
    pub(crate) const fn missing(event: &'static str, key: &'static str) -> Self {
        Self::InvalidEventContext {
            event,
            key,
            reason: "is required",
        }
    }

    pub(crate) const fn mistyped(event: &'static str, key: &'static str, expected: &'static str) -> Self {
        Self::InvalidEventContext {
            event,
            key,
            reason: expected,
        }
    }
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidEventContext { .. } => ErrorSeverity::Validation,
            Self::DoubleApply { .. } | Self::DecorateBeforeApply { .. } => ErrorSeverity::Internal,
            Self::Precondition(_) | Self::BattleAlreadyOver => ErrorSeverity::Internal,
            Self::HalfTurnRetriesExhausted { .. } => ErrorSeverity::Fatal,
            Self::FleeNotAllowed => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidEventContext { .. } => "INVALID_EVENT_CONTEXT",
            Self::DoubleApply { .. } => "DOUBLE_APPLY",
            Self::DecorateBeforeApply { .. } => "DECORATE_BEFORE_APPLY",
            Self::Precondition(_) => "PRECONDITION",
            Self::HalfTurnRetriesExhausted { .. } => "HALF_TURN_RETRIES_EXHAUSTED",
            Self::BattleAlreadyOver => "BATTLE_ALREADY_OVER",
            Self::FleeNotAllowed => "FLEE_NOT_ALLOWED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn misuse_is_classified_as_internal() {
        let err = BattleError::DoubleApply {
            event: "DamageEvent",
        };
        assert!(err.severity().is_internal());
        assert_eq!(err.error_code(), "DOUBLE_APPLY");
        assert_eq!(err.to_string(), "DamageEvent has already been applied");
    }

    #[test]
    fn context_errors_render_key_and_reason() {
        let err = BattleError::missing("DamageEvent", "damage");
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(
            err.to_string(),
            "invalid DamageEvent context: `damage` is required"
        );
    }

    #[test]
    fn flee_refusal_is_recoverable() {
        assert!(BattleError::FleeNotAllowed.severity().is_recoverable());
        assert!(!BattleError::FleeNotAllowed.severity().is_internal());
    }
}
