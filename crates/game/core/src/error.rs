//! Common error infrastructure for tactics-core.
//!
//! Domain-specific errors (e.g. `MoveError`, `TargetError`) live next to the
//! operations they validate. Every one of them implements [`GameError`] so
//! drivers can classify a rejection without matching on concrete types.
//!
//! Nothing in the core is fatal: a rejected request always leaves the session
//! unchanged, and the error value is the only thing the caller sees.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same request may succeed later or with another choice
/// - **Validation**: malformed input that should not be retried unchanged
/// - **Internal**: a reference went stale or data disagrees with itself
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: destination occupied, request made in the wrong phase.
    Recoverable,

    /// Examples: unknown combatant, target not in the cached set.
    Validation,

    /// Examples: active source removed mid-battle, corrupt map data.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all tactics-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity by recoverability, not by impact
/// - Error codes are stable `SCREAMING_SNAKE` identifiers for logs and tests
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
