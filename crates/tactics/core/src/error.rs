//! Common error infrastructure for tactics-core.
//!
//! Navigation never fails in the classical sense: blocked, occupied or
//! deterred moves are ordinary outcomes and surface through
//! [`crate::navigation::Outcome`]. The errors defined here cover the few
//! states that indicate corrupted input, and callers are expected to log and
//! skip them rather than abort the turn loop.

/// Severity level of an error, used for categorization and logging priority.
///
/// - **Recoverable**: the offending step can be skipped and the tick continues
/// - **Internal**: unexpected state inconsistency that should be investigated
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - skip the offending step and keep going.
    Recoverable,

    /// Internal error - unexpected state inconsistency.
    ///
    /// These indicate bugs and should be investigated.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all tactics-core errors.
///
/// Provides a uniform interface for classification across error types.
pub trait TacticsError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors raised while decoding or replaying navigation data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavigationError {
    /// A stored direction index is not one of the eight compass slots.
    #[error("invalid path direction: {0}")]
    InvalidDirection(u8),

    /// A replayed path stepped off the grid.
    #[error("path replay left the grid at ({x}, {y})")]
    PathOffGrid { x: i32, y: i32 },
}

impl TacticsError for NavigationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            NavigationError::InvalidDirection(_) => ErrorSeverity::Recoverable,
            NavigationError::PathOffGrid { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            NavigationError::InvalidDirection(_) => "NAV_INVALID_DIRECTION",
            NavigationError::PathOffGrid { .. } => "NAV_PATH_OFF_GRID",
        }
    }
}
