//! Error taxonomy for the scheduler core.
//!
//! The variants deliberately mirror the four outcomes callers must be able
//! to tell apart: bad input, a valid-but-empty day, broken configuration,
//! and a single delivery failure. Delivery failures are caught at the send
//! site and aggregated into the dispatch report; they never propagate past
//! the sender.

use thiserror::Error;

/// Result alias used across all Rawat crates.
pub type Result<T> = std::result::Result<T, RawatError>;

#[derive(Debug, Error)]
pub enum RawatError {
    /// Malformed caller input (e.g. a date that is not `YYYY-MM-DD`).
    #[error("validation error: {0}")]
    Validation(String),

    /// Valid date, but the rotation has nothing scheduled (weekend or
    /// unmapped weekday). Not a failure.
    #[error("no assignments: {0}")]
    NoAssignment(String),

    /// Missing or malformed static/reference configuration. Aborts the
    /// current operation only, never the process.
    #[error("configuration error: {0}")]
    Config(String),

    /// A messaging-gateway call failed (timeout, non-success response,
    /// network error).
    #[error("channel error: {0}")]
    Channel(String),

    /// Storage error from the group-config / message-log database.
    #[error("storage error: {0}")]
    Storage(String),

    /// A dispatch run for the same calendar date is already in flight.
    #[error("busy: {0}")]
    Busy(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RawatError {
    /// Whether this error leaves the day's dispatch run able to continue
    /// with the remaining messages.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RawatError::Channel(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_errors_are_recoverable() {
        assert!(RawatError::Channel("timeout".into()).is_recoverable());
        assert!(!RawatError::Config("missing table".into()).is_recoverable());
        assert!(!RawatError::Validation("bad date".into()).is_recoverable());
    }

    #[test]
    fn test_display_prefixes() {
        let e = RawatError::NoAssignment("weekend".into());
        assert_eq!(e.to_string(), "no assignments: weekend");
    }
}
