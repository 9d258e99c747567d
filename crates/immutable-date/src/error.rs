//! Error types for immutable-date operations.

use thiserror::Error;

/// Prefix shared by every [`DateError::MutationForbidden`] message.
///
/// Callers that only see the rendered message can match on this prefix.
pub const MUTATION_FORBIDDEN_PREFIX: &str = "Cannot mutate an immutable date";

/// Why an addition operand was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedReason {
    /// The operand is itself a point in time.
    PointInTime,
    /// The operand is a raw aggregate (JSON array/object or similar) with no
    /// capabilities at all.
    RawAggregate,
    /// The operand is a scalar that is not a whole second count (text,
    /// boolean, null, fractional or out-of-range number).
    NonNumericScalar,
    /// The operand is an object, but it does not expose `as_seconds`.
    MissingCapability,
}

impl std::fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            UnsupportedReason::PointInTime => "cannot add a point-in-time to a point-in-time",
            UnsupportedReason::RawAggregate => "cannot add a raw aggregate to a date",
            UnsupportedReason::NonNumericScalar => {
                "cannot add a non-integer scalar to a date"
            }
            UnsupportedReason::MissingCapability => {
                "cannot add an object that does not implement 'as_seconds'"
            }
        };
        f.write_str(msg)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("Cannot mutate an immutable date: '{operation}' is not allowed")]
    MutationForbidden { operation: &'static str },

    #[error("Unsupported operand: {0}")]
    UnsupportedOperand(UnsupportedReason),

    #[error("Forbidden operand: cannot subtract a raw aggregate")]
    ForbiddenOperand,

    #[error("Forbidden order: subtracting a point-in-time from a number is forbidden")]
    ForbiddenOrder,

    #[error("No capability: operand has neither 'as_seconds' nor 'epoch'")]
    NoCapability,

    #[error("Invalid fields: {0}")]
    InvalidFields(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Out of range: {0}")]
    OutOfRange(String),
}

/// Coarse error category, for callers that dispatch on the kind of failure
/// rather than its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MutationForbidden,
    UnsupportedOperand,
    ForbiddenOperand,
    ForbiddenOrder,
    NoCapability,
    Calendar,
}

impl DateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DateError::MutationForbidden { .. } => ErrorKind::MutationForbidden,
            DateError::UnsupportedOperand(_) => ErrorKind::UnsupportedOperand,
            DateError::ForbiddenOperand => ErrorKind::ForbiddenOperand,
            DateError::ForbiddenOrder => ErrorKind::ForbiddenOrder,
            DateError::NoCapability => ErrorKind::NoCapability,
            DateError::InvalidFields(_)
            | DateError::InvalidTimezone(_)
            | DateError::OutOfRange(_) => ErrorKind::Calendar,
        }
    }

    pub fn is_mutation_forbidden(&self) -> bool {
        self.kind() == ErrorKind::MutationForbidden
    }
}

pub type Result<T> = std::result::Result<T, DateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_message_starts_with_prefix() {
        let err = DateError::MutationForbidden {
            operation: "set_hour",
        };
        let msg = err.to_string();
        assert!(msg.starts_with(MUTATION_FORBIDDEN_PREFIX), "got: {msg}");
        assert!(msg.contains("set_hour"));
    }

    #[test]
    fn test_unsupported_reasons_render_distinct_messages() {
        let aggregate = DateError::UnsupportedOperand(UnsupportedReason::RawAggregate).to_string();
        let missing =
            DateError::UnsupportedOperand(UnsupportedReason::MissingCapability).to_string();
        let point = DateError::UnsupportedOperand(UnsupportedReason::PointInTime).to_string();
        let scalar =
            DateError::UnsupportedOperand(UnsupportedReason::NonNumericScalar).to_string();
        assert_ne!(aggregate, missing);
        assert_ne!(aggregate, scalar);
        assert_ne!(missing, scalar);
        assert_ne!(aggregate, point);
        assert_ne!(missing, point);
        assert!(aggregate.contains("raw aggregate"));
        assert!(missing.contains("as_seconds"));
    }

    #[test]
    fn test_kind_groups_calendar_errors() {
        assert_eq!(
            DateError::InvalidTimezone("'Mars/Base'".into()).kind(),
            ErrorKind::Calendar
        );
        assert_eq!(DateError::OutOfRange("x".into()).kind(), ErrorKind::Calendar);
        assert_eq!(DateError::ForbiddenOrder.kind(), ErrorKind::ForbiddenOrder);
        assert!(!DateError::NoCapability.is_mutation_forbidden());
    }
}
