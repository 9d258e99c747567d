//! Operand capabilities and classification.
//!
//! An operand is interval-like or date-like because its type says so through
//! [`Capabilities`], never because of what the type is called. The dispatcher
//! works on the [`Classification`] this module produces and nothing else.

use chrono::{DateTime, TimeDelta, TimeZone};
use serde_json::Value;

/// A value that can report itself as a signed count of seconds.
pub trait IntervalLike {
    fn as_seconds(&self) -> i64;
}

/// A value that can report itself as an absolute offset from the epoch.
pub trait DateLike {
    fn epoch(&self) -> i64;
}

/// Capability descriptor for object operands.
///
/// Both methods default to "not supported"; a type opts in by returning
/// `Some(self)`. A type may expose both.
pub trait Capabilities {
    fn interval(&self) -> Option<&dyn IntervalLike> {
        None
    }

    fn date(&self) -> Option<&dyn DateLike> {
        None
    }
}

/// The right-hand side of `+` or `-`, before classification.
#[derive(Clone, Copy)]
pub enum Operand<'a> {
    /// A plain count of seconds.
    Number(i64),
    /// A raw aggregate: an array or map with no capabilities of its own.
    Aggregate(&'a Value),
    /// A scalar that is not a whole second count: string, bool, null, float,
    /// or an integer outside `i64`.
    Scalar(&'a Value),
    /// Anything carrying a capability descriptor.
    Object(&'a dyn Capabilities),
}

impl std::fmt::Debug for Operand<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Operand::Aggregate(v) => f.debug_tuple("Aggregate").field(v).finish(),
            Operand::Scalar(v) => f.debug_tuple("Scalar").field(v).finish(),
            Operand::Object(_) => f.write_str("Object(..)"),
        }
    }
}

impl From<i64> for Operand<'_> {
    fn from(n: i64) -> Self {
        Operand::Number(n)
    }
}

impl<'a, T: Capabilities> From<&'a T> for Operand<'a> {
    fn from(obj: &'a T) -> Self {
        Operand::Object(obj)
    }
}

impl<'a> Operand<'a> {
    /// Convert a JSON value: `i64` integers become [`Operand::Number`],
    /// arrays and objects [`Operand::Aggregate`], any other scalar
    /// [`Operand::Scalar`].
    pub fn from_json(value: &'a Value) -> Self {
        match value {
            Value::Array(_) | Value::Object(_) => Operand::Aggregate(value),
            _ => match value.as_i64() {
                Some(n) => Operand::Number(n),
                None => Operand::Scalar(value),
            },
        }
    }
}

/// Which capability wins when an object exposes both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// Addition: the interval reading is used first.
    Interval,
    /// Subtraction: the date reading is used first.
    Date,
}

/// Why an operand could not be classified as number, interval, or date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unsupported {
    RawAggregate,
    NonNumericScalar,
    NoCapability,
}

/// The outcome of classifying one operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    RawOffset(i64),
    IntervalLike(i64),
    DateLike(i64),
    Unsupported(Unsupported),
}

/// Classify an operand. Only the capability that wins under `priority` is
/// actually queried.
pub fn classify(operand: &Operand<'_>, priority: Priority) -> Classification {
    match operand {
        Operand::Number(n) => Classification::RawOffset(*n),
        Operand::Aggregate(_) => Classification::Unsupported(Unsupported::RawAggregate),
        Operand::Scalar(_) => Classification::Unsupported(Unsupported::NonNumericScalar),
        Operand::Object(obj) => {
            let as_interval = || {
                obj.interval()
                    .map(|i| Classification::IntervalLike(i.as_seconds()))
            };
            let as_date = || obj.date().map(|d| Classification::DateLike(d.epoch()));

            let found = match priority {
                Priority::Interval => as_interval().or_else(as_date),
                Priority::Date => as_date().or_else(as_interval),
            };
            found.unwrap_or(Classification::Unsupported(Unsupported::NoCapability))
        }
    }
}

// ── Capabilities of engine types ────────────────────────────────────────────

impl IntervalLike for TimeDelta {
    fn as_seconds(&self) -> i64 {
        self.num_seconds()
    }
}

impl Capabilities for TimeDelta {
    fn interval(&self) -> Option<&dyn IntervalLike> {
        Some(self)
    }
}

impl IntervalLike for std::time::Duration {
    /// Saturates at `i64::MAX` seconds.
    fn as_seconds(&self) -> i64 {
        i64::try_from(self.as_secs()).unwrap_or(i64::MAX)
    }
}

impl Capabilities for std::time::Duration {
    fn interval(&self) -> Option<&dyn IntervalLike> {
        Some(self)
    }
}

impl<Tz: TimeZone> DateLike for DateTime<Tz> {
    fn epoch(&self) -> i64 {
        self.timestamp()
    }
}

impl<Tz: TimeZone> Capabilities for DateTime<Tz> {
    fn date(&self) -> Option<&dyn DateLike> {
        Some(self)
    }
}
