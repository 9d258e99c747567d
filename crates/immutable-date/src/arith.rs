//! Addition and subtraction dispatch.
//!
//! `date + x` and `date - x` are decided entirely by how `x` classifies
//! (see [`crate::operand`]):
//!
//! | operand            | `date + x`            | `date - x`                | `x - date`       |
//! |--------------------|-----------------------|---------------------------|------------------|
//! | number `n`         | date shifted by `n`   | date shifted by `-n`      | `ForbiddenOrder` |
//! | interval-like      | shifted by seconds    | shifted by `-seconds`     | `ForbiddenOrder` |
//! | date-like          | `UnsupportedOperand`  | `interval_factory(diff)`  | `ForbiddenOrder` |
//! | raw aggregate      | `UnsupportedOperand`  | `ForbiddenOperand`        | `ForbiddenOperand` |
//! | non-integer scalar | `UnsupportedOperand`  | `NoCapability`            | `NoCapability`   |
//! | no capability      | `UnsupportedOperand`  | `NoCapability`            | `NoCapability`   |
//!
//! When an operand is both date-like and interval-like, subtraction treats it
//! as a date and addition treats it as an interval.
//!
//! Neither operand is ever modified; results are always new values.

use std::ops::{Add, Sub};

use chrono::TimeDelta;

use crate::date::ImmutableDate;
use crate::error::{DateError, UnsupportedReason};
use crate::operand::{classify, Classification, Operand, Priority, Unsupported};

/// A date type the dispatcher can produce and consume.
///
/// [`Temporal::interval_factory`] is the hook deciding what `date - date`
/// returns. [`ImmutableDate`] returns the raw second count unchanged; a
/// wrapper type can return something richer.
pub trait Temporal: Sized {
    type Interval;

    fn as_immutable(&self) -> &ImmutableDate;

    fn from_immutable(date: ImmutableDate) -> Self;

    /// Turn the signed second difference of a date subtraction into the
    /// subtraction's result.
    fn interval_factory(&self, seconds: i64) -> Self::Interval;

    fn plus<'a>(&self, operand: impl Into<Operand<'a>>) -> Result<Self, DateError> {
        add(self, operand.into(), false)
    }

    fn minus<'a>(
        &self,
        operand: impl Into<Operand<'a>>,
    ) -> Result<Difference<Self, Self::Interval>, DateError> {
        subtract(self, operand.into(), false)
    }
}

impl Temporal for ImmutableDate {
    type Interval = i64;

    fn as_immutable(&self) -> &ImmutableDate {
        self
    }

    fn from_immutable(date: ImmutableDate) -> Self {
        date
    }

    fn interval_factory(&self, seconds: i64) -> i64 {
        seconds
    }
}

/// The result of a subtraction: a shifted date, or an interval built by
/// [`Temporal::interval_factory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difference<T, I> {
    Date(T),
    Interval(I),
}

pub type DateDifference = Difference<ImmutableDate, i64>;

impl<T, I> Difference<T, I> {
    pub fn into_date(self) -> Option<T> {
        match self {
            Difference::Date(d) => Some(d),
            Difference::Interval(_) => None,
        }
    }

    pub fn into_interval(self) -> Option<I> {
        match self {
            Difference::Date(_) => None,
            Difference::Interval(i) => Some(i),
        }
    }
}

// ── Dispatch ────────────────────────────────────────────────────────────────

/// `a + operand`. `reversed` marks `operand + a`; addition has no order, so
/// it only shows up in diagnostics.
///
/// # Errors
///
/// Returns [`DateError::UnsupportedOperand`] for date-like operands, raw
/// aggregates, non-integer scalars, and objects without the `as_seconds`
/// capability (each with its own [`UnsupportedReason`]), or [`DateError::OutOfRange`] if the shifted
/// instant does not fit the calendar.
pub fn add<T: Temporal>(a: &T, operand: Operand<'_>, reversed: bool) -> Result<T, DateError> {
    let reason = match classify(&operand, Priority::Interval) {
        Classification::RawOffset(n) | Classification::IntervalLike(n) => return shift(a, n),
        Classification::DateLike(_) => UnsupportedReason::PointInTime,
        Classification::Unsupported(Unsupported::RawAggregate) => UnsupportedReason::RawAggregate,
        Classification::Unsupported(Unsupported::NonNumericScalar) => {
            UnsupportedReason::NonNumericScalar
        }
        Classification::Unsupported(Unsupported::NoCapability) => {
            UnsupportedReason::MissingCapability
        }
    };
    tracing::debug!(?operand, reversed, ?reason, "rejected addition operand");
    Err(DateError::UnsupportedOperand(reason))
}

/// `a - operand`, or `operand - a` when `reversed` is set.
///
/// # Errors
///
/// - [`DateError::ForbiddenOrder`] when `reversed` and the operand is a
///   number, interval, or date: nothing non-date can have a date subtracted
///   from it.
/// - [`DateError::ForbiddenOperand`] for a raw aggregate, in either order.
/// - [`DateError::NoCapability`] for an object that is neither date-like nor
///   interval-like, or a non-integer scalar.
/// - [`DateError::OutOfRange`] on epoch overflow.
pub fn subtract<T: Temporal>(
    a: &T,
    operand: Operand<'_>,
    reversed: bool,
) -> Result<Difference<T, T::Interval>, DateError> {
    let class = classify(&operand, Priority::Date);

    if reversed && matches!(class, Classification::DateLike(_)) {
        tracing::debug!(?operand, "rejected date subtracted from non-date");
        return Err(DateError::ForbiddenOrder);
    }

    let err = match class {
        Classification::DateLike(other) => {
            let seconds = a
                .as_immutable()
                .epoch_seconds()
                .checked_sub(other)
                .ok_or_else(|| overflow("date difference"))?;
            return Ok(Difference::Interval(a.interval_factory(seconds)));
        }
        Classification::Unsupported(Unsupported::RawAggregate) => DateError::ForbiddenOperand,
        Classification::Unsupported(Unsupported::NonNumericScalar | Unsupported::NoCapability) => {
            DateError::NoCapability
        }
        Classification::RawOffset(_) | Classification::IntervalLike(_) if reversed => {
            DateError::ForbiddenOrder
        }
        Classification::RawOffset(n) | Classification::IntervalLike(n) => {
            let negated = n.checked_neg().ok_or_else(|| overflow("negated offset"))?;
            return add(a, Operand::Number(negated), false).map(Difference::Date);
        }
    };
    tracing::debug!(?operand, reversed, error = %err, "rejected subtraction operand");
    Err(err)
}

fn shift<T: Temporal>(a: &T, seconds: i64) -> Result<T, DateError> {
    let date = a.as_immutable();
    let target = date
        .epoch_seconds()
        .checked_add(seconds)
        .ok_or_else(|| overflow("shifted epoch"))?;
    ImmutableDate::from_epoch_in(target, date.time_zone()).map(T::from_immutable)
}

fn overflow(what: &str) -> DateError {
    DateError::OutOfRange(format!("{what} overflows 64-bit seconds"))
}

// ── Operators ───────────────────────────────────────────────────────────────

impl Add<i64> for ImmutableDate {
    type Output = Result<ImmutableDate, DateError>;

    fn add(self, rhs: i64) -> Self::Output {
        add(&self, Operand::Number(rhs), false)
    }
}

impl Add<ImmutableDate> for i64 {
    type Output = Result<ImmutableDate, DateError>;

    fn add(self, rhs: ImmutableDate) -> Self::Output {
        add(&rhs, Operand::Number(self), true)
    }
}

impl Add<TimeDelta> for ImmutableDate {
    type Output = Result<ImmutableDate, DateError>;

    fn add(self, rhs: TimeDelta) -> Self::Output {
        add(&self, Operand::from(&rhs), false)
    }
}

impl Add<ImmutableDate> for TimeDelta {
    type Output = Result<ImmutableDate, DateError>;

    fn add(self, rhs: ImmutableDate) -> Self::Output {
        add(&rhs, Operand::from(&self), true)
    }
}

impl Add for ImmutableDate {
    type Output = Result<ImmutableDate, DateError>;

    fn add(self, rhs: ImmutableDate) -> Self::Output {
        add(&self, Operand::from(&rhs), false)
    }
}

impl Sub<i64> for ImmutableDate {
    type Output = Result<DateDifference, DateError>;

    fn sub(self, rhs: i64) -> Self::Output {
        subtract(&self, Operand::Number(rhs), false)
    }
}

impl Sub<ImmutableDate> for i64 {
    type Output = Result<DateDifference, DateError>;

    fn sub(self, rhs: ImmutableDate) -> Self::Output {
        subtract(&rhs, Operand::Number(self), true)
    }
}

impl Sub<TimeDelta> for ImmutableDate {
    type Output = Result<DateDifference, DateError>;

    fn sub(self, rhs: TimeDelta) -> Self::Output {
        subtract(&self, Operand::from(&rhs), false)
    }
}

impl Sub<ImmutableDate> for TimeDelta {
    type Output = Result<DateDifference, DateError>;

    fn sub(self, rhs: ImmutableDate) -> Self::Output {
        subtract(&rhs, Operand::from(&self), true)
    }
}

impl Sub for ImmutableDate {
    type Output = Result<DateDifference, DateError>;

    fn sub(self, rhs: ImmutableDate) -> Self::Output {
        subtract(&self, Operand::from(&rhs), false)
    }
}
