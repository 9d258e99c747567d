//! The immutable date value.
//!
//! [`ImmutableDate`] owns a private copy of an engine instant and never hands
//! out anything that could change it. New values come from the constructors
//! below or from arithmetic in [`crate::arith`]; the legacy mutator names
//! exist only to fail with [`DateError::MutationForbidden`].

use std::cmp::Ordering;

use chrono::{DateTime, Datelike, SecondsFormat, TimeDelta, Timelike, Utc};
use chrono_tz::Tz;

use crate::calendar::{self, ConstructOptions, DateFields, TruncateUnit};
use crate::error::DateError;
use crate::mutation::{reject_mutation, Mutator};
use crate::operand::{Capabilities, DateLike};

/// A fixed point in time that cannot be changed after construction.
///
/// The value is `Copy`, `Send` and `Sync`: sharing it across threads needs no
/// synchronization because nothing can write to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImmutableDate {
    inner: DateTime<Tz>,
}

/// Input accepted by [`ImmutableDate::new`]: a field set, or a bare epoch
/// second count as shorthand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateSpec {
    Epoch(i64),
    Fields(DateFields),
}

impl From<i64> for DateSpec {
    fn from(seconds: i64) -> Self {
        DateSpec::Epoch(seconds)
    }
}

impl From<DateFields> for DateSpec {
    fn from(fields: DateFields) -> Self {
        DateSpec::Fields(fields)
    }
}

// ── Construction ────────────────────────────────────────────────────────────

impl ImmutableDate {
    /// Build a new value from a field set (default zone "UTC") or, given a
    /// bare integer, from an epoch offset.
    ///
    /// # Examples
    ///
    /// ```
    /// use immutable_date::{DateFields, ImmutableDate};
    ///
    /// let a = ImmutableDate::new(DateFields::ymd(1970, 1, 2)).unwrap();
    /// let b = ImmutableDate::new(86_400_i64).unwrap();
    /// assert_eq!(a, b);
    /// ```
    pub fn new(spec: impl Into<DateSpec>) -> Result<Self, DateError> {
        match spec.into() {
            DateSpec::Epoch(seconds) => Self::from_epoch(seconds),
            DateSpec::Fields(fields) => Self::from_fields(&fields),
        }
    }

    /// Same as [`ImmutableDate::new`]. The receiver is ignored; it only
    /// serves as a factory.
    pub fn construct(&self, spec: impl Into<DateSpec>) -> Result<Self, DateError> {
        Self::new(spec)
    }

    pub fn from_fields(fields: &DateFields) -> Result<Self, DateError> {
        Self::from_fields_with_options(fields, &ConstructOptions::default())
    }

    pub fn from_fields_with_options(
        fields: &DateFields,
        options: &ConstructOptions,
    ) -> Result<Self, DateError> {
        calendar::from_fields(fields, &options.default_time_zone).map(|inner| Self { inner })
    }

    /// A UTC value `seconds` after the epoch.
    pub fn from_epoch(seconds: i64) -> Result<Self, DateError> {
        Self::from_epoch_in(seconds, Tz::UTC)
    }

    pub fn from_epoch_in(seconds: i64, tz: Tz) -> Result<Self, DateError> {
        calendar::from_epoch(seconds, tz).map(|inner| Self { inner })
    }

    /// Copy an engine value into a new immutable one. No reference to
    /// `source` is retained.
    pub fn wrap(source: &DateTime<Tz>) -> Self {
        Self { inner: *source }
    }

    /// The same instant viewed in another IANA zone.
    pub fn with_time_zone(&self, name: &str) -> Result<Self, DateError> {
        let tz = calendar::parse_timezone(name)?;
        Ok(Self {
            inner: self.inner.with_timezone(&tz),
        })
    }

    /// The start of the `unit` containing this value, as a new value.
    pub fn truncated(&self, unit: TruncateUnit) -> Result<Self, DateError> {
        calendar::truncate(&self.inner, unit).map(|inner| Self { inner })
    }
}

impl From<DateTime<Tz>> for ImmutableDate {
    fn from(source: DateTime<Tz>) -> Self {
        Self::wrap(&source)
    }
}

impl From<DateTime<Utc>> for ImmutableDate {
    fn from(source: DateTime<Utc>) -> Self {
        Self {
            inner: source.with_timezone(&Tz::UTC),
        }
    }
}

// ── Accessors ───────────────────────────────────────────────────────────────

impl ImmutableDate {
    pub fn epoch_seconds(&self) -> i64 {
        calendar::epoch(&self.inner)
    }

    /// A copy of the underlying engine instant.
    pub fn to_datetime(&self) -> DateTime<Tz> {
        self.inner
    }

    pub fn time_zone(&self) -> Tz {
        self.inner.timezone()
    }

    pub fn year(&self) -> i32 {
        self.inner.year()
    }

    pub fn month(&self) -> u32 {
        self.inner.month()
    }

    pub fn day(&self) -> u32 {
        self.inner.day()
    }

    pub fn hour(&self) -> u32 {
        self.inner.hour()
    }

    pub fn minute(&self) -> u32 {
        self.inner.minute()
    }

    pub fn second(&self) -> u32 {
        self.inner.second()
    }

    pub fn nanosecond(&self) -> u32 {
        self.inner.nanosecond()
    }

    /// Number of days in this value's month (28..=31).
    pub fn days_in_month(&self) -> Result<u32, DateError> {
        calendar::last_day_of_month(self.year(), self.month())
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }

    /// Strictly earlier than `other`.
    pub fn precedes(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Less
    }

    /// Strictly later than `other`.
    pub fn follows(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Greater
    }

    /// Zero-padded local date, e.g. `2026-03-05`.
    pub fn ymd(&self) -> String {
        self.inner.format("%Y-%m-%d").to_string()
    }

    /// Zero-padded local time, e.g. `09:05:07`.
    pub fn hms(&self) -> String {
        self.inner.format("%H:%M:%S").to_string()
    }

    /// Local date and time joined by a space, e.g. `2026-03-05 09:05:07`.
    pub fn to_datetime_string(&self) -> String {
        format!("{} {}", self.ymd(), self.hms())
    }
}

impl std::fmt::Display for ImmutableDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl DateLike for ImmutableDate {
    fn epoch(&self) -> i64 {
        self.epoch_seconds()
    }
}

impl Capabilities for ImmutableDate {
    fn date(&self) -> Option<&dyn DateLike> {
        Some(self)
    }
}

// ── Rejected mutators ───────────────────────────────────────────────────────

impl ImmutableDate {
    /// Refuse the named mutation. `self` is untouched.
    pub fn reject_mutation(&self, mutator: Mutator) -> Result<(), DateError> {
        reject_mutation(mutator)
    }

    pub fn add_duration(&self, _duration: TimeDelta) -> Result<(), DateError> {
        reject_mutation(Mutator::AddDuration)
    }

    pub fn subtract_duration(&self, _duration: TimeDelta) -> Result<(), DateError> {
        reject_mutation(Mutator::SubtractDuration)
    }

    /// Use [`ImmutableDate::truncated`] for a new, truncated value.
    pub fn truncate(&self, _unit: TruncateUnit) -> Result<(), DateError> {
        reject_mutation(Mutator::Truncate)
    }

    pub fn set(&self, _fields: &DateFields) -> Result<(), DateError> {
        reject_mutation(Mutator::Set)
    }

    pub fn set_year(&self, _year: i32) -> Result<(), DateError> {
        reject_mutation(Mutator::SetYear)
    }

    pub fn set_month(&self, _month: u32) -> Result<(), DateError> {
        reject_mutation(Mutator::SetMonth)
    }

    pub fn set_day(&self, _day: u32) -> Result<(), DateError> {
        reject_mutation(Mutator::SetDay)
    }

    pub fn set_hour(&self, _hour: u32) -> Result<(), DateError> {
        reject_mutation(Mutator::SetHour)
    }

    pub fn set_minute(&self, _minute: u32) -> Result<(), DateError> {
        reject_mutation(Mutator::SetMinute)
    }

    pub fn set_second(&self, _second: u32) -> Result<(), DateError> {
        reject_mutation(Mutator::SetSecond)
    }

    pub fn set_nanosecond(&self, _nanosecond: u32) -> Result<(), DateError> {
        reject_mutation(Mutator::SetNanosecond)
    }

    /// Use [`ImmutableDate::with_time_zone`] for the same instant in another zone.
    pub fn set_time_zone(&self, _name: &str) -> Result<(), DateError> {
        reject_mutation(Mutator::SetTimeZone)
    }

    pub fn set_locale(&self, _locale: &str) -> Result<(), DateError> {
        reject_mutation(Mutator::SetLocale)
    }

    pub fn set_formatter(&self, _formatter: &str) -> Result<(), DateError> {
        reject_mutation(Mutator::SetFormatter)
    }
}

impl Default for ImmutableDate {
    /// The epoch itself, in UTC.
    fn default() -> Self {
        Self {
            inner: DateTime::<Utc>::UNIX_EPOCH.with_timezone(&Tz::UTC),
        }
    }
}
