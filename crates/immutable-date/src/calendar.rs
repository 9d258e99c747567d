//! The calendar engine contract.
//!
//! Everything calendar-aware lives here: building an instant from fields or
//! from an epoch offset, IANA timezone lookup, month lengths, and truncation
//! to calendar units. The arithmetic core never touches calendar math; it only
//! sees the epoch second count these functions produce and consume.
//!
//! All of it is delegated to `chrono` and `chrono-tz`.

use chrono::{
    DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::DateError;

/// Timezone applied when neither the fields nor the options name one.
pub const DEFAULT_TIME_ZONE: &str = "UTC";

// ── Construction options ────────────────────────────────────────────────────

/// Options for [`ImmutableDate::from_fields_with_options`](crate::ImmutableDate::from_fields_with_options).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConstructOptions {
    /// IANA name used when [`DateFields::time_zone`] is `None`.
    pub default_time_zone: String,
}

impl Default for ConstructOptions {
    fn default() -> Self {
        Self {
            default_time_zone: DEFAULT_TIME_ZONE.to_string(),
        }
    }
}

// ── Calendar fields ─────────────────────────────────────────────────────────

/// A calendar field set, interpreted as wall-clock time in `time_zone`.
///
/// Month and day default to 1, time-of-day fields to 0.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DateFields {
    pub year: i32,
    #[serde(default = "one")]
    pub month: u32,
    #[serde(default = "one")]
    pub day: u32,
    #[serde(default)]
    pub hour: u32,
    #[serde(default)]
    pub minute: u32,
    #[serde(default)]
    pub second: u32,
    #[serde(default)]
    pub nanosecond: u32,
    /// IANA timezone name. `None` means the construction default ("UTC").
    #[serde(default)]
    pub time_zone: Option<String>,
}

fn one() -> u32 {
    1
}

impl DateFields {
    /// Midnight on the given date, timezone left to the default.
    pub fn ymd(year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
            nanosecond: 0,
            time_zone: None,
        }
    }

    pub fn hms(self, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour,
            minute,
            second,
            ..self
        }
    }

    pub fn nanosecond(self, nanosecond: u32) -> Self {
        Self { nanosecond, ..self }
    }

    pub fn time_zone(self, name: impl Into<String>) -> Self {
        Self {
            time_zone: Some(name.into()),
            ..self
        }
    }
}

/// Units accepted by truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TruncateUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

// ── Engine operations ───────────────────────────────────────────────────────

/// Parse an IANA timezone string into `Tz`.
pub fn parse_timezone(s: &str) -> Result<Tz, DateError> {
    s.parse::<Tz>()
        .map_err(|_| DateError::InvalidTimezone(format!("'{}'", s)))
}

/// Build an instant from calendar fields.
///
/// Ambiguous local times (DST fall-back) resolve to the earlier instant.
/// Nonexistent local times (DST spring-forward gap) are an error.
pub fn from_fields(fields: &DateFields, default_tz: &str) -> Result<DateTime<Tz>, DateError> {
    let tz = parse_timezone(fields.time_zone.as_deref().unwrap_or(default_tz))?;

    let date = NaiveDate::from_ymd_opt(fields.year, fields.month, fields.day).ok_or_else(|| {
        DateError::InvalidFields(format!(
            "no such date: {:04}-{:02}-{:02}",
            fields.year, fields.month, fields.day
        ))
    })?;
    let naive = date
        .and_hms_nano_opt(fields.hour, fields.minute, fields.second, fields.nanosecond)
        .ok_or_else(|| {
            DateError::InvalidFields(format!(
                "no such time: {:02}:{:02}:{:02}.{:09}",
                fields.hour, fields.minute, fields.second, fields.nanosecond
            ))
        })?;

    tz.from_local_datetime(&naive).earliest().ok_or_else(|| {
        DateError::InvalidFields(format!("local time {naive} does not exist in {}", tz.name()))
    })
}

/// Build an instant `seconds` after the epoch, expressed in `tz`.
pub fn from_epoch(seconds: i64, tz: Tz) -> Result<DateTime<Tz>, DateError> {
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .map(|dt| dt.with_timezone(&tz))
        .ok_or_else(|| DateError::OutOfRange(format!("epoch {seconds} is outside the calendar")))
}

/// Whole seconds since the epoch (sub-second part truncated toward the past).
pub fn epoch<T: TimeZone>(dt: &DateTime<T>) -> i64 {
    dt.timestamp()
}

/// Calendar-correct last day of a month (28..=31).
pub fn last_day_of_month(year: i32, month: u32) -> Result<u32, DateError> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .ok_or_else(|| DateError::InvalidFields(format!("no such month: {year:04}-{month:02}")))
}

/// Start of the `unit` containing `dt`, computed in `dt`'s own timezone.
///
/// Sub-day units are stripped from the instant itself so a repeated
/// fall-back hour stays on the side of the transition it started on.
pub fn truncate(dt: &DateTime<Tz>, unit: TruncateUnit) -> Result<DateTime<Tz>, DateError> {
    let tz = dt.timezone();
    let whole = epoch(dt);

    match unit {
        TruncateUnit::Year => start_of_local_day(tz, dt.year(), 1, 1),
        TruncateUnit::Month => start_of_local_day(tz, dt.year(), dt.month(), 1),
        TruncateUnit::Day => start_of_local_day(tz, dt.year(), dt.month(), dt.day()),
        TruncateUnit::Hour => from_epoch(whole - i64::from(dt.minute() * 60 + dt.second()), tz),
        TruncateUnit::Minute => from_epoch(whole - i64::from(dt.second()), tz),
        TruncateUnit::Second => from_epoch(whole, tz),
    }
}

/// First instant of a local calendar day.
///
/// Where a DST gap swallows midnight, the day starts at the first local time
/// after the gap.
fn start_of_local_day(
    tz: Tz,
    year: i32,
    month: u32,
    day: u32,
) -> Result<DateTime<Tz>, DateError> {
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        DateError::InvalidFields(format!("no such date: {year:04}-{month:02}-{day:02}"))
    })?;
    let midnight = date.and_time(NaiveTime::MIN);

    (0..MINUTES_PER_DAY)
        .map(|m| midnight + TimeDelta::minutes(m))
        .find_map(|naive| tz.from_local_datetime(&naive).earliest())
        .ok_or_else(|| {
            DateError::InvalidFields(format!("{date} has no local time in {}", tz.name()))
        })
}

const MINUTES_PER_DAY: i64 = 24 * 60;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fields_defaults_to_utc() {
        let dt = from_fields(&DateFields::ymd(2026, 3, 15).hms(14, 0, 0), DEFAULT_TIME_ZONE)
            .unwrap();
        assert_eq!(dt.timezone(), Tz::UTC);
        assert_eq!(dt.to_rfc3339(), "2026-03-15T14:00:00+00:00");
    }

    #[test]
    fn test_from_fields_explicit_zone() {
        let fields = DateFields::ymd(2026, 1, 15)
            .hms(9, 0, 0)
            .time_zone("America/New_York");
        let dt = from_fields(&fields, DEFAULT_TIME_ZONE).unwrap();
        // January is EST (UTC-5), so 09:00 local = 14:00 UTC
        let utc = from_fields(&DateFields::ymd(2026, 1, 15).hms(14, 0, 0), "UTC").unwrap();
        assert_eq!(epoch(&dt), epoch(&utc));
    }

    #[test]
    fn test_from_fields_rejects_impossible_date() {
        let err = from_fields(&DateFields::ymd(2026, 2, 30), DEFAULT_TIME_ZONE).unwrap_err();
        assert!(err.to_string().contains("Invalid fields"), "got: {err}");
    }

    #[test]
    fn test_from_fields_rejects_spring_forward_gap() {
        // March 8, 2026: 02:30 does not exist in New York
        let fields = DateFields::ymd(2026, 3, 8)
            .hms(2, 30, 0)
            .time_zone("America/New_York");
        assert!(matches!(
            from_fields(&fields, DEFAULT_TIME_ZONE),
            Err(DateError::InvalidFields(_))
        ));
    }

    #[test]
    fn test_from_fields_fall_back_picks_earlier() {
        // November 1, 2026: 01:30 happens twice in New York; EDT comes first
        let fields = DateFields::ymd(2026, 11, 1)
            .hms(1, 30, 0)
            .time_zone("America/New_York");
        let dt = from_fields(&fields, DEFAULT_TIME_ZONE).unwrap();
        assert!(dt.to_rfc3339().ends_with("-04:00"));
    }

    #[test]
    fn test_invalid_timezone() {
        let err = parse_timezone("Invalid/Zone").unwrap_err();
        assert!(err.to_string().contains("Invalid timezone"), "got: {err}");
    }

    #[test]
    fn test_from_epoch_zero() {
        let dt = from_epoch(0, Tz::UTC).unwrap();
        assert_eq!(dt.to_rfc3339(), "1970-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_from_epoch_out_of_range() {
        assert!(matches!(
            from_epoch(i64::MAX, Tz::UTC),
            Err(DateError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(2024, 2).unwrap(), 29);
        assert_eq!(last_day_of_month(2026, 2).unwrap(), 28);
        assert_eq!(last_day_of_month(1900, 2).unwrap(), 28);
        assert_eq!(last_day_of_month(2000, 2).unwrap(), 29);
        assert_eq!(last_day_of_month(2026, 4).unwrap(), 30);
        assert_eq!(last_day_of_month(2026, 12).unwrap(), 31);
        assert!(last_day_of_month(2026, 13).is_err());
    }

    #[test]
    fn test_truncate_units() {
        let fields = DateFields::ymd(2026, 7, 19)
            .hms(13, 45, 27)
            .nanosecond(500)
            .time_zone("Asia/Tokyo");
        let dt = from_fields(&fields, DEFAULT_TIME_ZONE).unwrap();

        let cases = [
            (TruncateUnit::Year, "2026-01-01T00:00:00+09:00"),
            (TruncateUnit::Month, "2026-07-01T00:00:00+09:00"),
            (TruncateUnit::Day, "2026-07-19T00:00:00+09:00"),
            (TruncateUnit::Hour, "2026-07-19T13:00:00+09:00"),
            (TruncateUnit::Minute, "2026-07-19T13:45:00+09:00"),
            (TruncateUnit::Second, "2026-07-19T13:45:27+09:00"),
        ];
        for (unit, expected) in cases {
            assert_eq!(truncate(&dt, unit).unwrap().to_rfc3339(), expected, "{unit:?}");
        }
    }

    #[test]
    fn test_truncate_day_when_dst_starts_at_midnight() {
        // November 4, 2018: Sao Paulo jumps from 00:00 to 01:00 (-03:00 → -02:00)
        let fields = DateFields::ymd(2018, 11, 4)
            .hms(12, 0, 0)
            .time_zone("America/Sao_Paulo");
        let dt = from_fields(&fields, DEFAULT_TIME_ZONE).unwrap();

        let day = truncate(&dt, TruncateUnit::Day).unwrap();
        assert_eq!(day.to_rfc3339(), "2018-11-04T01:00:00-02:00");

        // The instant just before is still the previous local day
        let before = from_epoch(epoch(&day) - 1, day.timezone()).unwrap();
        assert_eq!(before.to_rfc3339(), "2018-11-03T23:59:59-03:00");
    }

    #[test]
    fn test_truncate_month_and_year_unaffected_by_mid_month_gap() {
        let fields = DateFields::ymd(2018, 11, 4)
            .hms(12, 0, 0)
            .time_zone("America/Sao_Paulo");
        let dt = from_fields(&fields, DEFAULT_TIME_ZONE).unwrap();

        assert_eq!(
            truncate(&dt, TruncateUnit::Month).unwrap().to_rfc3339(),
            "2018-11-01T00:00:00-03:00"
        );
        assert_eq!(
            truncate(&dt, TruncateUnit::Year).unwrap().to_rfc3339(),
            "2018-01-01T00:00:00-02:00"
        );
    }

    #[test]
    fn test_options_deserialize_with_default() {
        let opts: ConstructOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts.default_time_zone, "UTC");
        let opts: ConstructOptions =
            serde_json::from_str(r#"{"default_time_zone":"Europe/Paris"}"#).unwrap();
        assert_eq!(opts.default_time_zone, "Europe/Paris");
    }

    #[test]
    fn test_fields_deserialize_defaults() {
        let fields: DateFields = serde_json::from_str(r#"{"year":2026}"#).unwrap();
        assert_eq!(fields, DateFields::ymd(2026, 1, 1));
    }
}
