//! Relative time formatting ("2 hours ago", "just now")
//!
//! The offset between a target instant and "now" is bucketed into the
//! coarsest unit whose threshold still exceeds it, then rendered through a
//! per-language phrasebook using "auto" numeric style.

mod phrases;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::locale::LocaleTag;
use phrases::Phrasebook;

/// Shown in place of a missing timestamp
pub const MISSING_TIMESTAMP: &str = "—";

/// English shortcut for sub-minute offsets
pub const JUST_NOW: &str = "just now";

/// Granularity used to render an offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelativeTimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl RelativeTimeUnit {
    /// Units in ascending order of size
    pub const ALL: [RelativeTimeUnit; 7] = [
        RelativeTimeUnit::Second,
        RelativeTimeUnit::Minute,
        RelativeTimeUnit::Hour,
        RelativeTimeUnit::Day,
        RelativeTimeUnit::Week,
        RelativeTimeUnit::Month,
        RelativeTimeUnit::Year,
    ];

    /// Exclusive upper bound, in seconds, for offsets rendered in this unit.
    /// Years are unbounded.
    pub fn threshold_secs(self) -> Option<i64> {
        match self {
            RelativeTimeUnit::Second => Some(60),
            RelativeTimeUnit::Minute => Some(3_600),
            RelativeTimeUnit::Hour => Some(86_400),
            RelativeTimeUnit::Day => Some(604_800),
            RelativeTimeUnit::Week => Some(2_592_000),
            RelativeTimeUnit::Month => Some(31_536_000),
            RelativeTimeUnit::Year => None,
        }
    }

    /// Pick the unit for an offset and the number of seconds in one such unit
    pub fn for_offset(delta_secs: i64) -> (Self, i64) {
        let magnitude = delta_secs.unsigned_abs();
        let mut divisor = 1;

        for unit in Self::ALL {
            match unit.threshold_secs() {
                Some(threshold) if magnitude >= threshold as u64 => divisor = threshold,
                _ => return (unit, divisor),
            }
        }

        (RelativeTimeUnit::Year, divisor)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InstantError {
    #[error("'{0}' is neither an RFC 3339 timestamp nor epoch milliseconds")]
    Unrecognized(String),
    #[error("epoch milliseconds {0} are out of range")]
    OutOfRange(i64),
}

/// Parse an RFC 3339 timestamp or a count of epoch milliseconds
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>, InstantError> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    let millis: i64 = raw
        .parse()
        .map_err(|_| InstantError::Unrecognized(raw.to_string()))?;
    DateTime::from_timestamp_millis(millis).ok_or(InstantError::OutOfRange(millis))
}

/// Signed offset in whole seconds, rounding half up
fn offset_secs(target: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = target.signed_duration_since(now).num_milliseconds();
    (millis + 500).div_euclid(1000)
}

/// Describe `target` relative to `now` in the given locale
pub fn format_relative(target: DateTime<Utc>, now: DateTime<Utc>, locale: &LocaleTag) -> String {
    let delta = offset_secs(target, now);

    if delta.unsigned_abs() < 60 && locale.is_english() {
        return JUST_NOW.to_string();
    }

    let (unit, divisor) = RelativeTimeUnit::for_offset(delta);
    let value = delta.div_euclid(divisor);

    Phrasebook::for_locale(locale).render(value, unit)
}

/// Like [`format_relative`], with a placeholder for records that have no timestamp
pub fn format_relative_opt(
    target: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    locale: &LocaleTag,
) -> String {
    match target {
        Some(target) => format_relative(target, now, locale),
        None => MISSING_TIMESTAMP.to_string(),
    }
}

/// Describe `target` relative to the system clock, using the ambient locale
/// unless one is given
pub fn time_ago(target: DateTime<Utc>, locale: Option<&LocaleTag>) -> String {
    let now = Utc::now();
    match locale {
        Some(locale) => format_relative(target, now, locale),
        None => format_relative(target, now, &LocaleTag::ambient()),
    }
}
