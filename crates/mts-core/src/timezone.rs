//! # Session Timezone
//!
//! The host's session carries a timezone string that controls how instants
//! map to the wall-clock text MySQL stores. Two styles are accepted:
//!
//! - IANA zone names (`America/Chicago`, `UTC`), resolved through
//!   `chrono-tz` so DST and historical offsets apply.
//! - Fixed offsets `(+|-)HH:MM` or `(+|-)HHMM`, applied as a raw shift with
//!   no rules.
//!
//! Named lookup wins when a string could be read either way.

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, FixedOffset, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::MtsError;

/// How the session timezone string was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimezonePolicy {
    /// A zone from the tz database.
    Named(Tz),
    /// A constant UTC delta.
    Fixed(FixedOffset),
}

impl TimezonePolicy {
    /// `+00:00`, the host's default session timezone.
    pub fn utc() -> Self {
        Self::Fixed(Utc.fix())
    }

    /// Wall-clock time of `instant` under this policy.
    pub fn wall_clock(&self, instant: &DateTime<Utc>) -> NaiveDateTime {
        match self {
            Self::Named(tz) => instant.with_timezone(tz).naive_local(),
            Self::Fixed(offset) => instant.with_timezone(offset).naive_local(),
        }
    }

    /// The instant a wall-clock reading denotes under this policy.
    ///
    /// Ambiguous readings (a repeated hour when clocks go back) resolve to
    /// the earlier instant. Readings inside a DST gap are taken with the
    /// offset in force before the gap, which moves them forward by the gap
    /// length. Returns `None` only when the arithmetic overflows.
    pub fn instant_of(&self, wall: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Self::Fixed(offset) => shift_by(wall, offset.local_minus_utc()),
            Self::Named(tz) => match tz.from_local_datetime(wall) {
                LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
                LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
                LocalResult::None => {
                    let before = wall.checked_sub_signed(TimeDelta::days(1))?;
                    let offset = tz.offset_from_local_datetime(&before).earliest()?.fix();
                    shift_by(wall, offset.local_minus_utc())
                }
            },
        }
    }
}

/// Reverse a local shift of `local_minus_utc` seconds.
fn shift_by(wall: &NaiveDateTime, local_minus_utc: i32) -> Option<DateTime<Utc>> {
    let utc = wall.checked_sub_signed(TimeDelta::seconds(i64::from(local_minus_utc)))?;
    Some(Utc.from_utc_datetime(&utc))
}

/// Parse `(+|-)HH:MM` or `(+|-)HHMM`.
pub fn parse_fixed_offset(s: &str) -> Option<FixedOffset> {
    let bytes = s.as_bytes();
    let sign = match bytes.first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let digits: &[u8] = match bytes.len() {
        6 if bytes[3] == b':' => &[bytes[1], bytes[2], bytes[4], bytes[5]],
        5 => &bytes[1..5],
        _ => return None,
    };
    if !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let hours = i32::from(digits[0] - b'0') * 10 + i32::from(digits[1] - b'0');
    let minutes = i32::from(digits[2] - b'0') * 10 + i32::from(digits[3] - b'0');
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

impl FromStr for TimezonePolicy {
    type Err = MtsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(tz) = s.parse::<Tz>() {
            return Ok(Self::Named(tz));
        }
        parse_fixed_offset(s)
            .map(Self::Fixed)
            .ok_or_else(|| MtsError::InvalidTimezone(s.to_string()))
    }
}

impl TryFrom<String> for TimezonePolicy {
    type Error = MtsError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TimezonePolicy> for String {
    fn from(policy: TimezonePolicy) -> Self {
        policy.to_string()
    }
}

impl fmt::Display for TimezonePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(tz) => f.write_str(tz.name()),
            Self::Fixed(offset) => {
                let secs = offset.local_minus_utc();
                let sign = if secs < 0 { '-' } else { '+' };
                let secs = secs.abs();
                write!(f, "{sign}{:02}:{:02}", secs / 3600, (secs % 3600) / 60)
            }
        }
    }
}

/// Per-call options supplied by the host session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    pub timezone: TimezonePolicy,
}

impl SessionOptions {
    /// Resolve a session timezone string.
    pub fn new(timezone: &str) -> Result<Self, MtsError> {
        Ok(Self {
            timezone: timezone.parse()?,
        })
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            timezone: TimezonePolicy::utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn wall(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn named_zones_resolve() {
        let policy: TimezonePolicy = "America/Chicago".parse().unwrap();
        assert_eq!(policy, TimezonePolicy::Named(chrono_tz::America::Chicago));
        assert_eq!(policy.to_string(), "America/Chicago");
    }

    #[test]
    fn offsets_resolve_with_and_without_colon() {
        let a: TimezonePolicy = "+08:00".parse().unwrap();
        let b: TimezonePolicy = "+0800".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "+08:00");

        let neg: TimezonePolicy = "-05:45".parse().unwrap();
        assert_eq!(neg, TimezonePolicy::Fixed(FixedOffset::west_opt(5 * 3600 + 45 * 60).unwrap()));
        assert_eq!(neg.to_string(), "-05:45");
    }

    #[test]
    fn garbage_timezones_are_rejected() {
        for bad in ["", "Mars/Olympus", "08:00", "+8:00", "+24:00", "+08:60", "+08-00"] {
            assert!(
                matches!(bad.parse::<TimezonePolicy>(), Err(MtsError::InvalidTimezone(_))),
                "{bad:?} should not resolve"
            );
        }
    }

    #[test]
    fn fixed_offset_shifts_both_ways() {
        let policy: TimezonePolicy = "+08:00".parse().unwrap();
        let instant = Utc.with_ymd_and_hms(2016, 1, 1, 19, 4, 5).unwrap();
        let local = policy.wall_clock(&instant);
        assert_eq!(local, wall(2016, 1, 2, 3, 4, 5));
        assert_eq!(policy.instant_of(&local), Some(instant));
    }

    #[test]
    fn named_zone_applies_dst() {
        let policy = TimezonePolicy::Named(chrono_tz::America::Chicago);
        let winter = Utc.with_ymd_and_hms(2016, 1, 2, 3, 4, 5).unwrap();
        let summer = Utc.with_ymd_and_hms(2016, 7, 2, 3, 4, 5).unwrap();
        assert_eq!(policy.wall_clock(&winter), wall(2016, 1, 1, 21, 4, 5));
        assert_eq!(policy.wall_clock(&summer), wall(2016, 7, 1, 22, 4, 5));
    }

    #[test]
    fn ambiguous_wall_time_takes_earlier_instant() {
        // 2016-11-06 01:30 happens twice in Chicago.
        let policy = TimezonePolicy::Named(chrono_tz::America::Chicago);
        let instant = policy.instant_of(&wall(2016, 11, 6, 1, 30, 0)).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2016, 11, 6, 6, 30, 0).unwrap());
    }

    #[test]
    fn gap_wall_time_moves_forward() {
        // 2016-03-13 02:30 does not exist in Chicago; it reads as 03:30 CDT.
        let policy = TimezonePolicy::Named(chrono_tz::America::Chicago);
        let instant = policy.instant_of(&wall(2016, 3, 13, 2, 30, 0)).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2016, 3, 13, 8, 30, 0).unwrap());
        assert_eq!(policy.wall_clock(&instant), wall(2016, 3, 13, 3, 30, 0));
    }

    #[test]
    fn session_options_deserialize_from_string() {
        let opts: SessionOptions = serde_json::from_str(r#"{"timezone": "-08:00"}"#).unwrap();
        assert_eq!(opts.timezone.to_string(), "-08:00");
        assert!(serde_json::from_str::<SessionOptions>(r#"{"timezone": "nowhere"}"#).is_err());
    }

    #[test]
    fn default_session_is_utc_offset() {
        assert_eq!(SessionOptions::default().timezone.to_string(), "+00:00");
    }
}
