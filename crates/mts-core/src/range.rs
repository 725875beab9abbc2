//! # Storage Range
//!
//! MySQL stores `TIMESTAMP` as signed 32-bit seconds since the Unix epoch,
//! with zero reserved for the "zero date". Anything outside
//! `[1970-01-01 00:00:01, 2038-01-19 03:14:07]` UTC cannot be stored and
//! would otherwise be silently clamped by the server.

use chrono::{DateTime, Utc};

/// First storable second: `1970-01-01T00:00:01Z`.
pub const MIN_EPOCH_SECS: i64 = 1;

/// Last storable second: `2038-01-19T03:14:07Z`.
pub const MAX_EPOCH_SECS: i64 = i32::MAX as i64;

/// The closed interval of instants a `TIMESTAMP` column accepts.
///
/// Comparison is at whole-second granularity, so any fraction of the last
/// second (`03:14:07.999999`) is still in range while any fraction of the
/// epoch second (`00:00:00.5`) is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidRange;

impl ValidRange {
    /// Lower bound as an instant.
    pub fn start() -> DateTime<Utc> {
        DateTime::from_timestamp(MIN_EPOCH_SECS, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Upper bound as an instant.
    pub fn end() -> DateTime<Utc> {
        DateTime::from_timestamp(MAX_EPOCH_SECS, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Whether `instant` can be stored in the column.
    pub fn contains(instant: &DateTime<Utc>) -> bool {
        (MIN_EPOCH_SECS..=MAX_EPOCH_SECS).contains(&instant.timestamp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn bounds_render_as_documented() {
        assert_eq!(ValidRange::start().to_rfc3339(), "1970-01-01T00:00:01+00:00");
        assert_eq!(ValidRange::end().to_rfc3339(), "2038-01-19T03:14:07+00:00");
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(ValidRange::contains(&ValidRange::start()));
        assert!(ValidRange::contains(&ValidRange::end()));
    }

    #[test]
    fn one_second_outside_is_rejected() {
        let before = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2038, 1, 19, 3, 14, 8).unwrap();
        assert!(!ValidRange::contains(&before));
        assert!(!ValidRange::contains(&after));
    }

    #[test]
    fn fractions_follow_whole_second() {
        let last = ValidRange::end().with_nanosecond(999_999_000).unwrap();
        assert!(ValidRange::contains(&last));
        let epoch_half = DateTime::UNIX_EPOCH.with_nanosecond(500_000_000).unwrap();
        assert!(!ValidRange::contains(&epoch_half));
    }

    #[test]
    fn pre_epoch_is_rejected() {
        let dt = Utc.with_ymd_and_hms(1969, 12, 31, 23, 59, 59).unwrap();
        assert!(!ValidRange::contains(&dt));
    }
}
