//! # Date Text Grammar
//!
//! Scanner for the ISO-like strings that reach the column from either side:
//! MySQL's own `YYYY-MM-DD HH:MM:SS[.ffffff]` output and application strings
//! such as `2016-01-02T03:04:05.678Z`.
//!
//! ```text
//! date      = YYYY "-" MM "-" DD
//! time      = HH ":" MM [ ":" SS [ "." 1*9DIGIT ] ]
//! offset    = "Z" / ( "+" / "-" ) HH [ [":"] MM ]
//! timestamp = date [ ( "T" / " " ) time [ offset ] ]
//! ```
//!
//! Calendar validity (month lengths, leap years, hour ranges) is delegated
//! to `chrono`; the scanner only checks shape.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

use crate::timezone::TimezonePolicy;

/// A successfully scanned date string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateText {
    /// Wall-clock reading as written.
    pub wall: NaiveDateTime,
    /// Number of fractional-second digits written (0 when absent).
    pub fraction_digits: usize,
    /// Explicit offset, if the text carried one.
    pub offset: Option<FixedOffset>,
}

impl DateText {
    /// Scan `s`. Returns `None` for anything that is not a real calendar
    /// date/time in the accepted grammar.
    pub fn parse(s: &str) -> Option<Self> {
        let mut cur = Cursor::new(s.trim());

        let year = cur.digits(4)?;
        cur.expect(b'-')?;
        let month = cur.digits(2)?;
        cur.expect(b'-')?;
        let day = cur.digits(2)?;
        let date = NaiveDate::from_ymd_opt(year as i32, month, day)?;

        if cur.is_done() {
            return Some(Self {
                wall: date.and_hms_opt(0, 0, 0)?,
                fraction_digits: 0,
                offset: None,
            });
        }

        match cur.bump()? {
            b'T' | b't' | b' ' => {}
            _ => return None,
        }

        let hour = cur.digits(2)?;
        cur.expect(b':')?;
        let minute = cur.digits(2)?;
        let mut second = 0;
        let mut nanos = 0;
        let mut fraction_digits = 0;
        if cur.eat(b':') {
            second = cur.digits(2)?;
            if cur.eat(b'.') {
                let (value, count) = cur.fraction()?;
                nanos = value;
                fraction_digits = count;
            }
        }
        let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)?;

        let offset = if cur.is_done() {
            None
        } else {
            Some(cur.offset()?)
        };
        if !cur.is_done() {
            return None;
        }

        Some(Self {
            wall: date.and_time(time),
            fraction_digits,
            offset,
        })
    }

    /// The instant this text denotes. An explicit offset in the text wins;
    /// otherwise the reading is wall-clock time under `fallback`.
    pub fn instant(&self, fallback: &TimezonePolicy) -> Option<DateTime<Utc>> {
        match self.offset {
            Some(offset) => {
                let utc = self
                    .wall
                    .checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))?;
                Some(DateTime::from_naive_utc_and_offset(utc, Utc))
            }
            None => fallback.instant_of(&self.wall),
        }
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(s: &'a str) -> Self {
        Self {
            bytes: s.as_bytes(),
            pos: 0,
        }
    }

    fn is_done(&self) -> bool {
        self.pos == self.bytes.len()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, b: u8) -> Option<()> {
        self.eat(b).then_some(())
    }

    /// Exactly `n` ASCII digits.
    fn digits(&mut self, n: usize) -> Option<u32> {
        let end = self.pos.checked_add(n)?;
        let run = self.bytes.get(self.pos..end)?;
        let mut value = 0u32;
        for &b in run {
            if !b.is_ascii_digit() {
                return None;
            }
            value = value * 10 + u32::from(b - b'0');
        }
        self.pos = end;
        Some(value)
    }

    /// One to nine digits, scaled to nanoseconds.
    fn fraction(&mut self) -> Option<(u32, usize)> {
        let mut value = 0u32;
        let mut count = 0usize;
        while let Some(b) = self.peek().filter(u8::is_ascii_digit) {
            if count == 9 {
                return None;
            }
            value = value * 10 + u32::from(b - b'0');
            count += 1;
            self.pos += 1;
        }
        if count == 0 {
            return None;
        }
        Some((value * 10u32.pow((9 - count) as u32), count))
    }

    fn offset(&mut self) -> Option<FixedOffset> {
        let sign = match self.bump()? {
            b'Z' | b'z' => return Some(FixedOffset::east_opt(0)?),
            b'+' => 1,
            b'-' => -1,
            _ => return None,
        };
        let hours = self.digits(2)?;
        let minutes = if self.is_done() {
            0
        } else {
            self.eat(b':');
            self.digits(2)?
        };
        if hours > 23 || minutes > 59 {
            return None;
        }
        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60) as i32)
    }
}
