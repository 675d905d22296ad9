// src/temporal.rs
//! Free-form publication dates -> one canonical fixed-offset timestamp.
//!
//! Feeds disagree on formats (RFC 2822 from RSS, ISO 8601 from the archive,
//! bare dates). Values with a zone are converted to the canonical offset;
//! values without one are taken as UTC first. So are values whose trailing
//! zone name is not in `ZONE_ABBREVIATIONS`.

use crate::error::DateParseError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

/// UTC+7, the offset partitions are cut in.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 7;

/// Articles published before this instant are ignored.
pub const DEFAULT_CUTOFF: &str = "2025-04-17T00:00:00+07:00";

const ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%a, %d %b %Y %H:%M:%S %z",
    "%d %b %Y %H:%M:%S %z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%a, %d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M:%S",
    "%d %B %Y %H:%M",
    "%B %d, %Y %H:%M",
];

/// Zone names chrono's RFC 2822 parser does not know but the feeds use.
const ZONE_ABBREVIATIONS: &[(&str, &str)] = &[
    ("BST", "+0100"),
    ("IST", "+0100"),
    ("WET", "+0000"),
    ("WEST", "+0100"),
    ("CET", "+0100"),
    ("CEST", "+0200"),
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d %B %Y", "%d %b %Y", "%B %d, %Y", "%b %d, %Y"];

pub fn utc_offset(hours: i32) -> FixedOffset {
    FixedOffset::east_opt(hours * 3600).unwrap_or_else(|| {
        tracing::warn!(hours, "utc offset out of range, using UTC");
        Utc.fix()
    })
}

/// Parse `input` and express it in `offset`.
pub fn to_canonical_time(
    input: &str,
    offset: FixedOffset,
) -> Result<DateTime<FixedOffset>, DateParseError> {
    parse_any(input.trim())
        .map(|dt| dt.with_timezone(&offset))
        .ok_or_else(|| DateParseError {
            input: input.to_string(),
        })
}

fn parse_zoned(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(s)
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .ok()
        .or_else(|| {
            ZONED_FORMATS
                .iter()
                .find_map(|f| DateTime::parse_from_str(s, f).ok())
        })
}

/// Split off a trailing all-letter word such as "BST" or "UTC".
fn split_zone_word(s: &str) -> Option<(&str, &str)> {
    let (head, word) = s.rsplit_once(' ')?;
    (!word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic()))
        .then_some((head.trim_end(), word))
}

fn parse_any(s: &str) -> Option<DateTime<FixedOffset>> {
    if s.is_empty() {
        return None;
    }
    if let Some(dt) = parse_zoned(s) {
        return Some(dt);
    }
    let mut bare = s;
    if let Some((head, word)) = split_zone_word(s) {
        let known = ZONE_ABBREVIATIONS
            .iter()
            .find(|(abbr, _)| abbr.eq_ignore_ascii_case(word));
        if let Some((_, offset)) = known {
            if let Some(dt) = parse_zoned(&format!("{head} {offset}")) {
                return Some(dt);
            }
        }
        // Unknown zone names (and UTC/GMT) read as no zone at all.
        bare = head;
    }
    let bare = bare.trim_end_matches('Z');
    for f in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(bare, f) {
            return Some(as_utc(naive));
        }
    }
    for f in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(bare, f) {
            return date.and_hms_opt(0, 0, 0).map(as_utc);
        }
    }
    None
}

fn as_utc(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    Utc.from_utc_datetime(&naive).fixed_offset()
}

pub fn parse_cutoff(s: &str) -> Result<DateTime<FixedOffset>, DateParseError> {
    DateTime::parse_from_rfc3339(s).map_err(|_| DateParseError {
        input: s.to_string(),
    })
}

/// Canonical offset plus recency cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePolicy {
    pub offset: FixedOffset,
    pub cutoff: DateTime<FixedOffset>,
}

impl TimePolicy {
    pub fn new(offset_hours: i32, cutoff: &str) -> Result<Self, DateParseError> {
        Ok(Self {
            offset: utc_offset(offset_hours),
            cutoff: parse_cutoff(cutoff)?,
        })
    }

    pub fn normalize(&self, input: &str) -> Result<DateTime<FixedOffset>, DateParseError> {
        to_canonical_time(input, self.offset)
    }

    pub fn is_stale(&self, ts: &DateTime<FixedOffset>) -> bool {
        is_stale(ts, &self.cutoff)
    }
}

impl Default for TimePolicy {
    fn default() -> Self {
        Self {
            offset: utc_offset(DEFAULT_UTC_OFFSET_HOURS),
            cutoff: DateTime::parse_from_rfc3339(DEFAULT_CUTOFF).expect("default cutoff literal"),
        }
    }
}

/// Strictly before the cutoff means stale.
pub fn is_stale(ts: &DateTime<FixedOffset>, cutoff: &DateTime<FixedOffset>) -> bool {
    ts < cutoff
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plus7() -> FixedOffset {
        utc_offset(DEFAULT_UTC_OFFSET_HOURS)
    }

    #[test]
    fn rss_dates_are_shifted_to_plus7() {
        let dt = to_canonical_time("Fri, 18 Apr 2025 10:30:00 GMT", plus7()).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-04-18T17:30:00+07:00");
    }

    #[test]
    fn zoned_iso_dates_are_converted() {
        let dt = to_canonical_time("2025-04-18T23:00:00+01:00", plus7()).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-04-19T05:00:00+07:00");
    }

    #[test]
    fn naive_dates_are_taken_as_utc() {
        let dt = to_canonical_time("2025-04-18T20:00:00", plus7()).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-04-19T03:00:00+07:00");
        let d = to_canonical_time("2025-04-18", plus7()).unwrap();
        assert_eq!(d.to_rfc3339(), "2025-04-18T07:00:00+07:00");
    }

    #[test]
    fn british_summer_time_is_one_hour_ahead() {
        let dt = to_canonical_time("Tue, 15 Apr 2025 22:18:00 BST", plus7()).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-04-16T04:18:00+07:00");
    }

    #[test]
    fn central_european_zones_are_mapped() {
        let summer = to_canonical_time("Fri, 18 Apr 2025 10:30:00 CEST", plus7()).unwrap();
        assert_eq!(summer.to_rfc3339(), "2025-04-18T15:30:00+07:00");
        let winter = to_canonical_time("Fri, 14 Mar 2025 10:30:00 CET", plus7()).unwrap();
        assert_eq!(winter.to_rfc3339(), "2025-03-14T16:30:00+07:00");
    }

    #[test]
    fn unknown_zone_name_is_read_as_utc() {
        let dt = to_canonical_time("Fri, 18 Apr 2025 10:30:00 AEST", plus7()).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-04-18T17:30:00+07:00");
    }

    #[test]
    fn month_name_first_with_time() {
        let dt = to_canonical_time("April 18, 2025 10:30", plus7()).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-04-18T17:30:00+07:00");
    }

    #[test]
    fn fractional_seconds_survive() {
        let dt = to_canonical_time("2025-04-18T20:00:00.123456", plus7()).unwrap();
        assert_eq!(dt.timestamp_subsec_micros(), 123456);
    }

    #[test]
    fn garbage_is_an_error() {
        let err = to_canonical_time("yesterday-ish", plus7()).unwrap_err();
        assert_eq!(err.input, "yesterday-ish");
        assert!(to_canonical_time("", plus7()).is_err());
    }

    #[test]
    fn default_policy_matches_constants() {
        let p = TimePolicy::default();
        assert_eq!(p.offset.local_minus_utc(), 7 * 3600);
        assert_eq!(p.cutoff.to_rfc3339(), DEFAULT_CUTOFF);
        assert!(TimePolicy::new(7, "not a date").is_err());
    }

    #[test]
    fn cutoff_is_exclusive() {
        let cutoff = parse_cutoff(DEFAULT_CUTOFF).unwrap();
        assert!(!is_stale(&cutoff, &cutoff));
        let before = to_canonical_time("2025-04-16T16:59:59Z", plus7()).unwrap();
        assert!(is_stale(&before, &cutoff));
        let at = to_canonical_time("2025-04-16T17:00:00Z", plus7()).unwrap();
        assert!(!is_stale(&at, &cutoff));
    }
}
