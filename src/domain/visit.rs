//! Per-session visit counting rules.
//!
//! The counter lives in the browser session rather than the database. A
//! visit is counted again only once a whole day has passed since the last
//! counted visit.

use chrono::{NaiveDateTime, ParseError};
use serde::Serialize;

/// Session key holding the visit counter as a decimal string.
pub const VISITS_KEY: &str = "visits";
/// Session key holding the timestamp of the last counted visit.
pub const LAST_VISIT_KEY: &str = "last_visit";

const STORED_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
const SECONDS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Visit counter state as seen by a single request.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct VisitSummary {
    pub visits: i32,
    pub last_visit: NaiveDateTime,
}

impl VisitSummary {
    /// State assumed for a session that has never been tracked.
    pub fn first(now: NaiveDateTime) -> Self {
        Self {
            visits: 1,
            last_visit: now,
        }
    }

    /// Applies a request observed at `now`.
    ///
    /// Returns the new state and whether the counter moved. The counter moves
    /// only when at least one full 24-hour period separates `now` from
    /// `last_visit`.
    pub fn advance(self, now: NaiveDateTime) -> (Self, bool) {
        if (now - self.last_visit).num_days() > 0 {
            (
                Self {
                    visits: self.visits + 1,
                    last_visit: now,
                },
                true,
            )
        } else {
            (self, false)
        }
    }
}

/// Serializes a timestamp the way it is kept in the session.
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(STORED_FORMAT).to_string()
}

/// Parses a stored timestamp at seconds precision, ignoring any fractional
/// suffix.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, ParseError> {
    let seconds = raw.trim().split('.').next().unwrap_or_default();
    NaiveDateTime::parse_from_str(seconds, SECONDS_FORMAT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn parse_discards_fractional_seconds() {
        let parsed = parse_timestamp("2024-03-10 08:15:30.123456").unwrap();
        assert_eq!(parsed, at(8, 15, 30));
    }

    #[test]
    fn parse_accepts_whole_seconds() {
        assert_eq!(parse_timestamp("2024-03-10 08:15:30").unwrap(), at(8, 15, 30));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn stored_format_round_trips_at_seconds_precision() {
        let now = at(23, 59, 1) + Duration::microseconds(42);
        let stored = format_timestamp(now);
        assert_eq!(stored, "2024-03-10 23:59:01.000042");
        assert_eq!(parse_timestamp(&stored).unwrap(), at(23, 59, 1));
    }

    #[test]
    fn advance_needs_a_full_day() {
        let start = VisitSummary::first(at(22, 0, 0));
        // Crossing midnight is not enough.
        let (same, moved) = start.advance(at(22, 0, 0) + Duration::hours(3));
        assert!(!moved);
        assert_eq!(same, start);

        let (next, moved) = start.advance(at(22, 0, 0) + Duration::hours(24));
        assert!(moved);
        assert_eq!(next.visits, 2);
        assert_eq!(next.last_visit, at(22, 0, 0) + Duration::hours(24));
    }
}
