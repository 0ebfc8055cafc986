use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Creation time of a ledger entry.
///
/// A wall-clock component plus a logical counter. The counter only moves
/// when two entries land within the same millisecond (or the clock steps
/// backwards), so timestamps along a chain never decrease.
///
/// Ordering: `unix_ms` → `logical`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    /// Wall-clock milliseconds since UNIX epoch.
    pub unix_ms: u64,
    /// Tie-breaker for entries sharing a millisecond.
    pub logical: u32,
}

impl Timestamp {
    pub const fn new(unix_ms: u64, logical: u32) -> Self {
        Self { unix_ms, logical }
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        let unix_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self { unix_ms, logical: 0 }
    }

    pub const fn zero() -> Self {
        Self {
            unix_ms: 0,
            logical: 0,
        }
    }

    /// A timestamp for `now` that is strictly after `previous`.
    pub fn after(previous: &Self, now: Self) -> Self {
        if now.unix_ms > previous.unix_ms {
            Self::new(now.unix_ms, 0)
        } else {
            Self::new(previous.unix_ms, previous.logical.saturating_add(1))
        }
    }

    /// RFC 3339 rendering of the wall-clock part, in UTC.
    pub fn to_rfc3339(&self) -> String {
        i64::try_from(self.unix_ms)
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_else(|| self.to_string())
    }

    /// RFC 3339 wall-clock time, suffixed with `.<logical>` when the counter
    /// is set so entries sharing a millisecond still render apart.
    pub fn to_audit_string(&self) -> String {
        match self.logical {
            0 => self.to_rfc3339(),
            logical => format!("{}.{logical}", self.to_rfc3339()),
        }
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.unix_ms
            .cmp(&other.unix_ms)
            .then(self.logical.cmp(&other.logical))
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({}ms.{})", self.unix_ms, self.logical)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.unix_ms, self.logical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_wall_clock_first() {
        assert!(Timestamp::new(100, 5) < Timestamp::new(200, 0));
        assert!(Timestamp::new(100, 1) < Timestamp::new(100, 2));
    }

    #[test]
    fn now_produces_reasonable_timestamp() {
        let ts = Timestamp::now();
        // After 2020-01-01.
        assert!(ts.unix_ms > 1_577_836_800_000);
        assert_eq!(ts.logical, 0);
    }

    #[test]
    fn after_uses_clock_when_it_advanced() {
        let prev = Timestamp::new(100, 7);
        assert_eq!(Timestamp::after(&prev, Timestamp::new(150, 0)), Timestamp::new(150, 0));
    }

    #[test]
    fn after_bumps_logical_on_stalled_clock() {
        let prev = Timestamp::new(100, 7);
        assert_eq!(Timestamp::after(&prev, Timestamp::new(100, 0)), Timestamp::new(100, 8));
        assert_eq!(Timestamp::after(&prev, Timestamp::new(90, 0)), Timestamp::new(100, 8));
    }

    #[test]
    fn display_format() {
        assert_eq!(format!("{}", Timestamp::new(1000, 5)), "1000.5");
    }

    #[test]
    fn rfc3339_rendering() {
        assert_eq!(
            Timestamp::new(1_700_000_000_123, 0).to_rfc3339(),
            "2023-11-14T22:13:20.123Z"
        );
        assert_eq!(Timestamp::zero().to_rfc3339(), "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn audit_string_keeps_logical_counter() {
        assert_eq!(
            Timestamp::new(1_700_000_000_123, 0).to_audit_string(),
            "2023-11-14T22:13:20.123Z"
        );
        assert_eq!(
            Timestamp::new(1_700_000_000_123, 2).to_audit_string(),
            "2023-11-14T22:13:20.123Z.2"
        );
    }

    #[test]
    fn serde_roundtrip() {
        let ts = Timestamp::new(1234567890, 42);
        let json = serde_json::to_string(&ts).unwrap();
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, parsed);
    }
}
