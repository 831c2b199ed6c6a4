//! Ledger row type

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One row of the version ledger.
///
/// The ledger is append-only for applies; the most recent row for a version
/// decides whether that version is currently applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationRecord {
    /// Migration version the row refers to
    pub version_id: i64,

    /// When the row was written, if the backend recorded it
    pub tstamp: Option<DateTime<Utc>>,

    /// Whether this row is the result of an up (true) or a down (false)
    pub is_applied: bool,
}

impl MigrationRecord {
    /// Build a record from raw column values, converting the epoch
    /// millisecond timestamp.
    pub fn from_parts(version_id: i64, is_applied: bool, tstamp_ms: Option<i64>) -> Self {
        Self {
            version_id,
            tstamp: tstamp_ms.and_then(DateTime::<Utc>::from_timestamp_millis),
            is_applied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_converts_millis() {
        let record = MigrationRecord::from_parts(3, true, Some(1_700_000_000_000));
        assert_eq!(record.version_id, 3);
        assert!(record.is_applied);
        assert_eq!(
            record.tstamp.map(|t| t.timestamp_millis()),
            Some(1_700_000_000_000)
        );
    }

    #[test]
    fn test_from_parts_without_timestamp() {
        let record = MigrationRecord::from_parts(1, false, None);
        assert_eq!(record.tstamp, None);
        assert!(!record.is_applied);
    }
}
