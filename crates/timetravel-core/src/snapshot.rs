//! The immutable saved copy of editor code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Live draft of a session that has nothing saved yet.
pub const DEFAULT_DRAFT: &str = "// Write your JavaScript code here...";

/// A saved copy of the code and the moment it was saved.
///
/// Snapshots are created by a save, never mutated, and only disappear when
/// the whole history is cleared. The timestamp is informational; ordering
/// comes from insertion order in the store, so two snapshots may share a
/// timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The saved source text.
    pub code: String,
    /// When the snapshot was taken (RFC 3339 on the wire).
    pub timestamp: DateTime<Utc>,
}

impl Snapshot {
    /// Creates a snapshot of `code` stamped with the current time.
    pub fn new(code: impl Into<String>) -> Self {
        Snapshot::at(code, Utc::now())
    }

    /// Creates a snapshot with an explicit timestamp (used when loading).
    pub fn at(code: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Snapshot {
            code: code.into(),
            timestamp,
        }
    }

    /// Number of lines in the saved code. Empty code has zero lines.
    pub fn line_count(&self) -> usize {
        self.code.lines().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn line_count_ignores_trailing_newline() {
        assert_eq!(Snapshot::new("").line_count(), 0);
        assert_eq!(Snapshot::new("a").line_count(), 1);
        assert_eq!(Snapshot::new("a\nb\n").line_count(), 2);
    }

    #[test]
    fn serializes_timestamp_as_rfc3339() {
        let ts = Utc.with_ymd_and_hms(2024, 11, 2, 9, 30, 0).unwrap();
        let snapshot = Snapshot::at("let x = 1;", ts);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["code"], "let x = 1;");
        assert_eq!(json["timestamp"], "2024-11-02T09:30:00Z");

        let back: Snapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snapshot);
    }
}
