//! Snapshot listing and slider request/response types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use timetravel_core::{SliderMark, Snapshot};

/// A snapshot in a listing, without its code.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotSummary {
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    /// Number of lines in the saved code.
    pub lines: usize,
}

/// Response for listing the history, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct ListHistoryResponse {
    pub snapshots: Vec<SnapshotSummary>,
    pub total: usize,
}

/// A single snapshot with its code.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotDetail {
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    pub code: String,
}

impl SnapshotDetail {
    pub fn new(index: usize, snapshot: &Snapshot) -> Self {
        SnapshotDetail {
            index,
            timestamp: snapshot.timestamp,
            code: snapshot.code.clone(),
        }
    }
}

/// Slider marks and the current value.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineResponse {
    pub marks: Vec<SliderMark>,
    pub value: usize,
    /// Highest slider value; equal to the history length (Current).
    pub max: usize,
}
