//! Selection state of the side-by-side diff viewer.
//!
//! The left side is always a saved snapshot; the right side is the live
//! draft or another snapshot. The viewer also keeps a cursor over the change
//! blocks of the current pair.

use serde::Serialize;

use crate::error::CoreError;
use crate::timeline::Timeline;

/// What the right-hand side of a comparison shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "index")]
pub enum CompareTarget {
    Current,
    Snapshot(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comparison {
    left: usize,
    right: CompareTarget,
    change: usize,
}

impl Comparison {
    /// Opens the viewer on "newest snapshot vs. live draft".
    pub fn open(timeline: &Timeline) -> Result<Self, CoreError> {
        let len = timeline.len();
        if len == 0 {
            return Err(CoreError::EmptyHistory);
        }
        Ok(Comparison {
            left: len - 1,
            right: CompareTarget::Current,
            change: 0,
        })
    }

    /// Compares two arbitrary snapshots.
    pub fn between(timeline: &Timeline, left: usize, right: usize) -> Result<Self, CoreError> {
        let len = timeline.len();
        for index in [left, right] {
            if index >= len {
                return Err(CoreError::SnapshotOutOfRange { index, len });
            }
        }
        Ok(Comparison {
            left,
            right: CompareTarget::Snapshot(right),
            change: 0,
        })
    }

    pub fn left(&self) -> usize {
        self.left
    }

    pub fn right(&self) -> CompareTarget {
        self.right
    }

    /// Index of the selected change block.
    pub fn change(&self) -> usize {
        self.change
    }

    /// Moves the left side one snapshot older. Returns whether it moved.
    pub fn previous(&mut self) -> bool {
        if self.left == 0 {
            return false;
        }
        self.left -= 1;
        self.change = 0;
        true
    }

    /// Moves the left side one snapshot newer. Returns whether it moved.
    pub fn next(&mut self, timeline: &Timeline) -> bool {
        if self.left + 1 >= timeline.len() {
            return false;
        }
        self.left += 1;
        self.change = 0;
        true
    }

    /// Selects the next change block, stopping at the last of `count`.
    pub fn next_change(&mut self, count: usize) -> usize {
        if self.change + 1 < count {
            self.change += 1;
        }
        self.change
    }

    pub fn previous_change(&mut self) -> usize {
        self.change = self.change.saturating_sub(1);
        self.change
    }

    /// The `(old, new)` texts for this comparison.
    pub fn texts<'a>(
        &self,
        timeline: &'a Timeline,
        live_draft: &'a str,
    ) -> Result<(&'a str, &'a str), CoreError> {
        let old = snapshot_code(timeline, self.left)?;
        let new = match self.right {
            CompareTarget::Current => live_draft,
            CompareTarget::Snapshot(index) => snapshot_code(timeline, index)?,
        };
        Ok((old, new))
    }
}

fn snapshot_code(timeline: &Timeline, index: usize) -> Result<&str, CoreError> {
    timeline
        .snapshot(index)
        .map(|s| s.code.as_str())
        .ok_or(CoreError::SnapshotOutOfRange {
            index,
            len: timeline.len(),
        })
}
