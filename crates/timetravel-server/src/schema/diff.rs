//! Diff viewer response types.

use serde::Serialize;

use timetravel_core::{ChangeBlock, CompareTarget, DiffRegion};

/// The open diff viewer: which versions are compared and how they differ.
#[derive(Debug, Clone, Serialize)]
pub struct DiffView {
    /// Snapshot index on the left (older) side.
    pub left: usize,
    /// Live draft or snapshot on the right side.
    pub right: CompareTarget,
    pub old_code: String,
    pub new_code: String,
    pub regions: Vec<DiffRegion>,
    pub changes: Vec<ChangeBlock>,
    /// Selected change block ("change k of n" is `change_index + 1`).
    pub change_index: usize,
    pub change_count: usize,
    /// Unified rendering of the same diff; empty when identical.
    pub unified: String,
    pub can_previous: bool,
    pub can_next: bool,
}

/// Response from closing the diff viewer.
#[derive(Debug, Clone, Serialize)]
pub struct CloseDiffResponse {
    /// Whether a viewer was open.
    pub closed: bool,
}
