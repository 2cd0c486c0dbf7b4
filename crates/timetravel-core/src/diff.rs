//! Line-level diff between two versions of the code.
//!
//! The LCS work is done by [`similar`]; this module only reshapes its ops
//! into what a viewer needs: contiguous regions tagged added / removed /
//! unchanged, and the list of change blocks a user steps through.
//!
//! Texts are split on `'\n'` and compared without terminators. A final
//! newline present in only one of the texts shows up as an empty line.

use serde::Serialize;
use similar::{capture_diff_slices, Algorithm, DiffTag, TextDiff};

/// Header names used in unified output.
const OLD_HEADER: &str = "a/old-file";
const NEW_HEADER: &str = "b/new-file";

/// Lines of context around each hunk in unified output.
const CONTEXT_RADIUS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Unchanged,
    Removed,
    Added,
}

/// A run of lines sharing one [`ChangeKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRegion {
    pub kind: ChangeKind,
    /// 1-based line in the old text where the region starts (or would start).
    pub old_start: usize,
    /// 1-based line in the new text where the region starts (or would start).
    pub new_start: usize,
    /// Region lines without their line terminators.
    pub lines: Vec<String>,
}

/// A maximal stretch of removed and/or added lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChangeBlock {
    pub old_start: usize,
    pub old_lines: usize,
    pub new_start: usize,
    pub new_lines: usize,
}

/// Result of diffing two texts line by line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineDiff {
    pub regions: Vec<DiffRegion>,
    pub changes: Vec<ChangeBlock>,
}

impl LineDiff {
    pub fn compute(old: &str, new: &str) -> Self {
        let keep_final_empty = ends_terminated(old) != ends_terminated(new);
        let old_lines = split_lines(old, keep_final_empty);
        let new_lines = split_lines(new, keep_final_empty);

        let mut regions = Vec::new();
        let mut changes = Vec::new();
        let mut open: Option<ChangeBlock> = None;

        for op in capture_diff_slices(Algorithm::Myers, &old_lines, &new_lines) {
            let (tag, old_range, new_range) = op.as_tag_tuple();

            if tag == DiffTag::Equal {
                if let Some(block) = open.take() {
                    changes.push(block);
                }
                regions.push(region(
                    ChangeKind::Unchanged,
                    old_range.start,
                    new_range.start,
                    &old_lines[old_range],
                ));
                continue;
            }

            let block = open.get_or_insert(ChangeBlock {
                old_start: old_range.start + 1,
                old_lines: 0,
                new_start: new_range.start + 1,
                new_lines: 0,
            });
            block.old_lines += old_range.len();
            block.new_lines += new_range.len();

            if !old_range.is_empty() {
                regions.push(region(
                    ChangeKind::Removed,
                    old_range.start,
                    new_range.start,
                    &old_lines[old_range.clone()],
                ));
            }
            if !new_range.is_empty() {
                regions.push(region(
                    ChangeKind::Added,
                    old_range.start,
                    new_range.start,
                    &new_lines[new_range],
                ));
            }
        }
        if let Some(block) = open {
            changes.push(block);
        }

        LineDiff { regions, changes }
    }

    pub fn is_identical(&self) -> bool {
        self.changes.is_empty()
    }

    /// Renders a unified diff. Equal inputs render as an empty string.
    pub fn unified(old: &str, new: &str) -> String {
        if old == new {
            return String::new();
        }
        TextDiff::from_lines(old, new)
            .unified_diff()
            .context_radius(CONTEXT_RADIUS)
            .header(OLD_HEADER, NEW_HEADER)
            .to_string()
    }
}

fn region(kind: ChangeKind, old_index: usize, new_index: usize, lines: &[&str]) -> DiffRegion {
    DiffRegion {
        kind,
        old_start: old_index + 1,
        new_start: new_index + 1,
        lines: lines.iter().map(|l| l.to_string()).collect(),
    }
}

/// Empty text counts as terminated: it has no unfinished last line.
fn ends_terminated(text: &str) -> bool {
    text.is_empty() || text.ends_with('\n')
}

/// Lines of `text` without `\n` or `\r\n`. The empty piece after a final
/// newline is dropped unless `keep_final_empty` is set.
fn split_lines(text: &str, keep_final_empty: bool) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut lines: Vec<&str> = text
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect();
    if !keep_final_empty && text.ends_with('\n') {
        lines.pop();
    }
    lines
}
