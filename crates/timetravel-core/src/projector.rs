//! Derives the text on screen from the timeline and the live draft.
//!
//! The displayed text is never stored. It is recomputed from
//! `(position, snapshots, live_draft)` whenever someone asks, so it cannot
//! drift out of sync with the state it is derived from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::position::Position;
use crate::snapshot::{Snapshot, DEFAULT_DRAFT};
use crate::timeline::Timeline;

/// The text that should be displayed for a given state.
///
/// Current shows the live draft, `Viewing(i)` shows snapshot `i`.
pub fn displayed_text<'a>(
    position: Position,
    snapshots: &'a [Snapshot],
    live_draft: &'a str,
) -> &'a str {
    match position {
        Position::Current => live_draft,
        Position::Viewing(i) => {
            debug_assert!(i < snapshots.len(), "position {} past history end", i);
            snapshots.get(i).map_or(live_draft, |s| s.code.as_str())
        }
    }
}

/// What an edit does to the position while a snapshot is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DraftPolicy {
    /// Edits update the draft only; the snapshot stays on screen.
    #[default]
    Transient,
    /// An edit returns the position to Current so the edit is visible.
    FollowEdits,
}

impl FromStr for DraftPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "transient" => Ok(DraftPolicy::Transient),
            "follow-edits" | "follow_edits" => Ok(DraftPolicy::FollowEdits),
            other => Err(format!(
                "invalid edit policy '{}', expected transient or follow-edits",
                other
            )),
        }
    }
}

impl fmt::Display for DraftPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftPolicy::Transient => write!(f, "transient"),
            DraftPolicy::FollowEdits => write!(f, "follow-edits"),
        }
    }
}

/// Owner of the live draft buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projector {
    live_draft: String,
}

impl Default for Projector {
    fn default() -> Self {
        Projector::new(DEFAULT_DRAFT)
    }
}

impl Projector {
    pub fn new(initial: impl Into<String>) -> Self {
        Projector {
            live_draft: initial.into(),
        }
    }

    /// Records an editor change. Always lands in the live draft.
    pub fn on_editor_changed(&mut self, text: impl Into<String>) {
        self.live_draft = text.into();
    }

    pub fn live_draft(&self) -> &str {
        &self.live_draft
    }

    /// Starts the draft from the newest snapshot after a load.
    ///
    /// With no snapshots the draft is left alone.
    pub fn seed(&mut self, timeline: &Timeline) {
        if let Some(latest) = timeline.latest() {
            self.live_draft = latest.code.clone();
        }
    }

    /// The text to display for `timeline`'s current position.
    pub fn display<'a>(&'a self, timeline: &'a Timeline) -> &'a str {
        displayed_text(timeline.position(), timeline.snapshots(), &self.live_draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline_of(codes: &[&str]) -> Timeline {
        Timeline::from_snapshots(codes.iter().map(|c| Snapshot::new(*c)).collect())
    }

    #[test]
    fn current_shows_live_draft() {
        let t = timeline_of(&["A"]);
        let p = Projector::new("draft");
        assert_eq!(p.display(&t), "draft");
    }

    #[test]
    fn viewing_shows_snapshot_code() {
        let mut t = timeline_of(&["A", "B"]);
        let p = Projector::new("draft");
        t.go_back();
        assert_eq!(p.display(&t), "B");
        t.go_back();
        assert_eq!(p.display(&t), "A");
        t.go_forward();
        t.go_forward();
        assert_eq!(p.display(&t), "draft");
    }

    #[test]
    fn edits_while_viewing_update_draft_but_not_display() {
        let mut t = timeline_of(&["A"]);
        let mut p = Projector::default();
        t.go_back();
        p.on_editor_changed("typed");
        assert_eq!(p.display(&t), "A");
        assert_eq!(p.live_draft(), "typed");
        t.go_forward();
        assert_eq!(p.display(&t), "typed");
    }

    #[test]
    fn seed_takes_newest_snapshot_or_keeps_default() {
        let mut p = Projector::default();
        p.seed(&Timeline::new());
        assert_eq!(p.live_draft(), DEFAULT_DRAFT);

        p.seed(&timeline_of(&["first", "second"]));
        assert_eq!(p.live_draft(), "second");
    }

    #[test]
    fn draft_policy_parses_both_spellings() {
        assert_eq!(
            "transient".parse::<DraftPolicy>(),
            Ok(DraftPolicy::Transient)
        );
        assert_eq!(
            "Follow-Edits".parse::<DraftPolicy>(),
            Ok(DraftPolicy::FollowEdits)
        );
        assert_eq!(
            "follow_edits".parse::<DraftPolicy>(),
            Ok(DraftPolicy::FollowEdits)
        );
        assert!("sometimes".parse::<DraftPolicy>().is_err());
        assert_eq!(DraftPolicy::FollowEdits.to_string(), "follow-edits");
    }
}
