//! Slider marks and action availability for a timeline.

use serde::Serialize;

use crate::position::Position;
use crate::timeline::Timeline;

/// A labelled stop on the history slider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SliderMark {
    pub value: usize,
    pub label: String,
}

/// Marks for a slider spanning `[0, len]`.
///
/// 0 is "Start", `len` is "Current", everything between is labelled with its
/// index. With no snapshots the only stop is 0, labelled "Current".
pub fn slider_marks(len: usize) -> Vec<SliderMark> {
    let mut marks = Vec::with_capacity(len + 1);
    if len > 0 {
        marks.push(SliderMark {
            value: 0,
            label: "Start".to_string(),
        });
    }
    marks.extend((1..len).map(|i| SliderMark {
        value: i,
        label: i.to_string(),
    }));
    marks.push(SliderMark {
        value: len,
        label: "Current".to_string(),
    });
    marks
}

/// Which actions would currently do something useful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub can_save: bool,
    pub can_clear: bool,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub can_open_diff: bool,
}

impl Controls {
    /// `ready` is whether the backing store finished loading.
    pub fn for_timeline(timeline: &Timeline, ready: bool) -> Self {
        let position = timeline.position();
        let has_history = !timeline.is_empty();
        Controls {
            can_save: ready,
            can_clear: ready && has_history,
            can_go_back: has_history && position != Position::Viewing(0),
            can_go_forward: !position.is_current(),
            can_open_diff: has_history,
        }
    }
}
