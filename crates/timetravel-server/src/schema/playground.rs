//! Playground view, editor, save and navigation request/response types.

use serde::{Deserialize, Serialize};

use timetravel_core::{parse_jump_input, Controls};

use crate::schema::history::SnapshotDetail;

/// Everything a client needs to render the editor and its controls.
///
/// Always derived from the session state on demand; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaygroundView {
    /// Text the editor should show right now.
    pub displayed_text: String,
    /// The live, possibly unsaved draft.
    pub live_draft: String,
    /// -1 for Current, otherwise the snapshot index.
    pub position: i64,
    /// Position on the `[0, history_len]` slider scale.
    pub slider_value: usize,
    pub history_len: usize,
    /// Whether the snapshot store finished loading.
    pub ready: bool,
    pub controls: Controls,
}

/// Editor change notification.
#[derive(Debug, Clone, Deserialize)]
pub struct EditRequest {
    pub text: String,
}

/// Where to jump, on the `[0, history_len]` scale.
#[derive(Debug, Clone, Deserialize)]
pub struct JumpRequest {
    pub target: JumpTarget,
}

/// A numeric slider value or free-typed text from a number box.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum JumpTarget {
    Index(i64),
    /// Any other JSON number: fractional, or too large for `i64`.
    Number(serde_json::Number),
    Text(String),
}

impl JumpTarget {
    /// The scale value to jump to, or `None` if the text holds no number.
    ///
    /// Fractions are truncated like the leading-digits rule for text, and
    /// out-of-range magnitudes saturate so they land off the scale.
    pub fn resolve(&self) -> Option<i64> {
        match self {
            JumpTarget::Index(i) => Some(*i),
            JumpTarget::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            JumpTarget::Text(text) => parse_jump_input(text),
        }
    }
}

/// Response from saving the live draft.
#[derive(Debug, Clone, Serialize)]
pub struct SaveResponse {
    /// The snapshot that was written.
    pub snapshot: SnapshotDetail,
    pub view: PlaygroundView,
}
