//! Core history model for the time-travel code playground.
//!
//! This crate is pure: it owns no I/O and makes no assumptions about which
//! editor or storage sits around it. Persistence lives in
//! `timetravel-storage`; the HTTP surface lives in `timetravel-server`.
//!
//! # Modules
//!
//! - [`snapshot`]: the immutable saved copy of code plus its timestamp
//! - [`position`]: which version is displayed, and the external slider scale
//! - [`timeline`]: the History + Position navigation state machine
//! - [`projector`]: derives the displayed text from position and live draft
//! - [`diff`]: line-level diff regions and change blocks
//! - [`compare`]: the diff viewer's left/right selection and change cursor
//! - [`controls`]: slider marks and which actions are currently useful
//! - [`error`]: CoreError

pub mod compare;
pub mod controls;
pub mod diff;
pub mod error;
pub mod position;
pub mod projector;
pub mod snapshot;
pub mod timeline;

// Re-export commonly used types
pub use compare::{CompareTarget, Comparison};
pub use controls::{slider_marks, Controls, SliderMark};
pub use diff::{ChangeBlock, ChangeKind, DiffRegion, LineDiff};
pub use error::CoreError;
pub use position::{parse_jump_input, Position};
pub use projector::{displayed_text, DraftPolicy, Projector};
pub use snapshot::{Snapshot, DEFAULT_DRAFT};
pub use timeline::Timeline;
