//! The History + Position state machine.
//!
//! [`Timeline`] holds the ordered snapshot list and the current
//! [`Position`]. States are `Current` and `Viewing(i)`; there is no terminal
//! state. Every navigation call is total: inputs that do not describe a
//! valid move leave the state unchanged.
//!
//! Transition table (`len` = number of snapshots):
//!
//! | from          | go_back             | go_forward             |
//! |---------------|---------------------|------------------------|
//! | Current       | Viewing(len-1)¹     | Current                |
//! | Viewing(0)    | Viewing(0)          | Viewing(1) or Current² |
//! | Viewing(i>0)  | Viewing(i-1)        | Viewing(i+1) or Current² |
//!
//! ¹ stays Current when the history is empty.
//! ² Current when `i == len-1`.

use crate::position::Position;
use crate::snapshot::Snapshot;

/// Ordered snapshots plus the pointer into them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    snapshots: Vec<Snapshot>,
    position: Position,
}

impl Timeline {
    /// An empty timeline positioned at Current.
    pub fn new() -> Self {
        Timeline::default()
    }

    /// A timeline over `snapshots` (oldest first), positioned at Current.
    pub fn from_snapshots(snapshots: Vec<Snapshot>) -> Self {
        Timeline {
            snapshots,
            position: Position::Current,
        }
    }

    /// Replaces the snapshot list with a fresh copy from storage.
    ///
    /// Order is taken as given. Position always resets to Current, which
    /// is also what keeps it valid when the list shrinks.
    pub fn replace(&mut self, snapshots: Vec<Snapshot>) {
        self.snapshots = snapshots;
        self.position = Position::Current;
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn snapshot(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// The most recently saved snapshot.
    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Steps one version older.
    ///
    /// From Current this enters the newest snapshot. At the oldest snapshot,
    /// or with an empty history, nothing changes.
    pub fn go_back(&mut self) -> Position {
        self.position = match self.position {
            Position::Current => match self.snapshots.len() {
                0 => Position::Current,
                len => Position::Viewing(len - 1),
            },
            Position::Viewing(0) => Position::Viewing(0),
            Position::Viewing(i) => Position::Viewing(i - 1),
        };
        self.position
    }

    /// Steps one version newer.
    ///
    /// Leaving the newest snapshot returns to Current; at Current nothing
    /// changes.
    pub fn go_forward(&mut self) -> Position {
        self.position = match self.position {
            Position::Current => Position::Current,
            Position::Viewing(i) if i + 1 < self.snapshots.len() => Position::Viewing(i + 1),
            Position::Viewing(_) => Position::Current,
        };
        self.position
    }

    /// Jumps to a value on the `[0, len]` scale, where `len` is Current.
    ///
    /// Anything outside the scale is ignored.
    pub fn jump_to(&mut self, index: i64) -> Position {
        if let Some(position) = Position::from_scale(index, self.snapshots.len()) {
            self.position = position;
        }
        self.position
    }

    pub fn jump_to_current(&mut self) -> Position {
        self.position = Position::Current;
        self.position
    }
}
