//! The persistence-backed history store.
//!
//! [`HistoryStore`] pairs a [`SnapshotStore`] with a [`Timeline`]. The
//! store is the source of truth: after every write the timeline is reloaded
//! from `list_all`. It is only patched in memory when a write went through
//! but the reload failed. An operation that returns `Err` changed nothing,
//! neither in the store nor in the timeline.

use timetravel_core::{Position, Snapshot, Timeline};

use crate::error::StorageError;
use crate::traits::SnapshotStore;

/// Snapshot history with a navigation pointer, synchronised with a store.
pub struct HistoryStore<S: SnapshotStore> {
    store: S,
    timeline: Timeline,
}

impl<S: SnapshotStore> HistoryStore<S> {
    /// Wraps `store`. Nothing is loaded until [`initialize`](Self::initialize).
    pub fn new(store: S) -> Self {
        HistoryStore {
            store,
            timeline: Timeline::new(),
        }
    }

    /// Opens the store and loads every snapshot, positioned at Current.
    pub fn initialize(&mut self) -> Result<(), StorageError> {
        let snapshots = self
            .store
            .open()
            .and_then(|()| self.store.list_all())
            .inspect_err(|e| tracing::warn!(error = %e, "failed to load snapshot history"))?;

        tracing::info!(snapshots = snapshots.len(), "snapshot history loaded");
        self.timeline.replace(snapshots);
        Ok(())
    }

    /// Saves `code` as a new snapshot and returns to Current.
    ///
    /// An `Err` always means nothing was stored, so retrying is safe. Once
    /// the append has succeeded the save counts as done: if reloading the
    /// history then fails, the snapshot is appended to the loaded timeline
    /// instead and the next successful load reconciles with the store.
    pub fn save(&mut self, code: &str) -> Result<Snapshot, StorageError> {
        let snapshot = Snapshot::new(code);
        let record = self
            .store
            .append(&snapshot)
            .inspect_err(|e| tracing::warn!(error = %e, "failed to save snapshot"))?;

        if self.refresh().is_err() {
            let mut snapshots = self.timeline.snapshots().to_vec();
            snapshots.push(snapshot.clone());
            self.timeline.replace(snapshots);
            tracing::warn!(record = %record, "snapshot saved but history not reloaded");
        }

        tracing::info!(record = %record, history_len = self.timeline.len(), "snapshot saved");
        Ok(snapshot)
    }

    /// Deletes every snapshot and returns to Current.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.store
            .clear()
            .inspect_err(|e| tracing::warn!(error = %e, "failed to clear snapshot history"))?;
        if self.refresh().is_err() {
            self.timeline.replace(Vec::new());
        }

        tracing::info!("snapshot history cleared");
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), StorageError> {
        let snapshots = self
            .store
            .list_all()
            .inspect_err(|e| tracing::warn!(error = %e, "failed to reload snapshot history"))?;
        self.timeline.replace(snapshots);
        Ok(())
    }

    pub fn go_back(&mut self) -> Position {
        self.timeline.go_back()
    }

    pub fn go_forward(&mut self) -> Position {
        self.timeline.go_forward()
    }

    /// Jumps on the `[0, len]` scale; `len` is Current, the rest is ignored.
    pub fn jump_to(&mut self, index: i64) -> Position {
        self.timeline.jump_to(index)
    }

    pub fn jump_to_current(&mut self) -> Position {
        self.timeline.jump_to_current()
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn position(&self) -> Position {
        self.timeline.position()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Releases the underlying store. The loaded timeline stays readable.
    pub fn close(&mut self) {
        self.store.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStore;
    use crate::types::RecordId;

    /// Wraps an [`InMemoryStore`] and fails selected operations on demand.
    #[derive(Default)]
    struct FlakyStore {
        inner: InMemoryStore,
        fail_open: bool,
        fail_append: bool,
        fail_list: bool,
        fail_clear: bool,
    }

    impl SnapshotStore for FlakyStore {
        fn open(&mut self) -> Result<(), StorageError> {
            if self.fail_open {
                return Err(StorageError::unavailable("access denied"));
            }
            self.inner.open()
        }

        fn append(&mut self, snapshot: &Snapshot) -> Result<RecordId, StorageError> {
            if self.fail_append {
                return Err(StorageError::write("disk full"));
            }
            self.inner.append(snapshot)
        }

        fn list_all(&self) -> Result<Vec<Snapshot>, StorageError> {
            if self.fail_list {
                return Err(StorageError::read("corrupt"));
            }
            self.inner.list_all()
        }

        fn clear(&mut self) -> Result<(), StorageError> {
            if self.fail_clear {
                return Err(StorageError::write("locked"));
            }
            self.inner.clear()
        }

        fn close(&mut self) {
            self.inner.close()
        }

        fn is_open(&self) -> bool {
            self.inner.is_open()
        }
    }

    fn loaded(codes: &[&str]) -> HistoryStore<InMemoryStore> {
        let store = InMemoryStore::with_snapshots(codes.iter().map(|c| Snapshot::new(*c)));
        let mut history = HistoryStore::new(store);
        history.initialize().unwrap();
        history
    }

    fn codes<S: SnapshotStore>(history: &HistoryStore<S>) -> Vec<&str> {
        history
            .timeline()
            .snapshots()
            .iter()
            .map(|s| s.code.as_str())
            .collect()
    }

    #[test]
    fn initialize_loads_in_order_and_stays_at_current() {
        let history = loaded(&["A", "B", "C"]);
        assert_eq!(codes(&history), vec!["A", "B", "C"]);
        assert_eq!(history.position(), Position::Current);
    }

    #[test]
    fn initialize_on_empty_store() {
        let history = loaded(&[]);
        assert!(history.timeline().is_empty());
        assert_eq!(history.position(), Position::Current);
    }

    #[test]
    fn save_appends_and_returns_to_current() {
        let mut history = loaded(&["A", "B"]);
        history.go_back();
        history.go_back();
        assert_eq!(history.position(), Position::Viewing(0));

        let saved = history.save("C").unwrap();
        assert_eq!(saved.code, "C");
        assert_eq!(codes(&history), vec!["A", "B", "C"]);
        assert_eq!(history.position(), Position::Current);
        assert_eq!(history.store().list_all().unwrap().len(), 3);
    }

    #[test]
    fn saved_snapshot_sits_at_previous_length() {
        let mut history = loaded(&["A", "B"]);
        let previous_len = history.timeline().len() as i64;
        history.save("fresh").unwrap();
        assert_eq!(history.jump_to(previous_len), Position::Viewing(2));
        assert_eq!(history.timeline().snapshot(2).unwrap().code, "fresh");
    }

    #[test]
    fn clear_resets_history_and_position() {
        let mut history = loaded(&["A", "B", "C"]);
        history.jump_to(1);
        history.clear().unwrap();
        assert!(history.timeline().is_empty());
        assert_eq!(history.position(), Position::Current);
    }

    #[test]
    fn failed_append_leaves_state_untouched() {
        let mut store = FlakyStore::default();
        store.inner = InMemoryStore::with_snapshots(vec![Snapshot::new("A"), Snapshot::new("B")]);
        let mut history = HistoryStore::new(store);
        history.initialize().unwrap();
        history.go_back();
        let before = history.timeline().clone();

        history.store.fail_append = true;
        let err = history.save("C").unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
        assert_eq!(history.timeline(), &before);
        assert_eq!(history.position(), Position::Viewing(1));
    }

    #[test]
    fn failed_reload_after_append_still_reports_the_save() {
        let mut store = FlakyStore::default();
        store.inner = InMemoryStore::with_snapshots(vec![Snapshot::new("A")]);
        let mut history = HistoryStore::new(store);
        history.initialize().unwrap();
        history.go_back();
        history.store.fail_list = true;

        let saved = history.save("B").unwrap();
        assert_eq!(saved.code, "B");
        assert_eq!(codes(&history), vec!["A", "B"]);
        assert_eq!(history.position(), Position::Current);
        assert_eq!(history.store.inner.list_all().unwrap().len(), 2);

        // The store holds exactly what the timeline shows once reloads work.
        history.store.fail_list = false;
        history.initialize().unwrap();
        assert_eq!(codes(&history), vec!["A", "B"]);
    }

    #[test]
    fn failed_clear_leaves_state_untouched() {
        let mut store = FlakyStore::default();
        store.inner = InMemoryStore::with_snapshots(vec![Snapshot::new("A")]);
        let mut history = HistoryStore::new(store);
        history.initialize().unwrap();
        history.go_back();

        history.store.fail_clear = true;
        assert!(matches!(history.clear(), Err(StorageError::Write { .. })));
        assert_eq!(history.timeline().len(), 1);
        assert_eq!(history.position(), Position::Viewing(0));

        // Still usable afterwards.
        history.store.fail_clear = false;
        history.clear().unwrap();
        assert!(history.timeline().is_empty());
    }

    #[test]
    fn failed_reload_after_clear_still_empties_the_timeline() {
        let mut store = FlakyStore::default();
        store.inner = InMemoryStore::with_snapshots(vec![Snapshot::new("A")]);
        let mut history = HistoryStore::new(store);
        history.initialize().unwrap();
        history.store.fail_list = true;

        history.clear().unwrap();
        assert!(history.timeline().is_empty());
        assert_eq!(history.position(), Position::Current);
    }

    #[test]
    fn failed_open_reports_unavailable() {
        let store = FlakyStore {
            fail_open: true,
            ..FlakyStore::default()
        };
        let mut history = HistoryStore::new(store);
        assert!(matches!(history.initialize(), Err(StorageError::Unavailable { .. })));
        assert!(history.timeline().is_empty());
        assert_eq!(history.go_back(), Position::Current);
    }

    #[test]
    fn navigation_matches_timeline_rules() {
        let mut history = loaded(&["A", "B", "C"]);
        assert_eq!(history.jump_to(3), Position::Current);
        assert_eq!(history.jump_to(2), Position::Viewing(2));
        assert_eq!(history.jump_to(5), Position::Viewing(2));
        assert_eq!(history.go_forward(), Position::Current);
        assert_eq!(history.go_forward(), Position::Current);
    }
}
