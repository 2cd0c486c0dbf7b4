//! PlaygroundService: the single coordinator between HTTP handlers and the
//! core/storage crates.
//!
//! All session logic flows through [`PlaygroundService`]. Handlers are thin
//! wrappers that delegate to these methods. Every state change publishes a
//! freshly derived [`PlaygroundView`] on a watch channel.

use tokio::sync::watch;

use timetravel_core::{
    slider_marks, Comparison, Controls, CoreError, DraftPolicy, LineDiff, Projector, Timeline,
};
use timetravel_storage::{HistoryStore, SnapshotStore};

use crate::error::ApiError;
use crate::schema::diff::DiffView;
use crate::schema::history::{
    ListHistoryResponse, SnapshotDetail, SnapshotSummary, TimelineResponse,
};
use crate::schema::playground::{JumpTarget, PlaygroundView, SaveResponse};

/// A snapshot store chosen at runtime.
pub type DynStore = Box<dyn SnapshotStore + Send>;

/// One editing session: history, live draft and the optional diff viewer.
pub struct PlaygroundService {
    history: HistoryStore<DynStore>,
    projector: Projector,
    policy: DraftPolicy,
    comparison: Option<Comparison>,
    /// Set once the store has loaded; saving and clearing need it.
    ready: bool,
    /// Set by the first editor change; a loaded history no longer overwrites
    /// the draft after that.
    edited: bool,
    views: watch::Sender<PlaygroundView>,
}

impl PlaygroundService {
    /// Creates a session over `store`. Nothing is loaded until
    /// [`initialize`](Self::initialize).
    pub fn new(store: DynStore, policy: DraftPolicy) -> Self {
        let history = HistoryStore::new(store);
        let projector = Projector::default();
        let initial = derive_view(history.timeline(), &projector, false);
        let (views, _) = watch::channel(initial);

        PlaygroundService {
            history,
            projector,
            policy,
            comparison: None,
            ready: false,
            edited: false,
            views,
        }
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Loads the history and marks the session ready.
    ///
    /// On failure the session keeps working with whatever it had, but is not
    /// ready, so save and clear are refused.
    pub fn initialize(&mut self) -> Result<PlaygroundView, ApiError> {
        self.comparison = None;
        match self.history.initialize() {
            Ok(()) => {
                if !self.edited {
                    self.projector.seed(self.history.timeline());
                }
                self.ready = true;
                tracing::info!(
                    history_len = self.history.timeline().len(),
                    policy = %self.policy,
                    "playground ready"
                );
                Ok(self.publish())
            }
            Err(e) => {
                self.ready = false;
                self.publish();
                Err(e.into())
            }
        }
    }

    /// Releases the store. The session stays readable but is no longer ready.
    pub fn close(&mut self) {
        self.history.close();
        self.ready = false;
        self.publish();
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn policy(&self) -> DraftPolicy {
        self.policy
    }

    // -----------------------------------------------------------------------
    // Editing and persistence
    // -----------------------------------------------------------------------

    /// Records an editor change into the live draft.
    pub fn edit(&mut self, text: impl Into<String>) -> PlaygroundView {
        self.projector.on_editor_changed(text);
        self.edited = true;
        if self.policy == DraftPolicy::FollowEdits && !self.history.position().is_current() {
            self.history.jump_to_current();
        }
        self.publish()
    }

    /// Saves the live draft as a new snapshot and returns to Current.
    pub fn save(&mut self) -> Result<SaveResponse, ApiError> {
        self.require_ready("save")?;
        let snapshot = self.history.save(self.projector.live_draft())?;
        let index = self.history.timeline().len().saturating_sub(1);
        let view = self.publish();
        Ok(SaveResponse {
            snapshot: SnapshotDetail::new(index, &snapshot),
            view,
        })
    }

    /// Deletes every snapshot and closes the diff viewer.
    pub fn clear(&mut self) -> Result<PlaygroundView, ApiError> {
        self.require_ready("clear")?;
        self.history.clear()?;
        self.comparison = None;
        Ok(self.publish())
    }

    fn require_ready(&self, action: &str) -> Result<(), ApiError> {
        if self.ready {
            Ok(())
        } else {
            Err(ApiError::Unavailable(format!(
                "cannot {} before the snapshot store has loaded",
                action
            )))
        }
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    pub fn back(&mut self) -> PlaygroundView {
        let position = self.history.go_back();
        tracing::debug!(%position, "navigated back");
        self.publish()
    }

    pub fn forward(&mut self) -> PlaygroundView {
        let position = self.history.go_forward();
        tracing::debug!(%position, "navigated forward");
        self.publish()
    }

    /// Jumps on the `[0, len]` scale. Text without a number and values off
    /// the scale leave the position alone.
    pub fn jump(&mut self, target: &JumpTarget) -> PlaygroundView {
        if let Some(value) = target.resolve() {
            let position = self.history.jump_to(value);
            tracing::debug!(value, %position, "jumped");
        }
        self.publish()
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The current view, derived on demand.
    pub fn view(&self) -> PlaygroundView {
        derive_view(self.history.timeline(), &self.projector, self.ready)
    }

    /// Receives a new view after every state change.
    pub fn subscribe(&self) -> watch::Receiver<PlaygroundView> {
        self.views.subscribe()
    }

    pub fn snapshots(&self) -> ListHistoryResponse {
        let snapshots: Vec<SnapshotSummary> = self
            .history
            .timeline()
            .snapshots()
            .iter()
            .enumerate()
            .map(|(index, s)| SnapshotSummary {
                index,
                timestamp: s.timestamp,
                lines: s.line_count(),
            })
            .collect();
        let total = snapshots.len();
        ListHistoryResponse { snapshots, total }
    }

    pub fn snapshot(&self, index: usize) -> Result<SnapshotDetail, ApiError> {
        let timeline = self.history.timeline();
        let snapshot = timeline
            .snapshot(index)
            .ok_or(CoreError::SnapshotOutOfRange {
                index,
                len: timeline.len(),
            })?;
        Ok(SnapshotDetail::new(index, snapshot))
    }

    pub fn timeline_marks(&self) -> TimelineResponse {
        let timeline = self.history.timeline();
        let len = timeline.len();
        TimelineResponse {
            marks: slider_marks(len),
            value: timeline.position().to_scale(len),
            max: len,
        }
    }

    // -----------------------------------------------------------------------
    // Diff viewer
    // -----------------------------------------------------------------------

    /// Opens the viewer on the newest snapshot against the live draft.
    pub fn open_diff(&mut self) -> Result<DiffView, ApiError> {
        self.comparison = Some(Comparison::open(self.history.timeline())?);
        self.diff_view()
    }

    /// Opens the viewer on two saved snapshots.
    pub fn open_diff_between(&mut self, left: usize, right: usize) -> Result<DiffView, ApiError> {
        self.comparison = Some(Comparison::between(self.history.timeline(), left, right)?);
        self.diff_view()
    }

    pub fn diff_view(&self) -> Result<DiffView, ApiError> {
        let comparison = self.open_comparison()?;
        let timeline = self.history.timeline();
        let (old, new) = comparison.texts(timeline, self.projector.live_draft())?;
        let diff = LineDiff::compute(old, new);

        Ok(DiffView {
            left: comparison.left(),
            right: comparison.right(),
            old_code: old.to_string(),
            new_code: new.to_string(),
            change_index: comparison.change(),
            change_count: diff.changes.len(),
            unified: LineDiff::unified(old, new),
            regions: diff.regions,
            changes: diff.changes,
            can_previous: comparison.left() > 0,
            can_next: comparison.left() + 1 < timeline.len(),
        })
    }

    /// Moves the left side one snapshot older.
    pub fn diff_previous(&mut self) -> Result<DiffView, ApiError> {
        self.open_comparison_mut()?.previous();
        self.diff_view()
    }

    /// Moves the left side one snapshot newer.
    pub fn diff_next(&mut self) -> Result<DiffView, ApiError> {
        let timeline = self.history.timeline();
        if let Some(comparison) = self.comparison.as_mut() {
            comparison.next(timeline);
        }
        self.diff_view()
    }

    pub fn diff_next_change(&mut self) -> Result<DiffView, ApiError> {
        let count = self.diff_view()?.change_count;
        self.open_comparison_mut()?.next_change(count);
        self.diff_view()
    }

    pub fn diff_previous_change(&mut self) -> Result<DiffView, ApiError> {
        self.open_comparison_mut()?.previous_change();
        self.diff_view()
    }

    /// Closes the viewer. Returns whether one was open.
    pub fn close_diff(&mut self) -> bool {
        self.comparison.take().is_some()
    }

    fn open_comparison(&self) -> Result<&Comparison, ApiError> {
        self.comparison
            .as_ref()
            .ok_or_else(|| ApiError::NotFound("diff viewer is not open".to_string()))
    }

    fn open_comparison_mut(&mut self) -> Result<&mut Comparison, ApiError> {
        self.comparison
            .as_mut()
            .ok_or_else(|| ApiError::NotFound("diff viewer is not open".to_string()))
    }

    fn publish(&self) -> PlaygroundView {
        let view = self.view();
        self.views.send_replace(view.clone());
        view
    }
}

fn derive_view(timeline: &Timeline, projector: &Projector, ready: bool) -> PlaygroundView {
    let position = timeline.position();
    let len = timeline.len();
    PlaygroundView {
        displayed_text: projector.display(timeline).to_string(),
        live_draft: projector.live_draft().to_string(),
        position: position.as_index(),
        slider_value: position.to_scale(len),
        history_len: len,
        ready,
        controls: Controls::for_timeline(timeline, ready),
    }
}
