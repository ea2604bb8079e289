//! Analysis Session: at most one live analysis attempt, with streaming
//! progress and stale-response protection.
//!
//! The state machine itself is synchronous and pure; [`SessionController`]
//! wraps it for the async world, issuing the backend request and pumping the
//! progress channel. Every resolution and progress event is checked against
//! the generation that was live when its request was issued, so a superseded
//! attempt can never overwrite a newer one.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::backend::{Backend, ProgressReceiver};
use crate::errors::AppError;
use crate::filter;
use crate::models::progress::ProgressEvent;
use crate::models::record::AnalysisRecord;

/// Identifies one session attempt. Strictly increasing across `start` calls.
pub type Generation = u64;

/// Lifecycle of the in-flight analysis request.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// No request outstanding.
    Idle,
    /// Request issued; no progress seen yet.
    Requesting { use_cache: bool },
    /// At least one progress event received for the live request.
    Streaming { use_cache: bool },
    /// The live request resolved with a full replacement result set.
    Success(Vec<AnalysisRecord>),
    /// The live request failed; the message is rendered in place of results.
    Failed(String),
}

/// State machine coordinating a single in-flight analysis request.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    generation: Generation,
    state: SessionState,
    latest_progress: Option<ProgressEvent>,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Idle
    }
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The newest progress event observed for the live attempt, if any.
    pub fn latest_progress(&self) -> Option<&ProgressEvent> {
        self.latest_progress.as_ref()
    }

    /// Begin a new attempt, superseding whatever came before.
    ///
    /// Permitted in any state; starting over a pending request is a refresh.
    /// The prior request is not aborted, its eventual resolution just fails
    /// the generation check. Returns the generation tag the caller must
    /// attach to the request it issues.
    pub fn start(&mut self, use_cache: bool) -> Generation {
        self.generation += 1;
        self.latest_progress = None;
        self.state = SessionState::Requesting { use_cache };
        debug!(generation = self.generation, use_cache, "analysis started");
        self.generation
    }

    /// Apply a progress event observed for `generation`.
    ///
    /// Only the newest event per attempt is retained. The first event moves
    /// the session from `Requesting` to `Streaming`.
    pub fn on_progress(&mut self, generation: Generation, event: ProgressEvent) {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "discarding progress for superseded attempt"
            );
            return;
        }
        match self.state {
            SessionState::Requesting { use_cache } => {
                self.state = SessionState::Streaming { use_cache };
            }
            SessionState::Streaming { .. } => {}
            // No live request to attach progress to.
            SessionState::Idle | SessionState::Success(_) | SessionState::Failed(_) => return,
        }
        self.latest_progress = Some(event);
    }

    /// Apply the resolution of the request issued at `generation`.
    ///
    /// Discarded silently when the generation no longer matches or the live
    /// attempt has already resolved.
    pub fn on_complete(
        &mut self,
        generation: Generation,
        outcome: Result<Vec<AnalysisRecord>, AppError>,
    ) {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "discarding resolution for superseded attempt"
            );
            return;
        }
        if !matches!(
            self.state,
            SessionState::Requesting { .. } | SessionState::Streaming { .. }
        ) {
            return;
        }
        self.latest_progress = None;
        self.state = match outcome {
            Ok(records) => {
                info!(generation, count = records.len(), "analysis complete");
                SessionState::Success(records)
            }
            Err(err) => {
                warn!(generation, %err, "analysis failed");
                SessionState::Failed(err.to_string())
            }
        };
    }
}

/// Async shell around [`AnalysisSession`]: owns the backend handle, issues
/// the one outstanding request per attempt, and consumes the progress stream.
pub struct SessionController {
    backend: Arc<dyn Backend>,
    session: Mutex<AnalysisSession>,
}

impl SessionController {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        SessionController {
            backend,
            session: Mutex::new(AnalysisSession::new()),
        }
    }

    /// Current state snapshot for display.
    pub async fn state(&self) -> SessionState {
        self.session.lock().await.state().clone()
    }

    pub async fn generation(&self) -> Generation {
        self.session.lock().await.generation()
    }

    pub async fn latest_progress(&self) -> Option<ProgressEvent> {
        self.session.lock().await.latest_progress().cloned()
    }

    /// Start (or refresh) the analysis.
    ///
    /// Issues exactly one backend request tagged with the new generation and
    /// applies its outcome, unless a later refresh supersedes this attempt
    /// before it resolves. `use_cache` is passed through to the backend
    /// unchanged. The session lock is not held across the await, so a
    /// concurrent refresh proceeds immediately.
    pub async fn refresh(&self, use_cache: bool) {
        let generation = self.session.lock().await.start(use_cache);
        let outcome = self.backend.get_analysed_results(use_cache).await;
        self.session.lock().await.on_complete(generation, outcome);
    }

    /// Consume `downloading-symbol` events until the channel closes, applying
    /// each to whichever attempt is live when it arrives.
    pub async fn run_progress_pump(&self, mut rx: ProgressReceiver) {
        while let Some(event) = rx.recv().await {
            let mut session = self.session.lock().await;
            let generation = session.generation();
            session.on_progress(generation, event);
        }
    }

    /// Filtered view of the current result set. `None` unless the session
    /// has a realized `Success` state.
    pub async fn filtered_results(&self, needle: &str) -> Option<Vec<AnalysisRecord>> {
        match self.session.lock().await.state() {
            SessionState::Success(records) => Some(filter::filter_records(records, needle)),
            _ => None,
        }
    }
}
