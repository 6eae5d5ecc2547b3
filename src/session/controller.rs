//! Voice-session controller — drives the capture → parse → match → persist
//! flow.
//!
//! [`VoiceSessionController`] owns the session state machine and the single
//! pending-draft slot.  All collaborators are injected at construction:
//!
//! ```text
//! start_session()
//!   ├─ guard: Idle only, capability supported, permission granted
//!   ├─ capture (bounded by the configured timeout)
//!   │     ├─ nothing recognised ──▶ NoAudioDetected, Idle
//!   │     └─ transcript
//!   │           ├─ parse fails ──▶ ParseFailed, Idle
//!   │           └─ draft
//!   │                 ├─ draft hook (optional post-processing)
//!   │                 ├─ category already resolved ──▶ save, Idle
//!   │                 ├─ confident match ──▶ assign + save, Idle
//!   │                 └─ ambiguous ──▶ AmbiguousCategory, AwaitingConfirmation
//!   ├─ confirm_category(id) ──▶ save, Idle
//!   └─ cancel() ──▶ discard draft, Idle
//! ```
//!
//! Locks guard short critical sections only and are never held across
//! `.await` points.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, Notify};

use crate::config::AppConfig;
use crate::matching::CategoryMatcher;
use crate::model::ExpenseDraft;
use crate::parser::TranscriptParser;
use crate::speech::SpeechCapture;
use crate::store::RecordStore;

use super::events::SessionEvent;
use super::state::SessionState;

// ---------------------------------------------------------------------------
// SessionError
// ---------------------------------------------------------------------------

/// Errors returned by the controller's public operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// `start_session` was called while a session is already active.  The
    /// pending-draft slot holds one draft at most; concurrent sessions are
    /// rejected, never queued over it.
    #[error("a voice session is already active")]
    SessionActive,

    /// The speech capability reports itself unavailable on this platform.
    #[error("speech capture not supported")]
    Unsupported,

    /// The user denied microphone access.
    #[error("microphone permission denied")]
    PermissionDenied,

    /// `confirm_category` was called with no draft pending.
    #[error("no pending expense to categorize")]
    NoPendingDraft,
}

// ---------------------------------------------------------------------------
// Shared handles
// ---------------------------------------------------------------------------

/// Thread-safe handle to the [`CategoryMatcher`], shared between the voice
/// pipeline and the synonym-management surface.
pub type SharedMatcher = Arc<Mutex<CategoryMatcher>>;

/// Optional post-processing hook applied to every parsed draft before
/// category resolution.  A hook that assigns a non-default category makes
/// the controller persist immediately, skipping the matcher.
pub type DraftHook = Box<dyn Fn(&mut ExpenseDraft) + Send + Sync>;

// ---------------------------------------------------------------------------
// VoiceSessionController
// ---------------------------------------------------------------------------

struct ControlState {
    session: SessionState,
    pending: Option<ExpenseDraft>,
    /// Set by `stop_listening` so a manual stop does not surface the
    /// "no audio detected" report.
    stopped_manually: bool,
}

/// The stateful core of the voice pipeline.
pub struct VoiceSessionController {
    store: Arc<dyn RecordStore>,
    capture: Arc<dyn SpeechCapture>,
    matcher: SharedMatcher,
    events: mpsc::Sender<SessionEvent>,
    parser: Mutex<TranscriptParser>,
    state: Mutex<ControlState>,
    draft_hook: Mutex<Option<DraftHook>>,
    idle: Notify,
    max_alternatives: usize,
    capture_timeout: Duration,
    confidence_threshold: f64,
}

impl VoiceSessionController {
    /// Create a controller with explicit collaborators.
    ///
    /// # Arguments
    ///
    /// * `store`   — persistence for expenses and categories.
    /// * `capture` — the speech capability used for session captures.
    /// * `matcher` — shared category matcher (also used by settings UIs).
    /// * `events`  — sink for [`SessionEvent`] notifications.
    /// * `config`  — capture timeout, alternatives, confidence threshold,
    ///   context window size.
    pub fn new(
        store: Arc<dyn RecordStore>,
        capture: Arc<dyn SpeechCapture>,
        matcher: SharedMatcher,
        events: mpsc::Sender<SessionEvent>,
        config: &AppConfig,
    ) -> Self {
        Self {
            store,
            capture,
            matcher,
            events,
            parser: Mutex::new(TranscriptParser::new(config.context.window_size)),
            state: Mutex::new(ControlState {
                session: SessionState::Idle,
                pending: None,
                stopped_manually: false,
            }),
            draft_hook: Mutex::new(None),
            idle: Notify::new(),
            max_alternatives: config.voice.max_alternatives,
            capture_timeout: Duration::from_secs(config.voice.capture_timeout_secs),
            confidence_threshold: config.voice.confidence_threshold,
        }
    }

    /// Install a post-processing hook applied to every parsed draft.
    pub fn set_draft_hook(&self, hook: DraftHook) {
        *self.draft_hook.lock().unwrap() = Some(hook);
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.state.lock().unwrap().session
    }

    /// Snapshot of the pending draft, if any.
    pub fn pending_draft(&self) -> Option<ExpenseDraft> {
        self.state.lock().unwrap().pending.clone()
    }

    /// Resolve once the controller reaches `Idle` — used by the hotword
    /// listener to know when it may take the microphone back.
    pub async fn wait_until_idle(&self) {
        loop {
            let notified = self.idle.notified();
            tokio::pin!(notified);
            // Register for the notification before checking, so a transition
            // between the check and the await cannot be missed.
            notified.as_mut().enable();
            if self.state() == SessionState::Idle {
                return;
            }
            notified.await;
        }
    }

    // -----------------------------------------------------------------------
    // start_session
    // -----------------------------------------------------------------------

    /// Run one capture session to completion.
    ///
    /// Resolves when the session reaches `Idle` (saved, failed, or nothing
    /// heard) or `AwaitingConfirmation` (ambiguous category — the draft
    /// stays pending until [`confirm_category`](Self::confirm_category) or
    /// [`cancel`](Self::cancel)).
    ///
    /// # Errors
    ///
    /// * [`SessionError::SessionActive`] — a session is already running; the
    ///   call changes nothing.
    /// * [`SessionError::Unsupported`] / [`SessionError::PermissionDenied`] —
    ///   capability checks failed; an error event was emitted and the state
    ///   is back to `Idle`.
    pub async fn start_session(&self) -> Result<(), SessionError> {
        if !self.capture.is_supported() {
            log::error!("session: speech capture not supported");
            self.emit(SessionEvent::Error {
                message: "El reconocimiento de voz no está disponible en este dispositivo.".into(),
            })
            .await;
            return Err(SessionError::Unsupported);
        }

        // Claim the single session slot before any await point.
        {
            let mut st = self.state.lock().unwrap();
            if st.session != SessionState::Idle {
                log::warn!(
                    "session: start rejected while {}",
                    st.session.label()
                );
                return Err(SessionError::SessionActive);
            }
            st.session = SessionState::Listening;
            st.pending = None;
            st.stopped_manually = false;
        }

        if !self.capture.request_permission().await {
            log::error!("session: microphone permission denied");
            self.set_idle(|_| {});
            self.emit(SessionEvent::Error {
                message: "Permiso de micrófono denegado.".into(),
            })
            .await;
            return Err(SessionError::PermissionDenied);
        }

        log::info!("session: listening");
        self.emit(SessionEvent::ListeningStarted).await;

        // One-shot capture, force-stopped by us when the budget elapses.
        let outcome = match tokio::time::timeout(
            self.capture_timeout,
            self.capture.capture(self.max_alternatives),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => {
                log::warn!(
                    "session: capture exceeded {}s budget, stopping",
                    self.capture_timeout.as_secs()
                );
                self.capture.stop();
                Ok(Vec::new())
            }
        };

        let alternatives = match outcome {
            Ok(alternatives) => alternatives,
            Err(e) => {
                log::error!("session: capture error: {e}");
                self.set_idle(|_| {});
                self.emit(SessionEvent::Error {
                    message: format!("{}. Intenta nuevamente.", e.user_message()),
                })
                .await;
                return Ok(());
            }
        };

        let Some(transcript) = alternatives.first() else {
            let manual = {
                let st = self.state.lock().unwrap();
                st.stopped_manually
            };
            self.set_idle(|_| {});
            if manual {
                log::info!("session: stopped manually, nothing recognised");
            } else {
                log::info!("session: ended with no audio");
                self.emit(SessionEvent::NoAudioDetected).await;
            }
            return Ok(());
        };

        log::debug!("session: transcript {transcript:?}");
        for (i, alt) in alternatives.iter().enumerate().skip(1) {
            log::debug!("session: alternative {i}: {alt:?}");
        }

        let draft = {
            let mut parser = self.parser.lock().unwrap();
            parser.parse(transcript)
        };

        let Some(mut draft) = draft else {
            log::info!("session: transcript is not a valid expense command");
            self.set_idle(|_| {});
            self.emit(SessionEvent::ParseFailed).await;
            return Ok(());
        };

        // Formal extension point for result post-processing.
        if let Some(hook) = self.draft_hook.lock().unwrap().as_ref() {
            hook(&mut draft);
        }

        self.resolve_category_and_save(draft).await;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Category resolution
    // -----------------------------------------------------------------------

    /// Decide the draft's category: save directly, or hold it pending the
    /// user's confirmation.
    async fn resolve_category_and_save(&self, mut draft: ExpenseDraft) {
        // A hook (or upstream enhancement) may have assigned a category
        // already — that assignment carries implicit high confidence.
        if !draft.category_unresolved() {
            self.save_expense(draft).await;
            return;
        }

        let categories = match self.store.get_categories().await {
            Ok(categories) => categories,
            Err(e) => {
                log::error!("session: could not load categories: {e}");
                self.set_idle(|_| {});
                self.emit(SessionEvent::Error {
                    message: "No se pudieron cargar las categorías.".into(),
                })
                .await;
                return;
            }
        };

        let result = {
            let matcher = self.matcher.lock().unwrap();
            matcher.score_text(&draft.description, &categories)
        };

        log::debug!(
            "session: match {} at {:.2} with {} candidate(s)",
            result.category_id,
            result.confidence,
            result.candidates.len()
        );

        if result.confidence >= self.confidence_threshold || result.candidates.len() <= 1 {
            draft.category_id = result.category_id;
            self.save_expense(draft).await;
        } else {
            {
                let mut st = self.state.lock().unwrap();
                st.pending = Some(draft.clone());
                st.session = SessionState::AwaitingConfirmation;
            }
            log::info!("session: ambiguous category, awaiting confirmation");
            self.emit(SessionEvent::AmbiguousCategory {
                draft,
                candidates: result.candidates,
            })
            .await;
        }
    }

    // -----------------------------------------------------------------------
    // Confirmation / cancellation
    // -----------------------------------------------------------------------

    /// Assign `category_id` to the pending draft and persist it.
    ///
    /// Only meaningful in `AwaitingConfirmation`; calling with no pending
    /// draft emits a user error and changes nothing.
    pub async fn confirm_category(&self, category_id: &str) -> Result<(), SessionError> {
        let draft = {
            let mut st = self.state.lock().unwrap();
            st.pending.take()
        };

        let Some(mut draft) = draft else {
            log::warn!("session: confirm_category with no pending draft");
            self.emit(SessionEvent::Error {
                message: "No hay un gasto pendiente para categorizar.".into(),
            })
            .await;
            return Err(SessionError::NoPendingDraft);
        };

        draft.category_id = category_id.to_string();
        self.save_expense(draft).await;
        Ok(())
    }

    /// Discard the pending draft without persisting and return to `Idle`.
    ///
    /// While `Listening` the capture is ended early instead and the normal
    /// completion path lands on `Idle`, so the in-flight session never
    /// observes a state change underneath it.
    pub fn cancel(&self) {
        let stop_capture = {
            let mut st = self.state.lock().unwrap();
            if st.pending.take().is_some() {
                log::info!("session: pending draft discarded");
            }
            if st.session == SessionState::Listening {
                st.stopped_manually = true;
                true
            } else {
                st.session = SessionState::Idle;
                false
            }
        };

        if stop_capture {
            self.capture.stop();
        } else {
            self.idle.notify_waiters();
        }
    }

    /// Ask the capability to end the current capture early.
    ///
    /// Only effective while `Listening`.  The draft (if any later results)
    /// is handled by the normal completion path; a manual stop is not an
    /// error, so the no-audio report is suppressed.
    pub fn stop_listening(&self) {
        let should_stop = {
            let mut st = self.state.lock().unwrap();
            if st.session == SessionState::Listening {
                st.stopped_manually = true;
                true
            } else {
                false
            }
        };

        if should_stop {
            log::info!("session: stopping capture manually");
            self.capture.stop();
        }
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Persist `draft` and notify collaborators.
    ///
    /// On failure the draft is kept pending (state
    /// `AwaitingConfirmation`) so the user can retry via
    /// `confirm_category` or discard via `cancel`.
    async fn save_expense(&self, draft: ExpenseDraft) {
        match self.store.add_expense(draft.clone()).await {
            Ok(expense) => {
                let category_name = self
                    .store
                    .get_category_by_id(&expense.category_id)
                    .await
                    .ok()
                    .flatten()
                    .map(|c| c.name)
                    .unwrap_or_else(|| "categoría".to_string());

                log::info!(
                    "session: saved {} for {:?} in {category_name}",
                    expense.amount,
                    expense.description
                );

                self.set_idle(|st| {
                    st.pending = None;
                });
                self.emit(SessionEvent::RecognitionComplete).await;
                self.emit(SessionEvent::ExpenseSaved {
                    amount: expense.amount,
                    description: expense.description,
                    category_name,
                })
                .await;
            }
            Err(e) => {
                log::error!("session: failed to save expense: {e}");
                {
                    let mut st = self.state.lock().unwrap();
                    st.pending = Some(draft);
                    st.session = SessionState::AwaitingConfirmation;
                }
                self.emit(SessionEvent::Error {
                    message: "No se pudo guardar el gasto.".into(),
                })
                .await;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Transition to `Idle` (running `f` inside the same critical section)
    /// and wake anyone waiting in [`wait_until_idle`](Self::wait_until_idle).
    fn set_idle(&self, f: impl FnOnce(&mut ControlState)) {
        {
            let mut st = self.state.lock().unwrap();
            f(&mut st);
            st.session = SessionState::Idle;
        }
        self.idle.notify_waiters();
    }

    async fn emit(&self, event: SessionEvent) {
        if self.events.send(event).await.is_err() {
            log::debug!("session: event receiver dropped");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tempfile::tempdir;

    use crate::matching::SynonymLexicon;
    use crate::model::{Category, Expense, CATCH_ALL_CATEGORY_ID};
    use crate::speech::{CaptureError, ScriptedCapture};
    use crate::store::{MemoryStore, StoreError};

    // -----------------------------------------------------------------------
    // Test doubles and helpers
    // -----------------------------------------------------------------------

    /// Store whose writes always fail; category reads succeed.
    struct FailingStore(MemoryStore);

    #[async_trait]
    impl RecordStore for FailingStore {
        async fn add_expense(&self, _draft: ExpenseDraft) -> Result<Expense, StoreError> {
            Err(StoreError::Backend("disk full".into()))
        }

        async fn get_categories(&self) -> Result<Vec<Category>, StoreError> {
            self.0.get_categories().await
        }

        async fn get_category_by_id(&self, id: &str) -> Result<Option<Category>, StoreError> {
            self.0.get_category_by_id(id).await
        }
    }

    struct Harness {
        controller: Arc<VoiceSessionController>,
        store: Arc<MemoryStore>,
        events: mpsc::Receiver<SessionEvent>,
        _dir: tempfile::TempDir,
    }

    fn shared_matcher(dir: &tempfile::TempDir) -> SharedMatcher {
        let lexicon = SynonymLexicon::load_from(dir.path().join("syn.json"));
        Arc::new(Mutex::new(CategoryMatcher::new(lexicon)))
    }

    fn harness(capture: ScriptedCapture) -> Harness {
        harness_with_store(capture, Arc::new(MemoryStore::new()))
    }

    fn harness_with_store(capture: ScriptedCapture, store: Arc<MemoryStore>) -> Harness {
        let dir = tempdir().expect("temp dir");
        let (tx, rx) = mpsc::channel(32);
        let controller = Arc::new(VoiceSessionController::new(
            Arc::clone(&store) as Arc<dyn RecordStore>,
            Arc::new(capture),
            shared_matcher(&dir),
            tx,
            &AppConfig::default(),
        ));
        Harness {
            controller,
            store,
            events: rx,
            _dir: dir,
        }
    }

    async fn next_event(events: &mut mpsc::Receiver<SessionEvent>) -> SessionEvent {
        events.recv().await.expect("event channel open")
    }

    // -----------------------------------------------------------------------
    // Happy path
    // -----------------------------------------------------------------------

    /// Confident match: the expense is saved without confirmation and the
    /// pending slot ends empty.
    #[tokio::test]
    async fn confident_match_auto_saves() {
        let mut h = harness(ScriptedCapture::with_transcripts(&["gasté 1500 en sushi"]));

        h.controller.start_session().await.unwrap();

        assert_eq!(next_event(&mut h.events).await, SessionEvent::ListeningStarted);
        assert_eq!(
            next_event(&mut h.events).await,
            SessionEvent::RecognitionComplete
        );
        match next_event(&mut h.events).await {
            SessionEvent::ExpenseSaved {
                amount,
                description,
                category_name,
            } => {
                assert_eq!(amount, 1500.0);
                assert!(description.to_lowercase().contains("sushi"));
                assert_eq!(category_name, "Comida");
            }
            other => panic!("expected ExpenseSaved, got {other:?}"),
        }

        let expenses = h.store.expenses();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].category_id, "1");
        assert!(h.controller.pending_draft().is_none());
        assert_eq!(h.controller.state(), SessionState::Idle);
    }

    /// A draft hook that assigns a category skips the matcher entirely.
    #[tokio::test]
    async fn draft_hook_assignment_saves_immediately() {
        let h = harness(ScriptedCapture::with_transcripts(&["gasté 400 en algo raro"]));
        h.controller
            .set_draft_hook(Box::new(|draft| {
                draft.category_id = "5".to_string();
            }));

        h.controller.start_session().await.unwrap();

        let expenses = h.store.expenses();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].category_id, "5");
    }

    // -----------------------------------------------------------------------
    // Ambiguous flow
    // -----------------------------------------------------------------------

    fn ambiguous_store() -> Arc<MemoryStore> {
        // Two near-identical names partial-match the token "gimnasi" with
        // confidence ≈ 0.47 each — below the auto threshold, above the
        // candidate threshold.
        Arc::new(MemoryStore::with_categories(vec![
            Category {
                id: "10".into(),
                name: "Gimnasio".into(),
                color: "#111111".into(),
                icon: "dumbbell".into(),
            },
            Category {
                id: "11".into(),
                name: "Gimnasia".into(),
                color: "#222222".into(),
                icon: "medal".into(),
            },
            Category {
                id: CATCH_ALL_CATEGORY_ID.into(),
                name: "Otros".into(),
                color: "#8A817C".into(),
                icon: "more-horizontal".into(),
            },
        ]))
    }

    /// Sub-threshold near-tie: the controller parks the draft and emits the
    /// ranked candidates.
    #[tokio::test]
    async fn ambiguous_match_awaits_confirmation() {
        let mut h = harness_with_store(
            ScriptedCapture::with_transcripts(&["gasté 300 en gimnasi"]),
            ambiguous_store(),
        );

        h.controller.start_session().await.unwrap();

        assert_eq!(next_event(&mut h.events).await, SessionEvent::ListeningStarted);
        match next_event(&mut h.events).await {
            SessionEvent::AmbiguousCategory { draft, candidates } => {
                assert_eq!(draft.amount, 300.0);
                assert_eq!(candidates.len(), 2);
                assert!(candidates[0].confidence >= candidates[1].confidence);
            }
            other => panic!("expected AmbiguousCategory, got {other:?}"),
        }

        assert_eq!(h.controller.state(), SessionState::AwaitingConfirmation);
        assert!(h.controller.pending_draft().is_some());
        assert!(h.store.expenses().is_empty());
    }

    /// Confirming resolves the pending draft and persists it.
    #[tokio::test]
    async fn confirm_category_saves_pending_draft() {
        let h = harness_with_store(
            ScriptedCapture::with_transcripts(&["gasté 300 en gimnasi"]),
            ambiguous_store(),
        );

        h.controller.start_session().await.unwrap();
        h.controller.confirm_category("11").await.unwrap();

        let expenses = h.store.expenses();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].category_id, "11");
        assert!(h.controller.pending_draft().is_none());
        assert_eq!(h.controller.state(), SessionState::Idle);
    }

    /// Cancelling discards the draft without touching the store.
    #[tokio::test]
    async fn cancel_discards_pending_draft() {
        let h = harness_with_store(
            ScriptedCapture::with_transcripts(&["gasté 300 en gimnasi"]),
            ambiguous_store(),
        );

        h.controller.start_session().await.unwrap();
        assert_eq!(h.controller.state(), SessionState::AwaitingConfirmation);

        h.controller.cancel();

        assert!(h.controller.pending_draft().is_none());
        assert_eq!(h.controller.state(), SessionState::Idle);
        assert!(h.store.expenses().is_empty());
    }

    /// Confirming with nothing pending is a user error, not a crash.
    #[tokio::test]
    async fn confirm_without_pending_draft_reports_error() {
        let mut h = harness(ScriptedCapture::with_transcripts(&[]));

        let result = h.controller.confirm_category("1").await;
        assert_eq!(result, Err(SessionError::NoPendingDraft));
        assert!(matches!(
            next_event(&mut h.events).await,
            SessionEvent::Error { .. }
        ));
        assert_eq!(h.controller.state(), SessionState::Idle);
    }

    // -----------------------------------------------------------------------
    // Failure paths
    // -----------------------------------------------------------------------

    /// Unsupported capability: error event, no state change.
    #[tokio::test]
    async fn unsupported_capability_fails_fast() {
        let mut h = harness(ScriptedCapture::unsupported());

        let result = h.controller.start_session().await;
        assert_eq!(result, Err(SessionError::Unsupported));
        assert!(matches!(
            next_event(&mut h.events).await,
            SessionEvent::Error { .. }
        ));
        assert_eq!(h.controller.state(), SessionState::Idle);
    }

    /// Denied microphone permission: error event, back to Idle.
    #[tokio::test]
    async fn denied_permission_fails_fast() {
        let h = harness(ScriptedCapture::permission_denied());

        let result = h.controller.start_session().await;
        assert_eq!(result, Err(SessionError::PermissionDenied));
        assert_eq!(h.controller.state(), SessionState::Idle);
    }

    /// A transcript with no extractable amount reports a parse failure.
    #[tokio::test]
    async fn unparseable_transcript_reports_parse_failed() {
        let mut h = harness(ScriptedCapture::with_transcripts(&["hola cómo estás"]));

        h.controller.start_session().await.unwrap();

        assert_eq!(next_event(&mut h.events).await, SessionEvent::ListeningStarted);
        assert_eq!(next_event(&mut h.events).await, SessionEvent::ParseFailed);
        assert_eq!(h.controller.state(), SessionState::Idle);
        assert!(h.store.expenses().is_empty());
    }

    /// A capture error surfaces the Spanish message and returns to Idle.
    #[tokio::test]
    async fn capture_error_surfaces_user_message() {
        let mut h = harness(ScriptedCapture::new(vec![Err(CaptureError::Network)]));

        h.controller.start_session().await.unwrap();

        assert_eq!(next_event(&mut h.events).await, SessionEvent::ListeningStarted);
        match next_event(&mut h.events).await {
            SessionEvent::Error { message } => {
                assert!(message.contains("red"), "message: {message}");
            }
            other => panic!("expected Error, got {other:?}"),
        }
        assert_eq!(h.controller.state(), SessionState::Idle);
    }

    /// Store failure keeps the draft pending so the user can retry.
    #[tokio::test]
    async fn persistence_failure_keeps_draft_pending() {
        let dir = tempdir().expect("temp dir");
        let (tx, mut rx) = mpsc::channel(32);
        let controller = VoiceSessionController::new(
            Arc::new(FailingStore(MemoryStore::new())),
            Arc::new(ScriptedCapture::with_transcripts(&["gasté 1500 en sushi"])),
            shared_matcher(&dir),
            tx,
            &AppConfig::default(),
        );

        controller.start_session().await.unwrap();

        assert_eq!(next_event(&mut rx).await, SessionEvent::ListeningStarted);
        assert!(matches!(
            next_event(&mut rx).await,
            SessionEvent::Error { .. }
        ));
        assert!(controller.pending_draft().is_some());
        assert_eq!(controller.state(), SessionState::AwaitingConfirmation);
    }

    // -----------------------------------------------------------------------
    // Concurrency and cancellation
    // -----------------------------------------------------------------------

    /// A second `start_session` while one is listening is rejected.
    #[tokio::test]
    async fn concurrent_start_is_rejected() {
        let h = harness(ScriptedCapture::with_transcripts(&[]));
        let controller = Arc::clone(&h.controller);

        let first = tokio::spawn({
            let controller = Arc::clone(&controller);
            async move { controller.start_session().await }
        });
        // Let the first session claim the slot and park on the capture.
        tokio::task::yield_now().await;

        assert_eq!(
            controller.start_session().await,
            Err(SessionError::SessionActive)
        );

        controller.stop_listening();
        first.await.unwrap().unwrap();
        assert_eq!(controller.state(), SessionState::Idle);
    }

    /// A manual stop with nothing recognised suppresses the no-audio report.
    #[tokio::test]
    async fn manual_stop_suppresses_no_audio_report() {
        let mut h = harness(ScriptedCapture::with_transcripts(&[]));
        let controller = Arc::clone(&h.controller);

        let session = tokio::spawn({
            let controller = Arc::clone(&controller);
            async move { controller.start_session().await }
        });
        assert_eq!(next_event(&mut h.events).await, SessionEvent::ListeningStarted);

        controller.stop_listening();
        session.await.unwrap().unwrap();

        assert_eq!(controller.state(), SessionState::Idle);
        // No further events: the cancellation is not an error.
        assert!(h.events.try_recv().is_err());
    }

    /// `stop_listening` outside `Listening` is a no-op.
    #[tokio::test]
    async fn stop_listening_while_idle_is_noop() {
        let h = harness(ScriptedCapture::with_transcripts(&[]));
        h.controller.stop_listening();
        assert_eq!(h.controller.state(), SessionState::Idle);
    }

    /// The capture timeout produces the same path as "no audio".
    #[tokio::test(start_paused = true)]
    async fn capture_timeout_reports_no_audio() {
        // Empty script: the capture parks forever; only the timeout ends it.
        let mut h = harness(ScriptedCapture::with_transcripts(&[]));

        h.controller.start_session().await.unwrap();

        assert_eq!(next_event(&mut h.events).await, SessionEvent::ListeningStarted);
        assert_eq!(next_event(&mut h.events).await, SessionEvent::NoAudioDetected);
        assert_eq!(h.controller.state(), SessionState::Idle);
    }

    /// `wait_until_idle` resolves immediately when already idle, and after
    /// a session completes otherwise.
    #[tokio::test]
    async fn wait_until_idle_tracks_session_lifecycle() {
        let h = harness(ScriptedCapture::with_transcripts(&["gasté 200 en taxi"]));

        // Already idle: resolves at once.
        h.controller.wait_until_idle().await;

        h.controller.start_session().await.unwrap();
        h.controller.wait_until_idle().await;
        assert_eq!(h.store.expenses().len(), 1);
    }
}
