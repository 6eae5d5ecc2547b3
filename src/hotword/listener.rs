//! Continuous activation-phrase listener.
//!
//! The listener owns its own capture loop, distinct from the controller's
//! one-shot session capture: it restarts automatically on every natural
//! end, matches each utterance against the configured phrase variants, and
//! on a hit hands the microphone to the controller — pausing itself until
//! the session resolves.
//!
//! # Shutdown
//!
//! [`HotwordListener::stop`] sets an atomic stop flag and nudges the
//! capability so a parked capture wakes up; dropping the handle does the
//! same.  The loop exits at the next iteration.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::task::JoinHandle;

use crate::session::{SessionError, VoiceSessionController};
use crate::speech::{CaptureError, SpeechCapture};

// ---------------------------------------------------------------------------
// HotwordListener
// ---------------------------------------------------------------------------

/// Handle to a running hotword-listener task.
///
/// Construct one with [`HotwordListener::start`].
pub struct HotwordListener {
    stop: Arc<AtomicBool>,
    capture: Arc<dyn SpeechCapture>,
    /// `Some` until [`join`](Self::join) consumes the handle.
    task: Option<JoinHandle<()>>,
}

impl HotwordListener {
    /// Spawn the listener loop on the current tokio runtime.
    ///
    /// # Arguments
    ///
    /// * `capture`    — the speech capability the loop listens on.  Must be
    ///   the same microphone the controller uses, so pausing the loop
    ///   guarantees exclusive ownership during a session.
    /// * `controller` — session controller triggered on a phrase match.
    /// * `phrases`    — accepted activation phrase variants; matching is
    ///   case-insensitive substring containment.
    pub fn start(
        capture: Arc<dyn SpeechCapture>,
        controller: Arc<VoiceSessionController>,
        phrases: Vec<String>,
    ) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let phrases: Vec<String> = phrases.iter().map(|p| p.to_lowercase()).collect();

        let task = tokio::spawn({
            let stop = Arc::clone(&stop);
            let capture = Arc::clone(&capture);
            async move {
                log::info!("hotword: listening for {phrases:?}");
                Self::run(stop, capture, controller, phrases).await;
                log::info!("hotword: loop stopped");
            }
        });

        Self {
            stop,
            capture,
            task: Some(task),
        }
    }

    async fn run(
        stop: Arc<AtomicBool>,
        capture: Arc<dyn SpeechCapture>,
        controller: Arc<VoiceSessionController>,
        phrases: Vec<String>,
    ) {
        while !stop.load(Ordering::Relaxed) {
            // One short continuous-recognition cycle; restarts on natural end.
            let utterance = match capture.capture(1).await {
                Ok(alternatives) => alternatives.into_iter().next(),
                Err(CaptureError::NoSpeech) => continue,
                Err(e) => {
                    log::warn!("hotword: capture error: {e}");
                    continue;
                }
            };

            if stop.load(Ordering::Relaxed) {
                break;
            }

            let Some(utterance) = utterance else {
                continue;
            };

            let lowered = utterance.to_lowercase();
            if !phrases.iter().any(|p| lowered.contains(p.as_str())) {
                continue;
            }

            log::info!("hotword: detected in {utterance:?}");

            // Paused: we hold no capture while the session owns the mic.
            match controller.start_session().await {
                Ok(()) => {}
                Err(SessionError::SessionActive) => {
                    log::debug!("hotword: session already active");
                }
                Err(e) => {
                    log::warn!("hotword: could not start session: {e}");
                }
            }

            // A session that parked on AwaitingConfirmation still owns the
            // pending draft; resume only once the controller is idle again.
            controller.wait_until_idle().await;
        }
    }

    /// Stop the loop and wake a parked capture.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
        self.capture.stop();
    }

    /// Wait for the loop task to finish (after [`stop`](Self::stop)).
    pub async fn join(mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for HotwordListener {
    /// Set the stop flag so the loop exits at its next iteration.
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        self.capture.stop();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
