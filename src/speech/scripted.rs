//! Scripted speech capture for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Notify;

use super::{CaptureError, SpeechCapture};

// ---------------------------------------------------------------------------
// ScriptedCapture
// ---------------------------------------------------------------------------

/// A test double that replays pre-configured capture outcomes in order.
///
/// Once the script is exhausted, `capture` parks until [`stop`] is called
/// and then resolves with an empty transcript list — modelling an open
/// microphone with nothing being said.
///
/// # Example
///
/// ```rust,ignore
/// let capture = ScriptedCapture::with_transcripts(&["gasté 1500 en sushi"]);
/// let alternatives = capture.capture(5).await.unwrap();
/// assert_eq!(alternatives[0], "gasté 1500 en sushi");
/// ```
///
/// [`stop`]: SpeechCapture::stop
pub struct ScriptedCapture {
    supported: bool,
    permission: bool,
    outcomes: Mutex<VecDeque<Result<Vec<String>, CaptureError>>>,
    stopped: Notify,
}

impl ScriptedCapture {
    /// A capture that replays `outcomes` in order.
    pub fn new(outcomes: Vec<Result<Vec<String>, CaptureError>>) -> Self {
        Self {
            supported: true,
            permission: true,
            outcomes: Mutex::new(outcomes.into()),
            stopped: Notify::new(),
        }
    }

    /// A capture that yields one single-alternative transcript per entry.
    pub fn with_transcripts(transcripts: &[&str]) -> Self {
        Self::new(
            transcripts
                .iter()
                .map(|t| Ok(vec![(*t).to_string()]))
                .collect(),
        )
    }

    /// A capture whose platform reports speech recognition as unavailable.
    pub fn unsupported() -> Self {
        let mut capture = Self::new(Vec::new());
        capture.supported = false;
        capture
    }

    /// A capture whose user denies microphone permission.
    pub fn permission_denied() -> Self {
        let mut capture = Self::new(Vec::new());
        capture.permission = false;
        capture
    }
}

#[async_trait]
impl SpeechCapture for ScriptedCapture {
    fn is_supported(&self) -> bool {
        self.supported
    }

    async fn request_permission(&self) -> bool {
        self.permission
    }

    async fn capture(&self, _max_alternatives: usize) -> Result<Vec<String>, CaptureError> {
        let next = self.outcomes.lock().unwrap().pop_front();
        match next {
            Some(outcome) => outcome,
            None => {
                // Script exhausted: wait for a cooperative stop.
                self.stopped.notified().await;
                Ok(Vec::new())
            }
        }
    }

    fn stop(&self) {
        self.stopped.notify_one();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_outcomes_in_order() {
        let capture = ScriptedCapture::new(vec![
            Ok(vec!["primero".to_string()]),
            Err(CaptureError::Network),
        ]);

        assert_eq!(capture.capture(5).await.unwrap(), vec!["primero"]);
        assert_eq!(capture.capture(5).await.unwrap_err(), CaptureError::Network);
    }

    #[tokio::test]
    async fn stop_resolves_an_exhausted_capture_with_no_transcript() {
        let capture = ScriptedCapture::with_transcripts(&[]);
        // stop() before capture(): the stored permit resolves it immediately.
        capture.stop();
        assert!(capture.capture(5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unsupported_reports_unsupported() {
        assert!(!ScriptedCapture::unsupported().is_supported());
        assert!(ScriptedCapture::with_transcripts(&[]).is_supported());
    }

    #[tokio::test]
    async fn permission_denied_reports_denied() {
        assert!(!ScriptedCapture::permission_denied().request_permission().await);
    }
}
