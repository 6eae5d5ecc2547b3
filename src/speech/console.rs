//! Stdin-backed speech capture for the demo binary.
//!
//! Each `capture` call reads one line from standard input and treats it as
//! the single transcript alternative — a development harness standing in
//! for a real speech engine, exercising the exact same pipeline.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::{Mutex, Notify};

use super::{CaptureError, SpeechCapture};

// ---------------------------------------------------------------------------
// ConsoleCapture
// ---------------------------------------------------------------------------

/// Reads typed lines from stdin as "utterances".
pub struct ConsoleCapture {
    lines: Mutex<Lines<BufReader<Stdin>>>,
    stopped: Notify,
}

impl ConsoleCapture {
    /// Wrap the process's stdin.
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
            stopped: Notify::new(),
        }
    }
}

impl Default for ConsoleCapture {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechCapture for ConsoleCapture {
    fn is_supported(&self) -> bool {
        true
    }

    async fn request_permission(&self) -> bool {
        true
    }

    async fn capture(&self, _max_alternatives: usize) -> Result<Vec<String>, CaptureError> {
        let mut lines = self.lines.lock().await;

        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(text)) if !text.trim().is_empty() => Ok(vec![text]),
                Ok(Some(_)) | Ok(None) => Ok(Vec::new()),
                Err(e) => {
                    log::warn!("console capture: stdin read failed: {e}");
                    Err(CaptureError::AudioCapture)
                }
            },
            _ = self.stopped.notified() => Ok(Vec::new()),
        }
    }

    fn stop(&self) {
        self.stopped.notify_one();
    }
}
