//! Hands-free activation via a spoken hotword.
//!
//! # Design
//!
//! [`HotwordListener`] runs a continuous low-power recognition loop that is
//! mutually exclusive with the controller's one-shot session capture: on a
//! phrase match it stops capturing, drives
//! [`VoiceSessionController::start_session`], and only resumes once the
//! controller is back to `Idle`.  The microphone therefore always has
//! exactly one owner.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use voice_expense::hotword::HotwordListener;
//! # use std::sync::Mutex;
//! # use tokio::sync::mpsc;
//! # use voice_expense::config::AppConfig;
//! # use voice_expense::matching::CategoryMatcher;
//! # use voice_expense::session::VoiceSessionController;
//! # use voice_expense::speech::{ConsoleCapture, SpeechCapture};
//! # use voice_expense::store::MemoryStore;
//!
//! # async fn example() {
//! let config = AppConfig::default();
//! # let (events_tx, _events_rx) = mpsc::channel(32);
//! let capture: Arc<dyn SpeechCapture> = Arc::new(ConsoleCapture::new());
//! # let controller = Arc::new(VoiceSessionController::new(
//! #     Arc::new(MemoryStore::new()),
//! #     Arc::clone(&capture),
//! #     Arc::new(Mutex::new(CategoryMatcher::load_or_default())),
//! #     events_tx,
//! #     &config,
//! # ));
//! let listener = HotwordListener::start(capture, controller, config.hotword.phrases);
//! // … later:
//! listener.stop();
//! # }
//! ```
//!
//! [`VoiceSessionController::start_session`]:
//! crate::session::VoiceSessionController::start_session

pub mod listener;

pub use listener::HotwordListener;
