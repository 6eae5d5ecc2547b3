//! Voice-session orchestration.
//!
//! This module wires the capture → parse → match → persist flow and exposes
//! the state the rest of the application observes:
//!
//! * [`VoiceSessionController`] — the state machine owning the single
//!   pending-draft slot.
//! * [`SessionState`] — `Idle` / `Listening` / `AwaitingConfirmation`.
//! * [`SessionEvent`] — typed notifications on a `tokio::sync::mpsc`
//!   channel.
//! * [`SessionError`] — rejections from the controller's public operations.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::{Arc, Mutex};
//! use tokio::sync::mpsc;
//! use voice_expense::config::AppConfig;
//! use voice_expense::matching::CategoryMatcher;
//! use voice_expense::session::VoiceSessionController;
//! use voice_expense::speech::ConsoleCapture;
//! use voice_expense::store::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let (events_tx, mut events_rx) = mpsc::channel(32);
//!
//!     let controller = Arc::new(VoiceSessionController::new(
//!         Arc::new(MemoryStore::new()),
//!         Arc::new(ConsoleCapture::new()),
//!         Arc::new(Mutex::new(CategoryMatcher::load_or_default())),
//!         events_tx,
//!         &config,
//!     ));
//!
//!     controller.start_session().await.ok();
//!     while let Some(event) = events_rx.recv().await {
//!         println!("{event:?}");
//!     }
//! }
//! ```

pub mod controller;
pub mod events;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use controller::{DraftHook, SessionError, SharedMatcher, VoiceSessionController};
pub use events::SessionEvent;
pub use state::SessionState;
