//! Typed notification events produced by the session controller.
//!
//! Collaborators (UI, hotword listener, tests) subscribe by holding the
//! receiving end of a `tokio::sync::mpsc` channel whose sender is handed to
//! the controller at construction — the explicit replacement for ambient
//! broadcast events.

use crate::model::{CategoryMatch, ExpenseDraft};

// ---------------------------------------------------------------------------
// SessionEvent
// ---------------------------------------------------------------------------

/// Everything the controller tells the outside world.
///
/// User-facing strings are Spanish, matching the application's locale.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Capture has begun; the user should speak now.
    ListeningStarted,

    /// A recognition cycle finished and data may have changed — collaborators
    /// refresh their cached views.  No payload.
    RecognitionComplete,

    /// The category match was ambiguous.  The draft stays pending until
    /// `confirm_category` or `cancel` resolves it.
    AmbiguousCategory {
        /// The pending draft awaiting a category.
        draft: ExpenseDraft,
        /// Candidate categories, ranked by descending confidence.
        candidates: Vec<CategoryMatch>,
    },

    /// An expense was persisted.
    ExpenseSaved {
        amount: f64,
        description: String,
        /// Resolved display name of the saved category.
        category_name: String,
    },

    /// The capture ended without any speech being recognised.  Suppressed
    /// when the session was stopped manually.
    NoAudioDetected,

    /// A transcript was produced but no valid expense could be extracted.
    ParseFailed,

    /// A user-visible error (capture failure, persistence failure, …).
    Error { message: String },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
