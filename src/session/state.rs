//! Voice-session state machine.
//!
//! [`SessionState`] drives the controller: exactly one expense draft may be
//! pending at a time, and the state says where in its lifecycle it is.

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// States of a voice session.
///
/// The state machine transitions are:
///
/// ```text
/// Idle ──start_session──▶ Listening
///   Listening ──transcript, confident match──▶ Idle          (auto-saved)
///   Listening ──transcript, ambiguous match──▶ AwaitingConfirmation
///   Listening ──no audio / parse failure / error──▶ Idle
///   AwaitingConfirmation ──confirm_category / cancel──▶ Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session active; the hotword listener may own the microphone.
    Idle,

    /// A capture session owns the microphone and waits for a transcript.
    Listening,

    /// A parsed draft is pending; the controller waits for the user to
    /// confirm or cancel its category.
    AwaitingConfirmation,
}

impl SessionState {
    /// Returns `true` while a session holds resources (microphone or a
    /// pending draft).
    ///
    /// ```
    /// use voice_expense::session::SessionState;
    ///
    /// assert!(!SessionState::Idle.is_active());
    /// assert!(SessionState::Listening.is_active());
    /// assert!(SessionState::AwaitingConfirmation.is_active());
    /// ```
    pub fn is_active(&self) -> bool {
        !matches!(self, SessionState::Idle)
    }

    /// A short human-readable label suitable for logs and status displays.
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Idle => "Idle",
            SessionState::Listening => "Listening",
            SessionState::AwaitingConfirmation => "AwaitingConfirmation",
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Idle
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
