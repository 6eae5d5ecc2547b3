//! Abstract speech-capture capability.
//!
//! # Overview
//!
//! [`SpeechCapture`] is the interface the voice pipeline consumes.  It is
//! object-safe and `Send + Sync` so it can be held behind an
//! `Arc<dyn SpeechCapture>` and shared between the session controller and
//! the hotword listener.
//!
//! The microphone is a single exclusive resource: the hotword listener
//! pauses its own capture loop before the controller starts a session, so
//! two `capture` calls never overlap.
//!
//! [`ConsoleCapture`] is a stdin-backed implementation used by the demo
//! binary.  [`ScriptedCapture`] (available under `#[cfg(test)]`) replays
//! pre-configured outcomes — useful for unit-testing the controller without
//! a microphone.

use async_trait::async_trait;
use thiserror::Error;

pub mod console;
#[cfg(test)]
pub mod scripted;

pub use console::ConsoleCapture;
#[cfg(test)]
pub use scripted::ScriptedCapture;

// ---------------------------------------------------------------------------
// CaptureError
// ---------------------------------------------------------------------------

/// Named error conditions a speech engine can report.
///
/// The variants mirror the error taxonomy of browser speech recognition;
/// any backend maps its own failures onto them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// The engine detected no speech at all.
    #[error("no speech detected")]
    NoSpeech,

    /// The capture was aborted by the engine or the platform.
    #[error("capture aborted")]
    Aborted,

    /// The microphone could not be opened.
    #[error("audio capture failed")]
    AudioCapture,

    /// A network-backed engine could not reach its service.
    #[error("network error during recognition")]
    Network,

    /// Microphone permission was denied.
    #[error("microphone permission denied")]
    NotAllowed,

    /// The recognition service rejected the request.
    #[error("recognition service not allowed")]
    ServiceNotAllowed,

    /// The recognition grammar was rejected.
    #[error("bad recognition grammar")]
    BadGrammar,

    /// The configured language is not supported by the engine.
    #[error("language not supported")]
    LanguageNotSupported,
}

impl CaptureError {
    /// Human-readable Spanish message shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            CaptureError::NoSpeech => "No se detectó ninguna voz",
            CaptureError::Aborted => "Reconocimiento cancelado",
            CaptureError::AudioCapture => "No se pudo acceder al micrófono",
            CaptureError::Network => "Error de red al procesar la voz",
            CaptureError::NotAllowed => "Permiso de micrófono denegado",
            CaptureError::ServiceNotAllowed => "Servicio de reconocimiento no disponible",
            CaptureError::BadGrammar => "Problema con la gramática de reconocimiento",
            CaptureError::LanguageNotSupported => "Idioma no soportado",
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechCapture trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for speech capture backends.
///
/// # Contract
///
/// - [`capture`](Self::capture) performs one capture session and resolves
///   when the engine ends it — naturally, via [`stop`](Self::stop), or with
///   an error.  The returned transcripts are ranked best-first and may be
///   empty (nothing was recognised).
/// - [`stop`](Self::stop) requests a cooperative early end of an in-flight
///   capture; it must be safe to call at any time, including with no
///   capture running.
#[async_trait]
pub trait SpeechCapture: Send + Sync {
    /// Whether speech capture is available on this platform at all.
    fn is_supported(&self) -> bool;

    /// Ask the platform for microphone access.  Returns `false` when the
    /// user denied it.
    async fn request_permission(&self) -> bool;

    /// Run one capture session and return up to `max_alternatives` ranked
    /// transcript alternatives.
    async fn capture(&self, max_alternatives: usize) -> Result<Vec<String>, CaptureError>;

    /// Request a cooperative early end of the current capture.
    fn stop(&self);
}

// Compile-time assertion: Box<dyn SpeechCapture> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn SpeechCapture>) {}
};

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
