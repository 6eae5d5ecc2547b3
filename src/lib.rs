//! Voice-to-expense pipeline for a personal expense tracker.
//!
//! Turns a raw speech transcript ("gasté 1500 en sushi") into a persisted
//! expense record with an inferred category, deferring to the user when the
//! category match is ambiguous.
//!
//! # Architecture
//!
//! ```text
//! HotwordListener ──phrase match──▶ VoiceSessionController
//!                                        │ capture (SpeechCapture)
//!                                        ▼
//!                                  TranscriptParser ──▶ ExpenseDraft
//!                                        │
//!                                  CategoryMatcher (synonyms + names)
//!                                        │
//!                         ┌── confident ─┴─ ambiguous ──┐
//!                         ▼                             ▼
//!                   RecordStore::add_expense     AmbiguousCategory event
//!                                                (confirm_category / cancel)
//! ```
//!
//! Persistence ([`store::RecordStore`]) and the speech engine
//! ([`speech::SpeechCapture`]) are abstract collaborators injected at
//! construction; [`session::SessionEvent`]s on an mpsc channel notify the
//! outside world.

pub mod config;
pub mod hotword;
pub mod matching;
pub mod model;
pub mod parser;
pub mod session;
pub mod speech;
pub mod store;
