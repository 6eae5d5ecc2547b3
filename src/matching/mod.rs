//! Category matching: text normalisation, synonym sets, scoring.
//!
//! This module provides:
//! * [`normalize`] — shared free-text normalisation (case, diacritics,
//!   punctuation).
//! * [`SynonymLexicon`] — built-in synonym table + persisted user overlay.
//! * [`CategoryMatcher`] — token scoring of a description against the
//!   category set, producing a [`CategoryMatchResult`].
//!
//! # Quick start
//!
//! ```rust,no_run
//! use voice_expense::matching::CategoryMatcher;
//! use voice_expense::model::Category;
//!
//! let matcher = CategoryMatcher::load_or_default();
//! # let categories: Vec<Category> = Vec::new();
//! let result = matcher.score_text("gasté en sushi", &categories);
//! println!("{} ({:.0}%)", result.category_id, result.confidence * 100.0);
//! ```
//!
//! [`CategoryMatchResult`]: crate::model::CategoryMatchResult

pub mod matcher;
pub mod normalize;
pub mod synonyms;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use matcher::CategoryMatcher;
pub use normalize::normalize;
pub use synonyms::{SynonymEntry, SynonymLexicon};
