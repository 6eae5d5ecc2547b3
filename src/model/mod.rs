//! Core data types shared across the crate.
//!
//! [`Category`] and [`Expense`] mirror the records held by the store;
//! [`ExpenseDraft`] is the not-yet-persisted expense owned by the session
//! controller while a voice command is being resolved.  All types derive
//! `Serialize`/`Deserialize` so they round-trip through JSON storage.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Identifier of the catch-all "Otros" category.
///
/// Drafts are created with this id and keep it until the matcher (or the
/// user) resolves a real category.  Built-in categories use small fixed
/// string ids (`"1"`..`"7"`); user-created categories get fresh ids from the
/// store.
pub const CATCH_ALL_CATEGORY_ID: &str = "7";

/// An expense category.
///
/// `color` and `icon` are presentation tags carried through for UI
/// collaborators; the core only reads `id` and `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Stable identifier, unique within the active category set.
    pub id: String,
    /// Display name (e.g. `"Comida"`).
    pub name: String,
    /// Hex color tag (e.g. `"#FF6B6B"`).
    pub color: String,
    /// Icon tag (e.g. `"utensils"`).
    pub icon: String,
}

// ---------------------------------------------------------------------------
// Expense / ExpenseDraft
// ---------------------------------------------------------------------------

/// Placeholder used when no description could be extracted from a transcript.
pub const DEFAULT_DESCRIPTION: &str = "Gasto sin descripción";

/// An expense that has not been persisted yet.
///
/// Created by the transcript parser with `category_id` left at
/// [`CATCH_ALL_CATEGORY_ID`]; exclusively owned by the session controller
/// until it is saved (becoming an [`Expense`]) or the session is cancelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    /// Positive amount in the user's currency.
    pub amount: f64,
    /// Free-text description; falls back to [`DEFAULT_DESCRIPTION`].
    pub description: String,
    /// Category id; [`CATCH_ALL_CATEGORY_ID`] until resolved.
    pub category_id: String,
    /// When the expense happened; defaults to the moment of parsing.
    pub date: DateTime<Local>,
}

impl ExpenseDraft {
    /// Create a draft dated now, with the catch-all category.
    pub fn new(amount: f64, description: impl Into<String>) -> Self {
        Self {
            amount,
            description: description.into(),
            category_id: CATCH_ALL_CATEGORY_ID.to_string(),
            date: Local::now(),
        }
    }

    /// Returns `true` while the draft still carries the catch-all category.
    pub fn category_unresolved(&self) -> bool {
        self.category_id == CATCH_ALL_CATEGORY_ID
    }
}

/// A persisted expense record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Store-assigned identifier.
    pub id: String,
    pub amount: f64,
    pub description: String,
    pub category_id: String,
    pub date: DateTime<Local>,
    /// When the record was written to the store.
    pub created_at: DateTime<Local>,
}

// ---------------------------------------------------------------------------
// Category matching results
// ---------------------------------------------------------------------------

/// One candidate category with its normalized confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMatch {
    pub category: Category,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
}

/// Result of scoring a description against the category set.
///
/// Ephemeral — computed per call, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMatchResult {
    /// Best-scoring category id; [`CATCH_ALL_CATEGORY_ID`] when nothing
    /// matched.
    pub category_id: String,
    /// Confidence of the best match in `[0, 1]`.
    pub confidence: f64,
    /// Every category whose confidence exceeds the candidate threshold,
    /// sorted by descending confidence.
    pub candidates: Vec<CategoryMatch>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
