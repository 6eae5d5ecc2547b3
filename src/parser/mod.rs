//! Transcript parsing: raw speech text → [`ExpenseDraft`].
//!
//! This module provides:
//! * [`PatternRules`] — ordered regex rules for amount/description
//!   extraction.
//! * [`RecentPhrases`] — bounded short-term context of normalized
//!   transcripts.
//! * [`enhance_description`] / [`DomainLearner`] — description cleanup and
//!   keyword-driven domain overrides.
//! * [`TranscriptParser`] — ties the above together.
//!
//! # Pipeline
//!
//! ```text
//! transcript (lower-cased)
//!   ├─ amount rules ──── no match ⇒ None (not an expense command)
//!   ├─ description rules ─ fallback: trailing text after the amount
//!   ├─ enhance: strip filler prefix, capitalise
//!   └─ domain learning over recent context (may override description)
//! ```
//!
//! The draft's category is **not** resolved here — it stays at the
//! catch-all id until the session controller runs the matcher.
//!
//! [`ExpenseDraft`]: crate::model::ExpenseDraft

pub mod context;
pub mod enhance;
pub mod rules;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use context::RecentPhrases;
pub use enhance::{enhance_description, DomainLearner};
pub use rules::{AmountMatch, PatternRules};

use crate::matching::normalize;
use crate::model::{ExpenseDraft, DEFAULT_DESCRIPTION};

// ---------------------------------------------------------------------------
// TranscriptParser
// ---------------------------------------------------------------------------

/// Number of recent phrases combined with the description for domain
/// learning.
const LEARNING_CONTEXT_PHRASES: usize = 2;

/// Extracts an [`ExpenseDraft`] from a raw speech transcript.
///
/// Stateful: every transcript — parseable or not — is pushed into the
/// short-term context window, so a follow-up utterance can benefit from
/// what was said just before ("pedí delivery" … "800 de pizza").
///
/// # Example
/// ```rust
/// use voice_expense::parser::TranscriptParser;
///
/// let mut parser = TranscriptParser::new(5);
/// let draft = parser.parse("gasté 1500 en sushi").unwrap();
/// assert_eq!(draft.amount, 1500.0);
/// assert_eq!(draft.description, "Sushi");
/// assert!(parser.parse("no es un gasto").is_none());
/// ```
pub struct TranscriptParser {
    rules: PatternRules,
    learner: DomainLearner,
    recent: RecentPhrases,
}

impl TranscriptParser {
    /// Create a parser with a context window of `window_size` phrases.
    pub fn new(window_size: usize) -> Self {
        Self {
            rules: PatternRules::new(),
            learner: DomainLearner::new(),
            recent: RecentPhrases::new(window_size),
        }
    }

    /// Parse `transcript` into a draft, or `None` when no amount can be
    /// extracted (the single hard failure condition).
    pub fn parse(&mut self, transcript: &str) -> Option<ExpenseDraft> {
        let text = transcript.to_lowercase();

        // Context learns from everything the user says, even failed parses.
        self.recent.push(normalize(transcript));

        let amount = match self.rules.extract_amount(&text) {
            Some(m) if m.value > 0.0 => m,
            Some(_) => {
                log::debug!("parser: zero amount rejected in {transcript:?}");
                return None;
            }
            None => {
                log::debug!("parser: no amount found in {transcript:?}");
                return None;
            }
        };

        let extracted = self
            .rules
            .extract_description(&text)
            .or_else(|| self.rules.trailing_text(&text, amount.end));

        let mut description = match extracted {
            Some(d) => enhance_description(&d),
            None => DEFAULT_DESCRIPTION.to_string(),
        };

        // Domain learning sees the recent phrases plus the description.
        let description_lower = description.to_lowercase();
        let context = format!(
            "{} {}",
            self.recent.joined_recent(LEARNING_CONTEXT_PHRASES),
            description_lower
        );
        if let Some(label) = self.learner.label_for(&context, &description_lower) {
            log::debug!("parser: domain override {description:?} -> {label:?}");
            description = label;
        }

        Some(ExpenseDraft::new(amount.value, description))
    }

    /// Clear the short-term context window.
    pub fn reset_context(&mut self) {
        self.recent.reset();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
