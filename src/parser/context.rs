//! Short-term phrase context for the transcript parser.
//!
//! [`RecentPhrases`] keeps the last *N* normalized transcripts in a bounded
//! rolling window.  The parser feeds every incoming transcript into it —
//! including ones that fail to parse — and reads the most recent entries
//! back when applying domain pattern learning.

use std::collections::VecDeque;

// ---------------------------------------------------------------------------
// RecentPhrases
// ---------------------------------------------------------------------------

/// Bounded rolling window of normalized transcripts.
///
/// # Example
/// ```rust
/// use voice_expense::parser::RecentPhrases;
///
/// let mut recent = RecentPhrases::new(5);
/// recent.push("gaste 1500 en sushi".to_string());
/// assert_eq!(recent.joined_recent(2), "gaste 1500 en sushi");
/// ```
pub struct RecentPhrases {
    phrases: VecDeque<String>,
    window_size: usize,
}

impl RecentPhrases {
    /// Create a window holding at most `window_size` phrases.
    pub fn new(window_size: usize) -> Self {
        Self {
            phrases: VecDeque::with_capacity(window_size + 1),
            window_size,
        }
    }

    /// Append a phrase, dropping the oldest entries beyond the window size.
    pub fn push(&mut self, phrase: String) {
        self.phrases.push_back(phrase);
        while self.phrases.len() > self.window_size {
            self.phrases.pop_front();
        }
    }

    /// Join the most recent `n` phrases, oldest first.
    pub fn joined_recent(&self, n: usize) -> String {
        let skip = self.phrases.len().saturating_sub(n);
        self.phrases
            .iter()
            .skip(skip)
            .cloned()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Clear the window.
    pub fn reset(&mut self) {
        self.phrases.clear();
    }

    /// Number of phrases currently held.
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Returns `true` when the window is empty.
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
