//! Synonym-based category matching and scoring.
//!
//! [`CategoryMatcher`] wraps the [`SynonymLexicon`] and scores free text
//! against a category set.  Scoring is token-based: every token of the
//! normalized input is compared against each category's merged synonym set
//! and against the category's own name, and per-category scores accumulate
//! across tokens.  The final confidence is normalized so that a single
//! exact name match saturates it.

use crate::model::{Category, CategoryMatch, CategoryMatchResult, CATCH_ALL_CATEGORY_ID};

use super::normalize;
use super::synonyms::SynonymLexicon;

// ---------------------------------------------------------------------------
// Scoring constants
// ---------------------------------------------------------------------------

/// Points for a token that equals a synonym exactly.
const EXACT_SYNONYM_SCORE: f64 = 10.0;
/// Weight for a token/synonym substring overlap, scaled by length ratio.
const PARTIAL_SYNONYM_WEIGHT: f64 = 5.0;
/// Points for a token that equals the category name exactly — outranks any
/// synonym match.
const EXACT_NAME_SCORE: f64 = 15.0;
/// Weight for a token/name substring overlap, scaled by length ratio.
const PARTIAL_NAME_WEIGHT: f64 = 8.0;
/// Divisor turning an accumulated score into a `[0, 1]` confidence.
const SCORE_NORMALIZER: f64 = 15.0;
/// Minimum normalized score for a category to appear in the candidate list.
const CANDIDATE_THRESHOLD: f64 = 0.4;
/// Tokens shorter than this many characters carry no signal and are skipped.
const MIN_TOKEN_LEN: usize = 3;

/// Length-ratio similarity credit: `min(len) / max(len)` for two strings
/// where one contains the other.
fn length_ratio(a: &str, b: &str) -> f64 {
    let (la, lb) = (a.chars().count() as f64, b.chars().count() as f64);
    la.min(lb) / la.max(lb)
}

// ---------------------------------------------------------------------------
// CategoryMatcher
// ---------------------------------------------------------------------------

/// Scores free text against categories using synonyms and category names.
///
/// Owns the [`SynonymLexicon`] and delegates synonym management to it, so a
/// single instance serves both the voice pipeline (scoring) and the
/// category-settings surface (add/remove synonyms).
pub struct CategoryMatcher {
    lexicon: SynonymLexicon,
}

impl CategoryMatcher {
    /// Build a matcher over an existing lexicon.
    pub fn new(lexicon: SynonymLexicon) -> Self {
        Self { lexicon }
    }

    /// Build a matcher with the overlay loaded from the platform config dir.
    pub fn load_or_default() -> Self {
        Self::new(SynonymLexicon::load_or_default())
    }

    // -----------------------------------------------------------------------
    // Synonym management (delegated)
    // -----------------------------------------------------------------------

    /// See [`SynonymLexicon::add_synonym`].
    pub fn add_synonym(&mut self, category_id: &str, raw: &str) -> bool {
        self.lexicon.add_synonym(category_id, raw)
    }

    /// See [`SynonymLexicon::remove_synonym`].
    pub fn remove_synonym(&mut self, category_id: &str, raw: &str) -> bool {
        self.lexicon.remove_synonym(category_id, raw)
    }

    /// See [`SynonymLexicon::synonyms_for`].
    pub fn synonyms_for(&self, category_id: &str) -> Vec<String> {
        self.lexicon.synonyms_for(category_id)
    }

    // -----------------------------------------------------------------------
    // Scoring
    // -----------------------------------------------------------------------

    /// Score `text` against `categories` and return the best match plus the
    /// ranked candidate list.
    ///
    /// When no token matches anything the result falls back to
    /// [`CATCH_ALL_CATEGORY_ID`] with confidence `0`.  Ties keep the first
    /// category encountered in `categories` order.
    pub fn score_text(&self, text: &str, categories: &[Category]) -> CategoryMatchResult {
        let normalized = normalize(text);

        let mut scores: Vec<f64> = vec![0.0; categories.len()];

        for token in normalized.split_whitespace() {
            if token.chars().count() < MIN_TOKEN_LEN {
                continue;
            }

            for (i, category) in categories.iter().enumerate() {
                for synonym in self.lexicon.merged_synonyms(&category.id) {
                    if synonym == token {
                        scores[i] += EXACT_SYNONYM_SCORE;
                    } else if synonym.contains(token) || token.contains(synonym.as_str()) {
                        scores[i] += PARTIAL_SYNONYM_WEIGHT * length_ratio(synonym, token);
                    }
                }

                let name = normalize(&category.name);
                if name == token {
                    scores[i] += EXACT_NAME_SCORE;
                } else if !name.is_empty()
                    && (name.contains(token) || token.contains(name.as_str()))
                {
                    scores[i] += PARTIAL_NAME_WEIGHT * length_ratio(&name, token);
                }
            }
        }

        // Best match: strict comparison, so the first category encountered
        // wins ties; zero everywhere falls back to the catch-all.
        let mut best_id = CATCH_ALL_CATEGORY_ID.to_string();
        let mut best_score = 0.0_f64;
        for (i, category) in categories.iter().enumerate() {
            if scores[i] > best_score {
                best_score = scores[i];
                best_id = category.id.clone();
            }
        }

        let confidence = (best_score / SCORE_NORMALIZER).min(1.0);

        let mut candidates: Vec<CategoryMatch> = categories
            .iter()
            .zip(&scores)
            .map(|(category, score)| CategoryMatch {
                category: category.clone(),
                confidence: score / SCORE_NORMALIZER,
            })
            .filter(|m| m.confidence > CANDIDATE_THRESHOLD)
            .collect();
        candidates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        CategoryMatchResult {
            category_id: best_id,
            confidence,
            candidates,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
