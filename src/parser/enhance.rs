//! Description post-processing: filler stripping, capitalisation, and
//! domain pattern learning over recent phrase context.

use regex::Regex;

// ---------------------------------------------------------------------------
// enhance_description
// ---------------------------------------------------------------------------

/// Leading fillers that carry no semantic value in a description.
const FILLER_PREFIXES: &[&str] = &[
    "en ", "por ", "para ", "de ", "del ", "la ", "el ", "los ", "las ", "un ", "una ",
];

/// Strip one leading filler preposition/article and capitalise the first
/// letter.
///
/// # Example
/// ```rust
/// use voice_expense::parser::enhance_description;
///
/// assert_eq!(enhance_description("el supermercado"), "Supermercado");
/// assert_eq!(enhance_description("sushi"), "Sushi");
/// ```
pub fn enhance_description(description: &str) -> String {
    let mut enhanced = description.trim().to_lowercase();

    for prefix in FILLER_PREFIXES {
        if let Some(rest) = enhanced.strip_prefix(prefix) {
            enhanced = rest.to_string();
            break;
        }
    }

    capitalize_first(&enhanced)
}

/// Upper-case the first character, leaving the rest untouched.
fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// DomainLearner
// ---------------------------------------------------------------------------

/// Keyword-driven description overrides learned from recent phrase context.
///
/// Two domain families are recognised:
///
/// * **Restaurant** (restaurante/resto/café/bar/pizzería) — the venue name
///   following the keyword becomes the description, or the generic label
///   `"Restaurante"` when no venue was spoken.
/// * **Fast food with delivery** (hamburguesa/pizza/sushi/… together with a
///   delivery keyword) — the description becomes `"Delivery de comida"`.
///   Without a delivery keyword the spoken description is kept as-is; a
///   generic label would destroy the specific dish name the matcher needs.
pub struct DomainLearner {
    restaurant: Regex,
    venue: Regex,
    fast_food: Regex,
    delivery: Regex,
}

impl DomainLearner {
    /// Compile the built-in domain keyword patterns.
    pub fn new() -> Self {
        Self {
            restaurant: Regex::new(r"(?:restaurant|restaurante|resto|caf[eé]|bar|pizzer[ií]a)")
                .expect("restaurant pattern"),
            venue: Regex::new(
                r"(?:restaurant|restaurante|resto|caf[eé]|bar|pizzer[ií]a)\s+([a-zà-ú\s]+)",
            )
            .expect("venue pattern"),
            fast_food: Regex::new(r"(?:burger|hamburguesa|pizza|sushi|taco|kebab)")
                .expect("fast-food pattern"),
            delivery: Regex::new(r"(?:delivery|env[ií]o)").expect("delivery pattern"),
        }
    }

    /// Return a domain-specific description label, or `None` when the
    /// context matches no known family.
    ///
    /// `context` is the lower-cased combination of recent transcripts and
    /// the current description; family detection runs over all of it.  The
    /// venue name is extracted from `description` alone — the venue is part
    /// of the current utterance, not of what was said minutes ago.
    pub fn label_for(&self, context: &str, description: &str) -> Option<String> {
        if self.restaurant.is_match(context) {
            let venue = self
                .venue
                .captures(description)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().trim().to_string())
                .filter(|v| !v.is_empty());
            return Some(match venue {
                Some(v) => capitalize_first(&v),
                None => "Restaurante".to_string(),
            });
        }

        if self.fast_food.is_match(context) && self.delivery.is_match(context) {
            return Some("Delivery de comida".to_string());
        }

        None
    }
}

impl Default for DomainLearner {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
