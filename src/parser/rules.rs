//! Ordered regex rules for extracting an amount and a description from a
//! lower-cased transcript.
//!
//! Rules are compiled once at construction and held in [`PatternRules`];
//! every list is tried in order and the first match wins.  The patterns
//! mirror how es-ES speakers actually phrase expenses ("gasté 1500 en
//! sushi", "son 300 pesos de taxi", "1200 en el súper").

use regex::Regex;

// ---------------------------------------------------------------------------
// AmountMatch
// ---------------------------------------------------------------------------

/// A successfully extracted amount.
#[derive(Debug, Clone, PartialEq)]
pub struct AmountMatch {
    /// Parsed numeric value (`,` accepted as the decimal separator).
    pub value: f64,
    /// Byte offset just past the number token in the searched text, used
    /// for the trailing-text description fallback.
    pub end: usize,
}

// ---------------------------------------------------------------------------
// PatternRules
// ---------------------------------------------------------------------------

/// Compiled amount/description extraction rules.
pub struct PatternRules {
    amount: Vec<Regex>,
    description: Vec<Regex>,
}

impl PatternRules {
    /// Compile the built-in rule set.
    ///
    /// All patterns are hand-written literals, so compilation cannot fail;
    /// a broken pattern would be caught by the constructor tests.
    pub fn new() -> Self {
        let amount = vec![
            // Plain number, optionally followed by a currency word.
            Regex::new(r"(\d+(?:[.,]\d+)?)\s*(?:pesos|euros|dólares|€|\$)?")
                .expect("amount pattern 1"),
            // Spending verb followed by a number.
            Regex::new(r"(?:gast[eéoa]|pag[ueéoa]|compr[eéoa]|adquir[ií])\s+(?:por)?\s*(\d+(?:[.,]\d+)?)")
                .expect("amount pattern 2"),
            // "son/fueron/es/de" + number, optional currency word.
            Regex::new(r"(?:son|fueron|es|de)\s+(\d+(?:[.,]\d+)?)\s*(?:pesos|euros|dólares|€|\$)?")
                .expect("amount pattern 3"),
        ];

        // Capture stops at a comma, a following preposition, "categoría",
        // "para", or a digit.
        let description = vec![
            Regex::new(
                r"(?:en|por|de|para)\s+([a-zà-ú\s]+?)(?:,|\sen\s|\sde\s|$|\scategoría\s|\spara\s|\s\d)",
            )
            .expect("description pattern 1"),
            Regex::new(
                r"(?:gast[eéoa]|pag[ueéoa]|compr[eéoa])\s+(?:en|por)?\s+([a-zà-ú\s]+?)(?:,|\sen\s|$|\scategoría\s|\spara\s|\s\d)",
            )
            .expect("description pattern 2"),
            Regex::new(
                r"\d+(?:[.,]\d+)?\s+(?:pesos|€|euros|dólares|dollars)?\s+(?:en|de|por)?\s+([a-zà-ú\s]+?)(?:,|\sen\s|$|\scategoría\s|\spara\s|\s\d)",
            )
            .expect("description pattern 3"),
            Regex::new(r"(?:por|en|de)\s+([a-zà-ú\s]+)$").expect("description pattern 4"),
        ];

        Self {
            amount,
            description,
        }
    }

    // -----------------------------------------------------------------------
    // Extraction
    // -----------------------------------------------------------------------

    /// Extract the amount from `text`, trying each rule in order.
    ///
    /// Returns `None` when no rule matches — the transcript is not an
    /// expense command.
    pub fn extract_amount(&self, text: &str) -> Option<AmountMatch> {
        for pattern in &self.amount {
            if let Some(m) = pattern.captures(text).and_then(|c| c.get(1)) {
                let value: f64 = m.as_str().replace(',', ".").parse().ok()?;
                return Some(AmountMatch {
                    value,
                    end: m.end(),
                });
            }
        }
        None
    }

    /// Extract a description from `text`, trying each rule in order and
    /// returning the first non-empty capture.
    pub fn extract_description(&self, text: &str) -> Option<String> {
        for pattern in &self.description {
            if let Some(m) = pattern.captures(text).and_then(|c| c.get(1)) {
                let captured = m.as_str().trim();
                if !captured.is_empty() {
                    return Some(captured.to_string());
                }
            }
        }
        None
    }

    /// Fallback description: the raw text after the amount token, when it
    /// is longer than three characters.
    pub fn trailing_text(&self, text: &str, amount_end: usize) -> Option<String> {
        let trailing = text.get(amount_end..)?.trim();
        (trailing.chars().count() > 3).then(|| trailing.to_string())
    }
}

impl Default for PatternRules {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> PatternRules {
        PatternRules::new()
    }

    // ---- amount ---

    #[test]
    fn extracts_plain_integer() {
        let m = rules().extract_amount("1500 en comida").unwrap();
        assert_eq!(m.value, 1500.0);
    }

    #[test]
    fn extracts_decimal_with_dot() {
        let m = rules().extract_amount("gasté 12.50 en el bar").unwrap();
        assert_eq!(m.value, 12.5);
    }

    #[test]
    fn extracts_decimal_with_comma() {
        let m = rules().extract_amount("gasté 12,50 en el bar").unwrap();
        assert_eq!(m.value, 12.5);
    }

    #[test]
    fn comma_and_dot_parse_to_the_same_value() {
        let r = rules();
        let dot = r.extract_amount("son 99.9 pesos").unwrap();
        let comma = r.extract_amount("son 99,9 pesos").unwrap();
        assert_eq!(dot.value, comma.value);
    }

    #[test]
    fn no_number_means_no_amount() {
        assert!(rules().extract_amount("no hay números aquí").is_none());
    }

    #[test]
    fn amount_end_points_past_the_number() {
        let text = "1500 en sushi";
        let m = rules().extract_amount(text).unwrap();
        assert_eq!(&text[m.end..], " en sushi");
    }

    // ---- description ---

    #[test]
    fn captures_after_preposition() {
        let d = rules()
            .extract_description("gasté 1500 en sushi")
            .unwrap();
        assert_eq!(d, "sushi");
    }

    #[test]
    fn capture_stops_at_comma() {
        let d = rules()
            .extract_description("gasté 1500 en sushi, categoría comida")
            .unwrap();
        assert_eq!(d, "sushi");
    }

    #[test]
    fn capture_stops_at_categoria() {
        let d = rules()
            .extract_description("500 en taxi categoría transporte")
            .unwrap();
        assert_eq!(d, "taxi");
    }

    #[test]
    fn no_description_in_bare_amount() {
        assert!(rules().extract_description("1500").is_none());
    }

    #[test]
    fn trailing_text_needs_more_than_three_chars() {
        let r = rules();
        assert_eq!(
            r.trailing_text("1500 zapatillas", 4),
            Some("zapatillas".to_string())
        );
        assert!(r.trailing_text("1500 ab", 4).is_none());
    }
}
