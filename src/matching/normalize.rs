//! Free-text normalisation shared by matching and parsing.
//!
//! [`normalize`] lower-cases, folds Spanish diacritics to their base
//! letters, drops punctuation and trims.  It is deterministic, idempotent
//! and total (empty in, empty out), which the matcher relies on: synonyms
//! are stored normalized, so lookups never have to re-fold both sides.

// ---------------------------------------------------------------------------
// Diacritic folding
// ---------------------------------------------------------------------------

/// Fold a single character to its unaccented base letter, if it has one.
///
/// Covers the precomposed Latin vowels/consonants that es-ES speech
/// transcripts actually produce, plus nothing else — combining marks are
/// dropped by the punctuation filter below, so NFD input folds too.
fn fold_diacritic(c: char) -> Option<char> {
    let folded = match c {
        'á' | 'à' | 'ä' | 'â' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        _ => return None,
    };
    Some(folded)
}

// ---------------------------------------------------------------------------
// normalize
// ---------------------------------------------------------------------------

/// Normalize free text for matching.
///
/// Lower-cases, folds diacritics, keeps only ASCII letters, digits,
/// underscores and whitespace, then trims.
///
/// # Example
/// ```
/// use voice_expense::matching::normalize;
///
/// assert_eq!(normalize("  Café, por favor!  "), "cafe por favor");
/// ```
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for c in text.chars().flat_map(char::to_lowercase) {
        if let Some(folded) = fold_diacritic(c) {
            out.push(folded);
        } else if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() {
            out.push(c);
        }
        // Everything else (punctuation, symbols, combining marks) is dropped.
    }

    out.trim().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases() {
        assert_eq!(normalize("COMIDA"), "comida");
    }

    #[test]
    fn folds_spanish_accents() {
        assert_eq!(normalize("café categoría año"), "cafe categoria ano");
    }

    #[test]
    fn folds_nfd_decomposed_accents() {
        // "café" with the accent as a combining mark (U+0301).
        assert_eq!(normalize("cafe\u{0301}"), "cafe");
    }

    #[test]
    fn strips_punctuation() {
        assert_eq!(normalize("¡hola, mundo!"), "hola mundo");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(normalize("  taxi  "), "taxi");
    }

    #[test]
    fn empty_in_empty_out() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  ¿?  "), "");
    }

    #[test]
    fn is_idempotent() {
        for s in ["Gasté 1.500 en el súper", "  ¡Ñoquis!  ", "ya normalizado"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "input: {s:?}");
        }
    }
}
