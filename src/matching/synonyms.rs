//! Category synonym sets: built-in defaults plus a persisted user overlay.
//!
//! [`SynonymLexicon`] merges two layers per category: an immutable built-in
//! table and a user overlay stored as `category-synonyms.json` in the
//! platform config directory.  The overlay is persisted after every
//! mutation so user-taught synonyms survive app restarts.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::normalize;
use crate::config::AppPaths;

// ---------------------------------------------------------------------------
// Built-in defaults
// ---------------------------------------------------------------------------

/// Default synonyms for the seven built-in categories.  All entries are
/// already normalized (lower-case, no diacritics).
static DEFAULT_SYNONYMS: &[(&str, &[&str])] = &[
    (
        // Comida
        "1",
        &[
            "comida", "alimentos", "restaurante", "desayuno", "almuerzo", "cena", "pizza",
            "hamburguesa", "sushi", "cafe", "cafeteria", "bar", "helado", "merienda", "postre",
            "comedor", "comer", "almorzar", "cenar", "desayunar",
        ],
    ),
    (
        // Transporte
        "2",
        &[
            "transporte", "taxi", "colectivo", "subte", "bus", "gasolina", "combustible", "nafta",
            "tren", "pasaje", "viaje", "uber", "cabify", "remis", "peaje", "estacionamiento",
            "auto", "moto", "bicicleta", "monopatin",
        ],
    ),
    (
        // Compras
        "3",
        &[
            "compras", "tienda", "ropa", "calzado", "zapatos", "camisa", "pantalon", "vestido",
            "accesorios", "reloj", "gafas", "lentes", "tecnologia", "electrodomesticos", "muebles",
            "decoracion", "casa", "hogar", "supermercado", "super", "abarrotes", "mercado",
        ],
    ),
    (
        // Entretenimiento
        "4",
        &[
            "entretenimiento", "cine", "teatro", "concierto", "evento", "boleto", "entrada",
            "espectaculo", "juego", "videojuego", "musica", "streaming", "netflix", "spotify",
            "disney", "amazon", "fiesta", "salida", "paseo", "hobby", "deporte",
        ],
    ),
    (
        // Salud
        "5",
        &[
            "salud", "medico", "doctor", "hospital", "clinica", "consulta", "medicamento",
            "farmacia", "remedio", "pastillas", "tratamiento", "terapia", "psicologo", "dentista",
            "odontologia", "seguro", "vitaminas", "suplementos",
        ],
    ),
    (
        // Facturas
        "6",
        &[
            "facturas", "servicios", "luz", "electricidad", "agua", "gas", "internet", "telefono",
            "celular", "cable", "television", "alquiler", "renta", "hipoteca", "impuestos",
            "cuota", "mensualidad", "suscripcion", "membresia", "pago",
        ],
    ),
    (
        // Otros
        "7",
        &[
            "otros", "varios", "miscelaneos", "diverso", "general", "adicional", "extra",
        ],
    ),
];

// ---------------------------------------------------------------------------
// SynonymEntry
// ---------------------------------------------------------------------------

/// One category's synonym list, as persisted in the overlay file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymEntry {
    /// Category id this entry belongs to.
    pub category_id: String,
    /// Normalized synonym strings, no duplicates.
    pub synonyms: Vec<String>,
}

// ---------------------------------------------------------------------------
// SynonymLexicon
// ---------------------------------------------------------------------------

/// Merged synonym table: built-in defaults ∪ persisted user overlay.
///
/// The overlay is loaded once at construction, mutated by
/// [`add_synonym`](SynonymLexicon::add_synonym) /
/// [`remove_synonym`](SynonymLexicon::remove_synonym), and written back to
/// disk after every mutation.  The merged view is recomputed eagerly so
/// scoring never pays a merge cost.
pub struct SynonymLexicon {
    overlay: Vec<SynonymEntry>,
    merged: Vec<SynonymEntry>,
    path: PathBuf,
}

impl SynonymLexicon {
    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Load the overlay from the platform config directory, or start with an
    /// empty overlay when the file does not exist yet.
    pub fn load_or_default() -> Self {
        Self::load_from(AppPaths::new().synonyms_file)
    }

    /// Load from an explicit overlay path (useful for tests).
    pub fn load_from(path: PathBuf) -> Self {
        let overlay = Self::load_overlay(&path);
        let mut lexicon = Self {
            overlay,
            merged: Vec::new(),
            path,
        };
        lexicon.rebuild_merged();
        lexicon
    }

    fn load_overlay(path: &PathBuf) -> Vec<SynonymEntry> {
        if path.exists() {
            let data = std::fs::read_to_string(path).unwrap_or_default();
            serde_json::from_str(&data).unwrap_or_default()
        } else {
            Vec::new()
        }
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Add a synonym to a category's overlay, persist, and return `true`.
    ///
    /// Returns `false` (and mutates nothing) when the synonym normalizes to
    /// the empty string or already exists for that category — in the
    /// defaults or in the overlay.
    pub fn add_synonym(&mut self, category_id: &str, raw: &str) -> bool {
        let synonym = normalize(raw);
        if synonym.is_empty() {
            return false;
        }

        if self
            .merged_entry(category_id)
            .is_some_and(|e| e.synonyms.iter().any(|s| *s == synonym))
        {
            return false;
        }

        match self
            .overlay
            .iter_mut()
            .find(|e| e.category_id == category_id)
        {
            Some(entry) => entry.synonyms.push(synonym),
            None => self.overlay.push(SynonymEntry {
                category_id: category_id.to_string(),
                synonyms: vec![synonym],
            }),
        }

        self.rebuild_merged();
        self.save();
        true
    }

    /// Remove a synonym from a category's overlay, persist, and return
    /// whether a removal occurred.
    ///
    /// A synonym that exists only in the built-in defaults is not removable:
    /// the overlay never suppresses defaults, so this returns `false`.
    pub fn remove_synonym(&mut self, category_id: &str, raw: &str) -> bool {
        let synonym = normalize(raw);

        let Some(index) = self
            .overlay
            .iter()
            .position(|e| e.category_id == category_id)
        else {
            return false;
        };

        let entry = &mut self.overlay[index];
        let Some(pos) = entry.synonyms.iter().position(|s| *s == synonym) else {
            return false;
        };
        entry.synonyms.remove(pos);

        // Collapse the category entry entirely once its list is empty.
        if entry.synonyms.is_empty() {
            self.overlay.remove(index);
        }

        self.rebuild_merged();
        self.save();
        true
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The merged (built-in ∪ overlay) synonym list for a category.
    pub fn synonyms_for(&self, category_id: &str) -> Vec<String> {
        self.merged_entry(category_id)
            .map(|e| e.synonyms.clone())
            .unwrap_or_default()
    }

    /// Borrow the merged synonym list for a category (scoring hot path).
    pub(crate) fn merged_synonyms(&self, category_id: &str) -> &[String] {
        self.merged_entry(category_id)
            .map(|e| e.synonyms.as_slice())
            .unwrap_or(&[])
    }

    fn merged_entry(&self, category_id: &str) -> Option<&SynonymEntry> {
        self.merged.iter().find(|e| e.category_id == category_id)
    }

    // -----------------------------------------------------------------------
    // Merge / persistence
    // -----------------------------------------------------------------------

    /// Recompute the merged table: defaults first, overlay unioned on top,
    /// overlay-only categories appended.
    fn rebuild_merged(&mut self) {
        let mut merged: Vec<SynonymEntry> = DEFAULT_SYNONYMS
            .iter()
            .map(|(id, synonyms)| SynonymEntry {
                category_id: (*id).to_string(),
                synonyms: synonyms.iter().map(|s| (*s).to_string()).collect(),
            })
            .collect();

        for custom in &self.overlay {
            match merged
                .iter_mut()
                .find(|e| e.category_id == custom.category_id)
            {
                Some(entry) => {
                    for synonym in &custom.synonyms {
                        if !entry.synonyms.contains(synonym) {
                            entry.synonyms.push(synonym.clone());
                        }
                    }
                }
                None => merged.push(custom.clone()),
            }
        }

        self.merged = merged;
    }

    fn save(&self) {
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Ok(data) = serde_json::to_string_pretty(&self.overlay) {
            if let Err(e) = std::fs::write(&self.path, data) {
                log::warn!("synonyms: failed to persist overlay: {e}");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
