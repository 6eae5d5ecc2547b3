//! In-memory record store seeded with the default categories.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Local;

use crate::model::{Category, Expense, ExpenseDraft};

use super::{RecordStore, StoreError};

// ---------------------------------------------------------------------------
// Default categories
// ---------------------------------------------------------------------------

/// The seven built-in categories every fresh store starts with.
static DEFAULT_CATEGORIES: &[(&str, &str, &str, &str)] = &[
    ("1", "Comida", "#FF6B6B", "utensils"),
    ("2", "Transporte", "#4ECDC4", "car"),
    ("3", "Compras", "#FFD166", "shopping-bag"),
    ("4", "Entretenimiento", "#6A0572", "film"),
    ("5", "Salud", "#1A936F", "heart-pulse"),
    ("6", "Facturas", "#3D5A80", "file-text"),
    ("7", "Otros", "#8A817C", "more-horizontal"),
];

fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(id, name, color, icon)| Category {
            id: (*id).to_string(),
            name: (*name).to_string(),
            color: (*color).to_string(),
            icon: (*icon).to_string(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

struct Inner {
    categories: Vec<Category>,
    expenses: Vec<Expense>,
    next_expense_id: u64,
    next_category_id: u64,
}

/// In-memory [`RecordStore`] used by the demo binary and tests.
///
/// Seeded with the seven default categories; expense ids are assigned
/// monotonically.
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// A store seeded with the default categories.
    pub fn new() -> Self {
        Self::with_categories(default_categories())
    }

    /// A store seeded with an explicit category set (useful for tests).
    pub fn with_categories(categories: Vec<Category>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                categories,
                expenses: Vec::new(),
                next_expense_id: 1,
                next_category_id: 8,
            }),
        }
    }

    /// Add a user-defined category and return it with its assigned id.
    pub fn add_category(&self, name: &str, color: &str, icon: &str) -> Category {
        let mut inner = self.inner.lock().unwrap();
        let category = Category {
            id: inner.next_category_id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            icon: icon.to_string(),
        };
        inner.next_category_id += 1;
        inner.categories.push(category.clone());
        category
    }

    /// Remove an expense by id; returns whether a record was deleted.
    pub fn delete_expense(&self, id: &str) -> bool {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.expenses.len();
        inner.expenses.retain(|e| e.id != id);
        inner.expenses.len() < before
    }

    /// Snapshot of all persisted expenses, in insertion order.
    pub fn expenses(&self) -> Vec<Expense> {
        self.inner.lock().unwrap().expenses.clone()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn add_expense(&self, draft: ExpenseDraft) -> Result<Expense, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let expense = Expense {
            id: inner.next_expense_id.to_string(),
            amount: draft.amount,
            description: draft.description,
            category_id: draft.category_id,
            date: draft.date,
            created_at: Local::now(),
        };
        inner.next_expense_id += 1;
        inner.expenses.push(expense.clone());
        Ok(expense)
    }

    async fn get_categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.inner.lock().unwrap().categories.clone())
    }

    async fn get_category_by_id(&self, id: &str) -> Result<Option<Category>, StoreError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
