//! Abstract record persistence.
//!
//! [`RecordStore`] is the contract the voice pipeline consumes: add an
//! expense, list categories, look a category up by id.  Failures surface as
//! [`StoreError`] with no partial writes.  The production application backs
//! this with real storage; [`MemoryStore`] is the seeded in-memory
//! implementation used by the demo binary and the tests.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Category, Expense, ExpenseDraft};

pub mod memory;

pub use memory::MemoryStore;

// ---------------------------------------------------------------------------
// StoreError
// ---------------------------------------------------------------------------

/// Errors the persistence layer can report.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The referenced record does not exist.
    #[error("record not found: {0}")]
    NotFound(String),

    /// The backing storage rejected the operation.
    #[error("storage failure: {0}")]
    Backend(String),
}

// ---------------------------------------------------------------------------
// RecordStore trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe persistence contract.
///
/// All operations are asynchronous and atomic: a failed write leaves no
/// partial record behind.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a draft, returning the stored [`Expense`] with its id.
    async fn add_expense(&self, draft: ExpenseDraft) -> Result<Expense, StoreError>;

    /// All categories currently active, built-ins first.
    async fn get_categories(&self) -> Result<Vec<Category>, StoreError>;

    /// Look a category up by id.
    async fn get_category_by_id(&self, id: &str) -> Result<Option<Category>, StoreError>;
}

// Compile-time assertion: Box<dyn RecordStore> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn RecordStore>) {}
};
