//! Recipe cache storage.
//!
//! The store is append-only: records are inserted once and never updated or
//! deleted. No uniqueness is enforced on the lookup key, so racing writers can
//! leave duplicates behind; lookups return the first match.

mod memory;

pub use memory::MemoryStore;

use thiserror::Error;

use crate::types::{CacheKey, NewRecipeRecord};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Database connection unavailable: {0}")]
    Unavailable(String),

    #[error("Query failed: {0}")]
    Query(String),
}

/// Durable cache of generated recipes.
///
/// Implementations must pass every user-supplied value as a bound query
/// parameter, never by string interpolation.
pub trait RecipeStore: Send + Sync {
    /// Create the backing table if it does not exist. Safe to call on every startup.
    fn ensure_schema(&self) -> Result<(), StoreError>;

    /// Steps of the first record whose lowercased ingredients and action equal `key`.
    fn find(&self, key: &CacheKey) -> Result<Option<String>, StoreError>;

    /// Append a record. `created_at` is assigned by the store.
    fn insert(&self, record: &NewRecipeRecord) -> Result<(), StoreError>;
}
