//! In-process recipe store for tests and local runs.

use chrono::Utc;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{RecipeStore, StoreError};
use crate::types::{CacheKey, NewRecipeRecord, RecipeRecord};

#[derive(Debug, Default)]
struct MemoryState {
    records: Vec<RecipeRecord>,
    schema_ready: bool,
    unavailable: bool,
    reject_inserts: bool,
    find_calls: usize,
    insert_calls: usize,
}

/// A [`RecipeStore`] backed by a `Vec`, with call counters and failure switches.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails as if the database were unreachable.
    pub fn unavailable() -> Self {
        let store = Self::new();
        store.state().unavailable = true;
        store
    }

    /// A store that answers lookups but rejects every insert.
    pub fn rejecting_inserts() -> Self {
        let store = Self::new();
        store.state().reject_inserts = true;
        store
    }

    /// Append a record without counting it as an `insert` call.
    pub fn seed(&self, record: NewRecipeRecord) {
        self.state().push(record);
    }

    pub fn records(&self) -> Vec<RecipeRecord> {
        self.state().records.clone()
    }

    pub fn find_calls(&self) -> usize {
        self.state().find_calls
    }

    pub fn insert_calls(&self) -> usize {
        self.state().insert_calls
    }

    pub fn schema_ready(&self) -> bool {
        self.state().schema_ready
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MemoryState {
    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable(
                "memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }

    fn push(&mut self, record: NewRecipeRecord) {
        let id = self.records.len() as i32 + 1;
        self.records.push(RecipeRecord {
            id,
            category: record.category,
            ingredients: record.ingredients,
            action: record.action,
            steps: record.steps,
            created_at: Utc::now(),
        });
    }
}

impl RecipeStore for MemoryStore {
    fn ensure_schema(&self) -> Result<(), StoreError> {
        let mut state = self.state();
        state.check_available()?;
        state.schema_ready = true;
        Ok(())
    }

    fn find(&self, key: &CacheKey) -> Result<Option<String>, StoreError> {
        let mut state = self.state();
        state.find_calls += 1;
        state.check_available()?;

        Ok(state
            .records
            .iter()
            .find(|r| {
                r.ingredients.to_lowercase() == key.ingredients
                    && r.action.to_lowercase() == key.action
            })
            .map(|r| r.steps.clone()))
    }

    fn insert(&self, record: &NewRecipeRecord) -> Result<(), StoreError> {
        let mut state = self.state();
        state.insert_calls += 1;
        state.check_available()?;

        if state.reject_inserts {
            return Err(StoreError::Query("insert rejected".to_string()));
        }

        state.push(record.clone());
        Ok(())
    }
}
