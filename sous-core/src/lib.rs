//! Core of the sous recipe service.
//!
//! A recipe is looked up in the [`RecipeStore`] by its normalized
//! (ingredients, action) key. On a miss the [`RecipeGenerator`] synthesizes
//! one and the result is appended to the store for reuse.

pub mod catalog;
pub mod config;
pub mod error;
pub mod flow;
pub mod llm;
pub mod store;
pub mod types;

pub use catalog::{validate_selection, ACTIONS, CATEGORIES, INGREDIENTS};
pub use config::{ConfigError, DatabaseConfig, GeneratorConfig};
pub use error::{FlowError, PreconditionError};
pub use flow::lookup_or_generate;
pub use llm::{
    create_generator_from_env, FakeGenerator, GenerateCall, GenerationError,
    HuggingFaceGenerator, RecipeGenerator,
};
pub use store::{MemoryStore, RecipeStore, StoreError};
pub use types::{
    CacheKey, NewRecipeRecord, RecipeOutcome, RecipeRecord, RecipeRequest, RecipeSource,
};
