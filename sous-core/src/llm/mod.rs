//! Text-generation providers for recipe synthesis.
//!
//! Providers sit behind the [`RecipeGenerator`] trait so the flow can be
//! exercised with [`FakeGenerator`] in tests and local runs.

mod fake;
mod huggingface;
pub mod prompt;

pub use fake::{FakeGenerator, GenerateCall};
pub use huggingface::HuggingFaceGenerator;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::config::{ConfigError, GeneratorConfig};

/// Error type for generation requests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The endpoint could not be reached or the body could not be read.
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// The endpoint answered with a non-success status.
    #[error("API returned error: {status} - {body}")]
    ApiError { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Trait for recipe generators.
///
/// Implementations are stateless: the same inputs always produce a fresh
/// request. Caching is the store's job.
#[async_trait]
pub trait RecipeGenerator: Send + Sync + fmt::Debug {
    /// Generate recipe text for the given display values.
    async fn generate(
        &self,
        ingredients: &[String],
        action: &str,
        category: &str,
    ) -> Result<String, GenerationError>;

    /// Provider name (e.g., "huggingface", "fake").
    fn provider_name(&self) -> &'static str;

    /// Name shown to users in error reports (e.g., "Hugging Face").
    fn display_name(&self) -> &'static str {
        self.provider_name()
    }

    /// Model name (e.g., "HuggingFaceH4/zephyr-7b-beta").
    fn model_name(&self) -> &str;
}

/// Build the configured generator.
///
/// - `SOUS_GENERATOR`: "huggingface" (default) | "fake"
/// - see [`GeneratorConfig::from_env`] for the Hugging Face settings
pub fn create_generator_from_env() -> Result<Box<dyn RecipeGenerator>, ConfigError> {
    let provider = std::env::var("SOUS_GENERATOR").unwrap_or_else(|_| "huggingface".to_string());

    match provider.as_str() {
        "huggingface" => {
            let config = GeneratorConfig::from_env()?;
            Ok(Box::new(HuggingFaceGenerator::new(config)))
        }
        "fake" => Ok(Box::new(FakeGenerator::default())),
        other => Err(ConfigError::InvalidValue {
            name: "SOUS_GENERATOR".to_string(),
            value: other.to_string(),
        }),
    }
}
