//! Fake recipe generator for testing.
//!
//! Returns a configured reply without network access and records every call,
//! so tests can assert on how often and with what prompt the generator ran.

use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};

use super::prompt::{render_recipe_prompt, strip_prompt_echo};
use super::{GenerationError, RecipeGenerator};

/// Canned recipe returned by [`FakeGenerator::default`].
const DEFAULT_RECIPE: &str = "Simple Skillet Supper

Ingredients: as selected
Cooking time: 20 minutes
Servings: 2

1. Prepare the ingredients.
2. Heat a pan over medium heat.
3. Cook the main ingredients for 8 minutes.
4. Season to taste.
5. Rest for 2 minutes.

Serve warm.";

/// One recorded `generate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateCall {
    pub ingredients: Vec<String>,
    pub action: String,
    pub category: String,
    /// The prompt a real provider would have sent.
    pub prompt: String,
}

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    /// Echo the prompt followed by this completion, then strip the echo the
    /// way a real provider does.
    Echo(String),
    ApiError { status: u16, body: String },
    Unreachable,
}

/// A fake generator for testing.
#[derive(Debug)]
pub struct FakeGenerator {
    reply: Reply,
    calls: Mutex<Vec<GenerateCall>>,
}

impl Default for FakeGenerator {
    fn default() -> Self {
        Self::with_text(DEFAULT_RECIPE)
    }
}

impl FakeGenerator {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always return `text`.
    pub fn with_text(text: &str) -> Self {
        Self::with_reply(Reply::Text(text.to_string()))
    }

    /// Answer with the prompt followed by `completion`, as the inference API does.
    pub fn echoing(completion: &str) -> Self {
        Self::with_reply(Reply::Echo(completion.to_string()))
    }

    /// Always fail as if the endpoint returned `status` with `body`.
    pub fn with_api_error(status: u16, body: &str) -> Self {
        Self::with_reply(Reply::ApiError {
            status,
            body: body.to_string(),
        })
    }

    /// Always fail as if the endpoint could not be reached.
    pub fn unreachable() -> Self {
        Self::with_reply(Reply::Unreachable)
    }

    pub fn calls(&self) -> Vec<GenerateCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[async_trait]
impl RecipeGenerator for FakeGenerator {
    async fn generate(
        &self,
        ingredients: &[String],
        action: &str,
        category: &str,
    ) -> Result<String, GenerationError> {
        let prompt = render_recipe_prompt(ingredients, action, category);

        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(GenerateCall {
                ingredients: ingredients.to_vec(),
                action: action.to_string(),
                category: category.to_string(),
                prompt: prompt.clone(),
            });

        // Give other tasks a chance to run, as a network round-trip would.
        tokio::task::yield_now().await;

        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Echo(completion) => {
                let generated = format!("{}{}", prompt, completion);
                Ok(strip_prompt_echo(&generated, &prompt).to_string())
            }
            Reply::ApiError { status, body } => Err(GenerationError::ApiError {
                status: *status,
                body: body.clone(),
            }),
            Reply::Unreachable => Err(GenerationError::RequestFailed(
                "FakeGenerator: endpoint unreachable".to_string(),
            )),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn display_name(&self) -> &'static str {
        "Fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn onion() -> Vec<String> {
        vec!["Onion".to_string()]
    }

    #[tokio::test]
    async fn test_fake_records_calls() {
        let generator = FakeGenerator::with_text("recipe");
        let text = generator.generate(&onion(), "fry", "Snacks").await.unwrap();
        assert_eq!(text, "recipe");

        let calls = generator.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].ingredients, onion());
        assert_eq!(calls[0].action, "fry");
        assert_eq!(calls[0].category, "Snacks");
        assert!(calls[0].prompt.contains("Onion"));
    }

    #[tokio::test]
    async fn test_fake_echo_is_stripped() {
        let generator = FakeGenerator::echoing("Step 1...");
        let text = generator.generate(&onion(), "fry", "Snacks").await.unwrap();
        assert_eq!(text, "Step 1...");
    }

    #[tokio::test]
    async fn test_fake_api_error() {
        let generator = FakeGenerator::with_api_error(429, "slow down");
        let err = generator.generate(&onion(), "fry", "Snacks").await.unwrap_err();
        assert_eq!(
            err,
            GenerationError::ApiError {
                status: 429,
                body: "slow down".to_string()
            }
        );
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fake_unreachable() {
        let generator = FakeGenerator::unreachable();
        let err = generator.generate(&onion(), "fry", "Snacks").await.unwrap_err();
        assert!(matches!(err, GenerationError::RequestFailed(_)));
    }

    #[tokio::test]
    async fn test_default_recipe_has_numbered_steps() {
        let text = FakeGenerator::default()
            .generate(&onion(), "fry", "Snacks")
            .await
            .unwrap();
        assert!(text.contains("5. "));
    }
}
