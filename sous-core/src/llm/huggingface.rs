//! Hugging Face inference API provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::prompt::{render_recipe_prompt, strip_prompt_echo};
use super::{GenerationError, RecipeGenerator};
use crate::config::GeneratorConfig;

/// Upper bound on prompt plus completion length, in tokens.
pub const MAX_LENGTH: u32 = 1024;
pub const TEMPERATURE: f32 = 0.7;
pub const TOP_P: f32 = 0.9;

/// Hugging Face text-generation provider.
#[derive(Debug)]
pub struct HuggingFaceGenerator {
    config: GeneratorConfig,
    client: reqwest::Client,
}

impl HuggingFaceGenerator {
    /// Create a provider. The HTTP client keeps reqwest's defaults, so a request
    /// has no timeout.
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

/// Inference API request format.
#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_length: u32,
    do_sample: bool,
    temperature: f32,
    top_p: f32,
}

/// One element of the inference API's response array.
#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// Extract the completion from a successful response body.
fn parse_generated_text(body: &str, prompt: &str) -> Result<String, GenerationError> {
    let results: Vec<GeneratedText> =
        serde_json::from_str(body).map_err(|e| GenerationError::ParseError(e.to_string()))?;

    let first = results
        .into_iter()
        .next()
        .ok_or_else(|| GenerationError::ParseError("Empty response array".to_string()))?;

    Ok(strip_prompt_echo(&first.generated_text, prompt).to_string())
}

#[async_trait]
impl RecipeGenerator for HuggingFaceGenerator {
    async fn generate(
        &self,
        ingredients: &[String],
        action: &str,
        category: &str,
    ) -> Result<String, GenerationError> {
        let prompt = render_recipe_prompt(ingredients, action, category);

        let request = InferenceRequest {
            inputs: &prompt,
            parameters: InferenceParameters {
                max_length: MAX_LENGTH,
                do_sample: true,
                temperature: TEMPERATURE,
                top_p: TOP_P,
            },
        };

        tracing::debug!(
            model = %self.config.model,
            ingredients = ingredients.len(),
            "Calling inference API"
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();

        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::RequestFailed(e.to_string()))?;

        if status != 200 {
            return Err(GenerationError::ApiError { status, body });
        }

        parse_generated_text(&body, &prompt)
    }

    fn provider_name(&self) -> &'static str {
        "huggingface"
    }

    fn display_name(&self) -> &'static str {
        "Hugging Face"
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use std::sync::{Arc, Mutex};

    /// A request received by the stand-in inference endpoint.
    #[derive(Debug, Clone)]
    struct Received {
        path: String,
        authorization: Option<String>,
        body: serde_json::Value,
    }

    struct Endpoint {
        status: StatusCode,
        body: String,
        received: Mutex<Vec<Received>>,
    }

    async fn handle(
        State(endpoint): State<Arc<Endpoint>>,
        uri: axum::http::Uri,
        headers: HeaderMap,
        Json(body): Json<serde_json::Value>,
    ) -> (StatusCode, String) {
        endpoint.received.lock().unwrap().push(Received {
            path: uri.path().to_string(),
            authorization: headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body,
        });
        (endpoint.status, endpoint.body.clone())
    }

    /// Serve a fixed answer on 127.0.0.1 and return a generator pointed at it.
    async fn spawn_endpoint(
        status: StatusCode,
        body: impl Into<String>,
    ) -> (HuggingFaceGenerator, Arc<Endpoint>) {
        let endpoint = Arc::new(Endpoint {
            status,
            body: body.into(),
            received: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/models/{owner}/{name}", post(handle))
            .with_state(endpoint.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let generator = HuggingFaceGenerator::new(GeneratorConfig {
            api_key: "hf_test".to_string(),
            model: "HuggingFaceH4/zephyr-7b-beta".to_string(),
            base_url: format!("http://{}/models", addr),
        });

        (generator, endpoint)
    }

    fn eggs_and_potato() -> Vec<String> {
        vec!["Eggs".to_string(), "Potato".to_string()]
    }

    #[test]
    fn test_parse_strips_prompt() {
        let body = serde_json::json!([{ "generated_text": "PROMPT\nStep 1..." }]).to_string();
        assert_eq!(parse_generated_text(&body, "PROMPT\n").unwrap(), "Step 1...");
    }

    #[test]
    fn test_parse_empty_array() {
        assert_eq!(
            parse_generated_text("[]", "PROMPT"),
            Err(GenerationError::ParseError("Empty response array".to_string()))
        );
    }

    #[test]
    fn test_parse_not_json() {
        assert!(matches!(
            parse_generated_text("<html>", "PROMPT"),
            Err(GenerationError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn test_generate_sends_prompt_and_strips_echo() {
        let prompt = render_recipe_prompt(&eggs_and_potato(), "fry", "Breakfast");
        let answer =
            serde_json::json!([{ "generated_text": format!("{}Step 1...", prompt) }]).to_string();
        let (generator, endpoint) = spawn_endpoint(StatusCode::OK, answer).await;

        let text = generator
            .generate(&eggs_and_potato(), "fry", "Breakfast")
            .await
            .unwrap();
        assert_eq!(text, "Step 1...");

        let received = endpoint.received.lock().unwrap().clone();
        assert_eq!(received.len(), 1);
        let request = &received[0];
        assert_eq!(request.path, "/models/HuggingFaceH4/zephyr-7b-beta");
        assert_eq!(request.authorization.as_deref(), Some("Bearer hf_test"));
        assert_eq!(request.body["inputs"], prompt.as_str());
        assert_eq!(request.body["parameters"]["max_length"], 1024);
        assert_eq!(request.body["parameters"]["do_sample"], true);
        let temperature = request.body["parameters"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.7).abs() < 1e-6);
        let top_p = request.body["parameters"]["top_p"].as_f64().unwrap();
        assert!((top_p - 0.9).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_generate_non_success_status() {
        let (generator, _endpoint) = spawn_endpoint(
            StatusCode::SERVICE_UNAVAILABLE,
            r#"{"error":"Model is currently loading"}"#,
        )
        .await;

        let err = generator
            .generate(&eggs_and_potato(), "fry", "Breakfast")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            GenerationError::ApiError {
                status: 503,
                body: r#"{"error":"Model is currently loading"}"#.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_error_response_names_provider_for_users() {
        let (generator, _endpoint) =
            spawn_endpoint(StatusCode::SERVICE_UNAVAILABLE, "Model is currently loading").await;
        let store = crate::MemoryStore::new();
        let request = crate::RecipeRequest::new(eggs_and_potato(), "Breakfast", "fry");

        let outcome = crate::lookup_or_generate(&store, &generator, &request)
            .await
            .unwrap();

        assert_eq!(
            outcome.text,
            "Error from Hugging Face API: 503 - Model is currently loading"
        );
        assert!(store.records().is_empty());
    }

    #[tokio::test]
    async fn test_generate_unreachable_endpoint() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let generator = HuggingFaceGenerator::new(GeneratorConfig {
            api_key: "hf_test".to_string(),
            model: "m".to_string(),
            base_url: format!("http://{}/models", addr),
        });

        let err = generator
            .generate(&eggs_and_potato(), "fry", "Breakfast")
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::RequestFailed(_)));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let generator = HuggingFaceGenerator::new(GeneratorConfig {
            api_key: "k".to_string(),
            model: "owner/model".to_string(),
            base_url: "https://example.test/models/".to_string(),
        });
        assert_eq!(generator.endpoint(), "https://example.test/models/owner/model");
    }
}
