//! Thin HTTP client for the sous server API.

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct PingResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct OptionsResponse {
    pub ingredients: Vec<String>,
    pub categories: Vec<String>,
    pub actions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateRecipeRequest<'a> {
    pub ingredients: &'a [String],
    pub category: &'a str,
    pub action: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRecipeResponse {
    pub heading: String,
    pub text: String,
    pub source: String,
    pub persisted: bool,
    pub generator_status: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

pub struct ApiClient {
    base_path: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(server: &str) -> Self {
        Self {
            base_path: server.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_path, path)
    }

    pub async fn ping(&self) -> Result<PingResponse> {
        let response = self.http.get(self.url("/api/test/ping")).send().await;
        decode(response).await
    }

    pub async fn options(&self) -> Result<OptionsResponse> {
        let response = self.http.get(self.url("/api/options")).send().await;
        decode(response).await
    }

    pub async fn generate(
        &self,
        request: &GenerateRecipeRequest<'_>,
    ) -> Result<GenerateRecipeResponse> {
        let response = self
            .http
            .post(self.url("/api/recipes/generate"))
            .json(request)
            .send()
            .await;
        decode(response).await
    }
}

/// Decode a JSON body, turning non-success statuses into the server's error message.
async fn decode<T: DeserializeOwned>(
    response: reqwest::Result<reqwest::Response>,
) -> Result<T> {
    let response = response.context("Failed to reach server")?;
    let status = response.status();
    let body = response.text().await.context("Failed to read response")?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or(body);
        bail!("Server returned {}: {}", status.as_u16(), message);
    }

    serde_json::from_str(&body).with_context(|| format!("Unexpected response: {}", body))
}
