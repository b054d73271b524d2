use crate::api::{error_response, ErrorResponse};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use sous_core::{
    lookup_or_generate, validate_selection, FlowError, RecipeOutcome, RecipeRequest, RecipeSource,
};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateRecipeRequest {
    /// Selected ingredients, in selection order.
    pub ingredients: Vec<String>,
    pub category: String,
    pub action: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecipeSourceKind {
    /// Served from the recipe cache.
    Cache,
    /// Freshly generated.
    Generated,
    /// The generation service answered with an error; `text` is its report.
    GeneratorError,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateRecipeResponse {
    /// e.g. "Recipe Steps for Eggs, Potato (fry)"
    pub heading: String,
    pub text: String,
    pub source: RecipeSourceKind,
    /// Whether this call added a record to the cache.
    pub persisted: bool,
    /// Status returned by the generation service, when `source` is `generator_error`.
    pub generator_status: Option<u16>,
}

impl GenerateRecipeResponse {
    fn new(request: &RecipeRequest, outcome: RecipeOutcome) -> Self {
        let (source, persisted, generator_status) = match outcome.source {
            RecipeSource::Cache => (RecipeSourceKind::Cache, false, None),
            RecipeSource::Generated { persisted } => {
                (RecipeSourceKind::Generated, persisted, None)
            }
            RecipeSource::GeneratorError { status } => {
                (RecipeSourceKind::GeneratorError, false, Some(status))
            }
        };

        Self {
            heading: request.heading(),
            text: outcome.text,
            source,
            persisted,
            generator_status,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/recipes/generate",
    tag = "recipes",
    request_body = GenerateRecipeRequest,
    responses(
        (status = 200, description = "Recipe text, from the cache or freshly generated", body = GenerateRecipeResponse),
        (status = 400, description = "Invalid selection", body = ErrorResponse),
        (status = 502, description = "Generation service unreachable", body = ErrorResponse),
        (status = 503, description = "Recipe database unavailable", body = ErrorResponse)
    )
)]
pub async fn generate_recipe(
    State(state): State<AppState>,
    Json(request): Json<GenerateRecipeRequest>,
) -> impl IntoResponse {
    let recipe_request =
        match validate_selection(&request.ingredients, &request.category, &request.action) {
            Ok(r) => r,
            Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
        };

    let result = lookup_or_generate(
        state.store.as_ref(),
        state.generator.as_ref(),
        &recipe_request,
    )
    .await;

    match result {
        Ok(outcome) => (
            StatusCode::OK,
            Json(GenerateRecipeResponse::new(&recipe_request, outcome)),
        )
            .into_response(),
        Err(FlowError::Precondition(e)) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
        Err(e @ FlowError::Store(_)) => {
            tracing::error!(error = %e, "Recipe lookup failed");
            error_response(StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        }
        Err(e @ FlowError::Generator(_)) => {
            tracing::error!(error = %e, "Recipe generation failed");
            error_response(StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}
