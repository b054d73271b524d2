pub mod generate;

use crate::AppState;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new().route("/generate", post(generate::generate_recipe))
}

#[derive(OpenApi)]
#[openapi(
    paths(generate::generate_recipe),
    components(schemas(
        generate::GenerateRecipeRequest,
        generate::GenerateRecipeResponse,
        generate::RecipeSourceKind,
    ))
)]
pub struct ApiDoc;
