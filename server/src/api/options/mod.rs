pub mod list;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for the selection catalog
pub fn router() -> Router<AppState> {
    Router::new().route(list::PATH, get(list::list_options))
}

#[derive(OpenApi)]
#[openapi(paths(list::list_options), components(schemas(list::OptionsResponse)))]
pub struct ApiDoc;
