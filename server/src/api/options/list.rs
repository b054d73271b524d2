use axum::{response::IntoResponse, Json};
use serde::Serialize;
use sous_core::{ACTIONS, CATEGORIES, INGREDIENTS};
use utoipa::ToSchema;

pub const PATH: &str = "/api/options";

/// Everything a client can select.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OptionsResponse {
    pub ingredients: Vec<String>,
    pub categories: Vec<String>,
    pub actions: Vec<String>,
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[utoipa::path(
    get,
    path = "/api/options",
    tag = "options",
    responses(
        (status = 200, description = "Selectable ingredients, categories and actions", body = OptionsResponse)
    )
)]
pub async fn list_options() -> impl IntoResponse {
    Json(OptionsResponse {
        ingredients: owned(INGREDIENTS),
        categories: owned(CATEGORIES),
        actions: owned(ACTIONS),
    })
}
