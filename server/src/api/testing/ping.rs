use axum::{response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PingResponse {
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/api/test/ping",
    tag = "testing",
    responses(
        (status = 200, description = "Ping response", body = PingResponse)
    )
)]
pub async fn ping() -> impl IntoResponse {
    Json(PingResponse {
        message: "ping".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use crate::test_support::{send, state};
    use axum::http::{Method, StatusCode};
    use sous_core::{FakeGenerator, MemoryStore};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_ping() {
        let store = Arc::new(MemoryStore::new());
        let generator = Arc::new(FakeGenerator::default());

        let (status, body) =
            send::<()>(state(&store, &generator), Method::GET, "/api/test/ping", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "ping");
        assert_eq!(store.find_calls(), 0);
    }
}
