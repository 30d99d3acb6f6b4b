use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::context::ServerContext;

/// GET /api/supporters
///
/// Administrative listing, newest first.
pub async fn list_supporters(State(ctx): State<Arc<ServerContext>>) -> Response {
    match ctx.supporter_repo.list_all().await {
        Ok(supporters) => (StatusCode::OK, Json(supporters)).into_response(),
        Err(e) => {
            error!("Supporter listing failed: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "unable to list supporters" })),
            )
                .into_response()
        }
    }
}
