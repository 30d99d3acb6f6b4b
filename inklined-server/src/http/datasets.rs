use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::context::ServerContext;

/// GET /api/data/{dashboard}
///
/// Serves one of the pre-scraped dashboard datasets (immigration, congress,
/// promises, foreign_affairs, spending, markets, ...) as JSON from the data
/// directory. The dataset name is restricted to a flat filename.
pub async fn serve_dataset(
    State(ctx): State<Arc<ServerContext>>,
    Path(dashboard): Path<String>,
) -> Response {
    if dashboard.is_empty()
        || !dashboard
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid dataset name" })),
        )
            .into_response();
    }

    let path = ctx.data_dir.join(format!("{}.json", dashboard));
    match tokio::fs::read_to_string(&path).await {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "unknown dataset" })),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to read dataset {}: {:?}", dashboard, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "unable to read dataset" })),
            )
                .into_response()
        }
    }
}
