use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use inklined_core::Error;

use crate::context::ServerContext;

const SIGNATURE_HEADER: &str = "stripe-signature";

/// POST /api/donate/webhook
///
/// The body stays as raw bytes until the signature has been verified;
/// re-serialization would change the byte layout and break the check.
pub async fn stripe_webhook(
    State(ctx): State<Arc<ServerContext>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let Some(signature) = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok()) else {
        warn!("Webhook delivery without a {} header", SIGNATURE_HEADER);
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "missing stripe-signature header" })),
        )
            .into_response();
    };

    match ctx.webhook_service.process_event(&body, signature).await {
        // Every terminal outcome acknowledges receipt so Stripe stops
        // retrying; skips and dedup no-ops are successes here.
        Ok(_) => (StatusCode::OK, Json(json!({ "received": true }))).into_response(),
        Err(Error::SignatureVerification(msg)) => {
            warn!("Webhook signature rejected: {}", msg);
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "invalid signature" })),
            )
                .into_response()
        }
        Err(e) => {
            // Non-2xx makes Stripe redeliver later; never a false success.
            error!("Webhook processing failed: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "webhook processing failed" })),
            )
                .into_response()
        }
    }
}
