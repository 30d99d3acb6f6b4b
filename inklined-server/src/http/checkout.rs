use std::sync::Arc;

use axum::extract::State;
use axum::http::{header::ORIGIN, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use inklined_common::models::donation::CheckoutRequest;
use inklined_core::Error;

use crate::context::ServerContext;

/// POST /api/donate/checkout
pub async fn create_checkout_session(
    State(ctx): State<Arc<ServerContext>>,
    headers: HeaderMap,
    Json(req): Json<CheckoutRequest>,
) -> Response {
    // Redirect URLs follow the caller's own origin so the flow works in any
    // deployment environment; the configured public URL is the fallback.
    let origin = headers
        .get(ORIGIN)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(&ctx.public_url);

    match ctx
        .donation_service
        .create_checkout_session(&req, origin)
        .await
    {
        Ok(session) => (
            StatusCode::OK,
            Json(json!({ "sessionId": session.id, "url": session.url })),
        )
            .into_response(),
        Err(Error::Validation(msg)) => {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
        }
        Err(e) => {
            error!("Checkout session creation failed: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Unable to create checkout session" })),
            )
                .into_response()
        }
    }
}

/// GET /api/donate/config
///
/// The client-side redirect needs the publishable key; the secret key never
/// leaves the server.
pub async fn donation_config(State(ctx): State<Arc<ServerContext>>) -> Response {
    (
        StatusCode::OK,
        Json(json!({ "publishableKey": ctx.stripe_publishable_key })),
    )
        .into_response()
}
