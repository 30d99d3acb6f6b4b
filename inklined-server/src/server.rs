//! inklined-server/src/server.rs
//!
//! Router construction and the serving loop.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use axum_server::{Handle, Server};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

use inklined_core::Error;

use crate::context::ServerContext;
use crate::http;
use crate::AppConfig;
use crate::Args;

pub fn build_router(ctx: Arc<ServerContext>) -> Router {
    Router::new()
        .route("/health", get(http::health))
        .route("/api/donate/checkout", post(http::checkout::create_checkout_session))
        .route("/api/donate/config", get(http::checkout::donation_config))
        .route("/api/donate/webhook", post(http::webhook::stripe_webhook))
        .route("/api/supporters", get(http::supporters::list_supporters))
        .route("/api/data/{dashboard}", get(http::datasets::serve_dataset))
        .with_state(ctx)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

pub async fn run_server(args: Args, config: AppConfig) -> Result<(), Error> {
    let ctx = Arc::new(ServerContext::new(&args, &config).await?);
    let app = build_router(ctx);

    let addr: SocketAddr = args.server_addr.parse()?;
    info!("Inklined listening on http://{}", addr);

    let handle = Handle::new();
    let handle_clone = handle.clone();

    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        info!("Shutdown signal received.");
        handle_clone.graceful_shutdown(None);
    });

    Server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    info!("Server shut down.");
    Ok(())
}
