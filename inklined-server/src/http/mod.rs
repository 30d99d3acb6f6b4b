// File: inklined-server/src/http/mod.rs

pub mod checkout;
pub mod datasets;
pub mod supporters;
pub mod webhook;

/// Liveness probe.
pub async fn health() -> &'static str {
    "OK"
}
