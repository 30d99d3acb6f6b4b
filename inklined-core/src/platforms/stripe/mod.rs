// File: inklined-core/src/platforms/stripe/mod.rs

pub mod client;
pub mod events;
pub mod webhook;

pub use client::StripeClient;
