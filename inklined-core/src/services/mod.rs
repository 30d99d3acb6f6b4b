// File: src/services/mod.rs

pub mod donation_service;
pub mod webhook_service;

pub use donation_service::DonationService;
pub use webhook_service::{WebhookOutcome, WebhookService};
