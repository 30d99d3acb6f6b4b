// File: inklined-common/src/models/mod.rs

pub mod donation;
pub mod supporter;

pub use donation::{CheckoutRequest, CheckoutSession, CheckoutSessionParams};
pub use supporter::{NewSupporter, Supporter};
