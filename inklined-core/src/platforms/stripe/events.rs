// File: inklined-core/src/platforms/stripe/events.rs

use serde::Deserialize;

pub const CHECKOUT_SESSION_COMPLETED: &str = "checkout.session.completed";

/// Top-level wrapper for every Stripe event:
/// { "id": "evt_...", "type": "...", "data": { "object": { ... } } }
#[derive(Debug, Clone, Deserialize)]
pub struct StripeEventEnvelope {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: StripeEventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeEventData {
    pub object: serde_json::Value,
}

// --------------------------------------------------------------------------------
// For each event type this system acts on, the structured data for `object`
// --------------------------------------------------------------------------------

/// "checkout.session.completed" object, reduced to the fields we consume.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSessionCompleted {
    pub id: String,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub customer_details: Option<CustomerDetails>,
    /// Minor units (cents).
    #[serde(default)]
    pub amount_total: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub payment_intent: Option<String>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerDetails {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}
