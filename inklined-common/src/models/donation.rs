use serde::{Deserialize, Serialize};

/// Donation intent as posted by the site's donation form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub amount: f64,
    #[serde(default)]
    pub is_monthly: bool,
    pub donor_name: Option<String>,
    pub donor_email: Option<String>,
}

/// Resolved parameters for one hosted-checkout-session request.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSessionParams {
    /// Integer minor units (cents); fractional cents are not billable.
    pub amount_cents: i64,
    pub is_monthly: bool,
    pub donor_name: String,
    pub donor_email: Option<String>,
    /// Deployment origin the success/cancel URLs are derived from.
    pub origin: String,
}

/// Session handle issued by Stripe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
}
