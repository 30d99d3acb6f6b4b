// File: inklined-core/src/platforms/stripe/client.rs

use async_trait::async_trait;
use tracing::{debug, error};

use inklined_common::models::donation::{CheckoutSession, CheckoutSessionParams};
use inklined_common::traits::payment_traits::StripeApi;

use crate::Error;

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";
const PRODUCT_DESCRIPTION: &str = "Support independent political data journalism";

/// Thin form-encoded client for the Stripe REST API.
///
/// Only the checkout-session endpoint is covered; everything else Stripe
/// does (charge authorization, subscription billing) stays on their side.
pub struct StripeClient {
    client: reqwest::Client,
    secret_key: String,
    api_base: String,
}

impl StripeClient {
    pub fn new(secret_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret_key,
            api_base: STRIPE_API_BASE.to_string(),
        }
    }

    /// Point the client at a different base URL (stripe-mock in tests).
    pub fn with_api_base(secret_key: String, api_base: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret_key,
            api_base,
        }
    }

    fn session_form(params: &CheckoutSessionParams) -> Vec<(String, String)> {
        let cadence = if params.is_monthly {
            "Monthly Donation"
        } else {
            "One-Time Donation"
        };

        let mut form: Vec<(String, String)> = vec![
            ("payment_method_types[0]".into(), "card".into()),
            ("line_items[0][quantity]".into(), "1".into()),
            ("line_items[0][price_data][currency]".into(), "usd".into()),
            (
                "line_items[0][price_data][unit_amount]".into(),
                params.amount_cents.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]".into(),
                cadence.into(),
            ),
            (
                "line_items[0][price_data][product_data][description]".into(),
                PRODUCT_DESCRIPTION.into(),
            ),
            (
                "success_url".into(),
                format!(
                    "{}/donate/success?session_id={{CHECKOUT_SESSION_ID}}",
                    params.origin
                ),
            ),
            ("cancel_url".into(), format!("{}/donate/cancelled", params.origin)),
            (
                "metadata[donation_type]".into(),
                if params.is_monthly { "monthly" } else { "one-time" }.into(),
            ),
            ("metadata[donor_name]".into(), params.donor_name.clone()),
            ("metadata[source]".into(), "inklined-donate".into()),
        ];

        if params.is_monthly {
            form.push(("mode".into(), "subscription".into()));
            form.push((
                "line_items[0][price_data][recurring][interval]".into(),
                "month".into(),
            ));
        } else {
            form.push(("mode".into(), "payment".into()));
            // Payment mode does not create a customer unless asked; the
            // webhook dedup path needs the customer id.
            form.push(("customer_creation".into(), "always".into()));
        }

        if let Some(email) = &params.donor_email {
            form.push(("customer_email".into(), email.clone()));
        }

        form
    }
}

#[async_trait]
impl StripeApi for StripeClient {
    async fn create_checkout_session(
        &self,
        params: &CheckoutSessionParams,
    ) -> Result<CheckoutSession, Error> {
        let url = format!("{}/checkout/sessions", self.api_base);
        let form = Self::session_form(params);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Stripe session create failed: status={} body={}", status, body);
            return Err(Error::Stripe(format!(
                "checkout session creation failed with status {}",
                status
            )));
        }

        let session: CheckoutSession = response.json().await?;
        debug!("Created checkout session {}", session.id);
        Ok(session)
    }
}
