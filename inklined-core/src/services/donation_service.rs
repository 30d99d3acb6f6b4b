use std::sync::Arc;
use tracing::info;

use inklined_common::models::donation::{CheckoutRequest, CheckoutSession, CheckoutSessionParams};
use inklined_common::traits::payment_traits::StripeApi;

use crate::Error;

/// Minimum accepted donation, in dollars.
pub const MIN_DONATION_USD: f64 = 5.0;

const DEFAULT_DONOR_NAME: &str = "Anonymous";

/// Translates a donation intent into a hosted checkout session.
///
/// Nothing is persisted here; a supporter record only comes into existence
/// once the completed-checkout webhook arrives.
pub struct DonationService {
    stripe: Arc<dyn StripeApi>,
}

impl DonationService {
    pub fn new(stripe: Arc<dyn StripeApi>) -> Self {
        Self { stripe }
    }

    pub async fn create_checkout_session(
        &self,
        req: &CheckoutRequest,
        origin: &str,
    ) -> Result<CheckoutSession, Error> {
        if req.amount < MIN_DONATION_USD {
            return Err(Error::Validation(
                "Minimum donation amount is $5".to_string(),
            ));
        }

        let params = CheckoutSessionParams {
            amount_cents: to_minor_units(req.amount),
            is_monthly: req.is_monthly,
            donor_name: req
                .donor_name
                .clone()
                .unwrap_or_else(|| DEFAULT_DONOR_NAME.to_string()),
            donor_email: req.donor_email.clone(),
            origin: origin.to_string(),
        };

        let session = self.stripe.create_checkout_session(&params).await?;
        info!(
            "Checkout session {} created: ${:.2} {}",
            session.id,
            req.amount,
            if req.is_monthly { "monthly" } else { "one-time" }
        );
        Ok(session)
    }
}

/// Dollars to integer cents, rounding half away from zero.
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}
