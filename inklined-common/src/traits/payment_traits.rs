use async_trait::async_trait;
use mockall::automock;

use crate::error::Error;
use crate::models::donation::{CheckoutSession, CheckoutSessionParams};

/// The slice of the Stripe API this system depends on.
#[automock]
#[async_trait]
pub trait StripeApi: Send + Sync {
    async fn create_checkout_session(
        &self,
        params: &CheckoutSessionParams,
    ) -> Result<CheckoutSession, Error>;
}
