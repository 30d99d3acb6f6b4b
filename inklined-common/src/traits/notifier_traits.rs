use async_trait::async_trait;
use mockall::automock;

use crate::error::Error;

/// Outbound thank-you notification. Side-effect only; the caller decides
/// what a failure means (persistence is never rolled back for one).
#[automock]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_thank_you(
        &self,
        to: &str,
        name: &str,
        amount: f64,
        currency: &str,
    ) -> Result<(), Error>;
}
