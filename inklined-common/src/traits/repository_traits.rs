use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::error::Error;
use crate::models::supporter::{NewSupporter, Supporter};

/// Durable supporter store.
///
/// `create` must fail with `Error::DuplicateSupporter` when a row for the
/// same Stripe customer id already exists; the backing schema enforces the
/// uniqueness so concurrent webhook retries cannot slip a second row in.
#[automock]
#[async_trait]
pub trait SupporterRepository: Send + Sync {
    /// Generates the supporter id and creation timestamp, then inserts.
    async fn create(&self, new_supporter: &NewSupporter) -> Result<Supporter, Error>;

    /// Point lookup on the unique Stripe customer id.
    async fn get_by_customer_id(&self, customer_id: &str) -> Result<Option<Supporter>, Error>;

    /// Sets the notification flag and timestamp once; calling it again is a no-op.
    async fn mark_notified(&self, supporter_id: Uuid) -> Result<(), Error>;

    /// All supporters, newest first.
    async fn list_all(&self) -> Result<Vec<Supporter>, Error>;
}
