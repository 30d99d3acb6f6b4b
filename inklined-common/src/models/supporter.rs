use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder name used whenever Stripe reports no customer name.
pub const ANONYMOUS_SUPPORTER: &str = "Anonymous Supporter";

/// One successful donation-derived relationship with a person.
///
/// Rows are append-only: nothing is ever deleted, and only the
/// notification fields are mutated after insert.
#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct Supporter {
    pub supporter_id: Uuid,
    pub email: String,
    pub display_name: String,
    /// Major units (dollars), always positive.
    pub amount: f64,
    /// 3-letter upper-case code, e.g. "USD".
    pub currency: String,
    /// Stripe's durable customer reference; the natural dedup key.
    pub stripe_customer_id: String,
    pub stripe_payment_intent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub notification_sent: bool,
    pub notified_at: Option<DateTime<Utc>>,
}

/// Fields for a new supporter row; id and created_at are generated at insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSupporter {
    pub email: String,
    pub display_name: String,
    pub amount: f64,
    pub currency: String,
    pub stripe_customer_id: String,
    pub stripe_payment_intent: Option<String>,
}
