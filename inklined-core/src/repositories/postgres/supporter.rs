// src/repositories/postgres/supporter.rs

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use inklined_common::models::supporter::{NewSupporter, Supporter};
use inklined_common::traits::repository_traits::SupporterRepository;

use crate::Error;

// Postgres SQLSTATE for unique_violation.
const UNIQUE_VIOLATION: &str = "23505";

pub struct PostgresSupporterRepository {
    pub pool: Pool<Postgres>,
}

impl PostgresSupporterRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SupporterRepository for PostgresSupporterRepository {
    async fn create(&self, new_supporter: &NewSupporter) -> Result<Supporter, Error> {
        let supporter = Supporter {
            supporter_id: Uuid::new_v4(),
            email: new_supporter.email.clone(),
            display_name: new_supporter.display_name.clone(),
            amount: new_supporter.amount,
            currency: new_supporter.currency.clone(),
            stripe_customer_id: new_supporter.stripe_customer_id.clone(),
            stripe_payment_intent: new_supporter.stripe_payment_intent.clone(),
            created_at: Utc::now(),
            notification_sent: false,
            notified_at: None,
        };

        let result = sqlx::query(
            r#"
            INSERT INTO supporters (
                supporter_id, email, display_name, amount, currency,
                stripe_customer_id, stripe_payment_intent, created_at,
                notification_sent, notified_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(supporter.supporter_id)
        .bind(&supporter.email)
        .bind(&supporter.display_name)
        .bind(supporter.amount)
        .bind(&supporter.currency)
        .bind(&supporter.stripe_customer_id)
        .bind(&supporter.stripe_payment_intent)
        .bind(supporter.created_at)
        .bind(supporter.notification_sent)
        .bind(supporter.notified_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(supporter),
            Err(sqlx::Error::Database(db_err))
                if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                Err(Error::DuplicateSupporter(
                    new_supporter.stripe_customer_id.clone(),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_by_customer_id(&self, customer_id: &str) -> Result<Option<Supporter>, Error> {
        let row = sqlx::query_as::<_, Supporter>(
            r#"
            SELECT supporter_id,
                   email,
                   display_name,
                   amount,
                   currency,
                   stripe_customer_id,
                   stripe_payment_intent,
                   created_at,
                   notification_sent,
                   notified_at
            FROM supporters
            WHERE stripe_customer_id = $1
            "#,
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn mark_notified(&self, supporter_id: Uuid) -> Result<(), Error> {
        // The WHERE guard makes a second call a harmless no-op.
        sqlx::query(
            r#"
            UPDATE supporters
            SET notification_sent = TRUE,
                notified_at = $1
            WHERE supporter_id = $2
              AND notification_sent = FALSE
            "#,
        )
        .bind(Utc::now())
        .bind(supporter_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Supporter>, Error> {
        let rows = sqlx::query_as::<_, Supporter>(
            r#"
            SELECT
                supporter_id,
                email,
                display_name,
                amount,
                currency,
                stripe_customer_id,
                stripe_payment_intent,
                created_at,
                notification_sent,
                notified_at
            FROM supporters
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
