use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use uuid::Uuid;

use inklined_common::models::supporter::{NewSupporter, ANONYMOUS_SUPPORTER};
use inklined_common::traits::notifier_traits::Notifier;
use inklined_common::traits::repository_traits::SupporterRepository;

use crate::platforms::stripe::events::{
    CheckoutSessionCompleted, StripeEventEnvelope, CHECKOUT_SESSION_COMPLETED,
};
use crate::platforms::stripe::webhook::verify_signature;
use crate::Error;

/// Bound on the thank-you dispatch so a slow mail relay cannot hold the
/// webhook response open; the record is already durable by then.
const NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Terminal state of one webhook delivery. Every variant maps to a 200
/// acknowledgment; errors (signature, database) propagate instead.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookOutcome {
    /// Supporter persisted; `notified` is false when the thank-you failed.
    Recorded { supporter_id: Uuid, notified: bool },
    /// A record for this customer already exists; idempotent no-op.
    AlreadyRecorded,
    /// Completed session carried no email; nothing to persist.
    SkippedNoEmail,
    /// Zero or negative amount; never persisted.
    SkippedInvalidAmount,
    /// Event type this system does not act on.
    Ignored,
}

/// Drives a verified "payment happened" event to "supporter exists and has
/// been thanked": verify -> parse -> dedup -> insert -> notify -> mark.
pub struct WebhookService {
    webhook_secret: String,
    repo: Arc<dyn SupporterRepository>,
    notifier: Arc<dyn Notifier>,
}

impl WebhookService {
    pub fn new(
        webhook_secret: String,
        repo: Arc<dyn SupporterRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            webhook_secret,
            repo,
            notifier,
        }
    }

    /// Processes one raw webhook delivery.
    ///
    /// `raw_body` must be the unparsed request bytes; verification happens
    /// before any JSON is touched.
    pub async fn process_event(
        &self,
        raw_body: &[u8],
        signature: &str,
    ) -> Result<WebhookOutcome, Error> {
        verify_signature(raw_body, signature, &self.webhook_secret)?;

        let envelope: StripeEventEnvelope = serde_json::from_slice(raw_body)?;
        if envelope.event_type != CHECKOUT_SESSION_COMPLETED {
            info!("Ignoring event {} of type {}", envelope.id, envelope.event_type);
            return Ok(WebhookOutcome::Ignored);
        }

        let session: CheckoutSessionCompleted = serde_json::from_value(envelope.data.object)?;
        self.handle_completed_session(&envelope.id, session).await
    }

    async fn handle_completed_session(
        &self,
        event_id: &str,
        session: CheckoutSessionCompleted,
    ) -> Result<WebhookOutcome, Error> {
        let Some(customer_id) = session.customer else {
            warn!("Event {}: completed session {} has no customer id", event_id, session.id);
            return Ok(WebhookOutcome::Ignored);
        };

        let (email, name) = match session.customer_details {
            Some(details) => (details.email, details.name),
            None => (None, None),
        };
        let Some(email) = email else {
            info!("Event {}: no email on session {}; skipping", event_id, session.id);
            return Ok(WebhookOutcome::SkippedNoEmail);
        };

        let amount = session.amount_total.unwrap_or(0) as f64 / 100.0;
        if amount <= 0.0 {
            warn!(
                "Event {}: non-positive amount {} on session {}; skipping",
                event_id, amount, session.id
            );
            return Ok(WebhookOutcome::SkippedInvalidAmount);
        }

        // Authoritative dedup: look up before insert. Stripe retries
        // deliveries, and a retry must never mint a second record.
        if let Some(existing) = self.repo.get_by_customer_id(&customer_id).await? {
            info!(
                "Event {}: supporter {} already recorded for {}; skipping",
                event_id, existing.supporter_id, customer_id
            );
            return Ok(WebhookOutcome::AlreadyRecorded);
        }

        let new_supporter = NewSupporter {
            email: email.clone(),
            display_name: name.unwrap_or_else(|| ANONYMOUS_SUPPORTER.to_string()),
            amount,
            currency: session
                .currency
                .unwrap_or_else(|| "usd".to_string())
                .to_uppercase(),
            stripe_customer_id: customer_id.clone(),
            stripe_payment_intent: session.payment_intent,
        };

        let supporter = match self.repo.create(&new_supporter).await {
            Ok(s) => s,
            // The unique constraint backstops a concurrent retry that raced
            // past the lookup; same idempotent skip.
            Err(Error::DuplicateSupporter(_)) => {
                info!("Event {}: concurrent insert for {}; skipping", event_id, customer_id);
                return Ok(WebhookOutcome::AlreadyRecorded);
            }
            Err(e) => return Err(e),
        };
        info!(
            "Recorded supporter {} ({} {} {})",
            supporter.supporter_id, supporter.email, supporter.amount, supporter.currency
        );

        let notify = tokio::time::timeout(
            NOTIFY_TIMEOUT,
            self.notifier.send_thank_you(
                &supporter.email,
                &supporter.display_name,
                supporter.amount,
                &supporter.currency,
            ),
        )
        .await;

        match notify {
            Ok(Ok(())) => {
                self.repo.mark_notified(supporter.supporter_id).await?;
                Ok(WebhookOutcome::Recorded {
                    supporter_id: supporter.supporter_id,
                    notified: true,
                })
            }
            Ok(Err(e)) => {
                // Never roll back persistence over a failed thank-you.
                error!(
                    "Thank-you dispatch failed for supporter {}: {:?}",
                    supporter.supporter_id, e
                );
                Ok(WebhookOutcome::Recorded {
                    supporter_id: supporter.supporter_id,
                    notified: false,
                })
            }
            Err(_) => {
                error!(
                    "Thank-you dispatch timed out for supporter {}",
                    supporter.supporter_id
                );
                Ok(WebhookOutcome::Recorded {
                    supporter_id: supporter.supporter_id,
                    notified: false,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use inklined_common::models::supporter::Supporter;
    use inklined_common::traits::notifier_traits::MockNotifier;
    use inklined_common::traits::repository_traits::MockSupporterRepository;

    use crate::platforms::stripe::webhook::sign_payload;

    const SECRET: &str = "whsec_test_secret";

    fn completed_event_body() -> Vec<u8> {
        serde_json::json!({
            "id": "evt_1",
            "type": "checkout.session.completed",
            "data": {
                "object": {
                    "id": "cs_1",
                    "customer": "cus_1",
                    "customer_details": {"email": "a@b.com", "name": "Ada"},
                    "amount_total": 2500,
                    "currency": "usd",
                    "payment_intent": "pi_1"
                }
            }
        })
        .to_string()
        .into_bytes()
    }

    fn signed(body: &[u8]) -> String {
        sign_payload(body, SECRET, Utc::now().timestamp())
    }

    fn stored_supporter() -> Supporter {
        Supporter {
            supporter_id: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            display_name: "Ada".to_string(),
            amount: 25.0,
            currency: "USD".to_string(),
            stripe_customer_id: "cus_1".to_string(),
            stripe_payment_intent: Some("pi_1".to_string()),
            created_at: Utc::now(),
            notification_sent: false,
            notified_at: None,
        }
    }

    fn service(repo: MockSupporterRepository, notifier: MockNotifier) -> WebhookService {
        WebhookService::new(SECRET.to_string(), Arc::new(repo), Arc::new(notifier))
    }

    #[tokio::test]
    async fn completed_session_persists_and_notifies() {
        let body = completed_event_body();
        let sig = signed(&body);

        let mut repo = MockSupporterRepository::new();
        repo.expect_get_by_customer_id()
            .withf(|id: &str| id == "cus_1")
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_create()
            .withf(|ns: &NewSupporter| {
                ns.email == "a@b.com"
                    && ns.display_name == "Ada"
                    && ns.amount == 25.0
                    && ns.currency == "USD"
                    && ns.stripe_customer_id == "cus_1"
            })
            .times(1)
            .returning(|_| Ok(stored_supporter()));
        repo.expect_mark_notified().times(1).returning(|_| Ok(()));

        let mut notifier = MockNotifier::new();
        notifier
            .expect_send_thank_you()
            .times(1)
            .returning(|_, _, _, _| Ok(()));

        let outcome = service(repo, notifier)
            .process_event(&body, &sig)
            .await
            .unwrap();
        assert!(matches!(outcome, WebhookOutcome::Recorded { notified: true, .. }));
    }

    #[tokio::test]
    async fn duplicate_delivery_is_idempotent() {
        let body = completed_event_body();
        let sig = signed(&body);

        // Second delivery: the lookup finds the existing record, so
        // create/notify must never fire (no expectations set for them).
        let mut repo = MockSupporterRepository::new();
        repo.expect_get_by_customer_id()
            .withf(|id: &str| id == "cus_1")
            .times(1)
            .returning(|_| Ok(Some(stored_supporter())));

        let notifier = MockNotifier::new();

        let outcome = service(repo, notifier)
            .process_event(&body, &sig)
            .await
            .unwrap();
        assert_eq!(outcome, WebhookOutcome::AlreadyRecorded);
    }

    #[tokio::test]
    async fn concurrent_duplicate_insert_maps_to_skip() {
        let body = completed_event_body();
        let sig = signed(&body);

        let mut repo = MockSupporterRepository::new();
        repo.expect_get_by_customer_id().returning(|_| Ok(None));
        repo.expect_create()
            .returning(|_| Err(Error::DuplicateSupporter("cus_1".to_string())));

        let notifier = MockNotifier::new();

        let outcome = service(repo, notifier)
            .process_event(&body, &sig)
            .await
            .unwrap();
        assert_eq!(outcome, WebhookOutcome::AlreadyRecorded);
    }

    #[tokio::test]
    async fn tampered_body_is_rejected_before_any_processing() {
        let body = completed_event_body();
        let sig = signed(&body);
        let mut tampered = body.clone();
        tampered[20] ^= 0x01;

        // Repo untouched: no expectations.
        let repo = MockSupporterRepository::new();
        let notifier = MockNotifier::new();

        let err = service(repo, notifier)
            .process_event(&tampered, &sig)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::SignatureVerification(_)));
    }

    #[tokio::test]
    async fn missing_email_is_acknowledged_but_skipped() {
        let body = serde_json::json!({
            "id": "evt_2",
            "type": "checkout.session.completed",
            "data": {
                "object": {
                    "id": "cs_2",
                    "customer": "cus_2",
                    "customer_details": {"name": "Ada"},
                    "amount_total": 2500,
                    "currency": "usd"
                }
            }
        })
        .to_string()
        .into_bytes();
        let sig = signed(&body);

        let repo = MockSupporterRepository::new();
        let notifier = MockNotifier::new();

        let outcome = service(repo, notifier)
            .process_event(&body, &sig)
            .await
            .unwrap();
        assert_eq!(outcome, WebhookOutcome::SkippedNoEmail);
    }

    #[tokio::test]
    async fn non_positive_amount_is_skipped() {
        let body = serde_json::json!({
            "id": "evt_3",
            "type": "checkout.session.completed",
            "data": {
                "object": {
                    "id": "cs_3",
                    "customer": "cus_3",
                    "customer_details": {"email": "z@b.com"},
                    "amount_total": 0,
                    "currency": "usd"
                }
            }
        })
        .to_string()
        .into_bytes();
        let sig = signed(&body);

        let repo = MockSupporterRepository::new();
        let notifier = MockNotifier::new();

        let outcome = service(repo, notifier)
            .process_event(&body, &sig)
            .await
            .unwrap();
        assert_eq!(outcome, WebhookOutcome::SkippedInvalidAmount);
    }

    #[tokio::test]
    async fn notifier_failure_keeps_the_record() {
        let body = completed_event_body();
        let sig = signed(&body);

        let mut repo = MockSupporterRepository::new();
        repo.expect_get_by_customer_id().returning(|_| Ok(None));
        repo.expect_create().times(1).returning(|_| Ok(stored_supporter()));
        // mark_notified must NOT be called: no expectation for it.

        let mut notifier = MockNotifier::new();
        notifier
            .expect_send_thank_you()
            .times(1)
            .returning(|_, _, _, _| Err(Error::Mail("relay down".to_string())));

        let outcome = service(repo, notifier)
            .process_event(&body, &sig)
            .await
            .unwrap();
        assert!(matches!(outcome, WebhookOutcome::Recorded { notified: false, .. }));
    }

    #[tokio::test]
    async fn anonymous_name_defaults_when_details_lack_one() {
        let body = serde_json::json!({
            "id": "evt_4",
            "type": "checkout.session.completed",
            "data": {
                "object": {
                    "id": "cs_4",
                    "customer": "cus_4",
                    "customer_details": {"email": "anon@b.com"},
                    "amount_total": 1000,
                    "currency": "eur"
                }
            }
        })
        .to_string()
        .into_bytes();
        let sig = signed(&body);

        let mut repo = MockSupporterRepository::new();
        repo.expect_get_by_customer_id().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|ns: &NewSupporter| {
                ns.display_name == ANONYMOUS_SUPPORTER && ns.currency == "EUR" && ns.amount == 10.0
            })
            .times(1)
            .returning(|_| Ok(stored_supporter()));
        repo.expect_mark_notified().returning(|_| Ok(()));

        let mut notifier = MockNotifier::new();
        notifier
            .expect_send_thank_you()
            .returning(|_, _, _, _| Ok(()));

        let outcome = service(repo, notifier)
            .process_event(&body, &sig)
            .await
            .unwrap();
        assert!(matches!(outcome, WebhookOutcome::Recorded { .. }));
    }

    #[tokio::test]
    async fn unrelated_event_types_are_ignored() {
        let body = serde_json::json!({
            "id": "evt_5",
            "type": "invoice.paid",
            "data": {"object": {"id": "in_1"}}
        })
        .to_string()
        .into_bytes();
        let sig = signed(&body);

        let repo = MockSupporterRepository::new();
        let notifier = MockNotifier::new();

        let outcome = service(repo, notifier)
            .process_event(&body, &sig)
            .await
            .unwrap();
        assert_eq!(outcome, WebhookOutcome::Ignored);
    }
}
