// tests/supporter_repository_tests.rs
//
// Needs a live Postgres; run with:
//   DATABASE_URL=postgres://... cargo test -- --ignored

use inklined_common::models::supporter::NewSupporter;
use inklined_common::traits::repository_traits::SupporterRepository;
use inklined_core::repositories::postgres::supporter::PostgresSupporterRepository;
use inklined_core::{Database, Error};

async fn setup_test_db() -> Database {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for this test");
    let db = Database::new(&url).await.unwrap();
    db.migrate().await.unwrap();
    sqlx::query("DELETE FROM supporters")
        .execute(db.pool())
        .await
        .unwrap();
    db
}

fn new_supporter(customer_id: &str, email: &str) -> NewSupporter {
    NewSupporter {
        email: email.to_string(),
        display_name: "Test Supporter".to_string(),
        amount: 25.0,
        currency: "USD".to_string(),
        stripe_customer_id: customer_id.to_string(),
        stripe_payment_intent: Some("pi_test".to_string()),
    }
}

#[tokio::test]
#[ignore]
async fn test_supporter_repository_roundtrip() -> Result<(), Error> {
    let db = setup_test_db().await;
    let repo = PostgresSupporterRepository::new(db.pool().clone());

    let created = repo.create(&new_supporter("cus_rt", "rt@example.com")).await?;
    let fetched = repo
        .get_by_customer_id("cus_rt")
        .await?
        .expect("Supporter should exist");
    assert_eq!(created.supporter_id, fetched.supporter_id);
    assert_eq!(fetched.email, "rt@example.com");
    assert_eq!(fetched.amount, 25.0);
    assert!(!fetched.notification_sent);

    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_duplicate_customer_id_is_rejected() -> Result<(), Error> {
    let db = setup_test_db().await;
    let repo = PostgresSupporterRepository::new(db.pool().clone());

    repo.create(&new_supporter("cus_dup", "first@example.com")).await?;
    let err = repo
        .create(&new_supporter("cus_dup", "second@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateSupporter(_)));

    // Only the first row survives.
    let all = repo.list_all().await?;
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].email, "first@example.com");
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_mark_notified_is_idempotent() -> Result<(), Error> {
    let db = setup_test_db().await;
    let repo = PostgresSupporterRepository::new(db.pool().clone());

    let created = repo.create(&new_supporter("cus_notify", "n@example.com")).await?;
    repo.mark_notified(created.supporter_id).await?;
    let after_first = repo
        .get_by_customer_id("cus_notify")
        .await?
        .expect("Supporter should exist");
    assert!(after_first.notification_sent);
    let first_ts = after_first.notified_at.expect("notified_at should be set");

    repo.mark_notified(created.supporter_id).await?;
    let after_second = repo
        .get_by_customer_id("cus_notify")
        .await?
        .expect("Supporter should exist");
    // Second call must not move the timestamp.
    assert_eq!(after_second.notified_at, Some(first_ts));
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_list_all_orders_newest_first() -> Result<(), Error> {
    let db = setup_test_db().await;
    let repo = PostgresSupporterRepository::new(db.pool().clone());

    repo.create(&new_supporter("cus_t1", "t1@example.com")).await?;
    repo.create(&new_supporter("cus_t2", "t2@example.com")).await?;
    repo.create(&new_supporter("cus_t3", "t3@example.com")).await?;

    let all = repo.list_all().await?;
    assert_eq!(all.len(), 3);
    assert!(all[0].created_at >= all[1].created_at);
    assert!(all[1].created_at >= all[2].created_at);
    assert_eq!(all[0].stripe_customer_id, "cus_t3");
    assert_eq!(all[2].stripe_customer_id, "cus_t1");
    Ok(())
}
