//! inklined-server/src/context.rs
//!
//! The global context handed to every HTTP handler.

use std::path::PathBuf;
use std::sync::Arc;

use inklined_common::traits::repository_traits::SupporterRepository;
use inklined_core::db::Database;
use inklined_core::mail::SmtpNotifier;
use inklined_core::platforms::stripe::StripeClient;
use inklined_core::repositories::postgres::supporter::PostgresSupporterRepository;
use inklined_core::services::{DonationService, WebhookService};
use inklined_core::Error;

use crate::AppConfig;
use crate::Args;

pub struct ServerContext {
    pub donation_service: Arc<DonationService>,
    pub webhook_service: Arc<WebhookService>,
    pub supporter_repo: Arc<dyn SupporterRepository>,
    pub data_dir: PathBuf,
    pub public_url: String,
    pub stripe_publishable_key: String,
}

impl ServerContext {
    pub async fn new(args: &Args, config: &AppConfig) -> Result<Self, Error> {
        let db = Database::new(&args.db_url).await?;
        db.migrate().await?;

        Self::from_parts(args, config, &db)
    }

    /// Wiring that does not need the connection itself; split out so the
    /// caller controls pool creation.
    pub fn from_parts(args: &Args, config: &AppConfig, db: &Database) -> Result<Self, Error> {
        let supporter_repo: Arc<dyn SupporterRepository> =
            Arc::new(PostgresSupporterRepository::new(db.pool().clone()));

        let stripe = Arc::new(StripeClient::new(config.stripe_secret_key.clone()));
        let notifier = Arc::new(SmtpNotifier::new(&config.smtp)?);

        let donation_service = Arc::new(DonationService::new(stripe));
        let webhook_service = Arc::new(WebhookService::new(
            config.stripe_webhook_secret.clone(),
            supporter_repo.clone(),
            notifier,
        ));

        Ok(Self {
            donation_service,
            webhook_service,
            supporter_repo,
            data_dir: PathBuf::from(&args.data_dir),
            public_url: args.public_url.clone(),
            stripe_publishable_key: config.stripe_publishable_key.clone(),
        })
    }
}
