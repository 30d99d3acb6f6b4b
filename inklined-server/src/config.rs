//! inklined-server/src/config.rs
//!
//! Secrets come exclusively from the process environment (via dotenv in
//! development); nothing here is ever hardcoded or logged.

use inklined_core::mail::SmtpSettings;
use inklined_core::Error;

#[derive(Clone)]
pub struct AppConfig {
    pub stripe_secret_key: String,
    pub stripe_publishable_key: String,
    pub stripe_webhook_secret: String,
    pub smtp: SmtpSettings,
}

fn require(name: &str) -> Result<String, Error> {
    std::env::var(name).map_err(|_| Error::Config(format!("{} must be set", name)))
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self {
            stripe_secret_key: require("STRIPE_SECRET_KEY")?,
            stripe_publishable_key: require("STRIPE_PUBLISHABLE_KEY")?,
            stripe_webhook_secret: require("STRIPE_WEBHOOK_SECRET")?,
            smtp: SmtpSettings {
                relay: require("SMTP_RELAY")?,
                username: require("SMTP_USERNAME")?,
                password: require("SMTP_PASSWORD")?,
                from: require("SMTP_FROM")?,
            },
        })
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("stripe_secret_key", &"[REDACTED]")
            .field("stripe_publishable_key", &self.stripe_publishable_key)
            .field("stripe_webhook_secret", &"[REDACTED]")
            .field("smtp", &self.smtp)
            .finish()
    }
}
