// File: inklined-core/src/mail/mod.rs

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use inklined_common::traits::notifier_traits::Notifier;

use crate::Error;

/// SMTP settings for the thank-you mail.
#[derive(Clone)]
pub struct SmtpSettings {
    pub relay: String,
    pub username: String,
    pub password: String,
    /// e.g. "Inklined <hello@inklined.example>"
    pub from: String,
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("relay", &self.relay)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("from", &self.from)
            .finish()
    }
}

/// lettre-backed thank-you sender.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpNotifier {
    pub fn new(settings: &SmtpSettings) -> Result<Self, Error> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.relay)
            .map_err(|e| Error::Mail(e.to_string()))?
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: settings.from.clone(),
        })
    }

    fn body(name: &str, amount: f64, currency: &str) -> String {
        format!(
            "Hi {name},\n\n\
             Thank you for your {amount:.2} {currency} donation to Inklined. \
             Your support keeps our political and economic data dashboards \
             free and independent.\n\n\
             — The Inklined team\n"
        )
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send_thank_you(
        &self,
        to: &str,
        name: &str,
        amount: f64,
        currency: &str,
    ) -> Result<(), Error> {
        let message = Message::builder()
            .from(self.from.parse().map_err(|e| Error::Mail(format!("{e}")))?)
            .to(to.parse().map_err(|e| Error::Mail(format!("{e}")))?)
            .subject("Thank you for supporting Inklined")
            .header(ContentType::TEXT_PLAIN)
            .body(Self::body(name, amount, currency))
            .map_err(|e| Error::Mail(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| Error::Mail(e.to_string()))?;

        info!("Thank-you mail sent to {}", to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_includes_name_and_formatted_amount() {
        let body = SmtpNotifier::body("Ada", 25.0, "USD");
        assert!(body.contains("Hi Ada,"));
        assert!(body.contains("25.00 USD"));
    }

    #[test]
    fn debug_redacts_password() {
        let settings = SmtpSettings {
            relay: "smtp.example.com".to_string(),
            username: "mailer".to_string(),
            password: "hunter2".to_string(),
            from: "Inklined <hello@inklined.example>".to_string(),
        };
        let rendered = format!("{:?}", settings);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
