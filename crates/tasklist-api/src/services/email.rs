//! Password-reset email delivery via SMTP.

use std::sync::Arc;

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tasklist_core::Config;

/// SMTP mailer. Constructed only when SMTP is configured; callers treat
/// `None` as a no-op sink.
#[derive(Clone)]
pub struct EmailService {
    mailer: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

impl EmailService {
    /// Build from config. Returns `None` unless both host and sender are set.
    pub fn from_config(config: &Config) -> Option<Self> {
        let host = config.smtp_host.as_deref()?;
        let from = config.smtp_from.clone()?;
        let port = config.smtp_port.unwrap_or(587);

        let builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .ok()?
            .port(port);
        let builder = match (&config.smtp_user, &config.smtp_password) {
            (Some(user), Some(password)) => {
                builder.credentials(Credentials::new(user.clone(), password.clone()))
            }
            _ => builder,
        };

        tracing::info!(host = %host, port = port, "Email service initialized (SMTP with STARTTLS)");
        Some(Self {
            mailer: Arc::new(builder.build()),
            from,
        })
    }

    pub async fn send_password_reset(&self, to: &str) -> Result<(), String> {
        let from_addr: Mailbox = self
            .from
            .parse()
            .map_err(|err| format!("Invalid SMTP_FROM: {err}"))?;
        let to_addr: Mailbox = to
            .parse()
            .map_err(|err| format!("Invalid recipient address: {err}"))?;

        let message = Message::builder()
            .from(from_addr)
            .to(to_addr)
            .subject("Password reset")
            .body("A password reset was requested for your account.".to_string())
            .map_err(|err| format!("Failed to build message: {err}"))?;

        self.mailer
            .send(message)
            .await
            .map(drop)
            .map_err(|err| err.to_string())
    }
}
