//! Mailer trait and SMTP implementation.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

use super::{EmailRequest, MailError};
use crate::settings::Settings;

/// Async email sending trait.
///
/// The router holds an `Arc<dyn Mailer>`; tests swap in in-memory implementations.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Deliver one email. Errors carry the transport's description of the failure.
    async fn send(&self, email: &EmailRequest) -> Result<(), MailError>;
}

/// Relay mailer authenticating as the configured sender.
///
/// Built without lettre's connection pool, so each [`Mailer::send`] opens a
/// fresh implicit-TLS connection and closes it before returning, whether the
/// send succeeded or not.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(settings: &Settings) -> Result<Self, MailError> {
        let from: Mailbox = settings
            .sender_email
            .parse()
            .map_err(|_| MailError::InvalidAddress(settings.sender_email.clone()))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.smtp_host)
            .map_err(|e| MailError::Smtp(e.to_string()))?
            .port(settings.smtp_port)
            .credentials(Credentials::new(
                settings.sender_email.clone(),
                settings.app_password.clone(),
            ))
            .build();

        Ok(Self { transport, from })
    }

    /// Address used in the `From` header.
    pub fn sender(&self) -> &Mailbox {
        &self.from
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &EmailRequest) -> Result<(), MailError> {
        let message = email.to_message(&self.from)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Smtp(e.to_string()))?;

        Ok(())
    }
}
