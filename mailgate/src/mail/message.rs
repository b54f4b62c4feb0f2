use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::Message;

use super::MailError;

/// A single-recipient plain-text email that passed validation.
///
/// Only [`EmailPayload::validate`](crate::validate::EmailPayload::validate)
/// creates one, so holding an `EmailRequest` means every field is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailRequest {
    recipient: String,
    subject: String,
    body: String,
}

impl EmailRequest {
    pub(crate) fn new(recipient: String, subject: String, body: String) -> Self {
        Self {
            recipient,
            subject,
            body,
        }
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Build the transport message sent on behalf of `from`.
    pub fn to_message(&self, from: &Mailbox) -> Result<Message, MailError> {
        let to: Mailbox = self
            .recipient
            .parse()
            .map_err(|_| MailError::InvalidAddress(self.recipient.clone()))?;

        Message::builder()
            .from(from.clone())
            .to(to)
            .subject(self.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(self.body.clone())
            .map_err(|e| MailError::Build(e.to_string()))
    }
}
