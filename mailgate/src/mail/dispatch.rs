use super::{EmailRequest, MailError, Mailer};

/// Confirmation returned to the caller after the relay accepted the message.
pub const DELIVERED_MESSAGE: &str = "Email sent successfully!";

/// Make exactly one delivery attempt for `request`.
///
/// The request is consumed; a failed attempt is returned to the caller, never
/// retried. Failures are logged where they are turned into a response.
pub async fn dispatch<M>(mailer: &M, request: EmailRequest) -> Result<&'static str, MailError>
where
    M: Mailer + ?Sized,
{
    mailer.send(&request).await?;
    tracing::info!(recipient = request.recipient(), "email delivered");
    Ok(DELIVERED_MESSAGE)
}
