//! Delivery of validated email requests through an SMTP relay.
//!
//! A [`Mailer`] turns an [`EmailRequest`] into a transport message and hands it
//! to the relay. [`SmtpMailer`] is the production implementation on top of
//! [lettre](https://lettre.rs); [`dispatch`] wraps a single delivery attempt.
//!
//! ```ignore
//! let settings = Settings::load()?;
//! let mailer = SmtpMailer::new(&settings)?;
//!
//! let request = payload.validate()?;
//! let confirmation = dispatch(&mailer, request).await?;
//! ```
//!
//! Every call opens its own implicit-TLS connection to the relay, authenticates
//! with the sender credentials, sends once and closes the connection. There is
//! no pooling and no retry.

mod dispatch;
mod mailer;
mod message;

pub use dispatch::{dispatch, DELIVERED_MESSAGE};
pub use mailer::{Mailer, SmtpMailer};
pub use message::EmailRequest;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("SMTP error: {0}")]
    Smtp(String),
}
