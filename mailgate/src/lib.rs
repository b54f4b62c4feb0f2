//! HTTP front end that validates email requests and relays them over SMTPS.
//!
//! Callers `POST /send-email` with `email`, `subject` and `body`; the service
//! checks the fields, sends the message from the configured account and answers
//! with a JSend-style JSON body.

pub mod error;
pub mod mail;
pub mod routing;
pub mod serve;
pub mod settings;
pub mod validate;

pub use error::ApiError;
pub use mail::{dispatch, EmailRequest, MailError, Mailer, SmtpMailer};
pub use routing::{api_router, AppState};
pub use serve::serve;
pub use settings::{EnvConfig, Settings};
pub use validate::{validate_body, validate_email, validate_subject, EmailPayload};
