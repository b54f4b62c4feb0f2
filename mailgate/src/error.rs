use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::mail::MailError;
use crate::validate::ValidationErrors;

/// JSend-style response envelopes
///
/// <https://github.com/omniti-labs/jsend>
pub mod jsend {
    use serde::Serialize;

    use crate::validate::ValidationErrors;

    #[derive(Debug, Serialize)]
    pub struct SuccessResponse {
        status: &'static str,
        pub message: String,
    }

    impl SuccessResponse {
        pub fn new(message: impl Into<String>) -> Self {
            SuccessResponse {
                status: "success",
                message: message.into(),
            }
        }
    }

    /// Carries either a `message` or per-field `errors`, never both.
    #[derive(Debug, Serialize)]
    pub struct ErrorResponse {
        status: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub message: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub errors: Option<ValidationErrors>,
    }

    impl ErrorResponse {
        pub fn new(message: impl Into<String>) -> Self {
            ErrorResponse {
                status: "error",
                message: Some(message.into()),
                errors: None,
            }
        }

        pub fn fields(errors: ValidationErrors) -> Self {
            ErrorResponse {
                status: "error",
                message: None,
                errors: Some(errors),
            }
        }
    }
}

/// Body returned for routes that do not exist.
#[derive(Debug, serde::Serialize)]
pub struct NotFoundResponse {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request body is not a JSON object")]
    NoParsableJson,

    #[error("invalid fields: {0:?}")]
    Validation(ValidationErrors),

    #[error("delivery failed: {0}")]
    Delivery(#[from] MailError),

    #[error("no route for request")]
    NotFound,
}

impl ApiError {
    pub fn http_code(&self) -> StatusCode {
        match self {
            Self::NoParsableJson | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }

    /// Caller-facing text. Delivery failures expose the transport's description.
    pub fn http_message(&self) -> String {
        match self {
            Self::NoParsableJson => "no parsable json body found".to_string(),
            Self::Validation(_) => "one or more fields are invalid".to_string(),
            Self::Delivery(err) => format!("Failed to send email: {err}"),
            Self::NotFound => "Not found!".to_string(),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.http_code();
        if code.is_server_error() {
            tracing::error!("Error Status {}: {}", code, self);
        }

        match self {
            ApiError::NotFound => {
                let error = self.http_message();
                (code, Json(NotFoundResponse { error })).into_response()
            }
            ApiError::Validation(errors) => {
                (code, Json(jsend::ErrorResponse::fields(errors))).into_response()
            }
            other => (code, Json(jsend::ErrorResponse::new(other.http_message()))).into_response(),
        }
    }
}
