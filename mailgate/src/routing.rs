use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;

use crate::error::{jsend, ApiError};
use crate::mail::{dispatch, Mailer};
use crate::validate::EmailPayload;

pub const SEND_EMAIL_PATH: &str = "/send-email";

/// Shared, read-only request context.
#[derive(Clone)]
pub struct AppState {
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    pub fn new(mailer: impl Mailer) -> Self {
        AppState {
            mailer: Arc::new(mailer),
        }
    }
}

/// The public API: `POST /send-email`, and a JSON 404 for everything else.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route(SEND_EMAIL_PATH, post(send_email))
        .fallback(not_found)
        .with_state(state)
}

/// Bodies not sent as `application/json`, or not decodable as JSON, are
/// rejected the same way as an empty object.
async fn send_email(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<jsend::SuccessResponse>, ApiError> {
    let payload = body
        .map_err(|rejection| {
            tracing::debug!(%rejection, "unparsable email request");
            ApiError::NoParsableJson
        })
        .and_then(|Json(value)| EmailPayload::from_value(value).ok_or(ApiError::NoParsableJson))?;
    let request = payload.validate().map_err(|errors| {
        tracing::debug!(?errors, "rejected email request");
        ApiError::from(errors)
    })?;

    let confirmation = dispatch(state.mailer.as_ref(), request).await?;
    Ok(Json(jsend::SuccessResponse::new(confirmation)))
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}
