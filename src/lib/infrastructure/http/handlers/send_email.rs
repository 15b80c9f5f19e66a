//! Contact relay handler

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    domain::contact::{ContactService, ContactSubmission, FormData},
    infrastructure::http::{
        errors::{ApiError, ErrorResponse},
        state::AppState,
    },
};

/// Relay response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendEmailResponse {
    /// Always `true`; failures use the error body instead
    #[schema(example = true)]
    pub success: bool,
}

/// Relay a contact form submission to the site owner's mailbox
#[utoipa::path(
    post,
    operation_id = "send_email",
    tag = "Contact",
    path = "/api/sendEmail",
    request_body = FormData,
    responses(
        (status = 200, description = "Message delivered", body = SendEmailResponse),
        (status = 400, description = "Missing fields, invalid email or malformed body", body = ErrorResponse, example = json!({"message": "Missing required fields", "details": {"name": true, "email": false, "message": false}})),
        (status = 405, description = "Method not allowed", body = ErrorResponse, example = json!({"message": "Method not allowed"})),
        (status = 500, description = "The mail provider rejected the message", body = ErrorResponse, example = json!({"message": "Error sending message", "error": "SMTP timeout"})),
    )
)]
pub async fn handler<C: ContactService>(
    State(state): State<AppState<C>>,
    request: Result<Json<FormData>, JsonRejection>,
) -> Result<Json<SendEmailResponse>, ApiError> {
    let Json(form) = request?;

    let submission: ContactSubmission = form.try_into()?;

    state.contact.relay(&submission).await?;

    Ok(Json(SendEmailResponse { success: true }))
}

/// Answer cross-origin preflight requests with an empty 200
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Reject every method the relay does not support
pub async fn method_not_allowed() -> ApiError {
    ApiError::new_405()
}
