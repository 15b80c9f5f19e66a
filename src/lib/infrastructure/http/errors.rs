//! API error-handling module

use std::fmt;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::contact::{
    errors::{RelayError, SubmissionError},
    FieldFlags,
};

/// An error response
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// The error message
    #[schema(example = "Missing required fields")]
    pub message: String,

    /// Underlying error text, when there is one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "SMTP timeout")]
    pub error: Option<String>,

    /// Which required fields were missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<FieldFlags>,
}

/// An error raised in the API
#[derive(Debug)]
pub struct ApiError {
    /// The status code
    pub status: StatusCode,

    /// The error message
    pub message: String,

    /// Underlying error text
    pub error: Option<String>,

    /// Flags for missing fields
    pub details: Option<FieldFlags>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
            error: None,
            details: None,
        }
    }

    /// Create a new bad request error
    pub fn new_400(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Create a new method not allowed error
    pub fn new_405() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    }

    /// Create new internal server error
    pub fn new_500(message: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Attach the underlying error text
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Attach missing field flags
    pub fn with_details(mut self, details: FieldFlags) -> Self {
        self.details = Some(details);
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                message: self.message,
                error: self.error,
                details: self.details,
            }),
        )
            .into_response()
    }
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        debug!("rejecting submission: {err}");

        match err {
            SubmissionError::MissingFields(details) => {
                ApiError::new_400("Missing required fields").with_details(details)
            }
            SubmissionError::InvalidEmail => ApiError::new_400("Invalid email format"),
        }
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        let text = err.to_string();

        if text.is_empty() {
            ApiError::new_500("Error sending message").with_error("Unknown error")
        } else {
            ApiError::new_500("Error sending message").with_error(text)
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!("rejecting request body: {}", rejection.body_text());

        ApiError::new_400("Invalid request body").with_error(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
    use testresult::TestResult;

    use super::*;
    use crate::domain::communication::errors::EmailError;

    #[tokio::test]
    async fn test_error_response_omits_empty_fields() -> TestResult {
        let response = ApiError::new_405().into_response();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let body = to_bytes(response.into_body(), usize::MAX).await?;

        assert_eq!(body, r#"{"message":"Method not allowed"}"#);

        Ok(())
    }

    #[tokio::test]
    async fn test_error_response_includes_details() -> TestResult {
        let error = ApiError::from(SubmissionError::MissingFields(FieldFlags {
            name: true,
            email: false,
            message: false,
        }));

        let body = to_bytes(error.into_response().into_body(), usize::MAX).await?;

        assert_eq!(
            body,
            r#"{"message":"Missing required fields","details":{"name":true,"email":false,"message":false}}"#
        );

        Ok(())
    }

    #[test]
    fn test_api_error_from_relay_error() {
        let api_error = ApiError::from(RelayError::from(EmailError::UnknownError(anyhow!(
            "SMTP timeout"
        ))));

        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.message, "Error sending message");
        assert_eq!(api_error.error.as_deref(), Some("SMTP timeout"));
    }

    #[test]
    fn test_api_error_from_silent_relay_error() {
        let api_error = ApiError::from(RelayError::from(EmailError::UnknownError(anyhow!(""))));

        assert_eq!(api_error.error.as_deref(), Some("Unknown error"));
    }
}
