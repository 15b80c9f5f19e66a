//! Error types for contact submissions

use css_inline::InlineError;
use thiserror::Error;
use tracing::debug;

use crate::domain::communication::{email_addresses::EmailAddressError, errors::EmailError};

use super::form::FieldFlags;

/// Errors raised when addressing a form field by name
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    /// No field has this name
    #[error("unknown form field \"{0}\"")]
    UnknownField(String),
}

/// Errors that can occur when validating a submitted form
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    /// One or more required fields were empty
    #[error("missing required fields")]
    MissingFields(FieldFlags),

    /// The email field does not look like `local@domain.tld`
    #[error("invalid email format")]
    InvalidEmail,
}

impl From<EmailAddressError> for SubmissionError {
    fn from(err: EmailAddressError) -> Self {
        match err {
            EmailAddressError::EmptyEmailAddress => SubmissionError::MissingFields(FieldFlags {
                email: true,
                ..FieldFlags::default()
            }),
            EmailAddressError::InvalidEmailAddress => SubmissionError::InvalidEmail,
        }
    }
}

/// Errors that can occur when relaying a submission to the mailbox
#[derive(Debug, Error)]
pub enum RelayError {
    /// The message could not be rendered
    #[error("could not render message: {0}")]
    Render(String),

    /// The mail provider rejected the message
    #[error(transparent)]
    Delivery(#[from] EmailError),
}

impl From<askama::Error> for RelayError {
    fn from(err: askama::Error) -> Self {
        debug!("askama::Error -> RelayError");

        RelayError::Render(err.to_string())
    }
}

impl From<InlineError> for RelayError {
    fn from(err: InlineError) -> Self {
        debug!("InlineError -> RelayError");

        RelayError::Render(err.to_string())
    }
}
