//! Error types for the email module

use lettre::{address::AddressError, error::Error};
use thiserror::Error;

/// Email errors
#[derive(Debug, Error)]
pub enum EmailError {
    /// The mail account identity or its credential is not configured
    #[error("mail account credentials are not configured")]
    MissingCredentials,

    /// Invalid email address
    #[error("invalid email address")]
    InvalidEmail,

    /// The provider failed to deliver the message; carries its error text
    #[error(transparent)]
    UnknownError(anyhow::Error),
}

impl From<anyhow::Error> for EmailError {
    fn from(err: anyhow::Error) -> Self {
        EmailError::UnknownError(err)
    }
}

impl From<AddressError> for EmailError {
    fn from(_err: AddressError) -> Self {
        EmailError::InvalidEmail
    }
}

impl From<Error> for EmailError {
    fn from(err: Error) -> Self {
        EmailError::UnknownError(err.into())
    }
}
