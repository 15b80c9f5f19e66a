//! Validated contact submission

use crate::domain::communication::email_addresses::EmailAddress;

use super::{errors::SubmissionError, form::FormData};

/// A contact form that passed validation.
///
/// Built only through `TryFrom<FormData>`, so holding one means every field
/// is present and the email is well formed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactSubmission {
    name: String,
    email: EmailAddress,
    message: String,
}

impl ContactSubmission {
    /// The sender's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The sender's email address
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// The message body, unchanged from the form
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl TryFrom<FormData> for ContactSubmission {
    type Error = SubmissionError;

    fn try_from(form: FormData) -> Result<Self, Self::Error> {
        let missing = form.missing_fields();

        if missing.any() {
            return Err(SubmissionError::MissingFields(missing));
        }

        Ok(Self {
            email: EmailAddress::new(&form.email)?,
            name: form.name,
            message: form.message,
        })
    }
}
