//! Contact form fields, shared by the form controller and the relay endpoint

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::errors::FieldError;

/// The raw contents of the contact form.
///
/// Sent verbatim as the relay's request body. Absent keys deserialize to
/// empty strings so that they surface as missing fields rather than as a
/// parse failure; a key with a non-string value is still rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FormData {
    /// The sender's name
    #[serde(default)]
    #[schema(example = "Ann")]
    pub name: String,

    /// The sender's email address
    #[serde(default)]
    #[schema(example = "ann@example.com")]
    pub email: String,

    /// The message body
    #[serde(default)]
    #[schema(example = "Hi")]
    pub message: String,
}

impl FormData {
    /// Create form data from its three fields
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    /// Overwrite a single field
    pub fn set(&mut self, field: Field, value: &str) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        };

        *slot = value.to_string();
    }

    /// Reset every field to an empty string
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Flags for each field that is empty after trimming
    pub fn missing_fields(&self) -> FieldFlags {
        FieldFlags {
            name: self.name.trim().is_empty(),
            email: self.email.trim().is_empty(),
            message: self.message.trim().is_empty(),
        }
    }
}

/// One of the contact form's fields
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    /// `name`
    Name,
    /// `email`
    Email,
    /// `message`
    Message,
}

impl Field {
    /// All fields, in form order
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    /// The field's wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Field {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FieldError::UnknownField(s.to_string()))
    }
}

/// Which of the required fields are missing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldFlags {
    /// `name` is missing
    pub name: bool,

    /// `email` is missing
    pub email: bool,

    /// `message` is missing
    pub message: bool,
}

impl FieldFlags {
    /// True when any field is flagged
    pub fn any(&self) -> bool {
        self.name || self.email || self.message
    }

    /// True when the given field is flagged
    pub fn contains(&self, field: Field) -> bool {
        match field {
            Field::Name => self.name,
            Field::Email => self.email,
            Field::Message => self.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_set_overwrites_only_the_named_field() {
        let mut form = FormData::new("Ann", "ann@example.com", "Hi");

        form.set(Field::Message, "Hello again");

        assert_eq!(form, FormData::new("Ann", "ann@example.com", "Hello again"));
    }

    #[test]
    fn test_clear_empties_every_field() {
        let mut form = FormData::new("Ann", "ann@example.com", "Hi");

        form.clear();

        assert_eq!(form, FormData::default());
    }

    #[test]
    fn test_missing_fields_treats_whitespace_as_missing() {
        let form = FormData::new(" ", "ann@example.com", "");

        assert_eq!(
            form.missing_fields(),
            FieldFlags {
                name: true,
                email: false,
                message: true,
            }
        );
        assert!(form.missing_fields().contains(Field::Name));
        assert!(!FormData::new("Ann", "ann@example.com", "Hi")
            .missing_fields()
            .any());
    }

    #[test]
    fn test_field_from_str() -> TestResult {
        assert_eq!("email".parse::<Field>()?, Field::Email);
        assert_eq!(
            "phone".parse::<Field>(),
            Err(FieldError::UnknownField("phone".to_string()))
        );

        Ok(())
    }

    #[test]
    fn test_absent_keys_deserialize_as_empty() -> TestResult {
        let form: FormData = serde_json::from_str(r#"{"email":"ann@example.com"}"#)?;

        assert_eq!(form, FormData::new("", "ann@example.com", ""));

        Ok(())
    }

    #[test]
    fn test_mistyped_field_is_rejected() {
        let result = serde_json::from_str::<FormData>(r#"{"name":42,"email":"a@b.c","message":"x"}"#);

        assert!(result.is_err());
    }
}
