//! Emails sent on behalf of the contact form

pub mod new_message;
