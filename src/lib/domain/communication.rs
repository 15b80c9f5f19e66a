//! Outbound email: addresses, messages and the mailer seam

pub mod email_addresses;
pub mod errors;
pub mod mailer;
