//! Adapters to the outside world: HTTP and SMTP

pub mod email;
pub mod http;
