//! Contact form submissions and their relay to the site owner

mod form;
mod service;
mod submission;

pub mod emails;
pub mod errors;

pub use form::{Field, FieldFlags, FormData};
pub use service::{ContactService, ContactServiceImpl};
pub use submission::ContactSubmission;
