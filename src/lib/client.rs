//! Client side of the contact flow: the form controller and the dropdown
//! that hosts it

pub mod contact_form;
pub mod dropdown;

pub use contact_form::{ContactForm, SubmissionState};
pub use dropdown::Dropdown;
