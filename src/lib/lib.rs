#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Contact form controller and mail relay for a portfolio site

pub mod client;
pub mod domain;
pub mod infrastructure;
