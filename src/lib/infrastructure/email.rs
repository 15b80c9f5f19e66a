//! Mail providers

pub mod smtp;
