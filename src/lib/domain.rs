//! Domain types and services

pub mod communication;
pub mod contact;
