//! Data Transfer Objects for API requests and responses.
//!
//! Request bodies decode straight into the domain command types
//! ([`crate::domain::entities`]); this module holds what is specific to HTTP.

pub mod envelope;
pub mod health;
pub mod pagination;
