//! Request extractors and API error mapping.

pub mod auth;
pub mod error;
