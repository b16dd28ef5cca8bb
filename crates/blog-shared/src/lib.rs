//! # Blog Shared
//!
//! Wire types for the JSON part of the blog API.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
