//! # Blog Core
//!
//! The domain layer of the blog.
//! This crate contains the post lifecycle, form validation and the write policy
//! with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod forms;
pub mod policy;
pub mod ports;
pub mod services;

pub use error::DomainError;
pub use services::PostService;
