//! # Blog Core
//!
//! The domain layer of the blog API: posts, slugs, pagination rules and the
//! post operations service. No infrastructure dependencies live here.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use service::PostService;
