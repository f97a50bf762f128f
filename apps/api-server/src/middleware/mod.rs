//! Middleware and request extractors.

pub mod auth;
pub mod error;
pub mod request_id;

pub use request_id::RequestIdMiddleware;
