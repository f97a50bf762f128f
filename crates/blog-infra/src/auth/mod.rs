//! Bearer token validation.

mod jwt;

pub use jwt::{JwtConfig, JwtVerifier};
