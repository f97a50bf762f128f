//! SeaORM entities. Passed explicitly to the repository and to
//! [`ensure_schema`](super::ensure_schema); there is no global registry.

pub mod post;
pub mod user;
