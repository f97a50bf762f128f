//! Identity port. Tokens are issued by the identity service; this API only
//! verifies them.

use uuid::Uuid;

use crate::domain::Requester;

/// What a verified bearer token says about its holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub roles: Vec<String>,
}

impl From<TokenClaims> for Requester {
    fn from(claims: TokenClaims) -> Self {
        Requester::new(claims.user_id, claims.roles)
    }
}

pub trait TokenVerifier: Send + Sync {
    /// Check signature, issuer and expiry, then decode the claims.
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,
}
