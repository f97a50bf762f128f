//! HS256 bearer token verification.

use jsonwebtoken::{DecodingKey, Validation, decode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use blog_core::ports::{AuthError, TokenClaims, TokenVerifier};

/// Placeholder secret used when `JWT_SECRET` is unset.
pub const DEFAULT_SECRET: &str = "change-me-in-production";

/// Secret and issuer shared with the identity service.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            issuer: "blog-api".to_string(),
        }
    }
}

impl JwtConfig {
    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// Registered claims this API relies on. Anything else in the token is ignored.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    #[serde(default)]
    roles: Vec<String>,
    exp: i64,
    iss: String,
}

pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    #[cfg(any(test, feature = "test-util"))]
    config: JwtConfig,
}

impl JwtVerifier {
    pub fn new(config: JwtConfig) -> Self {
        let mut validation = Validation::default();
        validation.set_issuer(&[&config.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            #[cfg(any(test, feature = "test-util"))]
            config,
        }
    }
}

#[cfg(any(test, feature = "test-util"))]
impl JwtVerifier {
    /// Sign a token the way the identity service does. Test support only.
    pub fn issue(
        &self,
        user_id: Uuid,
        roles: &[&str],
        ttl: chrono::TimeDelta,
    ) -> Result<String, AuthError> {
        use jsonwebtoken::{EncodingKey, Header, encode};

        let claims = Claims {
            sub: user_id,
            roles: roles.iter().map(|r| r.to_string()).collect(),
            exp: (chrono::Utc::now() + ttl).timestamp(),
            iss: self.config.issuer.clone(),
        };
        let key = EncodingKey::from_secret(self.config.secret.as_bytes());

        encode(&Header::default(), &claims, &key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

impl TokenVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(TokenClaims {
            user_id: data.claims.sub,
            roles: data.claims.roles,
        })
    }
}
