//! Session token issuing and verification
//!
//! Sessions are stateless HS256 JWTs carrying a minimal identity subset
//! (id, name, email - never the password hash). There is no server-side
//! session store and no revocation list: a token stays valid until its
//! expiry timestamp.

use std::fmt::Debug;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::user::User;
use crate::domain::DomainError;

/// Claims embedded in a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl SessionClaims {
    /// Create new claims for a user
    pub fn new(user: &User, ttl_hours: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(ttl_hours as i64);

        Self {
            sub: user.id().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Check if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Configuration for the session service
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Process-wide signing secret, loaded once at startup
    pub secret: String,
    /// Token lifetime in hours (3 days by default)
    pub ttl_hours: u64,
}

impl SessionConfig {
    pub fn new(secret: impl Into<String>, ttl_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            ttl_hours,
        }
    }
}

/// Trait for session token operations
pub trait SessionTokenIssuer: Send + Sync + Debug {
    /// Issue a signed token for a user
    fn issue(&self, user: &User) -> Result<String, DomainError>;

    /// Verify a token and return its claims
    fn verify(&self, token: &str) -> Result<SessionClaims, DomainError>;

    /// Token lifetime in hours
    fn ttl_hours(&self) -> u64;
}

/// HS256 session service backed by a single shared secret
#[derive(Clone)]
pub struct JwtSessionService {
    config: SessionConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtSessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionService")
            .field("ttl_hours", &self.config.ttl_hours)
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl JwtSessionService {
    pub fn new(config: SessionConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }
}

impl SessionTokenIssuer for JwtSessionService {
    fn issue(&self, user: &User) -> Result<String, DomainError> {
        let claims = SessionClaims::new(user, self.config.ttl_hours);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to sign session token: {}", e)))
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, DomainError> {
        let mut validation = Validation::default();
        // The default 60s leeway would accept tokens past their expiry;
        // a token is invalid the moment `exp` passes
        validation.leeway = 0;

        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|_| DomainError::credential("Session expired"))?;

        Ok(token_data.claims)
    }

    fn ttl_hours(&self) -> u64 {
        self.config.ttl_hours
    }
}
