//! API key secret generation
//!
//! Secrets are `bs-` followed by 48 URL-safe characters (A-Z a-z 0-9 `_`
//! `-`), produced by base64url-encoding 36 bytes from the OS RNG. The
//! fixed prefix allows format sniffing; uniqueness is probabilistic and
//! additionally enforced by the store's unique constraint.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;

/// Fixed recognizable prefix carried by every Botdeck key
pub const KEY_PREFIX: &str = "bs-";

/// Number of random bytes behind each secret (48 base64url chars)
const SECRET_BYTES: usize = 36;

/// Generator for opaque bearer secrets
#[derive(Debug, Clone)]
pub struct ApiKeySecretGenerator {
    prefix: String,
    secret_bytes: usize,
}

impl ApiKeySecretGenerator {
    pub fn new() -> Self {
        Self {
            prefix: KEY_PREFIX.to_string(),
            secret_bytes: SECRET_BYTES,
        }
    }

    /// Override the prefix (tests only use this for format checks)
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Generate a fresh secret
    pub fn generate(&self) -> String {
        let mut random_bytes = vec![0u8; self.secret_bytes];
        rand::thread_rng().fill_bytes(&mut random_bytes);

        format!("{}{}", self.prefix, URL_SAFE_NO_PAD.encode(&random_bytes))
    }

    /// Check whether a string carries the expected key format
    pub fn matches_format(key: &str) -> bool {
        key.strip_prefix(KEY_PREFIX)
            .is_some_and(|rest| !rest.is_empty())
    }
}

impl Default for ApiKeySecretGenerator {
    fn default() -> Self {
        Self::new()
    }
}
