//! API key entity and identifier

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::ApiKeyValidationError;
use crate::domain::user::UserId;

/// API key identifier - a UUID v4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKeyId(Uuid);

impl ApiKeyId {
    /// Generate a new random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its string form
    pub fn parse(value: &str) -> Result<Self, ApiKeyValidationError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| ApiKeyValidationError::InvalidId)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ApiKeyId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ApiKeyId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ApiKeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// API key entity
///
/// The `key` field holds the opaque bearer secret as issued. The product
/// contract is that it is shown to the owner once at generation time;
/// the store keeps the string itself, not a hash.
///
/// `usage_count` and `last_used` are accounting fields with no writer yet:
/// no endpoint validates inbound API keys against this table.
#[derive(Debug, Clone, Serialize)]
pub struct ApiKey {
    id: ApiKeyId,
    name: String,
    /// Opaque bearer secret, globally unique
    key: String,
    /// Owning user; every key belongs to exactly one user
    user_id: UserId,
    last_used: Option<DateTime<Utc>>,
    /// None means the key never expires
    expires_at: Option<DateTime<Utc>>,
    is_active: bool,
    usage_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ApiKey {
    /// Create a new key owned by `user_id`
    pub fn new(
        name: impl Into<String>,
        key: impl Into<String>,
        user_id: UserId,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: ApiKeyId::new(),
            name: name.into(),
            key: key.into(),
            user_id,
            last_used: None,
            expires_at,
            is_active: true,
            usage_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a key from stored fields
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: ApiKeyId,
        name: String,
        key: String,
        user_id: UserId,
        last_used: Option<DateTime<Utc>>,
        expires_at: Option<DateTime<Utc>>,
        is_active: bool,
        usage_count: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            key,
            user_id,
            last_used,
            expires_at,
            is_active,
            usage_count,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &ApiKeyId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn last_used(&self) -> Option<DateTime<Utc>> {
        self.last_used
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn usage_count(&self) -> i64 {
        self.usage_count
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Check if the key has passed its expiry timestamp
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now() >= expires_at,
            None => false,
        }
    }

    // Mutators

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    pub fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
