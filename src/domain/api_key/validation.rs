//! API key input validation

use thiserror::Error;

/// Errors that can occur during API key input validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiKeyValidationError {
    #[error("Name of the API key is required")]
    EmptyName,

    #[error("Name exceeds maximum length of {0} characters")]
    NameTooLong(usize),

    #[error("API key is required")]
    EmptyKey,

    #[error("expiresInDays must be a positive integer")]
    InvalidExpiry,

    #[error("expiresInDays exceeds the maximum of {0} days")]
    ExpiryTooFar(i64),

    #[error("Invalid API key ID: expected a UUID")]
    InvalidId,
}

const MAX_NAME_LENGTH: usize = 100;

/// Upper bound on an expiry window, a hundred years
///
/// Keeps the expiry timestamp arithmetic inside chrono's representable
/// range; unbounded values make `Duration::days` panic.
pub const MAX_EXPIRES_IN_DAYS: i64 = 36_500;

/// Validate a key display name
pub fn validate_key_name(name: &str) -> Result<(), ApiKeyValidationError> {
    if name.trim().is_empty() {
        return Err(ApiKeyValidationError::EmptyName);
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(ApiKeyValidationError::NameTooLong(MAX_NAME_LENGTH));
    }

    Ok(())
}

/// Validate the opaque key string presented by a caller
pub fn validate_key_secret(key: &str) -> Result<(), ApiKeyValidationError> {
    if key.is_empty() {
        return Err(ApiKeyValidationError::EmptyKey);
    }

    Ok(())
}

/// Validate an optional expiry window in days
pub fn validate_expires_in_days(days: Option<i64>) -> Result<(), ApiKeyValidationError> {
    match days {
        Some(d) if d <= 0 => Err(ApiKeyValidationError::InvalidExpiry),
        Some(d) if d > MAX_EXPIRES_IN_DAYS => {
            Err(ApiKeyValidationError::ExpiryTooFar(MAX_EXPIRES_IN_DAYS))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_name() {
        assert!(validate_key_name("CI key").is_ok());
        assert_eq!(validate_key_name(""), Err(ApiKeyValidationError::EmptyName));
        assert_eq!(
            validate_key_name("  "),
            Err(ApiKeyValidationError::EmptyName)
        );
        assert_eq!(
            validate_key_name(&"k".repeat(101)),
            Err(ApiKeyValidationError::NameTooLong(100))
        );
    }

    #[test]
    fn test_key_secret() {
        assert!(validate_key_secret("bs-abc").is_ok());
        assert_eq!(validate_key_secret(""), Err(ApiKeyValidationError::EmptyKey));
    }

    #[test]
    fn test_expires_in_days() {
        assert!(validate_expires_in_days(None).is_ok());
        assert!(validate_expires_in_days(Some(30)).is_ok());
        assert_eq!(
            validate_expires_in_days(Some(0)),
            Err(ApiKeyValidationError::InvalidExpiry)
        );
        assert_eq!(
            validate_expires_in_days(Some(-1)),
            Err(ApiKeyValidationError::InvalidExpiry)
        );
        assert!(validate_expires_in_days(Some(MAX_EXPIRES_IN_DAYS)).is_ok());
        assert_eq!(
            validate_expires_in_days(Some(MAX_EXPIRES_IN_DAYS + 1)),
            Err(ApiKeyValidationError::ExpiryTooFar(MAX_EXPIRES_IN_DAYS))
        );
        assert_eq!(
            validate_expires_in_days(Some(i64::MAX)),
            Err(ApiKeyValidationError::ExpiryTooFar(MAX_EXPIRES_IN_DAYS))
        );
    }
}
