//! Shared API request/response types

pub mod error;
pub mod json;

use serde::{Deserialize, Serialize};

pub use error::{ApiError, ApiErrorResponse};
pub use json::Json;

/// Success envelope for operations that only report a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
