//! API key lifecycle endpoints

use axum::{
    extract::State,
    routing::{delete, get, patch, post},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequireSession;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, MessageResponse};
use crate::domain::api_key::ApiKey;

/// Create the API key router
pub fn create_keys_router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generate_key))
        .route("/all", get(list_keys))
        .route("/update", patch(update_key))
        .route("/revoke", delete(revoke_key))
}

/// Key generation request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateKeyBody {
    #[serde(default)]
    pub name: String,
    pub expires_in_days: Option<i64>,
}

/// Key update request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateKeyBody {
    #[serde(default)]
    pub api_key: String,
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

/// Key revocation request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevokeKeyBody {
    #[serde(default)]
    pub api_key: String,
}

/// Response for a freshly generated key
///
/// The plaintext secret appears here once; clients are expected to
/// store it on their side.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedKeyResponse {
    pub success: bool,
    pub message: String,
    pub api_key: String,
    pub expires_at: Option<String>,
}

/// One key in the listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyResponse {
    pub id: String,
    pub name: String,
    pub key: String,
    pub last_used: Option<String>,
    pub expires_at: Option<String>,
    pub is_active: bool,
    pub usage_count: i64,
    pub created_at: String,
}

impl ApiKeyResponse {
    fn from_key(key: &ApiKey) -> Self {
        Self {
            id: key.id().to_string(),
            name: key.name().to_string(),
            key: key.key().to_string(),
            last_used: key.last_used().map(|t| t.to_rfc3339()),
            expires_at: key.expires_at().map(|t| t.to_rfc3339()),
            is_active: key.is_active(),
            usage_count: key.usage_count(),
            created_at: key.created_at().to_rfc3339(),
        }
    }
}

/// Envelope carrying the key listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeysEnvelope {
    pub success: bool,
    pub message: String,
    pub api_keys: Vec<ApiKeyResponse>,
}

/// Generate a new key for the session user
///
/// POST /api/keys/generate
pub async fn generate_key(
    State(state): State<AppState>,
    RequireSession(identity): RequireSession,
    Json(body): Json<GenerateKeyBody>,
) -> Result<Json<GeneratedKeyResponse>, ApiError> {
    let key = state
        .api_key_service
        .generate(&identity.id, &body.name, body.expires_in_days)
        .await?;

    Ok(Json(GeneratedKeyResponse {
        success: true,
        message: "API key generated successfully".to_string(),
        api_key: key.key().to_string(),
        expires_at: key.expires_at().map(|t| t.to_rfc3339()),
    }))
}

/// List all keys owned by the session user
///
/// GET /api/keys/all
pub async fn list_keys(
    State(state): State<AppState>,
    RequireSession(identity): RequireSession,
) -> Result<Json<ApiKeysEnvelope>, ApiError> {
    let keys = state.api_key_service.list_all(&identity.id).await?;

    Ok(Json(ApiKeysEnvelope {
        success: true,
        message: "Found all API keys".to_string(),
        api_keys: keys.iter().map(ApiKeyResponse::from_key).collect(),
    }))
}

/// Update name and/or active flag of an owned key
///
/// PATCH /api/keys/update
///
/// A key that does not exist, or belongs to someone else, affects zero
/// rows and still returns 200. Existence is never revealed here.
pub async fn update_key(
    State(state): State<AppState>,
    RequireSession(identity): RequireSession,
    Json(body): Json<UpdateKeyBody>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .api_key_service
        .update(&identity.id, &body.api_key, body.name, body.is_active)
        .await?;

    Ok(Json(MessageResponse::new("API key updated successfully")))
}

/// Hard-delete an owned key
///
/// DELETE /api/keys/revoke
///
/// Zero affected rows is a silent no-op, same as update.
pub async fn revoke_key(
    State(state): State<AppState>,
    RequireSession(identity): RequireSession,
    Json(body): Json<RevokeKeyBody>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .api_key_service
        .revoke(&identity.id, &body.api_key)
        .await?;

    Ok(Json(MessageResponse::new("API key revoked successfully")))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::api::test_helpers::{send, signup_and_login, test_router};

    #[tokio::test]
    async fn test_generate_and_list_keys() {
        let app = test_router();
        let cookie = signup_and_login(&app, "Alice", "alice@x.com").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/keys/generate",
            Some(&cookie),
            Some(json!({"name": "CI key", "expiresInDays": 30})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "API key generated successfully");
        let secret = body["apiKey"].as_str().unwrap();
        assert!(secret.starts_with("bs-"));
        assert!(body["expiresAt"].is_string());

        let (status, body) = send(&app, "GET", "/api/keys/all", Some(&cookie), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Found all API keys");
        let keys = body["apiKeys"].as_array().unwrap();
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0]["name"], "CI key");
        // The listing carries the full key string
        assert_eq!(keys[0]["key"], secret);
        assert_eq!(keys[0]["isActive"], json!(true));
        assert_eq!(keys[0]["usageCount"], json!(0));
    }

    #[tokio::test]
    async fn test_generate_empty_name_is_400() {
        let app = test_router();
        let cookie = signup_and_login(&app, "Alice", "alice@x.com").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/keys/generate",
            Some(&cookie),
            Some(json!({"name": ""})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
    }

    #[tokio::test]
    async fn test_generate_huge_expiry_is_400() {
        let app = test_router();
        let cookie = signup_and_login(&app, "Alice", "alice@x.com").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/keys/generate",
            Some(&cookie),
            Some(json!({"name": "CI key", "expiresInDays": i64::MAX})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
    }

    #[tokio::test]
    async fn test_update_and_revoke_unknown_key_stay_silent() {
        let app = test_router();
        let cookie = signup_and_login(&app, "Alice", "alice@x.com").await;

        let (status, body) = send(
            &app,
            "PATCH",
            "/api/keys/update",
            Some(&cookie),
            Some(json!({"apiKey": "bs-does-not-exist", "name": "Renamed"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "API key updated successfully");

        let (status, body) = send(
            &app,
            "DELETE",
            "/api/keys/revoke",
            Some(&cookie),
            Some(json!({"apiKey": "bs-does-not-exist"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "API key revoked successfully");
    }

    #[tokio::test]
    async fn test_keys_are_scoped_per_user() {
        let app = test_router();
        let alice = signup_and_login(&app, "Alice", "alice@x.com").await;
        let bob = signup_and_login(&app, "Bob", "bob@x.com").await;

        send(
            &app,
            "POST",
            "/api/keys/generate",
            Some(&alice),
            Some(json!({"name": "alice-key"})),
        )
        .await;

        let (status, body) = send(&app, "GET", "/api/keys/all", Some(&bob), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["apiKeys"].as_array().unwrap().len(), 0);
    }
}
