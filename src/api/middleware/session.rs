//! Session authentication middleware using the `token` cookie

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::UserId;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "token";

/// Identity carried by a verified session token
#[derive(Debug, Clone)]
pub struct SessionIdentity {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// Extractor that requires a valid session cookie
///
/// Reads the `token` cookie and verifies its signature and expiry.
/// The identity comes entirely from the token claims; no user lookup
/// is performed on the hot path.
#[derive(Debug, Clone)]
pub struct RequireSession(pub SessionIdentity);

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or_else(|| ApiError::unauthorized("Unauthorized. No cookie."))?;

        debug!("Verifying session token");

        let claims = state
            .session_service
            .verify(&token)
            .map_err(|_| ApiError::unauthorized("Session expired"))?;

        let id = UserId::parse(&claims.sub)
            .map_err(|_| ApiError::unauthorized("Session expired"))?;

        Ok(RequireSession(SessionIdentity {
            id,
            name: claims.name,
            email: claims.email,
        }))
    }
}
