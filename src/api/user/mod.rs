//! User account endpoints: signup, login, current user

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{RequireSession, SESSION_COOKIE};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::{validate_email, validate_password, User};
use crate::domain::DomainError;
use crate::infrastructure::user::SignupRequest;

/// Create the user router
pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/one", get(get_current_user))
}

/// Signup request body
#[derive(Debug, Deserialize)]
pub struct SignupBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// User fields safe to expose
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl UserResponse {
    fn from_user(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            created_at: user.created_at().to_rfc3339(),
            updated_at: user.updated_at().to_rfc3339(),
        }
    }
}

/// Envelope carrying a user payload
#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub success: bool,
    pub message: String,
    pub user: UserResponse,
}

/// Input errors on the auth endpoints come back as 401, not 400.
/// This applies to signup and login only; see DESIGN.md.
fn auth_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::Validation { message } => ApiError::unauthorized(message),
        _ => err.into(),
    }
}

/// Register a new account
///
/// POST /api/user/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupBody>,
) -> Result<Json<UserEnvelope>, ApiError> {
    let user = state
        .user_service
        .signup(SignupRequest {
            name: body.name,
            email: body.email,
            password: body.password,
        })
        .await
        .map_err(auth_error)?;

    Ok(Json(UserEnvelope {
        success: true,
        message: "User signed up successfully".to_string(),
        user: UserResponse::from_user(&user),
    }))
}

/// Authenticate and set the session cookie
///
/// POST /api/user/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginBody>,
) -> Result<(CookieJar, Json<UserEnvelope>), ApiError> {
    validate_email(&body.email)
        .map_err(|e| ApiError::unauthorized(e.to_string()))?;
    validate_password(&body.password)
        .map_err(|e| ApiError::unauthorized(e.to_string()))?;

    let user = state
        .user_service
        .login(&body.email, &body.password)
        .await?;

    let token = state.session_service.issue(&user)?;

    // HttpOnly stays off so the browser client can read the cookie;
    // inherited contract, see DESIGN.md
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .same_site(SameSite::Lax)
        .http_only(false)
        .secure(state.cookie_secure)
        .build();

    Ok((
        jar.add(cookie),
        Json(UserEnvelope {
            success: true,
            message: "Login successful".to_string(),
            user: UserResponse::from_user(&user),
        }),
    ))
}

/// Return the user backing the current session
///
/// GET /api/user/one
pub async fn get_current_user(
    State(state): State<AppState>,
    RequireSession(identity): RequireSession,
) -> Result<Json<UserEnvelope>, ApiError> {
    let user = state
        .user_service
        .get(&identity.id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(UserEnvelope {
        success: true,
        message: "User found".to_string(),
        user: UserResponse::from_user(&user),
    }))
}
