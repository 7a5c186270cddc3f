//! Authentication API endpoints
//!
//! Login exchanges a username and password for an access/refresh token
//! pair; refresh exchanges a refresh token for a new access token.

use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::auth::{CLAIM_USER_ID, Claims};
use crate::domain::user::{User, UserStatus};

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/me", get(get_current_user))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Token pair returned by login and refresh
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// User response (safe to expose)
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub group_code: String,
    pub status: UserStatus,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().value(),
            username: user.username().to_string(),
            group_code: user.group_code().to_string(),
            status: user.status(),
            created_at: user.created_at().to_rfc3339(),
            last_login_at: user.last_login_at().map(|t| t.to_rfc3339()),
        }
    }
}

fn user_claims(user: &User) -> Claims {
    let mut claims = Claims::new();
    claims.insert(CLAIM_USER_ID.to_string(), json!(user.id().value()));
    claims
}

fn token_response(state: &AppState, access_token: String, refresh_token: String) -> TokenResponse {
    TokenResponse {
        access_token,
        refresh_token,
        token_type: state.authenticator.header_prefix().to_string(),
        expires_in: state.token_service.access_token_lifetime().num_seconds(),
    }
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Some(user) = state
        .user_service
        .authenticate(&request.username, &request.password)
        .await?
    else {
        warn!(username = %request.username, "Login rejected");
        return Err(ApiError::unauthorized(
            "InvalidCredentials",
            "Invalid username or password",
        ));
    };

    let access_token = state.token_service.issue_access(user_claims(&user))?;
    let refresh_token = state.token_service.issue_refresh(user_claims(&user))?;

    info!(user_id = %user.id(), "User logged in");

    Ok(Json(token_response(&state, access_token, refresh_token)))
}

/// POST /auth/refresh
///
/// The presented refresh token is returned unchanged alongside the new
/// access token.
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = state
        .authenticator
        .verify_refresh(&request.refresh_token)
        .await?;

    let access_token = state.token_service.issue_access(user_claims(&user))?;

    Ok(Json(token_response(
        &state,
        access_token,
        request.refresh_token,
    )))
}

/// GET /auth/me
pub async fn get_current_user(
    RequireUser(user): RequireUser,
) -> Result<Json<UserResponse>, ApiError> {
    Ok(Json(UserResponse::from(&user)))
}
