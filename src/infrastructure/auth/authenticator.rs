//! Bearer-token request authentication
//!
//! Resolves an `Authorization` header value to a [`User`]. A missing header,
//! or one that does not start with the configured prefix, is the anonymous
//! outcome (`Ok(None)`); every other problem is a distinct [`AuthError`].

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::jwt::TokenService;
use crate::domain::auth::{
    AUTHENTICATION_CLAIMS, AuthError, CLAIM_TOKEN_TYPE, CLAIM_USER_ID, Claims, TokenType,
};
use crate::domain::user::{User, UserId, UserRepository};

/// Default credential scheme of the Authorization header
pub const DEFAULT_AUTH_HEADER_PREFIX: &str = "Bearer";

/// Authenticates requests carrying JWT access tokens
#[derive(Clone)]
pub struct JwtAuthenticator {
    tokens: Arc<dyn TokenService>,
    users: Arc<dyn UserRepository>,
    header_prefix: String,
}

impl std::fmt::Debug for JwtAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAuthenticator")
            .field("tokens", &self.tokens)
            .field("header_prefix", &self.header_prefix)
            .finish()
    }
}

impl JwtAuthenticator {
    pub fn new(tokens: Arc<dyn TokenService>, users: Arc<dyn UserRepository>) -> Self {
        Self {
            tokens,
            users,
            header_prefix: DEFAULT_AUTH_HEADER_PREFIX.to_string(),
        }
    }

    /// Use a credential scheme other than `Bearer`
    pub fn with_header_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.header_prefix = prefix.into();
        self
    }

    pub fn header_prefix(&self) -> &str {
        &self.header_prefix
    }

    /// Authenticate a request from its Authorization header value
    ///
    /// Returns `Ok(None)` when no credential of the configured scheme was
    /// supplied, so the caller can treat the request as anonymous.
    pub async fn authenticate(&self, header: Option<&str>) -> Result<Option<User>, AuthError> {
        let Some(header) = header else {
            return Ok(None);
        };

        if !header.starts_with(self.header_prefix.as_str()) {
            return Ok(None);
        }

        let parts: Vec<&str> = header.split_whitespace().collect();
        let [_, token] = parts.as_slice() else {
            warn!(parts = parts.len(), "Malformed Authorization header");
            return Err(AuthError::MalformedHeader);
        };

        let user = self.resolve(token, TokenType::Access).await?;
        debug!(user_id = %user.id(), "Request authenticated");

        Ok(Some(user))
    }

    /// Verify a refresh token and resolve the user it was issued to
    pub async fn verify_refresh(&self, token: &str) -> Result<User, AuthError> {
        self.resolve(token, TokenType::Refresh).await
    }

    async fn resolve(&self, token: &str, expected: TokenType) -> Result<User, AuthError> {
        let claims = self
            .tokens
            .decode(token, &AUTHENTICATION_CLAIMS)
            .inspect_err(|e| warn!(error = %e, "Token verification failed"))?;

        check_token_type(&claims, expected)?;

        let user_id = extract_user_id(&claims)?;

        let user = self
            .users
            .get(&user_id)
            .await?
            .ok_or_else(|| AuthError::principal_not_found(user_id))?;

        if !user.is_active() {
            warn!(user_id = %user_id, "Inactive user presented a valid token");
            return Err(AuthError::principal_inactive(user_id));
        }

        Ok(user)
    }
}

fn check_token_type(claims: &Claims, expected: TokenType) -> Result<(), AuthError> {
    match claims.get(CLAIM_TOKEN_TYPE) {
        Some(Value::String(actual)) if actual == expected.as_str() => Ok(()),
        Some(Value::String(actual)) => Err(AuthError::wrong_token_type(expected.as_str(), actual)),
        Some(other) => Err(AuthError::wrong_token_type(expected.as_str(), other.to_string())),
        None => Err(AuthError::token_invalid("Token is missing required claim 'token_type'")),
    }
}

/// Read `user_id` as a JSON integer or a string of digits
fn extract_user_id(claims: &Claims) -> Result<UserId, AuthError> {
    let invalid = || AuthError::token_invalid("Claim 'user_id' is not a valid user ID");

    match claims.get(CLAIM_USER_ID) {
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|id| UserId::new(id).ok())
            .ok_or_else(invalid),
        Some(Value::String(s)) => s.parse::<UserId>().map_err(|_| invalid()),
        Some(_) => Err(invalid()),
        None => Err(AuthError::token_invalid(
            "Token is missing required claim 'user_id'",
        )),
    }
}
