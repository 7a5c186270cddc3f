//! Request extractors that authenticate the caller from its bearer token

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::auth::AuthError;
use crate::domain::user::User;

/// Extractor that requires an authenticated, active user
///
/// Anonymous requests are rejected with `401 NotAuthenticated`; token
/// failures are rejected with the reason of the underlying [`AuthError`].
#[derive(Debug, Clone)]
pub struct RequireUser(pub User);

/// Extractor that accepts anonymous requests
///
/// A request without credentials of the configured scheme yields `None`.
/// A request that presents a token still fails with `401` when the token
/// does not verify.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<User>);

impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let prefix = state.authenticator.header_prefix();
        let header = authorization_header(&parts.headers, prefix)?;
        let user = state.authenticator.authenticate(header).await?;

        Ok(OptionalUser(user))
    }
}

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let OptionalUser(user) = OptionalUser::from_request_parts(parts, state).await?;

        user.map(RequireUser).ok_or_else(|| {
            ApiError::unauthorized(
                "NotAuthenticated",
                format!(
                    "Authentication required. Provide a token via 'Authorization: {} <token>'",
                    state.authenticator.header_prefix()
                ),
            )
        })
    }
}

/// Read the Authorization header
///
/// A value starting with `prefix` must be visible ASCII. Any other value
/// that cannot be read as a string is treated as absent.
fn authorization_header<'a>(
    headers: &'a HeaderMap,
    prefix: &str,
) -> Result<Option<&'a str>, AuthError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    if !value.as_bytes().starts_with(prefix.as_bytes()) {
        return Ok(value.to_str().ok());
    }

    value.to_str().map(Some).map_err(|_| AuthError::MalformedHeader)
}
