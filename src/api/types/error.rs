//! Error envelope returned by every endpoint

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use crate::domain::DomainError;
use crate::domain::auth::AuthError;

/// JSON body of an error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub status: u16,
    pub reason: String,
    pub message: String,
    pub data: Option<Value>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorEnvelope,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorEnvelope {
                status: status.as_u16(),
                reason: reason.into(),
                message: message.into(),
                data: None,
            },
        }
    }

    /// Attach structured detail to the envelope
    pub fn with_data(mut self, data: Value) -> Self {
        self.body.data = Some(data);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BadRequest", message)
    }

    pub fn unauthorized(reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, reason, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NotFound", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, "Conflict", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "InternalServerError", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        if err.is_authentication_failure() {
            return Self::unauthorized(err.kind(), err.to_string());
        }

        error!(error = %err, "Authentication could not be completed");

        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            err.kind(),
            "Authentication could not be completed",
        )
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::Validation { message } => Self::bad_request(message),
            DomainError::InvalidId { message } => Self::bad_request(message),
            DomainError::Conflict { message } => Self::conflict(message),
            DomainError::Configuration { .. } | DomainError::Storage { .. } => {
                error!(error = %err, "Request failed");
                Self::internal("Internal server error")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.body.reason, self.body.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_shape() {
        let err = ApiError::bad_request("Missing field");
        let json = serde_json::to_value(&err.body).unwrap();

        assert_eq!(
            json,
            json!({
                "status": 400,
                "reason": "BadRequest",
                "message": "Missing field",
                "data": null
            })
        );
    }

    #[test]
    fn test_auth_failures_are_unauthorized() {
        let cases = [
            (AuthError::TokenExpired, "TokenExpired"),
            (AuthError::token_invalid("bad signature"), "TokenInvalid"),
            (AuthError::MalformedHeader, "MalformedHeader"),
            (AuthError::wrong_token_type("access", "refresh"), "WrongTokenType"),
            (AuthError::principal_not_found(3), "PrincipalNotFound"),
            (AuthError::principal_inactive(3), "PrincipalInactive"),
        ];

        for (err, reason) in cases {
            let api_err = ApiError::from(err);
            assert_eq!(api_err.status, StatusCode::UNAUTHORIZED);
            assert_eq!(api_err.body.status, 401);
            assert_eq!(api_err.body.reason, reason);
        }
    }

    #[test]
    fn test_auth_server_faults_are_internal() {
        let lookup = ApiError::from(AuthError::from(DomainError::storage("db down")));
        assert_eq!(lookup.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(lookup.body.reason, "InternalServerError");
        assert!(!lookup.body.message.contains("db down"));

        let issuance = ApiError::from(AuthError::issuance("signing failed"));
        assert_eq!(issuance.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(issuance.body.reason, "TokenIssuanceFailed");
    }

    #[test]
    fn test_domain_error_conversion() {
        assert_eq!(
            ApiError::from(DomainError::not_found("User not found")).status,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(DomainError::validation("bad")).status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(DomainError::conflict("exists")).status,
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(DomainError::storage("io")).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_with_data() {
        let err = ApiError::bad_request("Invalid").with_data(json!({"field": "username"}));
        assert_eq!(err.body.data, Some(json!({"field": "username"})));
    }
}
