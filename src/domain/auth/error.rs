//! Authentication error taxonomy

use thiserror::Error;

use crate::domain::DomainError;

/// Failures of token issuance, decoding and request authentication
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token: {reason}")]
    TokenInvalid { reason: String },

    #[error("Malformed Authorization header")]
    MalformedHeader,

    #[error("Wrong token type: expected {expected}, got {actual}")]
    WrongTokenType { expected: String, actual: String },

    #[error("User '{id}' not found")]
    PrincipalNotFound { id: String },

    #[error("User '{id}' is inactive")]
    PrincipalInactive { id: String },

    #[error("Failed to issue token: {message}")]
    Issuance { message: String },

    #[error("User lookup failed: {0}")]
    Lookup(#[from] DomainError),
}

impl AuthError {
    pub fn token_invalid(reason: impl Into<String>) -> Self {
        Self::TokenInvalid {
            reason: reason.into(),
        }
    }

    pub fn wrong_token_type(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::WrongTokenType {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn principal_not_found(id: impl ToString) -> Self {
        Self::PrincipalNotFound { id: id.to_string() }
    }

    pub fn principal_inactive(id: impl ToString) -> Self {
        Self::PrincipalInactive { id: id.to_string() }
    }

    pub fn issuance(message: impl Into<String>) -> Self {
        Self::Issuance {
            message: message.into(),
        }
    }

    /// Stable name of the failure, used as the `reason` of error responses
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TokenExpired => "TokenExpired",
            Self::TokenInvalid { .. } => "TokenInvalid",
            Self::MalformedHeader => "MalformedHeader",
            Self::WrongTokenType { .. } => "WrongTokenType",
            Self::PrincipalNotFound { .. } => "PrincipalNotFound",
            Self::PrincipalInactive { .. } => "PrincipalInactive",
            Self::Issuance { .. } => "TokenIssuanceFailed",
            Self::Lookup(_) => "InternalServerError",
        }
    }

    /// Whether the failure is a rejected credential rather than a server fault
    pub fn is_authentication_failure(&self) -> bool {
        !matches!(self, Self::Issuance { .. } | Self::Lookup(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(AuthError::TokenExpired.to_string(), "Token has expired");
        assert_eq!(
            AuthError::wrong_token_type("access", "refresh").to_string(),
            "Wrong token type: expected access, got refresh"
        );
        assert_eq!(
            AuthError::principal_inactive(42).to_string(),
            "User '42' is inactive"
        );
    }

    #[test]
    fn test_authentication_failure_classification() {
        assert!(AuthError::MalformedHeader.is_authentication_failure());
        assert!(AuthError::token_invalid("bad signature").is_authentication_failure());
        assert!(!AuthError::issuance("boom").is_authentication_failure());
        assert!(!AuthError::from(DomainError::storage("down")).is_authentication_failure());
    }

    #[test]
    fn test_kind() {
        assert_eq!(AuthError::TokenExpired.kind(), "TokenExpired");
        assert_eq!(AuthError::principal_not_found(1).kind(), "PrincipalNotFound");
    }
}
