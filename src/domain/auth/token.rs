//! Token types and claim names

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claim set carried by a token payload
pub type Claims = Map<String, Value>;

/// Claim holding the token type (`access` or `refresh`)
pub const CLAIM_TOKEN_TYPE: &str = "token_type";
/// Claim holding the issued-at Unix timestamp
pub const CLAIM_ISSUED_AT: &str = "iat";
/// Claim holding the expiry Unix timestamp
pub const CLAIM_EXPIRES_AT: &str = "exp";
/// Claim holding the principal identifier
pub const CLAIM_USER_ID: &str = "user_id";

/// Claims assigned by the token service; caller values for these are replaced
pub const RESERVED_CLAIMS: [&str; 3] = [CLAIM_TOKEN_TYPE, CLAIM_ISSUED_AT, CLAIM_EXPIRES_AT];

/// Claims that must be present before a token can authenticate a request
pub const AUTHENTICATION_CLAIMS: [&str; 4] = [
    CLAIM_EXPIRES_AT,
    CLAIM_ISSUED_AT,
    CLAIM_TOKEN_TYPE,
    CLAIM_USER_ID,
];

/// Kind of token, fixed per issuance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived token that authenticates requests
    Access,
    /// Long-lived token that can only be exchanged for a new access token
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_type_as_str() {
        assert_eq!(TokenType::Access.as_str(), "access");
        assert_eq!(TokenType::Refresh.to_string(), "refresh");
    }

    #[test]
    fn test_token_type_serialization() {
        let json = serde_json::to_string(&TokenType::Refresh).unwrap();
        assert_eq!(json, r#""refresh""#);

        let parsed: TokenType = serde_json::from_str(r#""access""#).unwrap();
        assert_eq!(parsed, TokenType::Access);
    }

    #[test]
    fn test_reserved_claims_are_required_for_authentication() {
        for claim in RESERVED_CLAIMS {
            assert!(AUTHENTICATION_CLAIMS.contains(&claim));
        }
    }
}
