//! JWT token issuance and decoding

use std::fmt::Debug;
use std::str::FromStr;
use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::Value;
use tracing::{debug, warn};

use super::clock::{Clock, SystemClock};
use crate::config::JwtSettings;
use crate::domain::DomainError;
use crate::domain::auth::{
    AuthError, CLAIM_EXPIRES_AT, CLAIM_ISSUED_AT, CLAIM_TOKEN_TYPE, Claims, RESERVED_CLAIMS,
    TokenType,
};

/// Configuration for the JWT service
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// HMAC signing algorithm
    pub algorithm: Algorithm,
    /// Lifetime of access tokens
    pub access_token_lifetime: Duration,
    /// Lifetime of refresh tokens
    pub refresh_token_lifetime: Duration,
}

impl Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[hidden]")
            .field("algorithm", &self.algorithm)
            .field("access_token_lifetime", &self.access_token_lifetime)
            .field("refresh_token_lifetime", &self.refresh_token_lifetime)
            .finish()
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with HS256 and the given lifetimes
    pub fn new(
        secret: impl Into<String>,
        access_token_lifetime: Duration,
        refresh_token_lifetime: Duration,
    ) -> Self {
        Self {
            secret: secret.into(),
            algorithm: Algorithm::HS256,
            access_token_lifetime,
            refresh_token_lifetime,
        }
    }

    /// Select the signing algorithm by name (`HS256`, `HS384` or `HS512`)
    pub fn with_algorithm(mut self, name: &str) -> Result<Self, DomainError> {
        self.algorithm = parse_algorithm(name)?;
        Ok(self)
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self::new(
            "change-me-in-production",
            Duration::minutes(5),
            Duration::days(1),
        )
    }
}

impl TryFrom<&JwtSettings> for JwtConfig {
    type Error = DomainError;

    fn try_from(settings: &JwtSettings) -> Result<Self, Self::Error> {
        let access = lifetime_from_secs("access", settings.access_token_lifetime_secs)?;
        let refresh = lifetime_from_secs("refresh", settings.refresh_token_lifetime_secs)?;

        JwtConfig::new(settings.secret.clone(), access, refresh).with_algorithm(&settings.algorithm)
    }
}

fn lifetime_from_secs(kind: &str, secs: u64) -> Result<Duration, DomainError> {
    let secs = i64::try_from(secs)
        .ok()
        .filter(|s| *s > 0)
        .ok_or_else(|| {
            DomainError::configuration(format!("Invalid {} token lifetime: {}s", kind, secs))
        })?;

    Ok(Duration::seconds(secs))
}

/// Parse a signing algorithm name, accepting only the symmetric HMAC family
pub fn parse_algorithm(name: &str) -> Result<Algorithm, DomainError> {
    let algorithm = Algorithm::from_str(name)
        .map_err(|_| DomainError::configuration(format!("Unknown JWT algorithm: {}", name)))?;

    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
        other => Err(DomainError::configuration(format!(
            "Unsupported JWT algorithm: {:?}. Use HS256, HS384 or HS512.",
            other
        ))),
    }
}

/// Trait for token issuance and decoding
pub trait TokenService: Send + Sync + Debug {
    /// Issue a signed token carrying `claims` plus `token_type`, `iat` and `exp`
    fn issue(
        &self,
        claims: Claims,
        token_type: TokenType,
        lifetime: Duration,
    ) -> Result<String, AuthError>;

    /// Verify a token and return its full claim set
    fn decode(&self, token: &str, required_claims: &[&str]) -> Result<Claims, AuthError>;

    /// Lifetime applied by [`TokenService::issue_access`]
    fn access_token_lifetime(&self) -> Duration;

    /// Lifetime applied by [`TokenService::issue_refresh`]
    fn refresh_token_lifetime(&self) -> Duration;

    fn issue_access(&self, claims: Claims) -> Result<String, AuthError> {
        self.issue(claims, TokenType::Access, self.access_token_lifetime())
    }

    fn issue_refresh(&self, claims: Claims) -> Result<String, AuthError> {
        self.issue(claims, TokenType::Refresh, self.refresh_token_lifetime())
    }
}

/// HMAC-signed JWT service
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("config", &self.config)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .field("clock", &self.clock)
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service reading wall-clock time
    pub fn new(config: JwtConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a JWT service with an explicit time source
    pub fn with_clock(config: JwtConfig, clock: Arc<dyn Clock>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // Only the signature and algorithm are checked by the library; claim
        // presence and expiry are checked against the injected clock.
        let mut validation = Validation::new(config.algorithm);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            clock,
        }
    }

    /// Create a JWT service with default configuration
    pub fn with_default_config() -> Self {
        Self::new(JwtConfig::default())
    }

    pub fn algorithm(&self) -> Algorithm {
        self.config.algorithm
    }
}

impl TokenService for JwtService {
    fn issue(
        &self,
        mut claims: Claims,
        token_type: TokenType,
        lifetime: Duration,
    ) -> Result<String, AuthError> {
        let seconds = lifetime.num_seconds();
        if seconds <= 0 {
            return Err(AuthError::issuance(format!(
                "Token lifetime must be at least one second, got {}s",
                seconds
            )));
        }

        let iat = self.clock.now();
        let exp = iat
            .checked_add(seconds)
            .ok_or_else(|| AuthError::issuance("Token expiry overflows the timestamp range"))?;

        for reserved in RESERVED_CLAIMS {
            if claims.contains_key(reserved) {
                warn!(claim = reserved, "Overwriting caller-supplied reserved claim");
            }
        }

        claims.insert(CLAIM_TOKEN_TYPE.to_string(), Value::from(token_type.as_str()));
        claims.insert(CLAIM_ISSUED_AT.to_string(), Value::from(iat));
        claims.insert(CLAIM_EXPIRES_AT.to_string(), Value::from(exp));

        encode(&Header::new(self.config.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AuthError::issuance(format!("Failed to sign JWT: {}", e)))
    }

    fn decode(&self, token: &str, required_claims: &[&str]) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                debug!(error = %e, "JWT rejected");
                AuthError::token_invalid(e.to_string())
            })?;

        let claims = token_data.claims;

        if let Some(missing) = required_claims.iter().find(|c| !claims.contains_key(**c)) {
            return Err(AuthError::token_invalid(format!(
                "Token is missing required claim '{}'",
                missing
            )));
        }

        if let Some(exp) = claims.get(CLAIM_EXPIRES_AT) {
            let exp = exp
                .as_i64()
                .ok_or_else(|| AuthError::token_invalid("Claim 'exp' is not an integer"))?;

            if self.clock.now() >= exp {
                return Err(AuthError::TokenExpired);
            }
        }

        Ok(claims)
    }

    fn access_token_lifetime(&self) -> Duration {
        self.config.access_token_lifetime
    }

    fn refresh_token_lifetime(&self) -> Duration {
        self.config.refresh_token_lifetime
    }
}
