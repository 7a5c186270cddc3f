//! Authentication domain
//!
//! Token vocabulary and the error taxonomy shared by the token service
//! and the request authenticator.

mod error;
mod token;

pub use error::AuthError;
pub use token::{
    AUTHENTICATION_CLAIMS, CLAIM_EXPIRES_AT, CLAIM_ISSUED_AT, CLAIM_TOKEN_TYPE, CLAIM_USER_ID,
    Claims, RESERVED_CLAIMS, TokenType,
};
