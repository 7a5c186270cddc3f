//! Authentication infrastructure module
//!
//! This module provides JWT token management and bearer-token request
//! authentication.

mod authenticator;
mod clock;
mod jwt;

pub use authenticator::{DEFAULT_AUTH_HEADER_PREFIX, JwtAuthenticator};
pub use clock::{Clock, FixedClock, SystemClock};
pub use jwt::{JwtConfig, JwtService, TokenService, parse_algorithm};
