//! API middleware components

pub mod logging;
pub mod user_auth;

pub use logging::{APP_VERSION_HEADER, client_ip, logging_middleware};
pub use user_auth::{OptionalUser, RequireUser};
