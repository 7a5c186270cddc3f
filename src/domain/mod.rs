//! Domain layer - entities, errors and repository traits

pub mod auth;
pub mod crypto;
pub mod error;
pub mod user;

pub use error::DomainError;
