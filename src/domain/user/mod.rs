//! User domain
//!
//! This module provides domain types and traits for the principals that
//! tokens resolve to: the user entity, validation, and the repository trait.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserId, UserStatus};
pub use repository::UserRepository;
pub use validation::{
    UserValidationError, validate_group_code, validate_password, validate_user_id,
    validate_username,
};

#[cfg(test)]
pub use repository::MockUserRepository;
