//! User validation utilities

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("User ID must be a positive integer, got {0}")]
    NonPositiveId(i64),

    #[error("User ID is not a valid integer: '{0}'")]
    InvalidIdFormat(String),

    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Username exceeds maximum length of {0} characters")]
    UsernameTooLong(usize),

    #[error("Username cannot contain whitespace")]
    UsernameWhitespace,

    #[error("Password cannot be empty")]
    EmptyPassword,

    #[error("Password exceeds maximum length of {0} characters")]
    PasswordTooLong(usize),

    #[error("Group code cannot be empty")]
    EmptyGroupCode,

    #[error("Group code exceeds maximum length of {0} characters")]
    GroupCodeTooLong(usize),
}

const MAX_USERNAME_LENGTH: usize = 100;
const MAX_PASSWORD_LENGTH: usize = 100;
const MAX_GROUP_CODE_LENGTH: usize = 8;

/// Validate a numeric user ID
pub fn validate_user_id(id: i64) -> Result<(), UserValidationError> {
    if id <= 0 {
        return Err(UserValidationError::NonPositiveId(id));
    }

    Ok(())
}

/// Validate a username
///
/// Rules:
/// - Cannot be empty
/// - Maximum 100 characters
/// - No whitespace, since the Authorization header and login form split on it
pub fn validate_username(username: &str) -> Result<(), UserValidationError> {
    if username.is_empty() {
        return Err(UserValidationError::EmptyUsername);
    }

    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(UserValidationError::UsernameTooLong(MAX_USERNAME_LENGTH));
    }

    if username.chars().any(char::is_whitespace) {
        return Err(UserValidationError::UsernameWhitespace);
    }

    Ok(())
}

/// Validate a plain-text password before hashing
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.is_empty() {
        return Err(UserValidationError::EmptyPassword);
    }

    if password.chars().count() > MAX_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooLong(MAX_PASSWORD_LENGTH));
    }

    Ok(())
}

/// Validate a group code (the key of the group a user belongs to)
pub fn validate_group_code(code: &str) -> Result<(), UserValidationError> {
    if code.is_empty() {
        return Err(UserValidationError::EmptyGroupCode);
    }

    if code.chars().count() > MAX_GROUP_CODE_LENGTH {
        return Err(UserValidationError::GroupCodeTooLong(MAX_GROUP_CODE_LENGTH));
    }

    Ok(())
}
