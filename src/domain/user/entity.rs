//! User entity and related types

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{UserValidationError, validate_user_id};

/// User identifier - a positive integer, carried in tokens as `user_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Create a new UserId after validation
    pub fn new(id: i64) -> Result<Self, UserValidationError> {
        validate_user_id(id)?;
        Ok(Self(id))
    }

    /// Get the inner integer value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for i64 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<i64>()
            .map_err(|_| UserValidationError::InvalidIdFormat(s.to_string()))?;
        Self::new(value)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// User can log in and authenticate requests
    #[default]
    Active,
    /// User exists but is blocked from authenticating
    Inactive,
}

impl UserStatus {
    /// Check if the user can log in
    pub fn can_login(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// User entity for authentication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    id: UserId,
    /// Username for login
    username: String,
    /// Base64 MD5 password digest - never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: String,
    /// Code of the group this user belongs to
    group_code: String,
    /// Current status of the user
    status: UserStatus,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last login timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new active user
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        password_hash: impl Into<String>,
        group_code: impl Into<String>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            password_hash: password_hash.into(),
            group_code: group_code.into(),
            status: UserStatus::Active,
            created_at: Utc::now(),
            last_login_at: None,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn group_code(&self) -> &str {
        &self.group_code
    }

    pub fn status(&self) -> UserStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    /// Check if the user is active and can authenticate
    pub fn is_active(&self) -> bool {
        self.status.can_login()
    }

    pub fn set_status(&mut self, status: UserStatus) {
        self.status = status;
    }

    /// Record a login
    pub fn record_login(&mut self) {
        self.last_login_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user(id: i64, username: &str) -> User {
        User::new(UserId::new(id).unwrap(), username, "hashed_password", "G001")
    }

    #[test]
    fn test_user_id_valid() {
        let id = UserId::new(42).unwrap();
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_user_id_invalid() {
        assert!(UserId::new(0).is_err());
        assert!(UserId::new(-1).is_err());
    }

    #[test]
    fn test_user_id_from_str() {
        assert_eq!("17".parse::<UserId>().unwrap().value(), 17);
        assert!("abc".parse::<UserId>().is_err());
        assert!("-3".parse::<UserId>().is_err());
    }

    #[test]
    fn test_user_id_deserialization_validates() {
        let id: UserId = serde_json::from_str("5").unwrap();
        assert_eq!(id.value(), 5);
        assert!(serde_json::from_str::<UserId>("0").is_err());
    }

    #[test]
    fn test_user_status() {
        assert!(UserStatus::Active.can_login());
        assert!(!UserStatus::Inactive.can_login());
    }

    #[test]
    fn test_user_creation() {
        let user = create_test_user(1, "admin");

        assert_eq!(user.username(), "admin");
        assert_eq!(user.password_hash(), "hashed_password");
        assert_eq!(user.group_code(), "G001");
        assert!(user.is_active());
        assert!(user.last_login_at().is_none());
    }

    #[test]
    fn test_user_deactivation() {
        let mut user = create_test_user(1, "admin");

        user.set_status(UserStatus::Inactive);
        assert!(!user.is_active());

        user.set_status(UserStatus::Active);
        assert!(user.is_active());
    }

    #[test]
    fn test_user_record_login() {
        let mut user = create_test_user(1, "admin");

        user.record_login();
        assert!(user.last_login_at().is_some());
    }

    #[test]
    fn test_user_serialization_excludes_password() {
        let user = create_test_user(1, "admin");

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hashed_password"));
        assert!(!json.contains("password_hash"));
        assert!(json.contains(r#""id":1"#));
    }
}
