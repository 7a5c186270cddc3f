//! User service for login and user management

use std::sync::Arc;

use tracing::info;

use crate::domain::DomainError;
use crate::domain::user::{
    User, UserId, UserRepository, UserStatus, validate_group_code, validate_password,
    validate_username,
};

use super::password::PasswordHasher;

/// Request for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub group_code: String,
    pub status: UserStatus,
}

/// User service for authentication and management
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService")
            .field("hasher", &self.hasher)
            .finish()
    }
}

impl UserService {
    /// Create a new user service
    pub fn new(repository: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }

    /// The repository users are resolved from
    pub fn repository(&self) -> Arc<dyn UserRepository> {
        self.repository.clone()
    }

    /// Create a new user
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        let user_id =
            UserId::new(request.id).map_err(|e| DomainError::invalid_id(e.to_string()))?;

        validate_username(&request.username).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_group_code(&request.group_code)
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.username_exists(&request.username).await? {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                request.username
            )));
        }

        let mut user = User::new(
            user_id,
            &request.username,
            self.hasher.hash(&request.password),
            &request.group_code,
        );
        user.set_status(request.status);

        let user = self.repository.create(user).await?;
        info!(user_id = %user.id(), username = %user.username(), "User created");

        Ok(user)
    }

    /// Authenticate a user with username and password
    ///
    /// Unknown users, inactive users and wrong passwords all yield `None`.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let user = match self.repository.get_by_username(username).await? {
            Some(u) => u,
            None => return Ok(None),
        };

        if !user.is_active() {
            return Ok(None);
        }

        if !self.hasher.verify(password, user.password_hash()) {
            return Ok(None);
        }

        self.repository.record_login(&user.id()).await?;

        // Re-fetch user to get updated last_login_at
        self.repository.get(&user.id()).await
    }

    /// Get a user by ID
    pub async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        self.repository.get(&id).await
    }

    /// List all users
    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.repository.list().await
    }

    /// Activate or deactivate a user
    pub async fn set_status(&self, id: UserId, status: UserStatus) -> Result<User, DomainError> {
        let mut user = self
            .repository
            .get(&id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))?;

        user.set_status(status);

        self.repository.update(&user).await
    }
}
