//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::DomainError;
use crate::domain::user::{User, UserId, UserRepository};

/// In-memory implementation of UserRepository
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<BTreeMap<UserId, User>>>,
    /// Index for username -> user ID lookup
    username_index: Arc<RwLock<HashMap<String, UserId>>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with initial users
    pub fn with_users(users: Vec<User>) -> Self {
        let mut users_map = BTreeMap::new();
        let mut username_map = HashMap::new();

        for user in users {
            username_map.insert(user.username().to_string(), user.id());
            users_map.insert(user.id(), user);
        }

        Self {
            users: Arc::new(RwLock::new(users_map)),
            username_index: Arc::new(RwLock::new(username_map)),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        // Lock order is `users` then `username_index`; never wait on `users`
        // while holding the index
        let user_id = self.username_index.read().await.get(username).copied();

        let Some(user_id) = user_id else {
            return Ok(None);
        };

        let users = self.users.read().await;
        Ok(users.get(&user_id).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let mut username_index = self.username_index.write().await;

        if users.contains_key(&user.id()) {
            return Err(DomainError::conflict(format!(
                "User with ID '{}' already exists",
                user.id()
            )));
        }

        if username_index.contains_key(user.username()) {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                user.username()
            )));
        }

        username_index.insert(user.username().to_string(), user.id());
        users.insert(user.id(), user.clone());

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let mut username_index = self.username_index.write().await;

        let Some(existing) = users.get(&user.id()) else {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                user.id()
            )));
        };

        let old_username = existing.username().to_string();

        if old_username != user.username() {
            if username_index.contains_key(user.username()) {
                return Err(DomainError::conflict(format!(
                    "Username '{}' already exists",
                    user.username()
                )));
            }

            username_index.remove(&old_username);
            username_index.insert(user.username().to_string(), user.id());
        }

        users.insert(user.id(), user.clone());

        Ok(user.clone())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().cloned().collect())
    }

    async fn record_login(&self, id: &UserId) -> Result<(), DomainError> {
        let mut users = self.users.write().await;

        if let Some(user) = users.get_mut(id) {
            user.record_login();
            Ok(())
        } else {
            Err(DomainError::not_found(format!("User '{}' not found", id)))
        }
    }
}
