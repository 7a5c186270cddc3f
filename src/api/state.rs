//! Application state for shared services

use std::sync::Arc;

use crate::infrastructure::auth::{JwtAuthenticator, TokenService};
use crate::infrastructure::user::UserService;

/// Services shared by every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub token_service: Arc<dyn TokenService>,
    pub authenticator: JwtAuthenticator,
    pub user_service: UserService,
}

impl AppState {
    /// Wire the authenticator to the same token service and user store
    pub fn new(
        token_service: Arc<dyn TokenService>,
        user_service: UserService,
        auth_header_prefix: impl Into<String>,
    ) -> Self {
        let authenticator =
            JwtAuthenticator::new(token_service.clone(), user_service.repository())
                .with_header_prefix(auth_header_prefix);

        Self {
            token_service,
            authenticator,
            user_service,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use chrono::Duration;

    use super::AppState;
    use crate::domain::user::UserStatus;
    use crate::infrastructure::auth::{DEFAULT_AUTH_HEADER_PREFIX, JwtConfig, JwtService};
    use crate::infrastructure::user::{
        CreateUserRequest, InMemoryUserRepository, Md5PasswordHasher, UserService,
    };

    pub const PASSWORD: &str = "board-pass";

    /// State with an active user 1 (`kim`) and an inactive user 2 (`lee`)
    pub async fn create_test_state() -> AppState {
        let users = UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(Md5PasswordHasher),
        );

        for (id, username, status) in [(1, "kim", UserStatus::Active), (2, "lee", UserStatus::Inactive)] {
            users
                .create(CreateUserRequest {
                    id,
                    username: username.to_string(),
                    password: PASSWORD.to_string(),
                    group_code: "G001".to_string(),
                    status,
                })
                .await
                .unwrap();
        }

        let tokens = JwtService::new(JwtConfig::new(
            "test-secret",
            Duration::minutes(5),
            Duration::days(1),
        ));

        AppState::new(Arc::new(tokens), users, DEFAULT_AUTH_HEADER_PREFIX)
    }
}
