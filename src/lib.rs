//! Board Auth
//!
//! Token authentication for the board service:
//! - Signed, expiring access and refresh tokens (HMAC JWT)
//! - Request authentication from `Authorization` bearer headers
//! - AES-256-CBC string encryption and MD5 digests
//! - An HTTP API for login, token refresh and the current user

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use config::{JwtSettings, SeedUser};
use domain::user::UserStatus;
use infrastructure::auth::{JwtConfig, JwtService};
use infrastructure::user::{
    CreateUserRequest, InMemoryUserRepository, Md5PasswordHasher, UserService,
};
use tracing::info;

/// Create the token service from the `jwt` configuration section
pub fn create_token_service(settings: &JwtSettings) -> anyhow::Result<JwtService> {
    let config = JwtConfig::try_from(settings)?;
    info!(algorithm = ?config.algorithm, "Token service configured");

    Ok(JwtService::new(config))
}

/// Create the application state with all services initialized
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let token_service = Arc::new(create_token_service(&config.jwt)?);

    let user_service = UserService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(Md5PasswordHasher),
    );
    seed_users(&user_service, &config.users).await?;

    Ok(AppState::new(
        token_service,
        user_service,
        &config.jwt.auth_header_prefix,
    ))
}

async fn seed_users(user_service: &UserService, users: &[SeedUser]) -> anyhow::Result<()> {
    for seed in users {
        let status = if seed.active {
            UserStatus::Active
        } else {
            UserStatus::Inactive
        };

        user_service
            .create(CreateUserRequest {
                id: seed.id,
                username: seed.username.clone(),
                password: seed.password.clone(),
                group_code: seed.group_code.clone(),
                status,
            })
            .await?;
    }

    info!(count = users.len(), "Seeded users");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::user::UserId;

    fn seed(id: i64, username: &str, active: bool) -> SeedUser {
        SeedUser {
            id,
            username: username.to_string(),
            password: "pw".to_string(),
            group_code: "G001".to_string(),
            active,
        }
    }

    #[tokio::test]
    async fn test_create_app_state_seeds_users() {
        let config = AppConfig {
            users: vec![seed(1, "kim", true), seed(2, "lee", false)],
            ..AppConfig::default()
        };

        let state = create_app_state(&config).await.unwrap();

        let users = state.user_service.list().await.unwrap();
        assert_eq!(users.len(), 2);

        let lee = state
            .user_service
            .get(UserId::new(2).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(!lee.is_active());
        assert_eq!(state.authenticator.header_prefix(), "Bearer");
    }

    #[tokio::test]
    async fn test_create_app_state_rejects_duplicate_usernames() {
        let config = AppConfig {
            users: vec![seed(1, "kim", true), seed(2, "kim", true)],
            ..AppConfig::default()
        };

        assert!(create_app_state(&config).await.is_err());
    }

    #[test]
    fn test_create_token_service_rejects_unknown_algorithm() {
        let settings = JwtSettings {
            algorithm: "none".to_string(),
            ..JwtSettings::default()
        };

        assert!(create_token_service(&settings).is_err());
    }
}
