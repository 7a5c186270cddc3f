//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, CipherSettings, JwtSettings, LogFormat, LoggingConfig, SeedUser, ServerConfig,
};
