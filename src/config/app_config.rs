use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub jwt: JwtSettings,
    pub cipher: CipherSettings,
    /// Users inserted into the in-memory store at start-up
    pub users: Vec<SeedUser>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Token signing settings
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct JwtSettings {
    pub secret: String,
    pub algorithm: String,
    pub access_token_lifetime_secs: u64,
    pub refresh_token_lifetime_secs: u64,
    pub auth_header_prefix: String,
}

/// Secret for at-rest string encryption
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct CipherSettings {
    pub secret: String,
}

/// A user to create at start-up; the password is hashed before storage
#[derive(Clone, Deserialize)]
pub struct SeedUser {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub group_code: String,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl std::fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSettings")
            .field("secret", &"[hidden]")
            .field("algorithm", &self.algorithm)
            .field("access_token_lifetime_secs", &self.access_token_lifetime_secs)
            .field("refresh_token_lifetime_secs", &self.refresh_token_lifetime_secs)
            .field("auth_header_prefix", &self.auth_header_prefix)
            .finish()
    }
}

impl std::fmt::Debug for CipherSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherSettings")
            .field("secret", &"[hidden]")
            .finish()
    }
}

impl std::fmt::Debug for SeedUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedUser")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("group_code", &self.group_code)
            .field("active", &self.active)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for JwtSettings {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            algorithm: "HS256".to_string(),
            access_token_lifetime_secs: 300,
            refresh_token_lifetime_secs: 86_400,
            auth_header_prefix: "Bearer".to_string(),
        }
    }
}

impl Default for CipherSettings {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
