//! Token command - issue and decode tokens offline

use clap::Subcommand;
use serde_json::Value;

use crate::config::AppConfig;
use crate::domain::auth::{CLAIM_USER_ID, Claims};
use crate::domain::user::UserId;
use crate::infrastructure::auth::TokenService;

#[derive(Subcommand)]
pub enum TokenCommand {
    /// Issue a token for a user
    Issue {
        /// User the token authenticates
        #[arg(long)]
        user_id: i64,

        /// Issue a refresh token instead of an access token
        #[arg(long)]
        refresh: bool,

        /// Extra claim as key=value; values that parse as JSON keep their type
        #[arg(long = "claim", value_parser = parse_claim)]
        claims: Vec<(String, Value)>,
    },

    /// Verify a token and print its claims
    Decode {
        token: String,
    },
}

/// Run a token command against the loaded configuration
pub fn run(command: TokenCommand) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    println!("{}", execute(command, &config)?);

    Ok(())
}

fn execute(command: TokenCommand, config: &AppConfig) -> anyhow::Result<String> {
    let tokens = crate::create_token_service(&config.jwt)?;

    match command {
        TokenCommand::Issue {
            user_id,
            refresh,
            claims,
        } => {
            let user_id = UserId::new(user_id)?;

            let mut payload: Claims = claims.into_iter().collect();
            payload.insert(CLAIM_USER_ID.to_string(), Value::from(user_id.value()));

            let token = if refresh {
                tokens.issue_refresh(payload)?
            } else {
                tokens.issue_access(payload)?
            };

            Ok(token)
        }
        TokenCommand::Decode { token } => {
            let claims = tokens.decode(&token, &[])?;
            Ok(serde_json::to_string_pretty(&claims)?)
        }
    }
}

fn parse_claim(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;

    if key.is_empty() {
        return Err("claim name must not be empty".to_string());
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));

    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::CLAIM_TOKEN_TYPE;
    use serde_json::json;

    #[test]
    fn test_parse_claim() {
        assert_eq!(parse_claim("role=admin").unwrap(), ("role".to_string(), json!("admin")));
        assert_eq!(parse_claim("level=3").unwrap(), ("level".to_string(), json!(3)));
        assert_eq!(parse_claim("a=b=c").unwrap(), ("a".to_string(), json!("b=c")));
        assert!(parse_claim("=x").is_err());
        assert!(parse_claim("novalue").is_err());
    }

    #[test]
    fn test_issue_then_decode() {
        let config = AppConfig::default();

        let token = execute(
            TokenCommand::Issue {
                user_id: 42,
                refresh: true,
                claims: vec![("role".to_string(), json!("admin"))],
            },
            &config,
        )
        .unwrap();

        let decoded = execute(TokenCommand::Decode { token }, &config).unwrap();
        let claims: Claims = serde_json::from_str(&decoded).unwrap();

        assert_eq!(claims[CLAIM_USER_ID], json!(42));
        assert_eq!(claims[CLAIM_TOKEN_TYPE], json!("refresh"));
        assert_eq!(claims["role"], json!("admin"));
    }

    #[test]
    fn test_issue_rejects_invalid_user_id() {
        let result = execute(
            TokenCommand::Issue {
                user_id: 0,
                refresh: false,
                claims: Vec::new(),
            },
            &AppConfig::default(),
        );

        assert!(result.is_err());
    }
}
