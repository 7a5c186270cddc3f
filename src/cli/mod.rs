//! Command-line interface
//!
//! - `serve`: run the HTTP API
//! - `token`: issue or decode tokens with the configured signing key
//! - `encrypt` / `decrypt`: AES-256-CBC envelopes under `cipher.secret`
//! - `md5`: Base64 MD5 digest

pub mod crypto;
pub mod serve;
pub mod token;

use clap::{Parser, Subcommand};

/// Token authentication and crypto utilities for the board service
#[derive(Parser)]
#[command(name = "board-auth")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Issue or decode tokens
    #[command(subcommand)]
    Token(token::TokenCommand),

    /// Encrypt a string into a Base64 envelope
    Encrypt(crypto::CipherArgs),

    /// Decrypt a Base64 envelope back into a string
    Decrypt(crypto::CipherArgs),

    /// Print the Base64 MD5 digest of a string
    Md5 {
        /// Input text
        data: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_issue() {
        let cli = Cli::try_parse_from([
            "board-auth", "token", "issue", "--user-id", "7", "--refresh", "--claim", "role=admin",
        ])
        .unwrap();

        match cli.command {
            Command::Token(token::TokenCommand::Issue {
                user_id,
                refresh,
                claims,
            }) => {
                assert_eq!(user_id, 7);
                assert!(refresh);
                assert_eq!(claims.len(), 1);
                assert_eq!(claims[0].0, "role");
            }
            _ => panic!("expected token issue"),
        }
    }

    #[test]
    fn test_parse_decrypt_with_secret() {
        let cli =
            Cli::try_parse_from(["board-auth", "decrypt", "AAAA", "--secret", "s3cret"]).unwrap();

        match cli.command {
            Command::Decrypt(args) => {
                assert_eq!(args.input, "AAAA");
                assert_eq!(args.secret.as_deref(), Some("s3cret"));
            }
            _ => panic!("expected decrypt"),
        }
    }

    #[test]
    fn test_rejects_bad_claim() {
        let result = Cli::try_parse_from([
            "board-auth", "token", "issue", "--user-id", "1", "--claim", "no-equals-sign",
        ]);
        assert!(result.is_err());
    }
}
