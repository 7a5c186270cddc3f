//! Encrypt, decrypt and digest commands

use clap::Args;

use crate::config::AppConfig;
use crate::infrastructure::crypto::{AesCipher, md5_hash};

#[derive(Args)]
pub struct CipherArgs {
    /// Plaintext to encrypt or envelope to decrypt
    pub input: String,

    /// Secret to use instead of `cipher.secret`
    #[arg(long)]
    pub secret: Option<String>,
}

impl CipherArgs {
    fn cipher(&self, config: &AppConfig) -> AesCipher {
        AesCipher::new(self.secret.as_deref().unwrap_or(&config.cipher.secret))
    }
}

pub fn encrypt(args: CipherArgs) -> anyhow::Result<()> {
    let config = load_config()?;
    println!("{}", args.cipher(&config).encrypt(&args.input));

    Ok(())
}

pub fn decrypt(args: CipherArgs) -> anyhow::Result<()> {
    let config = load_config()?;
    println!("{}", args.cipher(&config).decrypt(&args.input)?);

    Ok(())
}

pub fn md5(data: &str) -> anyhow::Result<()> {
    println!("{}", md5_hash(data));

    Ok(())
}

fn load_config() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    Ok(AppConfig::load()?)
}
