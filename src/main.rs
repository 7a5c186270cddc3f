use board_auth::cli::{self, Cli, Command};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Token(command) => cli::token::run(command),
        Command::Encrypt(args) => cli::crypto::encrypt(args),
        Command::Decrypt(args) => cli::crypto::decrypt(args),
        Command::Md5 { data } => cli::crypto::md5(&data),
    }
}
