use clap::Parser;
use error_stack::{Result, ResultExt};
use thiserror::Error;

mod server;
mod token;

/// Command line options for agora.
#[derive(Debug, Parser)]
#[command(about = "Posts service of the agora backend", version, author, long_about)]
pub struct Cli {
    #[clap(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(Debug, Error)]
#[error("Failed to run agora command")]
pub struct CliError;

impl Cli {
    pub fn run(self) -> Result<(), CliError> {
        match self.subcommand {
            Subcommand::Server(args) => self::server::run(args).change_context(CliError),
            Subcommand::IssueToken(args) => self::token::run(&args).change_context(CliError),
        }
    }
}

#[derive(Debug, Parser)]
pub enum Subcommand {
    Server(self::server::ServerCommand),
    IssueToken(self::token::IssueTokenCommand),
}
