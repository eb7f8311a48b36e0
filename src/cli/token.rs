use clap::Parser;
use error_stack::{Result, ResultExt};
use thiserror::Error;

use agora::{
    config::Server as Config,
    http::Jwt,
    types::id::{marker::UserMarker, Id},
};

/// Print a signed access token for a user (development only)
#[derive(Debug, Parser)]
pub struct IssueTokenCommand {
    /// Id of the user the token is issued for.
    #[clap(long)]
    pub user: Id<UserMarker>,
}

#[derive(Debug, Error)]
#[error("Failed to issue access token")]
pub struct IssueTokenError;

pub fn run(args: &IssueTokenCommand) -> Result<(), IssueTokenError> {
    let config = Config::load().change_context(IssueTokenError)?;
    let token = Jwt::encode(args.user, &config.auth).change_context(IssueTokenError)?;

    println!("{token}");
    Ok(())
}
