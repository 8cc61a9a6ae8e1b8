//! `quickpoll close` -- close a poll so it stops accepting votes.

use quickpoll_core::Session;

use crate::cli::{CloseArgs, GlobalOpts};
use crate::error::CliError;

pub async fn handle(
    session: &Session,
    args: CloseArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    session.close_by_code(&args.code).await?;
    if !global.quiet {
        eprintln!("Poll {} closed", args.code.trim());
    }
    Ok(())
}
