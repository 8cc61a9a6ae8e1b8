//! `quickpoll results` -- fetch a poll's current results once.

use quickpoll_core::Session;

use crate::cli::{GlobalOpts, ResultsArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    session: &Session,
    args: ResultsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let results = session.results_once(&args.code).await?;
    println!("{}", output::render_results(global.output, &results)?);
    Ok(())
}
