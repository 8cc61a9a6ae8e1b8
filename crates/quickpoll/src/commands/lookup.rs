//! `quickpoll lookup` -- search past polls by name.

use quickpoll_core::Session;

use crate::cli::{GlobalOpts, LookupArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    session: &Session,
    args: LookupArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let polls = session.lookup_by_name(&args.name).await?;

    if polls.is_empty() && global.output == OutputFormat::Table {
        if !global.quiet {
            eprintln!("No polls named '{}'", args.name);
        }
        return Ok(());
    }

    println!("{}", output::render_lookup(global.output, &polls)?);

    if global.output == OutputFormat::Table && !global.quiet {
        for poll in &polls {
            for option in &poll.options {
                if !option.voters.is_empty() {
                    println!(
                        "{} / {}: {}",
                        poll.code,
                        option.label,
                        option.voters.join(", ")
                    );
                }
            }
        }
    }

    Ok(())
}
