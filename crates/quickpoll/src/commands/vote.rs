//! `quickpoll vote` -- submit one vote on an active poll.

use quickpoll_config::Config;
use quickpoll_core::{Session, VoteOutcome};

use crate::cli::{GlobalOpts, VoteArgs};
use crate::error::CliError;

pub async fn handle(
    session: &Session,
    args: VoteArgs,
    global: &GlobalOpts,
    config: &Config,
) -> Result<(), CliError> {
    let mut controller = session.controller();
    controller.attach(&args.code).await?;

    let mut coordinator = controller.coordinator().ok_or_else(|| {
        CliError::Internal("an active poll has no vote coordinator".to_owned())
    })?;

    // The one-shot vote command has no use for the refresh loop.
    if let Some(poller) = controller.poller() {
        poller.stop();
    }

    let Some(option_id) = args.option else {
        eprintln!("Options for poll {}:", coordinator.code());
        for option in coordinator.options() {
            eprintln!("  [{}] {}", option.id, option.label);
        }
        return Err(CliError::Validation {
            message: "pass --option <ID> to choose one".to_owned(),
        });
    };

    let email = args
        .email
        .or_else(|| config.email.clone())
        .ok_or_else(|| CliError::Validation {
            message: "participant email required (--email, QUICKPOLL_EMAIL, or config)"
                .to_owned(),
        })?;
    let name = args
        .name
        .or_else(|| config.name.clone())
        .ok_or_else(|| CliError::Validation {
            message: "participant name required (--name, QUICKPOLL_NAME, or config)".to_owned(),
        })?;

    match coordinator.submit(option_id, &email, &name).await? {
        VoteOutcome::Accepted => {
            if !global.quiet {
                eprintln!("Vote recorded -- thanks, {name}!");
            }
            Ok(())
        }
        VoteOutcome::AlreadyVoted => Err(CliError::AlreadyVoted),
        VoteOutcome::Rejected { reason } => Err(CliError::VoteRejected { reason }),
    }
}
