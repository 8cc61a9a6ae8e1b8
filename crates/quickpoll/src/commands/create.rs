//! `quickpoll create` -- create a poll and print its join code.

use owo_colors::OwoColorize;

use quickpoll_core::{PollSpec, QuestionType, Session};

use crate::cli::{CreateArgs, GlobalOpts, OutputFormat, QuestionKind};
use crate::error::CliError;

use super::watch;

pub async fn handle(
    session: &Session,
    args: CreateArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let question_type = QuestionType::from(args.kind);
    let mut spec = PollSpec::new(args.name.clone(), question_type);

    if let Some(n) = args.options {
        if args.kind != QuestionKind::Custom {
            return Err(CliError::Validation {
                message: "--options only applies to --kind custom".to_owned(),
            });
        }
        spec = spec.with_option_count(n);
    }

    let mut controller = session.controller();
    let poll = controller.create(&spec).await?;

    match global.output {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(poll)
                    .map_err(|e| CliError::Internal(e.to_string()))?
            );
        }
        OutputFormat::Plain => println!("{}", poll.code),
        OutputFormat::Table => {
            println!("Poll '{}' created", poll.name);
            println!("Join code: {}", poll.code.bold().yellow());
            for option in &poll.options {
                println!("  [{}] {}", option.id, option.label);
            }
        }
    }

    if args.watch {
        watch::follow(controller, global, false).await
    } else {
        // The controller started a refresh loop on creation; this
        // command only needed the code.
        if let Some(poller) = controller.poller() {
            poller.stop();
        }
        Ok(())
    }
}
