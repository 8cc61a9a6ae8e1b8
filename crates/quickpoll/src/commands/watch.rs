//! `quickpoll watch` -- follow a poll's live results until Ctrl-C.

use quickpoll_core::{PollController, Session};

use crate::cli::{GlobalOpts, OutputFormat, WatchArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    session: &Session,
    args: WatchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut controller = session.controller();
    let poll = controller.attach(&args.code).await?;

    if !global.quiet {
        eprintln!(
            "Watching '{}' -- code {} (Ctrl-C to stop)",
            poll.name, poll.code
        );
    }

    follow(controller, global, args.close).await
}

/// Drive the live-result loop on an Active controller until Ctrl-C,
/// printing one frame per published aggregate. Closes the poll on exit
/// when asked to; otherwise leaves it open and just stops watching.
pub async fn follow(
    mut controller: PollController,
    global: &GlobalOpts,
    close_on_exit: bool,
) -> Result<(), CliError> {
    let mut rx = controller.results().ok_or_else(|| {
        CliError::Internal("an active poll has no live results".to_owned())
    })?;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let Some(results) = rx.borrow().clone() else {
                    continue;
                };
                match global.output {
                    OutputFormat::Json => println!(
                        "{}",
                        serde_json::to_string(&results)
                            .map_err(|e| CliError::Internal(e.to_string()))?
                    ),
                    _ => println!("\n{}", output::render_live_frame(&results)),
                }
            }
        }
    }

    let code = controller
        .poll()
        .map(|p| p.code.clone())
        .unwrap_or_default();

    if close_on_exit {
        controller.close().await?;
        if !global.quiet {
            eprintln!("Poll {code} closed");
        }
    } else {
        if let Some(poller) = controller.poller() {
            poller.stop();
        }
        if !global.quiet {
            eprintln!("Stopped watching; poll {code} is still open");
        }
    }

    Ok(())
}
