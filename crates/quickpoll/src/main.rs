mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use quickpoll_core::Session;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = quickpoll_config::load(cli.global.config.as_deref())?;

    // CLI flags override everything the file and env configured.
    if let Some(timeout) = cli.global.timeout {
        if timeout == 0 {
            return Err(CliError::Validation {
                message: "--timeout must be at least 1 second".to_owned(),
            });
        }
        config.timeout_secs = timeout;
    }
    if let Some(refresh) = cli.global.refresh {
        if refresh == 0 {
            return Err(CliError::Validation {
                message: "--refresh must be at least 1 second".to_owned(),
            });
        }
        config.refresh_secs = refresh;
    }

    let session_config =
        config.session_config(cli.global.service.as_deref(), cli.global.token.as_deref())?;
    let session = Session::new(session_config)?;

    tracing::debug!(service = %session.config().service_url, "dispatching command");
    commands::dispatch(cli.command, &session, &cli.global, &config).await
}
