//! Argument definitions for the `quickpoll` binary.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use quickpoll_core::QuestionType;

#[derive(Debug, Parser)]
#[command(
    name = "quickpoll",
    version,
    about = "Run live classroom polls from the command line",
    long_about = "Create a short-lived, code-identified poll, collect one vote \
                  per participant, and watch aggregated results refresh live \
                  until the poll is closed."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Poll service base URL (e.g. https://polls.example/api/quickpolls/)
    #[arg(long, global = true, env = "QUICKPOLL_SERVICE")]
    pub service: Option<String>,

    /// Bearer token for authenticated requests
    #[arg(long, global = true, env = "QUICKPOLL_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Path to the config file (default: quickpoll.toml in the platform config dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Per-request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Seconds between live refresh ticks
    #[arg(long, global = true, value_name = "SECS")]
    pub refresh: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// Pretty-printed JSON
    Json,
    /// One value per line, for scripting
    Plain,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a poll and print its join code
    Create(CreateArgs),

    /// Follow a poll's live results until Ctrl-C
    Watch(WatchArgs),

    /// Submit a vote on an active poll
    Vote(VoteArgs),

    /// Fetch a poll's current results once
    Results(ResultsArgs),

    /// Close a poll so it stops accepting votes
    Close(CloseArgs),

    /// Search past polls by name, with voter breakdowns
    Lookup(LookupArgs),
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Poll name shown to participants
    pub name: String,

    /// Question type
    #[arg(long, value_enum, default_value = "true-false")]
    pub kind: QuestionKind,

    /// Number of options, 2-6 (custom polls only)
    #[arg(long, value_name = "N")]
    pub options: Option<u8>,

    /// Keep watching live results after creating
    #[arg(long)]
    pub watch: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QuestionKind {
    TrueFalse,
    YesNoUnsure,
    Custom,
}

impl From<QuestionKind> for QuestionType {
    fn from(kind: QuestionKind) -> Self {
        match kind {
            QuestionKind::TrueFalse => QuestionType::TrueFalse,
            QuestionKind::YesNoUnsure => QuestionType::YesNoUnsure,
            QuestionKind::Custom => QuestionType::Custom,
        }
    }
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Poll code
    pub code: String,

    /// Close the poll when the watch ends
    #[arg(long)]
    pub close: bool,
}

#[derive(Debug, Args)]
pub struct VoteArgs {
    /// Poll code
    pub code: String,

    /// Server id of the chosen option (omit to list the options)
    #[arg(long, value_name = "ID")]
    pub option: Option<i64>,

    /// Participant email -- the one-vote-per-poll key
    #[arg(long, env = "QUICKPOLL_EMAIL")]
    pub email: Option<String>,

    /// Participant display name
    #[arg(long, env = "QUICKPOLL_NAME")]
    pub name: Option<String>,
}

#[derive(Debug, Args)]
pub struct ResultsArgs {
    /// Poll code
    pub code: String,
}

#[derive(Debug, Args)]
pub struct CloseArgs {
    /// Poll code
    pub code: String,
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Poll name to search for (case-insensitive, partial match)
    pub name: String,
}
