//! Command handlers. Each handler is a thin translation layer between
//! parsed arguments and `quickpoll-core` -- no poll semantics live here.

pub mod close;
pub mod create;
pub mod lookup;
pub mod results;
pub mod vote;
pub mod watch;

use quickpoll_config::Config;
use quickpoll_core::Session;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

pub async fn dispatch(
    command: Command,
    session: &Session,
    global: &GlobalOpts,
    config: &Config,
) -> Result<(), CliError> {
    match command {
        Command::Create(args) => create::handle(session, args, global).await,
        Command::Watch(args) => watch::handle(session, args, global).await,
        Command::Vote(args) => vote::handle(session, args, global, config).await,
        Command::Results(args) => results::handle(session, args, global).await,
        Command::Close(args) => close::handle(session, args, global).await,
        Command::Lookup(args) => lookup::handle(session, args, global).await,
    }
}
