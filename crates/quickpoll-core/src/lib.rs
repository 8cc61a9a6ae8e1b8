// quickpoll-core: Poll lifecycle and live-result synchronization
// between quickpoll-api and consumers (CLI or other front ends).

pub mod aggregate;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod poller;
pub mod session;
pub mod vote;

// ── Primary re-exports ──────────────────────────────────────────────
pub use aggregate::{DisplayOrder, aggregate};
pub use config::SessionConfig;
pub use error::CoreError;
pub use lifecycle::{PollController, PollPhase, PollSpec, lookup_by_name};
pub use poller::ResultsPoller;
pub use session::Session;
pub use vote::{VoteCoordinator, VoteOutcome};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    NamedOptionTally, NamedPoll, OptionTally, Poll, PollOption, PollResults, QuestionType,
    ResultsSnapshot,
};
