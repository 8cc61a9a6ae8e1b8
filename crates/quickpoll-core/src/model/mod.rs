// Domain model: polls, options, and result snapshots.

mod poll;
mod results;

pub use poll::{Poll, PollOption, QuestionType};
pub use results::{NamedOptionTally, NamedPoll, OptionTally, PollResults, ResultsSnapshot};
