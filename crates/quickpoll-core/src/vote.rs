// ── Vote submission ──
//
// Validates a participant's selection and identity locally, submits
// once, and classifies the service's answer. A duplicate vote is an
// expected outcome, not an error -- the service's per-poll uniqueness
// constraint is the source of truth.

use std::sync::Arc;

use tracing::debug;

use quickpoll_api::types::{VoteRequest, extract_api_message};
use quickpoll_api::{Error as ApiError, PollClient};

use crate::error::CoreError;
use crate::model::{Poll, PollOption};

/// Terminal outcome of one vote submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// The vote was recorded.
    Accepted,
    /// This participant already has a recorded vote for this poll.
    AlreadyVoted,
    /// The service refused the vote; `reason` is its own message.
    Rejected { reason: String },
}

/// Submits votes for one poll.
///
/// `submit` takes `&mut self`, so one coordinator can never have two
/// submissions in flight -- re-submission waits for a terminal outcome.
pub struct VoteCoordinator {
    client: Arc<PollClient>,
    code: String,
    options: Vec<PollOption>,
}

impl VoteCoordinator {
    pub fn new(client: Arc<PollClient>, poll: &Poll) -> Self {
        Self {
            client,
            code: poll.code.clone(),
            options: poll.options.clone(),
        }
    }

    /// The poll code this coordinator votes on.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The options a participant may choose from.
    pub fn options(&self) -> &[PollOption] {
        &self.options
    }

    /// Submit one vote.
    ///
    /// Participant-input problems (unknown option, blank identity) are
    /// rejected locally with no network call. A timed-out submission
    /// surfaces as [`CoreError::Timeout`] and is never retried here --
    /// the service may or may not have recorded it, and only the
    /// participant can decide to try again.
    pub async fn submit(
        &mut self,
        option_id: i64,
        email: &str,
        name: &str,
    ) -> Result<VoteOutcome, CoreError> {
        let email = email.trim();
        let name = name.trim();

        if email.is_empty() {
            return Err(CoreError::validation("participant email is required"));
        }
        if name.is_empty() {
            return Err(CoreError::validation("participant name is required"));
        }
        if !self.options.iter().any(|o| o.id == option_id) {
            return Err(CoreError::validation(format!(
                "option {option_id} is not part of poll {}",
                self.code
            )));
        }

        let request = VoteRequest {
            option_id,
            student_email: email,
            student_name: name,
        };

        match self.client.submit_vote(&self.code, &request).await {
            Ok(()) => {
                debug!(code = %self.code, option = option_id, "vote accepted");
                Ok(VoteOutcome::Accepted)
            }
            Err(e) if e.is_conflict() => Ok(VoteOutcome::AlreadyVoted),
            Err(ApiError::Status { body, .. }) => Ok(VoteOutcome::Rejected {
                reason: extract_api_message(&body),
            }),
            Err(e) => Err(e.into()),
        }
    }
}
