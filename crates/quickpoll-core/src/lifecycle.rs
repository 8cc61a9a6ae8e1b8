// ── Poll lifecycle ──
//
// One controller per poll, owning the Draft -> Active -> Closed state
// machine. The controller is the sole writer of poll state: the poller
// only observes its cancellation token, and vote coordinators only
// carry the immutable code and option list.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info};

use quickpoll_api::PollClient;
use quickpoll_api::types::CreatePollRequest;

use crate::error::CoreError;
use crate::model::{NamedPoll, Poll, PollResults, QuestionType};
use crate::poller::ResultsPoller;
use crate::vote::VoteCoordinator;

/// Presenter-chosen parameters for a poll that does not exist yet.
#[derive(Debug, Clone)]
pub struct PollSpec {
    pub name: String,
    pub question_type: QuestionType,
    pub option_count: u8,
}

impl PollSpec {
    /// A spec for `question_type`, with the implied option count where
    /// the type fixes one (custom polls default to 2).
    pub fn new(name: impl Into<String>, question_type: QuestionType) -> Self {
        Self {
            name: name.into(),
            question_type,
            option_count: question_type.implied_option_count().unwrap_or(2),
        }
    }

    /// Override the option count (meaningful for custom polls).
    pub fn with_option_count(mut self, option_count: u8) -> Self {
        self.option_count = option_count;
        self
    }

    fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::validation("poll name must not be empty"));
        }
        if !(2..=6).contains(&self.option_count) {
            return Err(CoreError::validation(format!(
                "option count must be between 2 and 6, got {}",
                self.option_count
            )));
        }
        Ok(())
    }
}

/// Observable lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    Draft,
    Active,
    Closed,
}

impl PollPhase {
    pub fn name(self) -> &'static str {
        match self {
            Self::Draft => "a draft",
            Self::Active => "active",
            Self::Closed => "closed",
        }
    }
}

enum State {
    Draft,
    Active { poll: Poll, poller: ResultsPoller },
    Closed { poll: Poll },
}

/// Drives one poll through its lifecycle and owns its refresh loop.
pub struct PollController {
    client: Arc<PollClient>,
    refresh_interval: Duration,
    state: State,
}

impl PollController {
    pub(crate) fn new(client: Arc<PollClient>, refresh_interval: Duration) -> Self {
        Self {
            client,
            refresh_interval,
            state: State::Draft,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> PollPhase {
        match self.state {
            State::Draft => PollPhase::Draft,
            State::Active { .. } => PollPhase::Active,
            State::Closed { .. } => PollPhase::Closed,
        }
    }

    /// The poll, once one exists (Active or Closed).
    pub fn poll(&self) -> Option<&Poll> {
        match &self.state {
            State::Draft => None,
            State::Active { poll, .. } | State::Closed { poll } => Some(poll),
        }
    }

    /// Create the poll on the service and enter Active.
    ///
    /// Validation failures and transport errors leave the controller in
    /// Draft; the error surfaces verbatim. Succeeds at most once per
    /// controller.
    pub async fn create(&mut self, spec: &PollSpec) -> Result<&Poll, CoreError> {
        if !matches!(self.state, State::Draft) {
            return Err(CoreError::InvalidState {
                operation: "create",
                state: self.phase().name(),
            });
        }
        spec.validate()?;

        let question_type = spec.question_type.to_string();
        let created = self
            .client
            .create_poll(&CreatePollRequest {
                name: spec.name.trim(),
                question_type: &question_type,
                option_count: spec.option_count,
                is_active: true,
            })
            .await?;

        let mut poll = Poll::from(created);
        if poll.options.is_empty() {
            // Older service builds omit options from the create payload;
            // the details endpoint always has them.
            poll.options = Poll::from(self.client.poll_details(&poll.code).await?).options;
        }

        info!(code = %poll.code, name = %poll.name, "poll created");
        self.enter_active(poll);
        self.poll()
            .ok_or_else(|| CoreError::Internal("active controller lost its poll".to_owned()))
    }

    /// Attach to an existing active poll by code and enter Active.
    ///
    /// This is the participant path: the poll was created by someone
    /// else, and the code is all we know.
    pub async fn attach(&mut self, code: &str) -> Result<&Poll, CoreError> {
        if !matches!(self.state, State::Draft) {
            return Err(CoreError::InvalidState {
                operation: "attach",
                state: self.phase().name(),
            });
        }

        let details = self.client.poll_details(code.trim()).await?;
        let poll = Poll::from(details);

        debug!(code = %poll.code, "attached to poll");
        self.enter_active(poll);
        self.poll()
            .ok_or_else(|| CoreError::Internal("active controller lost its poll".to_owned()))
    }

    /// Close the poll on the service and stop the refresh loop.
    ///
    /// Idempotent from Closed: a second call is a no-op with zero
    /// network calls. After this resolves no further result fetch is
    /// issued for this poll.
    pub async fn close(&mut self) -> Result<(), CoreError> {
        match &self.state {
            State::Closed { .. } => return Ok(()),
            State::Draft => {
                return Err(CoreError::InvalidState {
                    operation: "close",
                    state: self.phase().name(),
                });
            }
            State::Active { poll, .. } => {
                self.client.close_poll(&poll.code).await?;
            }
        }

        let State::Active { mut poll, poller } =
            std::mem::replace(&mut self.state, State::Draft)
        else {
            return Err(CoreError::Internal("close raced a state change".to_owned()));
        };

        poller.shutdown().await;
        poll.is_active = false;
        info!(code = %poll.code, "poll closed");
        self.state = State::Closed { poll };
        Ok(())
    }

    /// Subscribe to live aggregated results while Active.
    pub fn results(&self) -> Option<watch::Receiver<Option<PollResults>>> {
        match &self.state {
            State::Active { poller, .. } => Some(poller.subscribe()),
            _ => None,
        }
    }

    /// The refresh-loop handle while Active.
    pub fn poller(&self) -> Option<&ResultsPoller> {
        match &self.state {
            State::Active { poller, .. } => Some(poller),
            _ => None,
        }
    }

    /// A vote coordinator for this poll while Active.
    pub fn coordinator(&self) -> Option<VoteCoordinator> {
        match &self.state {
            State::Active { poll, .. } => {
                Some(VoteCoordinator::new(Arc::clone(&self.client), poll))
            }
            _ => None,
        }
    }

    fn enter_active(&mut self, poll: Poll) {
        let poller = ResultsPoller::spawn(
            Arc::clone(&self.client),
            poll.code.clone(),
            self.refresh_interval,
        );
        self.state = State::Active { poll, poller };
    }
}

/// Search past polls by name -- a read-only query path independent of
/// any single poll's state machine.
///
/// The service answers 404 when nothing matches; that is an empty
/// result here, not an error.
pub async fn lookup_by_name(
    client: &PollClient,
    name: &str,
) -> Result<Vec<NamedPoll>, CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::validation("search name must not be empty"));
    }

    match client.polls_by_name(name).await {
        Ok(found) => Ok(found.polls.into_iter().map(NamedPoll::from).collect()),
        Err(e) if e.is_not_found() => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}
