use serde::{Deserialize, Serialize};

use quickpoll_api::types::{OptionRef, PollCreated, PollDetails};

/// The kind of question a poll asks.
///
/// `TrueFalse` and `YesNoUnsure` imply their option count; `Custom`
/// polls carry a presenter-chosen count of numbered options.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum QuestionType {
    TrueFalse,
    YesNoUnsure,
    Custom,
}

impl QuestionType {
    /// The option count this question type implies, if fixed.
    pub fn implied_option_count(self) -> Option<u8> {
        match self {
            Self::TrueFalse => Some(2),
            Self::YesNoUnsure => Some(3),
            Self::Custom => None,
        }
    }

    /// Decode the service's wire spelling. Unknown spellings fold into
    /// `Custom` -- the service owns the vocabulary, the client renders
    /// whatever options come back.
    pub fn from_wire(raw: &str) -> Self {
        raw.parse().unwrap_or(Self::Custom)
    }
}

/// A votable option within one poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PollOption {
    /// Server-assigned id, stable for the life of the poll. Votes
    /// reference this, never the label.
    pub id: i64,
    pub label: String,
}

impl From<OptionRef> for PollOption {
    fn from(raw: OptionRef) -> Self {
        Self {
            id: raw.id,
            label: raw.text,
        }
    }
}

/// One poll as known to this client.
///
/// `code` is the server-assigned opaque identifier -- immutable once
/// created, and the only thing pollers and vote coordinators share.
#[derive(Debug, Clone, Serialize)]
pub struct Poll {
    pub code: String,
    pub name: String,
    pub question_type: QuestionType,
    pub option_count: u8,
    pub is_active: bool,
    pub options: Vec<PollOption>,
}

impl Poll {
    /// Whether `option_id` belongs to this poll.
    pub fn has_option(&self, option_id: i64) -> bool {
        self.options.iter().any(|o| o.id == option_id)
    }

    /// Look up an option by its server id.
    pub fn option(&self, option_id: i64) -> Option<&PollOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

impl From<PollCreated> for Poll {
    fn from(raw: PollCreated) -> Self {
        Self {
            code: raw.code,
            name: raw.name,
            question_type: QuestionType::from_wire(&raw.question_type),
            option_count: raw.option_count,
            is_active: raw.is_active,
            options: raw.options.into_iter().map(PollOption::from).collect(),
        }
    }
}

impl From<PollDetails> for Poll {
    fn from(raw: PollDetails) -> Self {
        let options: Vec<PollOption> = raw.options.into_iter().map(PollOption::from).collect();
        let option_count = options.len().min(u8::MAX as usize) as u8;
        Self {
            code: raw.poll_code,
            name: raw.name,
            question_type: QuestionType::from_wire(&raw.question_type),
            option_count,
            // The details endpoint only answers for active polls.
            is_active: true,
            options,
        }
    }
}
