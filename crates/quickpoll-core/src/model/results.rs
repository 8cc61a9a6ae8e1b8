use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::Serialize;

use quickpoll_api::types::{NamedPollRow, ResultsPayload};

/// One full, point-in-time fetch of a poll's results.
///
/// Rebuilt wholesale on every successful tick -- never patched
/// incrementally, so concurrent server-side updates cannot drift the
/// client's view. Label order is the order labels appear in the map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsSnapshot {
    counts: IndexMap<String, u64>,
}

impl ResultsSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` votes for `label`, accumulating if the label repeats.
    pub fn record(&mut self, label: impl Into<String>, count: u64) {
        *self.counts.entry(label.into()).or_insert(0) += count;
    }

    /// Sum of all per-option counts.
    pub fn total_votes(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn count(&self, label: &str) -> Option<u64> {
        self.counts.get(label).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(label, count)| (label.as_str(), *count))
    }
}

impl From<ResultsPayload> for ResultsSnapshot {
    fn from(payload: ResultsPayload) -> Self {
        let mut snapshot = Self::new();
        for row in payload.options {
            snapshot.record(row.text, row.count);
        }
        snapshot
    }
}

impl FromIterator<(String, u64)> for ResultsSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (label, count) in iter {
            snapshot.record(label, count);
        }
        snapshot
    }
}

/// Aggregated results ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollResults {
    pub total_votes: u64,
    pub options: Vec<OptionTally>,
}

/// One option's share of the vote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionTally {
    pub label: String,
    pub count: u64,
    /// Percentage of `total_votes`; defined as `0.0` when no votes have
    /// been cast.
    pub percent: f64,
}

/// A poll returned by the by-name search, with voter identities.
#[derive(Debug, Clone, Serialize)]
pub struct NamedPoll {
    pub code: String,
    pub name: String,
    pub created_at: Option<NaiveDateTime>,
    pub options: Vec<NamedOptionTally>,
}

impl NamedPoll {
    pub fn total_votes(&self) -> u64 {
        self.options.iter().map(|o| o.count).sum()
    }
}

/// Per-option breakdown within a [`NamedPoll`].
#[derive(Debug, Clone, Serialize)]
pub struct NamedOptionTally {
    pub label: String,
    pub count: u64,
    pub voters: Vec<String>,
}

impl From<NamedPollRow> for NamedPoll {
    fn from(raw: NamedPollRow) -> Self {
        Self {
            code: raw.poll_code,
            name: raw.poll_name,
            created_at: raw.created_at,
            options: raw
                .results
                .into_iter()
                .map(|row| NamedOptionTally {
                    label: row.text,
                    count: row.count,
                    voters: row.voters,
                })
                .collect(),
        }
    }
}
