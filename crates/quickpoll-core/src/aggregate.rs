// ── Result aggregation ──
//
// Pure transforms from a results snapshot to display-ready tallies.
// No I/O, no clock, no shared state -- everything here is directly
// testable with literal inputs.

use crate::model::{OptionTally, PollResults, ResultsSnapshot};

/// Aggregate a snapshot into totals and per-option percentages.
///
/// Output order follows the snapshot's label order. An option's
/// `percent` is `0.0` when the snapshot holds no votes at all.
pub fn aggregate(snapshot: &ResultsSnapshot) -> PollResults {
    let total_votes = snapshot.total_votes();

    let options = snapshot
        .iter()
        .map(|(label, count)| OptionTally {
            label: label.to_owned(),
            count,
            percent: if total_votes == 0 {
                0.0
            } else {
                (count as f64) * 100.0 / (total_votes as f64)
            },
        })
        .collect();

    PollResults {
        total_votes,
        options,
    }
}

/// Pins display order across refresh ticks.
///
/// The first snapshot establishes the order; later snapshots are
/// re-keyed to it even if the service reorders its own list, and
/// genuinely new labels append at the end.
#[derive(Debug, Default)]
pub struct DisplayOrder {
    labels: Vec<String>,
}

impl DisplayOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reorder `snapshot` to the established display order, extending
    /// the order with any labels seen for the first time.
    pub fn arrange(&mut self, snapshot: ResultsSnapshot) -> ResultsSnapshot {
        let mut arranged = ResultsSnapshot::new();

        for label in &self.labels {
            if let Some(count) = snapshot.count(label) {
                arranged.record(label.clone(), count);
            }
        }

        for (label, count) in snapshot.iter() {
            if !self.labels.iter().any(|known| known == label) {
                self.labels.push(label.to_owned());
                arranged.record(label.to_owned(), count);
            }
        }

        arranged
    }
}
