//! Output formatting: table, JSON, plain.
//!
//! Table rendering uses `tabled`; JSON serializes the original data via
//! serde; plain emits one value per line for scripting.

use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use quickpoll_core::{NamedPoll, PollResults};

use crate::cli::OutputFormat;
use crate::error::CliError;

const BAR_WIDTH: usize = 28;

// ── Result rendering ────────────────────────────────────────────────

#[derive(Tabled)]
struct TallyRow {
    #[tabled(rename = "Option")]
    label: String,
    #[tabled(rename = "Votes")]
    count: u64,
    #[tabled(rename = "Share")]
    share: String,
}

/// Render one aggregated result set in the chosen format.
pub fn render_results(format: OutputFormat, results: &PollResults) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => {
            let rows: Vec<TallyRow> = results
                .options
                .iter()
                .map(|o| TallyRow {
                    label: o.label.clone(),
                    count: o.count,
                    share: format!("{:>5.1}%", o.percent),
                })
                .collect();
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            Ok(format!("{table}\nTotal votes: {}", results.total_votes))
        }
        OutputFormat::Json => to_json(results),
        OutputFormat::Plain => Ok(results
            .options
            .iter()
            .map(|o| format!("{}\t{}", o.label, o.count))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

/// Compact single-frame rendering for the live watch loop: one bar per
/// option, longest bar wins the most ink.
pub fn render_live_frame(results: &PollResults) -> String {
    let mut lines = Vec::with_capacity(results.options.len() + 1);
    lines.push(format!(
        "{} participants",
        results.total_votes.to_string().bold()
    ));

    let width = results
        .options
        .iter()
        .map(|o| o.label.len())
        .max()
        .unwrap_or(0);

    for option in &results.options {
        let filled = ((option.percent / 100.0) * BAR_WIDTH as f64).round() as usize;
        let bar: String = "█".repeat(filled.min(BAR_WIDTH));
        let pad: String = "░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH));
        lines.push(format!(
            "  {:width$}  {}{} {:>3} ({:>5.1}%)",
            option.label,
            bar.green(),
            pad.dimmed(),
            option.count,
            option.percent,
        ));
    }

    lines.join("\n")
}

// ── Lookup rendering ────────────────────────────────────────────────

#[derive(Tabled)]
struct LookupRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Votes")]
    votes: u64,
    #[tabled(rename = "Breakdown")]
    breakdown: String,
}

/// Render the by-name search results in the chosen format.
pub fn render_lookup(format: OutputFormat, polls: &[NamedPoll]) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => {
            let rows: Vec<LookupRow> = polls
                .iter()
                .map(|p| LookupRow {
                    code: p.code.clone(),
                    name: p.name.clone(),
                    created: p
                        .created_at
                        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_else(|| "-".to_owned()),
                    votes: p.total_votes(),
                    breakdown: p
                        .options
                        .iter()
                        .map(|o| format!("{} {}", o.label, o.count))
                        .collect::<Vec<_>>()
                        .join(", "),
                })
                .collect();
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            Ok(table.to_string())
        }
        OutputFormat::Json => to_json(polls),
        OutputFormat::Plain => Ok(polls
            .iter()
            .map(|p| p.code.clone())
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

fn to_json<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(data)
        .map_err(|e| CliError::Internal(format!("JSON rendering failed: {e}")))
}
