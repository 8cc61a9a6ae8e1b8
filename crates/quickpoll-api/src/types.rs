// Wire types for the QuickPoll service API.
//
// The service is not consistent about field spellings: the results
// endpoint names its option list `options` with per-option `count`,
// while the by-name search names them `results` and `vote_count`, and
// labels appear as either `text` or `option`. The fallback rule lives
// here, once, as serde aliases -- everything downstream sees one shape.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

// ── Requests ────────────────────────────────────────────────────────

/// Body for `POST create/`.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePollRequest<'a> {
    pub name: &'a str,
    pub question_type: &'a str,
    pub option_count: u8,
    pub is_active: bool,
}

/// Body for `POST {code}/vote/`.
///
/// The service keys vote uniqueness on `student_email` per poll;
/// `student_name` is display-only.
#[derive(Debug, Clone, Serialize)]
pub struct VoteRequest<'a> {
    pub option_id: i64,
    pub student_email: &'a str,
    pub student_name: &'a str,
}

// ── Responses ───────────────────────────────────────────────────────

/// Successful `POST create/` payload: the freshly created poll with its
/// server-assigned code and generated option rows.
#[derive(Debug, Clone, Deserialize)]
pub struct PollCreated {
    pub code: String,
    pub name: String,
    pub question_type: String,
    pub option_count: u8,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub options: Vec<OptionRef>,
}

/// `GET {code}/` payload: poll metadata plus votable options.
#[derive(Debug, Clone, Deserialize)]
pub struct PollDetails {
    pub poll_code: String,
    pub name: String,
    pub question_type: String,
    #[serde(default)]
    pub options: Vec<OptionRef>,
}

/// An option as the service identifies it for voting.
#[derive(Debug, Clone, Deserialize)]
pub struct OptionRef {
    pub id: i64,
    #[serde(alias = "option")]
    pub text: String,
}

/// `GET {code}/results/` payload.
///
/// A wholly absent option list decodes as empty -- a poll with no
/// recorded options is "zero options", not a protocol error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultsPayload {
    #[serde(default)]
    pub poll_code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "results")]
    pub options: Vec<ResultRow>,
}

/// One option's tally within a results payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultRow {
    #[serde(alias = "option")]
    pub text: String,
    #[serde(default, alias = "vote_count")]
    pub count: u64,
    #[serde(default)]
    pub voters: Vec<String>,
}

/// `GET name/{name}/` payload: every poll matching the searched name,
/// with full per-option breakdowns and voter identities.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PollsByName {
    #[serde(default)]
    pub search_query: Option<String>,
    #[serde(default)]
    pub polls: Vec<NamedPollRow>,
}

/// One matching poll in a by-name search.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedPollRow {
    pub poll_code: String,
    #[serde(default, alias = "name")]
    pub poll_name: String,
    #[serde(default, deserialize_with = "deserialize_service_datetime")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, alias = "options")]
    pub results: Vec<ResultRow>,
}

fn default_true() -> bool {
    true
}

/// The service emits timestamps in two shapes depending on endpoint:
/// RFC 3339 from serializers, `%Y-%m-%d %H:%M:%S` from the by-name
/// search. Accept both; anything else decodes as `None`.
fn deserialize_service_datetime<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_service_datetime))
}

fn parse_service_datetime(raw: &str) -> Option<NaiveDateTime> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

// ── Error-body message extraction ───────────────────────────────────

/// Best-effort human-readable message from an error response body.
///
/// Preference order: `detail`, then `error`, then `non_field_errors`
/// joined with `"; "`, else the raw body (trimmed).
pub fn extract_api_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(detail) = value.get("detail").and_then(|v| v.as_str()) {
            return detail.to_owned();
        }
        if let Some(error) = value.get("error").and_then(|v| v.as_str()) {
            return error.to_owned();
        }
        if let Some(errors) = value.get("non_field_errors").and_then(|v| v.as_array()) {
            let joined: Vec<&str> = errors.iter().filter_map(|e| e.as_str()).collect();
            if !joined.is_empty() {
                return joined.join("; ");
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "the service gave no further detail".to_owned()
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_prefers_detail_over_error() {
        let body = r#"{"detail": "Invalid option.", "error": "ignored"}"#;
        assert_eq!(extract_api_message(body), "Invalid option.");
    }

    #[test]
    fn message_falls_back_to_error() {
        let body = r#"{"error": "You have already voted in this poll."}"#;
        assert_eq!(extract_api_message(body), "You have already voted in this poll.");
    }

    #[test]
    fn message_joins_non_field_errors() {
        let body = r#"{"non_field_errors": ["This poll is closed.", "Invalid option for this poll."]}"#;
        assert_eq!(
            extract_api_message(body),
            "This poll is closed.; Invalid option for this poll."
        );
    }

    #[test]
    fn message_falls_back_to_raw_body() {
        assert_eq!(extract_api_message("  gateway timeout  "), "gateway timeout");
        assert_eq!(
            extract_api_message(""),
            "the service gave no further detail"
        );
    }

    #[test]
    fn result_rows_accept_both_spellings() {
        let canonical: ResultRow =
            serde_json::from_str(r#"{"text": "True", "count": 3}"#).expect("canonical row");
        let legacy: ResultRow =
            serde_json::from_str(r#"{"option": "True", "vote_count": 3}"#).expect("legacy row");
        assert_eq!(canonical.text, legacy.text);
        assert_eq!(canonical.count, legacy.count);
    }

    #[test]
    fn results_payload_accepts_either_list_key_or_none() {
        let with_options: ResultsPayload =
            serde_json::from_str(r#"{"options": [{"text": "Yes", "count": 1}]}"#)
                .expect("options key");
        let with_results: ResultsPayload =
            serde_json::from_str(r#"{"results": [{"option": "Yes", "vote_count": 1}]}"#)
                .expect("results key");
        let absent: ResultsPayload = serde_json::from_str("{}").expect("no list at all");

        assert_eq!(with_options.options.len(), 1);
        assert_eq!(with_results.options.len(), 1);
        assert!(absent.options.is_empty());
    }

    #[test]
    fn service_datetimes_parse_in_both_formats() {
        assert!(parse_service_datetime("2026-08-07T10:15:00Z").is_some());
        assert!(parse_service_datetime("2026-08-07 10:15:00").is_some());
        assert!(parse_service_datetime("yesterday").is_none());
    }
}
