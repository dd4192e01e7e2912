use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One record from the Full-Time fixtures or results feed.
///
/// The payload keys vary slightly between the two endpoints, so the less
/// common spellings are accepted as aliases and every field is optional at
/// the wire level. Validation happens when records are mapped to events.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FixtureRecord {
    /// Local kickoff, e.g. "07/09/25 14:00" (dd/MM/yy HH:mm).
    #[serde(alias = "resultDateTime", alias = "date")]
    pub fixture_date_time: Option<String>,
    #[serde(alias = "home")]
    pub home_team: Option<String>,
    #[serde(alias = "away")]
    pub away_team: Option<String>,
    pub division: Option<String>,
    pub competition: Option<String>,
    #[serde(alias = "ground")]
    pub location: Option<String>,
    /// Scores arrive as strings or numbers depending on the endpoint.
    #[serde(alias = "homeGoals")]
    pub home_score: Option<Value>,
    #[serde(alias = "awayGoals")]
    pub away_score: Option<Value>,
}

/// A fixture mapped to a single calendar event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixtureEvent {
    /// Deterministic UID derived from date, teams and division.
    pub uid: String,
    pub title: String,
    pub start_utc: DateTime<Utc>,
    pub end_utc: DateTime<Utc>,
    pub location: Option<String>,
    pub description: String,
}
