use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://faapi.jwhsolutions.co.uk/api";
pub const DEFAULT_TEAM_ID: &str = "938310682";
pub const DEFAULT_TEAM_NAME: &str = "Poole Town FC Wessex U18 Colts";
pub const DEFAULT_OUTPUT_PATH: &str = "poole_town_u18_colts_fixtures.ics";

// Handy links appended to every event description (TinyURL versions)
const DEFAULT_INFO_LINKS: [&str; 4] = [
    "PTYFC Results/Fixtures: https://tinyurl.com/3rcea6d6",
    "League Table: https://tinyurl.com/2p3zzska",
    "League Fixtures: https://tinyurl.com/bdhdmzcn",
    "League Results: https://tinyurl.com/bs6ppntx",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub team_id: String,
    pub team_name: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            team_id: DEFAULT_TEAM_ID.to_string(),
            team_name: DEFAULT_TEAM_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarConfig {
    pub output_path: PathBuf,
    /// Calendar display name; defaults to "<team name> Fixtures".
    pub name: Option<String>,
    /// Event duration: kickoff + playing time + buffer.
    pub event_duration_mins: i64,
    /// Zone the feed's kickoff wall-clock times are expressed in.
    pub timezone: Tz,
    pub info_links: Vec<String>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            name: None,
            event_duration_mins: 120,
            timezone: chrono_tz::Europe::London,
            info_links: DEFAULT_INFO_LINKS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpConfig {
    pub user_agent: String,
    pub request_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "PooleTownCalendar/1.0".to_string(),
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub api: ApiConfig,
    pub calendar: CalendarConfig,
    pub http: HttpConfig,
}

impl GeneratorConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = env::var("FULLTIME_API_BASE_URL") {
            config.api.base_url = url;
        }
        if let Ok(team_id) = env::var("FULLTIME_TEAM_ID") {
            config.api.team_id = team_id;
        }
        if let Ok(team_name) = env::var("FULLTIME_TEAM_NAME") {
            config.api.team_name = team_name;
        }
        if let Ok(path) = env::var("CALENDAR_OUTPUT_PATH") {
            config.calendar.output_path = PathBuf::from(path);
        }
        if let Ok(name) = env::var("CALENDAR_NAME") {
            config.calendar.name = Some(name);
        }
        if let Ok(mins) = env::var("EVENT_DURATION_MINS").map_or(Ok(None), |m| m.parse::<i64>().map(Some)) {
            if let Some(mins) = mins {
                config.calendar.event_duration_mins = mins;
            }
        }
        if let Ok(tz) = env::var("FIXTURE_TIMEZONE").map_or(Ok(None), |t| t.parse::<Tz>().map(Some)) {
            if let Some(tz) = tz {
                config.calendar.timezone = tz;
            }
        }
        if let Ok(links) = env::var("CALENDAR_INFO_LINKS") {
            config.calendar.info_links = links
                .split('|')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Ok(user_agent) = env::var("GENERATOR_USER_AGENT") {
            config.http.user_agent = user_agent;
        }
        if let Ok(timeout) = env::var("GENERATOR_TIMEOUT_SECS").map_or(Ok(None), |t| t.parse::<u64>().map(Some)) {
            if let Some(timeout) = timeout {
                config.http.request_timeout_secs = timeout;
            }
        }

        config
    }

    pub fn calendar_name(&self) -> String {
        self.calendar
            .name
            .clone()
            .unwrap_or_else(|| format!("{} Fixtures", self.api.team_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.calendar.event_duration_mins, 120);
        assert_eq!(config.calendar.timezone, chrono_tz::Europe::London);
        assert_eq!(
            config.calendar_name(),
            "Poole Town FC Wessex U18 Colts Fixtures"
        );
    }

    #[test]
    fn test_calendar_name_override() {
        let mut config = GeneratorConfig::default();
        config.calendar.name = Some("U18 Colts".to_string());
        assert_eq!(config.calendar_name(), "U18 Colts");
    }
}
