use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use regex::Regex;
use uuid::Uuid;

use crate::error::{GeneratorError, GeneratorResult};

/// Kickoff formats seen in the feed: 2-digit and 4-digit years.
const KICKOFF_FORMATS: [&str; 2] = ["%d/%m/%y %H:%M", "%d/%m/%Y %H:%M"];
const DATE_ONLY_FORMATS: [&str; 2] = ["%d/%m/%y", "%d/%m/%Y"];

/// Parse a feed kickoff string as wall-clock time in `tz`.
pub fn parse_kickoff(raw: &str, tz: Tz) -> GeneratorResult<DateTime<Tz>> {
    let trimmed = raw.trim();
    let naive = KICKOFF_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| GeneratorError::Kickoff {
            value: raw.to_string(),
            reason: "expected dd/mm/yy HH:MM or dd/mm/yyyy HH:MM".to_string(),
        })?;

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        // Clocks going back: take the earlier instant
        LocalResult::Ambiguous(earlier, _) => Ok(earlier),
        LocalResult::None => Err(GeneratorError::Kickoff {
            value: raw.to_string(),
            reason: format!("wall-clock time does not exist in {}", tz),
        }),
    }
}

/// Extract the local date from a feed date string, with or without a time
/// component. Used for fixture/result matching, so no zone conversion.
pub fn parse_fixture_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    for fmt in KICKOFF_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }
    for fmt in DATE_ONLY_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(d);
        }
    }
    None
}

/// Collapse whitespace and lowercase. Used for UID seeds.
pub fn normalize_name(text: &str) -> String {
    Regex::new(r"\s+")
        .unwrap()
        .replace_all(text.trim(), " ")
        .to_lowercase()
}

/// Light normalisation to reduce fixture/result matching issues.
pub fn clean_team(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped = Regex::new(r"\b(fc|afc)\b").unwrap().replace_all(&lowered, "");
    let folded = stripped.replace("u18s", "u18");
    Regex::new(r"\s+")
        .unwrap()
        .replace_all(&folded, " ")
        .trim()
        .to_string()
}

/// Canonical key for matching a result record to a fixture.
pub fn result_key(date: NaiveDate, home: &str, away: &str) -> String {
    format!(
        "{}|{}|{}",
        date.format("%Y%m%d"),
        clean_team(home),
        clean_team(away)
    )
}

/// Stable event UID: UUIDv5 over local date, teams and division.
pub fn event_uid(date: NaiveDate, home: &str, away: &str, division: &str) -> String {
    let seed = format!(
        "{}-{}-{}-{}",
        date.format("%Y-%m-%d"),
        normalize_name(home),
        normalize_name(away),
        normalize_name(division)
    );
    Uuid::new_v5(&Uuid::NAMESPACE_DNS, seed.as_bytes()).to_string()
}
