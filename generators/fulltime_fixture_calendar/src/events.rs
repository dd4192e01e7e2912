use std::collections::HashMap;

use chrono::{Duration, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::GeneratorConfig;
use crate::error::{GeneratorError, GeneratorResult};
use crate::types::{FixtureEvent, FixtureRecord};
use crate::utils::{event_uid, parse_fixture_date, parse_kickoff, result_key};

struct Scoreline {
    home: String,
    away: String,
}

/// Map fixture records to calendar events, injecting scores from matching
/// result records. Events come back sorted by kickoff so the output does
/// not depend on feed ordering.
pub fn build_events(
    fixtures: &[FixtureRecord],
    results: &[FixtureRecord],
    config: &GeneratorConfig,
) -> GeneratorResult<Vec<FixtureEvent>> {
    if config.calendar.event_duration_mins <= 0 {
        return Err(GeneratorError::Config(format!(
            "event_duration_mins must be positive, got {}",
            config.calendar.event_duration_mins
        )));
    }
    let duration = Duration::minutes(config.calendar.event_duration_mins);
    let scores = collect_scores(results);
    let team_needle = config.api.team_name.to_lowercase();

    let mut events = Vec::with_capacity(fixtures.len());
    for fixture in fixtures {
        let context = fixture_context(fixture);

        let home = required_field(fixture.home_team.as_deref(), "homeTeam", &context)?;
        let away = required_field(fixture.away_team.as_deref(), "awayTeam", &context)?;
        let raw_kickoff =
            required_field(fixture.fixture_date_time.as_deref(), "fixtureDateTime", &context)?;

        let kickoff = parse_kickoff(raw_kickoff, config.calendar.timezone)?;
        let start_utc = kickoff.with_timezone(&Utc);
        let end_utc = start_utc + duration;

        let division = fixture
            .division
            .as_deref()
            .or(fixture.competition.as_deref())
            .map(str::trim)
            .unwrap_or("");
        let venue = fixture
            .location
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let us_home = home.to_lowercase().contains(&team_needle);
        let opponent = if us_home { away } else { home };
        let score = scores.get(&result_key(kickoff.date_naive(), home, away));

        let title = match score {
            Some(score) => {
                if us_home {
                    format!("{} {}–{} {}", config.api.team_name, score.home, score.away, opponent)
                } else {
                    format!("{} {}–{} {}", opponent, score.home, score.away, config.api.team_name)
                }
            }
            None => {
                let prefix = if us_home { "Home vs" } else { "Away vs" };
                if division.is_empty() {
                    format!("{} {}", prefix, opponent)
                } else {
                    format!("{} {} ({})", prefix, opponent, division)
                }
            }
        };

        let mut lines = vec![format!("{} vs {}", home, away)];
        if !division.is_empty() {
            lines.push(format!("Division: {}", division));
        }
        if let Some(venue) = venue {
            lines.push(format!("Venue: {}", venue));
        }
        if let Some(score) = score {
            lines.push(format!("Result: {} {}–{} {}", home, score.home, score.away, away));
        }
        lines.extend(config.calendar.info_links.iter().cloned());
        // ICS newline escapes, one description line per entry
        let description = lines.join("\\n");

        events.push(FixtureEvent {
            uid: event_uid(kickoff.date_naive(), home, away, division),
            title,
            start_utc,
            end_utc,
            location: Some(
                venue
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{} Home Ground", home)),
            ),
            description,
        });
    }

    events.sort_by(|a, b| (a.start_utc, &a.uid).cmp(&(b.start_utc, &b.uid)));
    debug!("Mapped {} fixtures to events", events.len());
    Ok(events)
}

fn required_field<'a>(
    value: Option<&'a str>,
    field: &'static str,
    context: &str,
) -> GeneratorResult<&'a str> {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        Some(v) => Ok(v),
        None => Err(GeneratorError::MissingField {
            context: context.to_string(),
            field,
        }),
    }
}

fn fixture_context(fixture: &FixtureRecord) -> String {
    format!(
        "{} vs {} on {}",
        fixture.home_team.as_deref().unwrap_or("?"),
        fixture.away_team.as_deref().unwrap_or("?"),
        fixture.fixture_date_time.as_deref().unwrap_or("unknown date")
    )
}

/// Index result records by date and teams. Records without both scores are
/// unplayed fixtures echoed by the results endpoint and are skipped.
fn collect_scores(results: &[FixtureRecord]) -> HashMap<String, Scoreline> {
    let mut scores = HashMap::new();
    for record in results {
        let home = match record.home_team.as_deref() {
            Some(h) => h,
            None => continue,
        };
        let away = match record.away_team.as_deref() {
            Some(a) => a,
            None => continue,
        };
        let raw_date = match record.fixture_date_time.as_deref() {
            Some(d) => d,
            None => continue,
        };
        let date = match parse_fixture_date(raw_date) {
            Some(d) => d,
            None => {
                warn!("Skipping result with unparseable date: {}", raw_date);
                continue;
            }
        };
        let (home_score, away_score) = match (
            record.home_score.as_ref().and_then(score_text),
            record.away_score.as_ref().and_then(score_text),
        ) {
            (Some(h), Some(a)) => (h, a),
            _ => continue,
        };

        scores.insert(
            result_key(date, home, away),
            Scoreline {
                home: home_score,
                away: away_score,
            },
        );
    }
    scores
}

fn score_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
