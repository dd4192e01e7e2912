use chrono::{DateTime, TimeZone, Utc};
use icalendar::parser::{read_calendar, unfold};
use icalendar::{CalendarDateTime, DatePerhapsTime};
use pretty_assertions::assert_eq;
use std::fs;

use fulltime_fixture_calendar::config::GeneratorConfig;
use fulltime_fixture_calendar::error::{GeneratorError, GeneratorResult};
use fulltime_fixture_calendar::fetch::FixtureSource;
use fulltime_fixture_calendar::generator::CalendarGenerator;
use fulltime_fixture_calendar::types::FixtureRecord;

const FIXTURES_JSON: &str = include_str!("fixtures/fixtures_response.json");
const RESULTS_JSON: &str = include_str!("fixtures/results_response.json");
const EMPTY_JSON: &str = "[]";

/// Feed stub serving canned payloads, like the production client but
/// without the network.
struct StubSource {
    fixtures: &'static str,
    results: &'static str,
}

impl FixtureSource for StubSource {
    async fn fetch_fixtures(&self) -> GeneratorResult<Vec<FixtureRecord>> {
        serde_json::from_str(self.fixtures)
            .map_err(|e| GeneratorError::MalformedFeed(e.to_string()))
    }

    async fn fetch_results(&self) -> GeneratorResult<Vec<FixtureRecord>> {
        serde_json::from_str(self.results)
            .map_err(|e| GeneratorError::MalformedFeed(e.to_string()))
    }
}

fn config_with_output(dir: &tempfile::TempDir) -> GeneratorConfig {
    let mut config = GeneratorConfig::default();
    config.calendar.output_path = dir.path().join("fixtures.ics");
    config
}

#[derive(Debug, PartialEq)]
struct ParsedEvent {
    summary: String,
    start: DateTime<Utc>,
    location: Option<String>,
}

fn parse_events(ics: &str) -> Vec<ParsedEvent> {
    let unfolded = unfold(ics);
    let calendar = read_calendar(&unfolded).expect("generated ICS should parse");
    calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .map(|vevent| {
            let summary = vevent.find_prop("SUMMARY").expect("SUMMARY").val.to_string();
            let location = vevent.find_prop("LOCATION").map(|p| p.val.to_string());
            let start = match DatePerhapsTime::try_from(vevent.find_prop("DTSTART").expect("DTSTART"))
                .expect("DTSTART should be a datetime")
            {
                DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt)) => dt,
                other => panic!("expected UTC datetime, got {:?}", other),
            };
            ParsedEvent {
                summary,
                start,
                location,
            }
        })
        .collect()
}

#[tokio::test]
async fn test_round_trip_titles_starts_and_locations() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with_output(&dir);
    let generator = CalendarGenerator::new(
        StubSource {
            fixtures: FIXTURES_JSON,
            results: RESULTS_JSON,
        },
        config.clone(),
    );

    let summary = generator.run().await.unwrap();
    assert_eq!(summary.events_written, 3);

    let rendered = fs::read_to_string(&config.calendar.output_path).unwrap();
    let events = parse_events(&rendered);

    // Sorted by kickoff, not feed order; scores injected from the matching
    // result record despite team-name noise in the results feed.
    assert_eq!(
        events,
        vec![
            ParsedEvent {
                summary: "Poole Town FC Wessex U18 Colts 3–1 Bournemouth Sports U18".to_string(),
                start: Utc.with_ymd_and_hms(2024, 10, 12, 13, 0, 0).unwrap(),
                location: Some("Branksome Rec".to_string()),
            },
            ParsedEvent {
                summary: "Away vs Wimborne Town U18s (Division One)".to_string(),
                start: Utc.with_ymd_and_hms(2024, 12, 7, 10, 30, 0).unwrap(),
                location: Some("Wimborne Town U18s Home Ground".to_string()),
            },
            ParsedEvent {
                summary: "Home vs Hamworthy United U18 (Division One)".to_string(),
                start: Utc.with_ymd_and_hms(2025, 9, 7, 13, 0, 0).unwrap(),
                location: Some("Poole Town Stadium".to_string()),
            },
        ]
    );
}

#[tokio::test]
async fn test_rerun_with_identical_input_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with_output(&dir);

    let generator = CalendarGenerator::new(
        StubSource {
            fixtures: FIXTURES_JSON,
            results: RESULTS_JSON,
        },
        config.clone(),
    );

    generator.run().await.unwrap();
    let first = fs::read(&config.calendar.output_path).unwrap();
    generator.run().await.unwrap();
    let second = fs::read(&config.calendar.output_path).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_empty_feed_produces_valid_empty_calendar() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with_output(&dir);
    let generator = CalendarGenerator::new(
        StubSource {
            fixtures: EMPTY_JSON,
            results: EMPTY_JSON,
        },
        config.clone(),
    );

    let summary = generator.run().await.unwrap();
    assert_eq!(summary.events_written, 0);

    let rendered = fs::read_to_string(&config.calendar.output_path).unwrap();
    assert!(rendered.starts_with("BEGIN:VCALENDAR"));
    assert!(rendered.trim_end().ends_with("END:VCALENDAR"));
    assert!(parse_events(&rendered).is_empty());
}

#[tokio::test]
async fn test_missing_kickoff_fails_without_writing_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with_output(&dir);
    let generator = CalendarGenerator::new(
        StubSource {
            fixtures: r#"[{"homeTeam": "Poole Town FC Wessex U18 Colts",
                           "awayTeam": "Hamworthy United U18"}]"#,
            results: EMPTY_JSON,
        },
        config.clone(),
    );

    let err = generator.run().await.unwrap_err();
    assert!(matches!(
        err,
        GeneratorError::MissingField {
            field: "fixtureDateTime",
            ..
        }
    ));
    assert!(!config.calendar.output_path.exists());
}

#[tokio::test]
async fn test_failed_run_leaves_previous_artifact_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with_output(&dir);

    let good = CalendarGenerator::new(
        StubSource {
            fixtures: FIXTURES_JSON,
            results: RESULTS_JSON,
        },
        config.clone(),
    );
    good.run().await.unwrap();
    let before = fs::read(&config.calendar.output_path).unwrap();

    let bad = CalendarGenerator::new(
        StubSource {
            fixtures: r#"[{"fixtureDateTime": "whenever",
                           "homeTeam": "Poole Town FC Wessex U18 Colts",
                           "awayTeam": "Hamworthy United U18"}]"#,
            results: EMPTY_JSON,
        },
        config.clone(),
    );
    assert!(bad.run().await.is_err());

    let after = fs::read(&config.calendar.output_path).unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_malformed_feed_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with_output(&dir);
    let generator = CalendarGenerator::new(
        StubSource {
            fixtures: r#"{"error": "not an array"}"#,
            results: EMPTY_JSON,
        },
        config.clone(),
    );

    let err = generator.run().await.unwrap_err();
    assert!(matches!(err, GeneratorError::MalformedFeed(_)));
    assert!(!config.calendar.output_path.exists());
}
