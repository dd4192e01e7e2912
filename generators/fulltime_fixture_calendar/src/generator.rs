use std::fs;

use tracing::{info, warn};

use crate::config::GeneratorConfig;
use crate::error::GeneratorResult;
use crate::events::build_events;
use crate::fetch::FixtureSource;
use crate::ics::{build_calendar, render};
use crate::types::FixtureEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub events_written: usize,
    pub bytes_written: usize,
}

/// Runs the fetch -> map -> serialize -> write pipeline once.
pub struct CalendarGenerator<S: FixtureSource> {
    source: S,
    config: GeneratorConfig,
}

impl<S: FixtureSource> CalendarGenerator<S> {
    pub fn new(source: S, config: GeneratorConfig) -> Self {
        Self { source, config }
    }

    /// Fetch and map events without touching the output file.
    pub async fn preview(&self) -> GeneratorResult<Vec<FixtureEvent>> {
        let fixtures = self.source.fetch_fixtures().await?;
        let results = self.source.fetch_results().await?;
        info!(
            "Fetched {} fixtures and {} results for {}",
            fixtures.len(),
            results.len(),
            self.config.api.team_name
        );
        build_events(&fixtures, &results, &self.config)
    }

    /// Regenerate the calendar file, overwriting it wholesale. The document
    /// is fully rendered before the single write, so a failed run leaves
    /// the previous artifact in place.
    pub async fn run(&self) -> GeneratorResult<GenerationSummary> {
        let events = self.preview().await?;
        let calendar = build_calendar(&events, &self.config);
        let rendered = render(&calendar);

        fs::write(&self.config.calendar.output_path, rendered.as_bytes())?;
        info!(
            "Wrote {} with {} events",
            self.config.calendar.output_path.display(),
            events.len()
        );
        if events.is_empty() {
            warn!("0 events written - check the feed payload and team name");
        }

        Ok(GenerationSummary {
            events_written: events.len(),
            bytes_written: rendered.len(),
        })
    }
}
