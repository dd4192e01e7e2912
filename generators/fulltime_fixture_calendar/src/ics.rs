use icalendar::{Calendar, Component, Event, EventLike};

use crate::config::GeneratorConfig;
use crate::types::FixtureEvent;

const PRODID: &str = "-//FullTime Fixture Calendar//EN";
const ICS_UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Build a calendar with one VEVENT per fixture event.
pub fn build_calendar(events: &[FixtureEvent], config: &GeneratorConfig) -> Calendar {
    let mut calendar = Calendar::new();
    calendar.name(&config.calendar_name());

    for event in events {
        calendar.push(vevent(event));
    }

    calendar.done()
}

fn vevent(event: &FixtureEvent) -> Event {
    let mut vevent = Event::new();
    vevent
        .uid(&event.uid)
        .summary(&event.title)
        .description(&event.description)
        .starts(event.start_utc)
        .ends(event.end_utc)
        // DTSTAMP derived from the kickoff, not the wall clock, so that
        // identical input renders byte-identical output
        .add_property("DTSTAMP", event.start_utc.format(ICS_UTC_FORMAT).to_string());

    if let Some(ref location) = event.location {
        vevent.location(location);
    }

    vevent.done()
}

/// Render a calendar to its final on-disk form: our PRODID instead of the
/// icalendar crate's, METHOD:PUBLISH for subscription feeds, CRLF endings.
pub fn render(calendar: &Calendar) -> String {
    let mut output = String::new();
    for line in calendar.to_string().lines() {
        if line.starts_with("PRODID:") {
            output.push_str("PRODID:");
            output.push_str(PRODID);
            output.push_str("\r\n");
            output.push_str("METHOD:PUBLISH\r\n");
            continue;
        }
        output.push_str(line);
        output.push_str("\r\n");
    }
    output
}
