use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::path::PathBuf;
use tracing::info;

use fulltime_fixture_calendar::config::GeneratorConfig;
use fulltime_fixture_calendar::fetch::FullTimeClient;
use fulltime_fixture_calendar::generator::CalendarGenerator;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch fixtures and rewrite the calendar file
    Generate {
        /// Override the output path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Fetch fixtures and print the mapped events without writing anything
    Preview {
        /// Limit the number of events printed
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = GeneratorConfig::from_env();

    match cli.command {
        Commands::Generate { output } => {
            if let Some(output) = output {
                config.calendar.output_path = output;
            }
            let client = FullTimeClient::new(&config)?;
            let generator = CalendarGenerator::new(client, config);
            let summary = generator.run().await?;
            info!(
                "Calendar regenerated: {} events, {} bytes",
                summary.events_written, summary.bytes_written
            );
        }
        Commands::Preview { limit } => {
            let client = FullTimeClient::new(&config)?;
            let generator = CalendarGenerator::new(client, config);
            let events = generator.preview().await?;
            let shown = limit.unwrap_or(events.len()).min(events.len());
            for event in events.iter().take(shown) {
                println!(
                    "{}  {}  [{}]",
                    event.start_utc.format("%Y-%m-%d %H:%M UTC"),
                    event.title,
                    event.location.as_deref().unwrap_or("-")
                );
            }
            if shown < events.len() {
                println!("... and {} more", events.len() - shown);
            }
        }
    }

    Ok(())
}
