use chrono::DateTime;
use clap::Parser;
use flightcrew_core::{DateInput, FlightFinderInput};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "flightcrew")]
#[command(about = "Search flight offers and write a markdown report")]
#[command(version)]
pub struct Args {
    /// Origin airport code (IATA)
    #[arg(short, long, required_unless_present = "payload")]
    pub origin: Option<String>,

    /// Destination airport code; omit to search anywhere
    #[arg(short, long)]
    pub destination: Option<String>,

    /// Earliest travel date, e.g. 2025-06-01 or an RFC 3339 timestamp
    #[arg(short, long, required_unless_present = "payload")]
    pub start_date: Option<String>,

    /// Latest travel date (accepted, not sent to the backend)
    #[arg(short, long)]
    pub end_date: Option<String>,

    /// Number of adult passengers
    #[arg(short, long)]
    pub adults: Option<u32>,

    /// Goal text for the report; overrides the inquiry file
    #[arg(short, long)]
    pub goal: Option<String>,

    /// Inquiry file to read the goal from
    #[arg(long)]
    pub inquiry: Option<PathBuf>,

    /// Where to write the markdown report
    #[arg(long = "output")]
    pub output: Option<PathBuf>,

    /// Validate and render a saved backend response instead of calling the API
    #[arg(long)]
    pub payload: Option<PathBuf>,

    /// Directory holding default/{RUN_MODE}/local config files
    #[arg(long, default_value = "config")]
    pub config_dir: PathBuf,
}

impl Args {
    /// Tool input for a live search, or `None` in payload mode.
    pub fn finder_input(&self) -> Option<FlightFinderInput> {
        let origin = self.origin.as_ref()?;
        let start = self.start_date.as_deref()?;

        let mut input = FlightFinderInput::new(parse_date(start), origin.clone());
        input.end_date = self.end_date.as_deref().map(parse_date);
        input.destination = self.destination.clone();
        input.adults = self.adults;
        Some(input)
    }
}

/// Full timestamps become structured dates; anything else is forwarded as text.
pub fn parse_date(raw: &str) -> DateInput {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => DateInput::Timestamp(ts),
        Err(_) => DateInput::Text(raw.to_string()),
    }
}
