pub mod cli;

use anyhow::{Context, Result};
use flightcrew_core::report::render_report;
use flightcrew_core::{FlightFinderTool, OfferCollection};
use flightcrew_store::{load_inquiry, AmadeusClient, Config};
use std::fs;
use std::path::PathBuf;
use tracing::info;

pub use cli::Args;

/// One search, one report. Returns the path the report was written to.
pub async fn run(args: Args, config: Config) -> Result<PathBuf> {
    let goal = match &args.goal {
        Some(goal) => goal.clone(),
        None => {
            let path = args.inquiry.clone().unwrap_or_else(|| config.report.inquiry_path.clone());
            load_inquiry(&path)?
        }
    };

    let offers = match &args.payload {
        Some(path) => {
            info!("Validating saved response {}", path.display());
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read payload {}", path.display()))?;
            OfferCollection::from_json_str(&raw)?
        }
        None => {
            let input = args
                .finder_input()
                .context("origin and start date are required for a live search")?;
            config.validate()?;

            let client = AmadeusClient::connect(&config.amadeus)
                .await
                .context("Failed to authenticate against Amadeus")?;
            FlightFinderTool::new(&client)
                .with_timestamp_policy(config.search.timestamp_policy)
                .run(&input)
                .await?
        }
    };

    let output = args.output.clone().unwrap_or_else(|| config.report.output_path.clone());
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&output, render_report(&goal, &offers))
        .with_context(|| format!("Failed to write report {}", output.display()))?;

    info!("Wrote report with {} offers to {}", offers.len(), output.display());
    Ok(output)
}
