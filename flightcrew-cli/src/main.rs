use clap::Parser;
use flightcrew_cli::{run, Args};
use flightcrew_store::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "flightcrew_cli=debug,flightcrew_core=debug,flightcrew_store=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = Config::load_from(&args.config_dir)?;
    tracing::info!("Starting flight search (base url {})", config.amadeus.base_url());

    let report = run(args, config).await?;
    tracing::info!("Report ready at {}", report.display());
    Ok(())
}
