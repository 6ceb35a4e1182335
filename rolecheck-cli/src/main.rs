use anyhow::{Context, Result};
use clap::Parser;
use secrecy::ExposeSecret;
use tracing_subscriber::EnvFilter;

use rolecheck::{OpenAiClient, RunAggregator};
use rolecheck_cli::{discover_documents, write_report, Args, ConsoleObserver};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let api_key = args.api_key()?;
    let documents = discover_documents(&args.input)?;
    tracing::info!(documents = documents.len(), input = %args.input.display(), "documents loaded");

    let client = OpenAiClient::with_base_url(
        api_key.expose_secret().as_str(),
        &args.base_url,
        args.timeout(),
    )
    .context("building OpenAI client")?
    .with_model(args.model.clone());

    let aggregator = RunAggregator::new(client, args.classifier_config())
        .context("invalid classifier configuration")?;
    let observer = ConsoleObserver::stdout();
    let report = aggregator.run_with_observer(documents, &observer).await;

    write_report(&report, &args.output)?;
    println!("\nSaved: {}", args.output.display());
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
