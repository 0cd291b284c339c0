use anyhow::Result;
use clap::Parser;
use hero_query::api::{HeroService, HttpTransport, MessageLog};
use hero_query::cli::commands::search::SearchArgs;
use hero_query::cli::{self, Cli, Commands};
use hero_query::config::Config;
use log::{debug, info};
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger to file (truncate on each run)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("hero-query.log")?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let cli = Cli::parse();
    info!("Starting hero-query");

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Commands::Search(SearchArgs {
        debounce_ms: Some(debounce_ms),
    }) = &cli.command
    {
        config.search.debounce_ms = *debounce_ms;
    }
    debug!("Using heroes API at {}", config.api.base_url);

    let transport = Arc::new(HttpTransport::new(&config.api)?);
    let messages = MessageLog::new();
    let (service, results) = HeroService::new(transport, messages.clone(), &config);

    // Upper bound on waiting for the last search term's lookup to come back
    let settle_wait = service.search_window() + Duration::from_secs(config.api.timeout_secs);
    let succeeded = cli::commands::run(cli.command, &service, results, settle_wait).await?;

    cli::print_messages(&messages);

    if !succeeded {
        std::process::exit(1);
    }
    Ok(())
}
