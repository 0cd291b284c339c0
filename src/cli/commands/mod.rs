pub mod heroes;
pub mod search;

use super::app::Commands;
use crate::api::{Hero, HeroService, ResultStream};
use anyhow::Result;
use std::time::Duration;

/// Run one command. Returns whether every remote call it made succeeded.
pub async fn run(
    command: Commands,
    service: &HeroService,
    results: ResultStream<Hero>,
    settle_wait: Duration,
) -> Result<bool> {
    match command {
        Commands::List => heroes::handle_list(service).await,
        Commands::Get { id } => heroes::handle_get(service, id).await,
        Commands::Create { name } => heroes::handle_create(service, name).await,
        Commands::Update { id, name } => heroes::handle_update(service, id, name).await,
        Commands::Delete { id } => heroes::handle_delete(service, id).await,
        Commands::Search(_) => search::handle_search(service, results, settle_wait).await,
    }
}
