use clap::Parser;
use course_compass::adapters::{AgentEnricher, SerperClient, SqliteStore};
use course_compass::server::{run_server, AppState};
use course_compass::utils::{logger, validation::Validate};
use course_compass::{CliConfig, DiscoverService};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_logger(config.verbose);

    tracing::info!("Starting course-compass");
    if config.verbose {
        tracing::debug!(bind = %config.bind, model = %config.llm_model, db = %config.database_url, "configuration");
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let search = SerperClient::new(config.serper_api_url.clone(), config.serper_api_key.clone());
    let enricher = AgentEnricher::new(
        config.llm_api_url.clone(),
        config.llm_api_key.clone(),
        config.llm_model.clone(),
        search.clone(),
    );
    let store = SqliteStore::connect(&config.database_url).await?;

    let compass = DiscoverService::new(enricher, search, store);
    let state = AppState {
        compass: Arc::new(compass),
    };

    run_server(state, &config.bind).await?;
    Ok(())
}
