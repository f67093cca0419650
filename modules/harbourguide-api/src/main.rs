use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ai_client::{CompletionAgent, OpenAi};
use harbourguide_api::{router, AppState};
use harbourguide_catalog::{Catalog, DatasetPayloads, Gazetteer};
use harbourguide_common::Config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("harbourguide=info".parse()?))
        .init();

    let config = Config::from_env()?;

    // A malformed dataset aborts startup.
    let payloads = DatasetPayloads::read_dir(&config.data_dir)?;
    let catalog = Catalog::build(&payloads)?;
    info!(places = catalog.len(), "Catalog ready");

    let gazetteer = match &config.gazetteer_path {
        Some(path) => Gazetteer::from_file(path)?,
        None => Gazetteer::hong_kong(),
    };
    info!(aliases = gazetteer.len(), "Gazetteer ready");

    let assistant: Option<Arc<dyn CompletionAgent>> = match &config.deepseek_api_key {
        Some(key) => Some(Arc::new(
            OpenAi::new(key.clone(), config.ai_model.clone())
                .with_base_url(config.ai_base_url.clone())
                .with_max_tokens(config.ai_max_tokens),
        )),
        None => {
            warn!("DEEPSEEK_API_KEY not set; chat replies will use the canned itinerary");
            None
        }
    };

    let state = Arc::new(AppState {
        catalog,
        gazetteer,
        assistant,
    });

    let app = router(state);

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("HarbourGuide API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
