pub mod auth;
pub mod challenge;
pub mod chat;
pub mod completions;
pub mod config;
pub mod session;

use std::sync::Arc;

use ecocoach_core::{ChatCompletionsGateway, Config, EcoService};

/// Load config and wire a service backed by the HTTP coach gateway.
pub fn build_service() -> Result<Arc<EcoService>, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let gateway = ChatCompletionsGateway::from_config(&config.coach)?;
    Ok(Arc::new(EcoService::new(&config, Arc::new(gateway))?))
}
