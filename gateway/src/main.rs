mod api;
mod routes;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{error, info};

use vencorpia_core::config::Settings;
use vencorpia_core::flows::{DecorFlow, DemandFlow, MenuFlow};
use vencorpia_core::llm::{ImageGenerator, ModelClient, PromptExecutor};
use vencorpia_core::registry::Registry;

use crate::routes::{router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Settings warnings go to a temporary subscriber until the level is known.
    let settings = tracing::subscriber::with_default(
        tracing_subscriber::fmt().with_target(false).compact().finish(),
        Settings::from_env,
    )?;

    tracing_subscriber::fmt()
        .with_max_level(settings.log_level)
        .with_target(false)
        .compact()
        .init();

    info!("Vencorpia Gateway Initializing...");

    let client = Arc::new(ModelClient::new(&settings)?);
    // Connectivity check only; the gateway still starts if it fails.
    match client.say_hello().await {
        Ok(msg) => info!("Model Status: {}", msg),
        Err(e) => error!("Model is configured but unresponsive: {}", e),
    }

    let executor: Arc<dyn PromptExecutor> = client.clone();
    let images: Option<Arc<dyn ImageGenerator>> = if settings.images_enabled {
        Some(client as Arc<dyn ImageGenerator>)
    } else {
        info!("Image generation disabled; decor results will carry no visual aids.");
        None
    };

    let registry = Arc::new(Registry::load());
    info!("Loaded {} tools.", registry.len());

    let state = AppState {
        menu: Arc::new(MenuFlow::new(executor.clone())),
        decor: Arc::new(DecorFlow::new(executor.clone(), images)),
        demand: Arc::new(DemandFlow::new(executor)),
        registry,
    };

    let listener = TcpListener::bind(&settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_addr))?;
    info!("Gateway listening on {}...", settings.bind_addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
