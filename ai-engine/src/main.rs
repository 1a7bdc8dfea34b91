use std::sync::Arc;
use tracing::info;
use warp::Filter;

mod api;
mod config;
mod error;
mod llm;
mod middleware;
mod models;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .json()
        .init();

    info!("Starting AI Engine");

    // Load configuration
    let config = config::Config::from_env()?;
    info!("Configuration loaded");

    // Provider clients are built once here and shared by every request
    let service = Arc::new(llm::LlmService::new(&config));
    info!(
        "Model providers: openai={} anthropic={}",
        service.openai_configured(),
        service.anthropic_configured()
    );

    // Build API routes
    let routes = api::routes(service)
        .recover(error::handle_rejection)
        .with(warp::log("api"))
        .with(middleware::cors());

    // Start server
    let addr = ([0, 0, 0, 0], config.port);
    info!("Server listening on {}", config.port);

    let (_, server) = warp::serve(routes).bind_with_graceful_shutdown(addr, async {
        let _ = tokio::signal::ctrl_c().await;
    });
    server.await;

    info!("AI Engine shutting down");

    Ok(())
}
