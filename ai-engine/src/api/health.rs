use std::sync::Arc;
use warp::{Rejection, Reply};

use crate::llm::LlmService;
use crate::models::HealthResponse;

pub async fn handle_root() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&serde_json::json!({
        "service": "AI Engine",
        "status": "operational",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

pub async fn handle_health(service: Arc<LlmService>) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&HealthResponse {
        status: "healthy",
        openai_configured: service.openai_configured(),
        anthropic_configured: service.anthropic_configured(),
    }))
}
