use std::sync::Arc;
use tracing::info;
use warp::{Rejection, Reply};

use crate::llm::LlmService;
use crate::models::InstructionInput;

pub async fn handle_parse_instruction(
    input: InstructionInput,
    service: Arc<LlmService>,
) -> Result<impl Reply, Rejection> {
    info!("Parse request from user {}", input.user_id);

    let parsed = service
        .parse_instruction(&input.instruction, input.context.as_ref())
        .await;

    let clarifications = service.suggest_clarifications(&parsed.value);
    if !clarifications.is_empty() {
        info!(
            "Instruction is ambiguous, {} clarifying questions suggested",
            clarifications.len()
        );
    }

    Ok(warp::reply::json(&parsed.value))
}
