use std::sync::Arc;
use tracing::info;
use warp::{Rejection, Reply};

use crate::llm::LlmService;
use crate::models::InstructionInput;

pub async fn handle_generate_plan(
    input: InstructionInput,
    service: Arc<LlmService>,
) -> Result<impl Reply, Rejection> {
    info!("Plan request from user {}", input.user_id);

    let parsed = service
        .parse_instruction(&input.instruction, input.context.as_ref())
        .await;
    let plan = service
        .generate_execution_plan(
            &input.instruction,
            &parsed.value,
            &parsed.value.capabilities_required,
        )
        .await;

    info!(
        "Plan {} generated with {} steps",
        plan.value.task_id,
        plan.value.steps.len()
    );

    Ok(warp::reply::json(&plan.value))
}
