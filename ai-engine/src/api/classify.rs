use std::sync::Arc;
use tracing::info;
use warp::{Rejection, Reply};

use crate::llm::LlmService;
use crate::models::{InstructionInput, IntentClassification, ParsedIntent};

pub async fn handle_classify_intent(
    input: InstructionInput,
    service: Arc<LlmService>,
) -> Result<impl Reply, Rejection> {
    info!("Classify request from user {}", input.user_id);

    let parsed = service
        .parse_instruction(&input.instruction, input.context.as_ref())
        .await;
    let classification = classification_for(&parsed.value, &input.instruction);

    Ok(warp::reply::json(&classification))
}

fn classification_for(intent: &ParsedIntent, instruction: &str) -> IntentClassification {
    let (category, subcategory) = match intent.action.as_str() {
        "email_operation" => ("communication", "email"),
        "calendar_operation" => ("scheduling", "calendar"),
        "crm_operation" => ("sales", "crm"),
        _ => ("general", "unknown"),
    };

    IntentClassification {
        category: category.to_string(),
        subcategory: subcategory.to_string(),
        complexity: complexity_band(instruction).to_string(),
        confidence: intent.confidence,
    }
}

fn complexity_band(instruction: &str) -> &'static str {
    let words = instruction.split_whitespace().count();
    if words < 8 {
        "low"
    } else if words <= 20 {
        "medium"
    } else {
        "high"
    }
}
