use std::sync::Arc;
use tracing::info;
use warp::{Rejection, Reply};

use crate::llm::LlmService;
use crate::models::{AgentSuggestion, InstructionInput, ParsedIntent};

pub async fn handle_suggest_agent(
    input: InstructionInput,
    service: Arc<LlmService>,
) -> Result<impl Reply, Rejection> {
    info!("Agent suggestion request from user {}", input.user_id);

    let parsed = service
        .parse_instruction(&input.instruction, input.context.as_ref())
        .await;
    let suggestions = suggestions_for(&parsed.value);

    Ok(warp::reply::json(&suggestions))
}

// Producer order is the ranking; a single match is returned today.
fn suggestions_for(intent: &ParsedIntent) -> Vec<AgentSuggestion> {
    let role = match intent.suggested_agent.as_deref() {
        Some(role) => role,
        None => return vec![],
    };

    let (agent_name, reasoning) = match role {
        "email_assistant" => (
            "Email Assistant",
            "La instrucción requiere operaciones de email y el agente está especializado en comunicación por correo",
        ),
        "scheduler" => (
            "Scheduler",
            "La instrucción requiere gestionar el calendario y el agente está especializado en agendar reuniones",
        ),
        "crm_manager" => (
            "CRM Manager",
            "La instrucción requiere gestionar contactos y el agente está especializado en el CRM",
        ),
        other => (other, "Agente sugerido por el análisis de la instrucción"),
    };

    vec![AgentSuggestion {
        agent_id: role.to_string(),
        agent_name: agent_name.to_string(),
        agent_role: role.to_string(),
        confidence: intent.confidence,
        reasoning: reasoning.to_string(),
    }]
}
