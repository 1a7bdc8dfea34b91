use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

// API Request/Response models

#[derive(Debug, Clone, Deserialize)]
pub struct InstructionInput {
    pub instruction: String,
    pub user_id: String,
    #[serde(default)]
    pub agent_id: Option<String>,
    #[serde(default)]
    pub context: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedIntent {
    pub action: String,
    #[serde(default)]
    pub entities: Map<String, Value>,
    pub confidence: f64,
    #[serde(default)]
    pub capabilities_required: Vec<String>,
    // Providers are prompted to answer with "suggested_agent_role".
    #[serde(default, alias = "suggested_agent_role")]
    pub suggested_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionStep {
    pub step_index: u32,
    pub step_name: String,
    // Free text by contract: data_retrieval, data_transform, api_call, condition, approval
    pub step_type: String,
    pub action: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    // Advisory only; existence and acyclicity are not checked.
    #[serde(default)]
    pub dependencies: Vec<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionPlan {
    pub task_id: Uuid,
    pub steps: Vec<ExecutionStep>,
    pub total_steps: u32,
    pub estimated_duration_ms: u64,
    pub requires_approval: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentSuggestion {
    pub agent_id: String,
    pub agent_name: String,
    pub agent_role: String,
    pub confidence: f64,
    pub reasoning: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct IntentClassification {
    pub category: String,
    pub subcategory: String,
    pub complexity: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractedEntities {
    pub dates: Vec<String>,
    pub emails: Vec<String>,
    pub names: Vec<String>,
    pub locations: Vec<String>,
    pub organizations: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct EntityExtractionResponse {
    pub entities: ExtractedEntities,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub openai_configured: bool,
    pub anthropic_configured: bool,
}
