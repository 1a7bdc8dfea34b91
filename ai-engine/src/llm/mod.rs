// Intent/Plan service: provider-backed parsing with a deterministic fallback.
//
// Every provider failure is swallowed here. Callers always get a usable
// result; the `Sourced` tag is the only place the degradation is visible.

pub mod fallback;
pub mod prompts;
pub mod provider;

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::models::{ExecutionPlan, ExecutionStep, ParsedIntent};
use provider::{AnthropicClient, LlmError, OpenAiClient};

const PARSE_TEMPERATURE: f32 = 0.3;
const PLAN_TEMPERATURE: f32 = 0.2;
const CLARIFICATION_THRESHOLD: f64 = 0.7;

/// Which path produced a service result. Never part of the wire schema;
/// callers and tests use it to tell degraded responses apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentSource {
    Provider,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct Sourced<T> {
    pub value: T,
    pub source: IntentSource,
}

impl<T> Sourced<T> {
    fn provider(value: T) -> Self {
        Self {
            value,
            source: IntentSource::Provider,
        }
    }

    fn fallback(value: T) -> Self {
        Self {
            value,
            source: IntentSource::Fallback,
        }
    }
}

/// Long-lived service handle. Provider clients are built once at startup
/// from the loaded configuration and shared by every request.
pub struct LlmService {
    openai: Option<OpenAiClient>,
    anthropic: Option<AnthropicClient>,
}

impl LlmService {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::new();

        let openai = config.openai_api_key.clone().map(|key| {
            OpenAiClient::new(client.clone(), key, config.openai_model.clone())
        });
        let anthropic = config.anthropic_api_key.clone().map(|key| {
            AnthropicClient::new(client.clone(), key, config.anthropic_model.clone())
        });

        Self { openai, anthropic }
    }

    pub fn openai_configured(&self) -> bool {
        self.openai.is_some()
    }

    pub fn anthropic_configured(&self) -> bool {
        self.anthropic.is_some()
    }

    pub async fn parse_instruction(
        &self,
        instruction: &str,
        context: Option<&Value>,
    ) -> Sourced<ParsedIntent> {
        info!("Parsing instruction: {}", instruction);

        match self.provider_parse(instruction, context).await {
            Ok(intent) => Sourced::provider(intent),
            Err(err) => {
                if !matches!(err, LlmError::NotConfigured) {
                    warn!("Provider parse failed, using rule-based fallback: {}", err);
                }
                Sourced::fallback(fallback::classify(instruction))
            }
        }
    }

    pub async fn generate_execution_plan(
        &self,
        instruction: &str,
        intent: &ParsedIntent,
        capabilities: &[String],
    ) -> Sourced<ExecutionPlan> {
        info!("Generating execution plan for action: {}", intent.action);

        match self.provider_plan(instruction, intent, capabilities).await {
            Ok(plan) => Sourced::provider(plan),
            Err(err) => {
                if !matches!(err, LlmError::NotConfigured) {
                    warn!("Provider plan failed, using fallback plan: {}", err);
                }
                Sourced::fallback(fallback::plan(intent))
            }
        }
    }

    /// Two fixed questions when the parse is uncertain, nothing otherwise.
    pub fn suggest_clarifications(&self, intent: &ParsedIntent) -> Vec<String> {
        if intent.confidence < CLARIFICATION_THRESHOLD {
            vec![
                "¿Puedes especificar más detalles sobre esta tarea?".to_string(),
                "¿Cuál es el resultado esperado?".to_string(),
            ]
        } else {
            vec![]
        }
    }

    async fn provider_parse(
        &self,
        instruction: &str,
        context: Option<&Value>,
    ) -> Result<ParsedIntent, LlmError> {
        let user_prompt = prompts::parse_user_prompt(instruction, context);
        let completion = self
            .complete(prompts::PARSE_SYSTEM_PROMPT, &user_prompt, PARSE_TEMPERATURE)
            .await?;

        Ok(serde_json::from_value(completion)?)
    }

    async fn provider_plan(
        &self,
        instruction: &str,
        intent: &ParsedIntent,
        capabilities: &[String],
    ) -> Result<ExecutionPlan, LlmError> {
        let user_prompt = prompts::plan_user_prompt(instruction, intent, capabilities);
        let completion = self
            .complete(prompts::PLAN_SYSTEM_PROMPT, &user_prompt, PLAN_TEMPERATURE)
            .await?;
        let draft: PlanDraft = serde_json::from_value(completion)?;

        Ok(draft.finalize())
    }

    // OpenAI wins when both vendors are configured; a failed call is not
    // retried against the other vendor. One attempt per request.
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
    ) -> Result<Value, LlmError> {
        if let Some(openai) = &self.openai {
            openai
                .complete_json(system_prompt, user_prompt, temperature)
                .await
        } else if let Some(anthropic) = &self.anthropic {
            anthropic
                .complete_json(system_prompt, user_prompt, temperature)
                .await
        } else {
            Err(LlmError::NotConfigured)
        }
    }
}

/// Plan shape as providers tend to emit it: steps plus optional totals.
/// Dependency indices are passed through unvalidated.
#[derive(Debug, Deserialize)]
struct PlanDraft {
    #[serde(default)]
    steps: Vec<ExecutionStep>,
    #[serde(default)]
    total_steps: Option<u32>,
    #[serde(default)]
    estimated_duration_ms: Option<u64>,
    #[serde(default)]
    requires_approval: bool,
}

impl PlanDraft {
    const DEFAULT_STEP_DURATION_MS: u64 = 2000;

    fn finalize(self) -> ExecutionPlan {
        let total_steps = self.total_steps.unwrap_or(self.steps.len() as u32);
        let estimated_duration_ms = self
            .estimated_duration_ms
            .unwrap_or(self.steps.len() as u64 * Self::DEFAULT_STEP_DURATION_MS);

        ExecutionPlan {
            task_id: Uuid::new_v4(),
            steps: self.steps,
            total_steps,
            estimated_duration_ms,
            requires_approval: self.requires_approval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unconfigured_service() -> LlmService {
        LlmService::new(&Config {
            port: 0,
            openai_api_key: None,
            anthropic_api_key: None,
            openai_model: "gpt-4".to_string(),
            anthropic_model: "claude-3-5-sonnet-20241022".to_string(),
        })
    }

    #[tokio::test]
    async fn parse_without_providers_uses_the_fallback() {
        let service = unconfigured_service();
        let parsed = service
            .parse_instruction("Por favor reagenda la reunión con Juan", None)
            .await;

        assert_eq!(parsed.source, IntentSource::Fallback);
        assert_eq!(parsed.value.action, "calendar_operation");
        assert_eq!(parsed.value.confidence, 0.6);
        assert_eq!(parsed.value.capabilities_required, vec!["calendar"]);
    }

    #[tokio::test]
    async fn plan_without_providers_uses_the_fallback() {
        let service = unconfigured_service();
        let parsed = service.parse_instruction("enviar correo a Juan", None).await;
        let plan = service
            .generate_execution_plan(
                "enviar correo a Juan",
                &parsed.value,
                &parsed.value.capabilities_required,
            )
            .await;

        assert_eq!(plan.source, IntentSource::Fallback);
        assert_eq!(plan.value.total_steps, 1);
        assert_eq!(plan.value.estimated_duration_ms, 3000);
        assert!(plan.value.requires_approval);
    }

    #[test]
    fn clarifications_trigger_below_the_threshold_only() {
        let service = unconfigured_service();
        let mut intent = fallback::classify("algo ambiguo");
        assert_eq!(intent.confidence, 0.3);

        let questions = service.suggest_clarifications(&intent);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0], "¿Puedes especificar más detalles sobre esta tarea?");
        assert_eq!(questions[1], "¿Cuál es el resultado esperado?");

        intent.confidence = 0.7;
        assert!(service.suggest_clarifications(&intent).is_empty());

        intent.confidence = 0.95;
        assert!(service.suggest_clarifications(&intent).is_empty());
    }

    #[test]
    fn plan_draft_fills_totals_from_the_step_list() {
        let draft: PlanDraft = serde_json::from_value(json!({
            "steps": [
                {
                    "step_index": 0,
                    "step_name": "Fetch template",
                    "step_type": "data_retrieval",
                    "action": "get_template",
                    "parameters": {"template_id": "meeting_followup"}
                },
                {
                    "step_index": 1,
                    "step_name": "Send email",
                    "step_type": "api_call",
                    "action": "send_email",
                    "parameters": {},
                    "dependencies": [0]
                }
            ]
        }))
        .expect("draft should deserialize");

        let plan = draft.finalize();
        assert_eq!(plan.total_steps, 2);
        assert_eq!(plan.estimated_duration_ms, 4000);
        assert!(!plan.requires_approval);
        assert_eq!(plan.steps[1].dependencies, vec![0]);
    }

    #[test]
    fn plan_draft_keeps_provider_supplied_totals_verbatim() {
        let draft: PlanDraft = serde_json::from_value(json!({
            "steps": [],
            "total_steps": 7,
            "estimated_duration_ms": 1234,
            "requires_approval": true
        }))
        .expect("draft should deserialize");

        let plan = draft.finalize();
        assert_eq!(plan.total_steps, 7);
        assert_eq!(plan.estimated_duration_ms, 1234);
        assert!(plan.requires_approval);
    }

    #[test]
    fn provider_intent_json_narrows_into_parsed_intent() {
        let intent: ParsedIntent = serde_json::from_value(json!({
            "action": "send_email",
            "entities": {"recipient": "john@example.com"},
            "confidence": 0.92,
            "capabilities_required": ["email"],
            "suggested_agent_role": "email_assistant"
        }))
        .expect("intent should deserialize");

        assert_eq!(intent.action, "send_email");
        assert_eq!(intent.suggested_agent.as_deref(), Some("email_assistant"));
    }
}
