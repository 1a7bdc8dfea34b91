// Rule-based substitute used whenever no model provider is reachable.

use serde_json::Map;
use uuid::Uuid;

use crate::models::{ExecutionPlan, ExecutionStep, ParsedIntent};

const EMAIL_TERMS: [&str; 4] = ["email", "correo", "enviar", "responder"];
const CALENDAR_TERMS: [&str; 4] = ["reunión", "meeting", "agendar", "calendario"];
const CRM_TERMS: [&str; 4] = ["crm", "contacto", "lead", "cliente"];

const MATCH_CONFIDENCE: f64 = 0.6;
const UNKNOWN_CONFIDENCE: f64 = 0.3;

const FALLBACK_PLAN_DURATION_MS: u64 = 3000;

/// Keyword classification over a fixed vocabulary, first match wins.
pub fn classify(instruction: &str) -> ParsedIntent {
    let lowered = instruction.to_lowercase();

    if contains_any(&lowered, &EMAIL_TERMS) {
        intent("email_operation", &["email"], Some("email_assistant"))
    } else if contains_any(&lowered, &CALENDAR_TERMS) {
        intent("calendar_operation", &["calendar"], Some("scheduler"))
    } else if contains_any(&lowered, &CRM_TERMS) {
        intent("crm_operation", &["crm"], Some("crm_manager"))
    } else {
        ParsedIntent {
            action: "unknown".to_string(),
            entities: Map::new(),
            confidence: UNKNOWN_CONFIDENCE,
            capabilities_required: vec![],
            suggested_agent: None,
        }
    }
}

/// Maximally conservative plan: a single step that requires manual approval.
pub fn plan(intent: &ParsedIntent) -> ExecutionPlan {
    ExecutionPlan {
        task_id: Uuid::new_v4(),
        steps: vec![ExecutionStep {
            step_index: 0,
            step_name: "Execute task".to_string(),
            step_type: "api_call".to_string(),
            action: intent.action.clone(),
            parameters: intent.entities.clone(),
            dependencies: vec![],
        }],
        total_steps: 1,
        estimated_duration_ms: FALLBACK_PLAN_DURATION_MS,
        requires_approval: true,
    }
}

fn contains_any(haystack: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| haystack.contains(term))
}

fn intent(action: &str, capabilities: &[&str], agent: Option<&str>) -> ParsedIntent {
    ParsedIntent {
        action: action.to_string(),
        entities: Map::new(),
        confidence: MATCH_CONFIDENCE,
        capabilities_required: capabilities.iter().map(|c| c.to_string()).collect(),
        suggested_agent: agent.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_terms_classify_as_email_operation() {
        for instruction in [
            "Send an email to John",
            "Responder al correo de María",
            "enviar el informe",
        ] {
            let parsed = classify(instruction);
            assert_eq!(parsed.action, "email_operation");
            assert_eq!(parsed.confidence, 0.6);
            assert_eq!(parsed.capabilities_required, vec!["email"]);
            assert_eq!(parsed.suggested_agent.as_deref(), Some("email_assistant"));
        }
    }

    #[test]
    fn spanish_calendar_instruction_classifies_as_calendar_operation() {
        let parsed = classify("Por favor reagenda la reunión con Juan");

        assert_eq!(parsed.action, "calendar_operation");
        assert_eq!(parsed.confidence, 0.6);
        assert_eq!(parsed.capabilities_required, vec!["calendar"]);
        assert_eq!(parsed.suggested_agent.as_deref(), Some("scheduler"));
    }

    #[test]
    fn crm_terms_classify_as_crm_operation() {
        let parsed = classify("Actualiza el contacto del cliente en el CRM");

        assert_eq!(parsed.action, "crm_operation");
        assert_eq!(parsed.capabilities_required, vec!["crm"]);
        assert_eq!(parsed.suggested_agent.as_deref(), Some("crm_manager"));
    }

    #[test]
    fn unmatched_instruction_classifies_as_unknown() {
        let parsed = classify("Hazme un resumen del informe trimestral");

        assert_eq!(parsed.action, "unknown");
        assert_eq!(parsed.confidence, 0.3);
        assert!(parsed.capabilities_required.is_empty());
        assert!(parsed.suggested_agent.is_none());
        assert!(parsed.entities.is_empty());
    }

    #[test]
    fn email_category_wins_over_calendar_on_mixed_input() {
        let parsed = classify("Enviar un email para confirmar la reunión");
        assert_eq!(parsed.action, "email_operation");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let parsed = classify("EMAIL John about the launch");
        assert_eq!(parsed.action, "email_operation");
    }

    #[test]
    fn fallback_plan_is_single_manual_approval_step() {
        let mut parsed = classify("enviar correo");
        parsed
            .entities
            .insert("recipient".to_string(), "juan@example.com".into());

        let plan = plan(&parsed);

        assert_eq!(plan.steps.len(), 1);
        assert_eq!(plan.total_steps, 1);
        assert_eq!(plan.estimated_duration_ms, 3000);
        assert!(plan.requires_approval);

        let step = &plan.steps[0];
        assert_eq!(step.step_index, 0);
        assert_eq!(step.step_type, "api_call");
        assert_eq!(step.action, "email_operation");
        assert_eq!(
            step.parameters.get("recipient").and_then(|v| v.as_str()),
            Some("juan@example.com")
        );
        assert!(step.dependencies.is_empty());
    }

    #[test]
    fn fallback_plan_shape_is_independent_of_the_intent() {
        let plan = plan(&classify("algo sin categoría"));

        assert_eq!(plan.steps.len(), 1);
        assert_eq!(plan.estimated_duration_ms, 3000);
        assert!(plan.requires_approval);
        assert_eq!(plan.steps[0].action, "unknown");
    }
}
