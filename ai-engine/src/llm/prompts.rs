// Fixed prompt pair sent to the model vendors. User-facing text and prompts
// are in Spanish, the product language.

use serde_json::Value;

use crate::models::ParsedIntent;

pub const PARSE_SYSTEM_PROMPT: &str = r#"Eres un asistente experto en analizar instrucciones en lenguaje natural para automatización de tareas.

Tu trabajo es analizar la instrucción del usuario y extraer:
1. La acción principal a realizar
2. Entidades relevantes (emails, fechas, nombres, etc.)
3. Capacidades requeridas (email, calendar, crm, etc.)
4. Nivel de confianza en tu análisis

Responde SOLO en formato JSON válido con esta estructura:
{
  "action": "acción principal",
  "entities": {
    "clave": "valor"
  },
  "confidence": 0.95,
  "capabilities_required": ["capability1", "capability2"],
  "suggested_agent_role": "email_assistant|crm_manager|scheduler|analyst"
}"#;

pub const PLAN_SYSTEM_PROMPT: &str = r#"Eres un planificador experto de automatización de tareas.

Tu trabajo es generar un plan de ejecución detallado con pasos concretos.

Cada paso debe tener:
- step_index: número del paso
- step_name: nombre descriptivo
- step_type: tipo (data_retrieval, data_transform, api_call, condition, approval)
- action: acción específica a realizar
- parameters: parámetros necesarios
- dependencies: índices de pasos previos necesarios

Responde en formato JSON válido."#;

pub fn parse_user_prompt(instruction: &str, context: Option<&Value>) -> String {
    let context = context
        .map(|value| value.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "Analiza esta instrucción:\n\n\"{}\"\n\nContexto adicional: {}",
        instruction, context
    )
}

pub fn plan_user_prompt(instruction: &str, intent: &ParsedIntent, capabilities: &[String]) -> String {
    let intent_json =
        serde_json::to_string_pretty(intent).unwrap_or_else(|_| "{}".to_string());

    format!(
        "Genera un plan de ejecución para:\n\nInstrucción: \"{}\"\n\nIntent analizado:\n{}\n\nCapacidades disponibles: {:?}\n\nEl plan debe ser ejecutable paso a paso.",
        instruction, intent_json, capabilities
    )
}
