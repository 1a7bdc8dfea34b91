use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;
use warp::{Rejection, Reply};

use crate::models::{EntityExtractionResponse, ExtractedEntities, InstructionInput};

// Pattern extraction only; anything needing a real NER model stays empty.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("email pattern")
});
static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{4}-\d{2}-\d{2}|\d{1,2}/\d{1,2}/\d{2,4})\b").expect("date pattern")
});

pub async fn handle_extract_entities(input: InstructionInput) -> Result<impl Reply, Rejection> {
    info!("Entity extraction request from user {}", input.user_id);

    Ok(warp::reply::json(&EntityExtractionResponse {
        entities: extract(&input.instruction),
    }))
}

fn extract(instruction: &str) -> ExtractedEntities {
    ExtractedEntities {
        emails: EMAIL_RE
            .find_iter(instruction)
            .map(|m| m.as_str().to_string())
            .collect(),
        dates: DATE_RE
            .find_iter(instruction)
            .map(|m| m.as_str().to_string())
            .collect(),
        ..ExtractedEntities::default()
    }
}
