use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, Rejection, Reply};

use crate::llm::LlmService;

mod classify;
mod entities;
mod health;
mod parse;
mod plan;
mod suggest;

pub fn routes(
    service: Arc<LlmService>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let root = warp::path::end()
        .and(warp::get())
        .and_then(health::handle_root);

    let health_route = warp::path("health")
        .and(warp::get())
        .and(with_service(service.clone()))
        .and_then(health::handle_health);

    let ai = warp::path("ai");

    let parse_route = ai
        .and(warp::path("parse-instruction"))
        .and(warp::post())
        .and(warp::body::json())
        .and(with_service(service.clone()))
        .and_then(parse::handle_parse_instruction);

    let plan_route = ai
        .and(warp::path("generate-plan"))
        .and(warp::post())
        .and(warp::body::json())
        .and(with_service(service.clone()))
        .and_then(plan::handle_generate_plan);

    let classify_route = ai
        .and(warp::path("classify-intent"))
        .and(warp::post())
        .and(warp::body::json())
        .and(with_service(service.clone()))
        .and_then(classify::handle_classify_intent);

    let suggest_route = ai
        .and(warp::path("suggest-agent"))
        .and(warp::post())
        .and(warp::body::json())
        .and(with_service(service))
        .and_then(suggest::handle_suggest_agent);

    let entities_route = ai
        .and(warp::path("extract-entities"))
        .and(warp::post())
        .and(warp::body::json())
        .and_then(entities::handle_extract_entities);

    root.or(health_route)
        .or(parse_route)
        .or(plan_route)
        .or(classify_route)
        .or(suggest_route)
        .or(entities_route)
}

fn with_service(
    service: Arc<LlmService>,
) -> impl Filter<Extract = (Arc<LlmService>,), Error = Infallible> + Clone {
    warp::any().map(move || service.clone())
}
