//! Agent CRUD and question handlers
//!
//! Request bodies arrive as raw JSON values and are validated by hand so
//! every rejection carries the API's own error body instead of an extractor
//! default. Validation failures are 400, unknown agents 404, inactive
//! agents 403, and store failures collapse to a generic 500.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use serde_json::{Value, json};
use tracing::error;

use concierge_core::agent::{Agent, AgentCategory, AgentStatus};
use concierge_core::qa::answer_question;
use concierge_core::store::AgentUpdate;

use crate::protocol::AskResponse;
use crate::server::GatewayState;

type ApiError = (StatusCode, Json<Value>);

/// GET /api/agents
pub async fn list_agents(State(state): State<GatewayState>) -> Json<Vec<Agent>> {
    Json(state.store.list().await)
}

/// GET /api/agents/{id}
pub async fn get_agent(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Json<Agent>, ApiError> {
    match state.store.get(&id).await {
        Some(agent) => Ok(Json(agent)),
        None => Err(not_found()),
    }
}

/// POST /api/agents
pub async fn create_agent(
    State(state): State<GatewayState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Agent>), ApiError> {
    let name = require_name(&body)?;
    let category = require_category(&body)?;
    let status = require_status(&body)?;
    let description = body
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string);

    let agent = state
        .store
        .create(name, category, status, description)
        .await
        .map_err(internal_error)?;

    Ok((StatusCode::CREATED, Json(agent)))
}

/// PUT /api/agents/{id}
pub async fn update_agent(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Agent>, ApiError> {
    let update = parse_update(&body)?;

    match state.store.update(&id, update).await.map_err(internal_error)? {
        Some(agent) => Ok(Json(agent)),
        None => Err(not_found()),
    }
}

/// DELETE /api/agents/{id}
pub async fn delete_agent(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Json<Agent>, ApiError> {
    match state.store.delete(&id).await.map_err(internal_error)? {
        Some(agent) => Ok(Json(agent)),
        None => Err(not_found()),
    }
}

/// POST /api/agents/{id}/ask
///
/// The question is validated before the agent lookup, so an empty question
/// to an unknown id is a 400, not a 404. Inactive agents refuse questions
/// with a 403 before any resolution happens.
pub async fn ask_agent(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<AskResponse>, ApiError> {
    let question = body
        .get("question")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| bad_request("Question is required"))?;

    let Some(agent) = state.store.get(&id).await else {
        return Err(not_found());
    };

    if !agent.is_active() {
        return Err((
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Agent is not active" })),
        ));
    }

    let answer = answer_question(&agent, question);

    Ok(Json(AskResponse {
        agent_id: agent.id,
        agent_name: agent.name,
        question: question.to_string(),
        answer,
        timestamp: Utc::now(),
    }))
}

// ── Validation ──

fn require_name(body: &Value) -> Result<String, ApiError> {
    body.get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| bad_request("Name is required"))
}

fn require_category(body: &Value) -> Result<AgentCategory, ApiError> {
    body.get("type")
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| bad_request("Valid agent type is required (Sales, Support, or Marketing)"))
}

fn require_status(body: &Value) -> Result<AgentStatus, ApiError> {
    body.get("status")
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| bad_request("Valid agent status is required (Active or Inactive)"))
}

/// Build a partial update, validating only the fields the caller sent.
fn parse_update(body: &Value) -> Result<AgentUpdate, ApiError> {
    let mut update = AgentUpdate::default();

    if body.get("name").is_some() {
        update.name = Some(require_name(body)?);
    }
    if body.get("type").is_some() {
        update.category = Some(require_category(body)?);
    }
    if body.get("status").is_some() {
        update.status = Some(require_status(body)?);
    }
    if let Some(description) = body.get("description") {
        let text = description
            .as_str()
            .ok_or_else(|| bad_request("Description must be a string"))?;
        update.description = Some(text.to_string());
    }

    Ok(update)
}

fn bad_request(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

fn not_found() -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Agent not found" })),
    )
}

fn internal_error(err: anyhow::Error) -> ApiError {
    error!("Agent store operation failed: {:#}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
}
