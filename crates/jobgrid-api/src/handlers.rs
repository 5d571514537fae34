//! REST API handlers.
//!
//! Each handler delegates to the controller and wraps the outcome in the
//! JSON envelope. Fail-soft controller results (`Ok(None)`) map to 404,
//! except the add-job conflict which maps to 409; store faults map to 500.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use jobgrid_model::{
    AgentDefinition, AgentHealth, IterationStatus, JobDefinition, JobIteration, JobStatus,
    MetadataRequest, StatusExchangeRequest,
};

use crate::ApiState;

/// Response wrapper for consistent API format.
#[derive(serde::Serialize)]
struct ApiResponse<T: serde::Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: serde::Serialize> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }
}

fn error_response(msg: &str, status: StatusCode) -> impl IntoResponse {
    (
        status,
        Json(ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(msg.to_string()),
        }),
    )
}

// ── Jobs ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct JobListQuery {
    #[serde(rename = "type")]
    pub job_type: Option<String>,
}

/// GET /api/v1/jobs?type=
pub async fn list_jobs(
    State(state): State<ApiState>,
    Query(query): Query<JobListQuery>,
) -> impl IntoResponse {
    match state.controller.get_all_jobs(query.job_type.as_deref()) {
        Ok(jobs) => ApiResponse::ok(jobs).into_response(),
        Err(e) => error_response(&e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response(),
    }
}

/// POST /api/v1/jobs
pub async fn add_job(
    State(state): State<ApiState>,
    Json(definition): Json<JobDefinition>,
) -> impl IntoResponse {
    match state.controller.add_job(definition) {
        Ok(Some(stored)) => (StatusCode::CREATED, ApiResponse::ok(stored)).into_response(),
        Ok(None) => error_response("job code already exists", StatusCode::CONFLICT).into_response(),
        Err(e) => error_response(&e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response(),
    }
}

#[derive(Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub size: u64,
}

fn default_page_size() -> u64 {
    20
}

/// GET /api/v1/jobs/page?page=&size=
pub async fn get_jobs_page(
    State(state): State<ApiState>,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    match state.controller.get_jobs_page(query.page, query.size) {
        Ok(page) => ApiResponse::ok(page).into_response(),
        Err(e) => error_response(&e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response(),
    }
}

/// GET /api/v1/jobs/{id}
pub async fn get_job(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.controller.get_job(&id) {
        Ok(Some(job)) => ApiResponse::ok(job).into_response(),
        Ok(None) => error_response("job not found", StatusCode::NOT_FOUND).into_response(),
        Err(e) => error_response(&e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response(),
    }
}

/// PUT /api/v1/jobs/{id}
pub async fn update_job(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(mut definition): Json<JobDefinition>,
) -> impl IntoResponse {
    // The path wins over whatever id the body carries.
    definition.id = id;
    match state.controller.update_job(definition) {
        Ok(Some(stored)) => ApiResponse::ok(stored).into_response(),
        Ok(None) => error_response("job not found", StatusCode::NOT_FOUND).into_response(),
        Err(e) => error_response(&e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response(),
    }
}

/// DELETE /api/v1/jobs/{id}
pub async fn delete_job(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.controller.delete_job(&id) {
        Ok(Some(removed)) => ApiResponse::ok(removed).into_response(),
        Ok(None) => error_response("job not found", StatusCode::NOT_FOUND).into_response(),
        Err(e) => error_response(&e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response(),
    }
}

/// Mark-as request body.
#[derive(Deserialize)]
pub struct MarkRequest {
    pub status: JobStatus,
}

/// PUT /api/v1/jobs/{id}/status
pub async fn mark_job(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(req): Json<MarkRequest>,
) -> impl IntoResponse {
    match state.controller.mark_as(&id, req.status) {
        Ok(Some(stored)) => ApiResponse::ok(stored).into_response(),
        Ok(None) => error_response("job not found", StatusCode::NOT_FOUND).into_response(),
        Err(e) => error_response(&e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response(),
    }
}

// ── Worker exchange ────────────────────────────────────────────────

/// POST /api/v1/worker/metadata
pub async fn worker_metadata(
    State(state): State<ApiState>,
    Json(request): Json<MetadataRequest>,
) -> impl IntoResponse {
    match state.controller.get_metadata(request) {
        Ok(meta) => ApiResponse::ok(meta).into_response(),
        Err(e) => error_response(&e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response(),
    }
}

/// POST /api/v1/worker/exchange
pub async fn worker_exchange(
    State(state): State<ApiState>,
    Json(request): Json<StatusExchangeRequest>,
) -> impl IntoResponse {
    match state.controller.status_exchange(request) {
        Ok(delta) => ApiResponse::ok(delta).into_response(),
        Err(e) => error_response(&e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response(),
    }
}

// ── Iterations ─────────────────────────────────────────────────────

/// POST /api/v1/iterations
pub async fn add_iteration(
    State(state): State<ApiState>,
    Json(iteration): Json<JobIteration>,
) -> impl IntoResponse {
    match state.controller.add_iteration(iteration) {
        Ok(stored) => (StatusCode::CREATED, ApiResponse::ok(stored)).into_response(),
        Err(e) => error_response(&e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response(),
    }
}

#[derive(Deserialize)]
pub struct IterationQuery {
    pub job_id: Option<String>,
    /// Single status filter, widened to a one-element set.
    pub status: Option<IterationStatus>,
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub size: u64,
}

/// GET /api/v1/iterations?job_id=&status=&page=&size=
pub async fn list_iterations(
    State(state): State<ApiState>,
    Query(query): Query<IterationQuery>,
) -> impl IntoResponse {
    let statuses = query.status.map(|s| vec![s]);
    match state.controller.get_iterations(
        query.job_id.as_deref(),
        statuses.as_deref(),
        query.page,
        query.size,
    ) {
        Ok(page) => ApiResponse::ok(page).into_response(),
        Err(e) => error_response(&e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response(),
    }
}

// ── Agents ─────────────────────────────────────────────────────────

/// PUT /api/v1/agents
pub async fn register_agent(
    State(state): State<ApiState>,
    Json(agent): Json<AgentDefinition>,
) -> impl IntoResponse {
    match state.controller.registration(agent) {
        Ok(stored) => ApiResponse::ok(stored).into_response(),
        Err(e) => error_response(&e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response(),
    }
}

/// PUT /api/v1/agents/{id}/health
pub async fn agent_heartbeat(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(health): Json<AgentHealth>,
) -> impl IntoResponse {
    match state.controller.heartbeat(&id, health) {
        Ok(Some(stored)) => ApiResponse::ok(stored).into_response(),
        Ok(None) => error_response("agent not found", StatusCode::NOT_FOUND).into_response(),
        Err(e) => error_response(&e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response(),
    }
}

/// GET /api/v1/agents
pub async fn list_agents(State(state): State<ApiState>) -> impl IntoResponse {
    match state.controller.get_agents() {
        Ok(agents) => ApiResponse::ok(agents).into_response(),
        Err(e) => error_response(&e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response(),
    }
}

/// GET /api/v1/agents/{id}
pub async fn get_agent(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.controller.get_agent(&id) {
        Ok(Some(agent)) => ApiResponse::ok(agent).into_response(),
        Ok(None) => error_response("agent not found", StatusCode::NOT_FOUND).into_response(),
        Err(e) => error_response(&e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response(),
    }
}

/// DELETE /api/v1/agents/{id}
pub async fn delete_agent(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.controller.delete_agent(&id) {
        Ok(Some(removed)) => ApiResponse::ok(removed).into_response(),
        Ok(None) => error_response("agent not found", StatusCode::NOT_FOUND).into_response(),
        Err(e) => error_response(&e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response(),
    }
}
