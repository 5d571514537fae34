//! jobgrid-api — REST API for the Jobgrid control plane.
//!
//! Provides axum route handlers over the controller: job catalog CRUD and
//! paging, the worker metadata/exchange endpoints, iteration appends and
//! paging, and agent registration/heartbeat.
//!
//! # API Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/api/v1/jobs?type=` | List jobs, optional type filter |
//! | POST | `/api/v1/jobs` | Add a job (409 on code conflict) |
//! | GET | `/api/v1/jobs/page?page=&size=` | Code-ordered job page |
//! | GET | `/api/v1/jobs/{id}` | Get one job |
//! | PUT | `/api/v1/jobs/{id}` | Update a job |
//! | DELETE | `/api/v1/jobs/{id}` | Delete a job |
//! | PUT | `/api/v1/jobs/{id}/status` | Mark a job with a status |
//! | POST | `/api/v1/worker/metadata` | Cluster group/type discovery |
//! | POST | `/api/v1/worker/exchange` | Status exchange diff |
//! | POST | `/api/v1/iterations` | Append an iteration |
//! | GET | `/api/v1/iterations?job_id=&status=&page=&size=` | Iteration page |
//! | PUT | `/api/v1/agents` | Register an agent |
//! | PUT | `/api/v1/agents/{id}/health` | Agent heartbeat |
//! | GET | `/api/v1/agents` | List agents |
//! | GET | `/api/v1/agents/{id}` | Get one agent |
//! | DELETE | `/api/v1/agents/{id}` | Delete an agent |

pub mod handlers;

use axum::Router;
use axum::routing::{get, post, put};
use jobgrid_controller::JobSchedulerController;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub controller: JobSchedulerController,
}

/// Build the complete API router.
pub fn build_router(controller: JobSchedulerController) -> Router {
    let api_state = ApiState { controller };

    let api_routes = Router::new()
        .route("/jobs", get(handlers::list_jobs).post(handlers::add_job))
        .route("/jobs/page", get(handlers::get_jobs_page))
        .route(
            "/jobs/{id}",
            get(handlers::get_job)
                .put(handlers::update_job)
                .delete(handlers::delete_job),
        )
        .route("/jobs/{id}/status", put(handlers::mark_job))
        .route("/worker/metadata", post(handlers::worker_metadata))
        .route("/worker/exchange", post(handlers::worker_exchange))
        .route(
            "/iterations",
            get(handlers::list_iterations).post(handlers::add_iteration),
        )
        .route(
            "/agents",
            get(handlers::list_agents).put(handlers::register_agent),
        )
        .route(
            "/agents/{id}",
            get(handlers::get_agent).delete(handlers::delete_agent),
        )
        .route("/agents/{id}/health", put(handlers::agent_heartbeat))
        .with_state(api_state);

    Router::new().nest("/api/v1", api_routes)
}
