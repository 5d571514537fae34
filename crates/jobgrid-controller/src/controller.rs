//! The job scheduler controller — lifecycle rules over injected stores.
//!
//! Creation and update paths own the defaulting and immutability rules:
//! `id = code` at creation, `created`/`created_by` frozen after creation,
//! `modified` stamped on every successful write, `status`/`cluster`/data
//! bag never left unset. `mark_as` routes through `update_job` so those
//! rules have exactly one implementation.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, warn};

use jobgrid_model::{
    AgentDefinition, AgentHealth, DEFAULT_CLUSTER, IterationPage, IterationStatus, JobData,
    JobDefinition, JobIteration, JobPage, JobStatus,
};
use jobgrid_store::{AgentStore, IterationStore, JobStore};

use crate::error::ControllerResult;

/// The control-plane engine over the job catalog, the iteration log, and
/// the agent registry.
///
/// Holds nothing but store handles; clones share the same stores.
#[derive(Clone)]
pub struct JobSchedulerController {
    pub(crate) definitions: Arc<dyn JobStore>,
    pub(crate) iterations: Arc<dyn IterationStore>,
    pub(crate) agents: Arc<dyn AgentStore>,
}

/// Fill in the fields the lifecycle guarantees are never unset.
fn apply_defaults(definition: &mut JobDefinition) {
    if definition.status.is_none() {
        definition.status = Some(JobStatus::Active);
    }
    if definition.cluster.is_none() {
        definition.cluster = Some(DEFAULT_CLUSTER.to_string());
    }
    let data_missing = definition
        .job_data
        .as_ref()
        .is_none_or(|d| d.data.is_none());
    if data_missing {
        definition.job_data = Some(JobData::empty());
    }
}

impl JobSchedulerController {
    /// Create a new controller over the given stores.
    pub fn new(
        definitions: Arc<dyn JobStore>,
        iterations: Arc<dyn IterationStore>,
        agents: Arc<dyn AgentStore>,
    ) -> Self {
        Self {
            definitions,
            iterations,
            agents,
        }
    }

    /// Prepare all three stores before use.
    ///
    /// Short-circuits on the first failure; per-store detail goes to the
    /// log, the caller only gets the aggregate outcome.
    pub fn initialize(&self) -> bool {
        if let Err(e) = self.agents.prepare() {
            error!(error = %e, "agent store prepare failed");
            return false;
        }
        if let Err(e) = self.definitions.prepare() {
            error!(error = %e, "job store prepare failed");
            return false;
        }
        if let Err(e) = self.iterations.prepare() {
            error!(error = %e, "iteration store prepare failed");
            return false;
        }
        true
    }

    // ── Job lifecycle ──────────────────────────────────────────────

    /// Add a new job definition.
    ///
    /// Uses `code` as the storage identity, stamps `created == modified`,
    /// and applies the lifecycle defaults. Returns `None` when a job with
    /// that code already exists (the existing record is untouched); the
    /// store-level conditional insert backstops the pre-check under
    /// concurrent adds.
    pub fn add_job(&self, mut definition: JobDefinition) -> ControllerResult<Option<JobDefinition>> {
        definition.id = definition.code.clone();

        if self.definitions.get_by_id(&definition.id)?.is_some() {
            warn!(code = %definition.code, "job already exists, add skipped");
            return Ok(None);
        }

        let now = Utc::now();
        definition.created = Some(now);
        definition.modified = Some(now);
        apply_defaults(&mut definition);

        Ok(self.definitions.insert(&definition)?)
    }

    /// Update an existing job definition (full replace).
    ///
    /// Caller-supplied `created`/`created_by` are discarded in favor of
    /// the stored originals; `modified` is stamped fresh. Returns `None`
    /// when the job does not exist.
    pub fn update_job(
        &self,
        mut definition: JobDefinition,
    ) -> ControllerResult<Option<JobDefinition>> {
        let Some(existing) = self.definitions.get_by_id(&definition.id)? else {
            warn!(code = %definition.code, "job does not exist, update skipped");
            return Ok(None);
        };

        // Immutable after creation.
        definition.created = existing.created;
        definition.created_by = existing.created_by;

        definition.modified = Some(Utc::now());
        apply_defaults(&mut definition);

        Ok(self.definitions.update(&definition)?)
    }

    /// Set a job's status, routed through [`update_job`] so the update
    /// invariants apply.
    ///
    /// [`update_job`]: JobSchedulerController::update_job
    pub fn mark_as(
        &self,
        id: &str,
        status: JobStatus,
    ) -> ControllerResult<Option<JobDefinition>> {
        let Some(mut existing) = self.get_job(id)? else {
            return Ok(None);
        };
        existing.status = Some(status);
        self.update_job(existing)
    }

    /// Get a job definition by id.
    pub fn get_job(&self, id: &str) -> ControllerResult<Option<JobDefinition>> {
        Ok(self.definitions.get_by_id(id)?)
    }

    /// Hard-delete a job definition. Returns the removed record.
    pub fn delete_job(&self, id: &str) -> ControllerResult<Option<JobDefinition>> {
        Ok(self.definitions.delete_by_id(id)?)
    }

    /// List all job definitions, optionally filtered by type. A blank
    /// filter means unfiltered.
    pub fn get_all_jobs(&self, job_type: Option<&str>) -> ControllerResult<Vec<JobDefinition>> {
        match job_type {
            Some(t) if !t.trim().is_empty() => Ok(self.definitions.get_by_type(t)?),
            _ => Ok(self.definitions.get_all()?),
        }
    }

    /// Code-ordered page over all job definitions.
    pub fn get_jobs_page(&self, page: u64, size: u64) -> ControllerResult<JobPage> {
        Ok(self.definitions.get_page_by_code(page, size)?)
    }

    // ── Iterations ─────────────────────────────────────────────────

    /// Append one job iteration record.
    pub fn add_iteration(&self, iteration: JobIteration) -> ControllerResult<JobIteration> {
        Ok(self.iterations.insert(&iteration)?)
    }

    /// Newest-first page over the iteration log, optionally restricted to
    /// a job and/or a status set.
    pub fn get_iterations(
        &self,
        job_id: Option<&str>,
        statuses: Option<&[IterationStatus]>,
        page: u64,
        size: u64,
    ) -> ControllerResult<IterationPage> {
        Ok(self
            .iterations
            .get_page_by_timestamp(job_id, statuses, page, size)?)
    }

    // ── Agents ─────────────────────────────────────────────────────

    /// Register a worker agent (unconditional upsert).
    pub fn registration(&self, agent: AgentDefinition) -> ControllerResult<AgentDefinition> {
        Ok(self.agents.upsert(&agent)?)
    }

    /// Record a heartbeat: replace the agent's health wholesale.
    ///
    /// Returns `None` without touching the store when the agent is not
    /// registered.
    pub fn heartbeat(
        &self,
        id: &str,
        health: AgentHealth,
    ) -> ControllerResult<Option<AgentDefinition>> {
        let Some(mut existing) = self.agents.get_by_id(id)? else {
            warn!(%id, "heartbeat from unregistered agent ignored");
            return Ok(None);
        };
        existing.health = Some(health);
        Ok(Some(self.agents.upsert(&existing)?))
    }

    /// List all registered agents.
    pub fn get_agents(&self) -> ControllerResult<Vec<AgentDefinition>> {
        Ok(self.agents.get_all()?)
    }

    /// Get one agent by id.
    pub fn get_agent(&self, id: &str) -> ControllerResult<Option<AgentDefinition>> {
        Ok(self.agents.get_by_id(id)?)
    }

    /// Delete an agent by id. Returns the removed record.
    pub fn delete_agent(&self, id: &str) -> ControllerResult<Option<AgentDefinition>> {
        Ok(self.agents.delete_by_id(id)?)
    }
}
