//! Storage capability traits consumed by the controller.
//!
//! The controller is polymorphic over these seams: any backend that can
//! honor the capability set {insert, update, get, delete, query, paginate}
//! can stand in for the embedded store. All methods are synchronous and
//! reflect committed state at call time.
//!
//! Conditional operations fail soft: `insert` returns `Ok(None)` on a key
//! conflict and `update` returns `Ok(None)` when the key is absent, so
//! the controller can surface both the same way it surfaces its own
//! pre-checks. Storage faults are the only `Err` cases.

use jobgrid_model::{
    AgentDefinition, IterationPage, IterationStatus, JobDefinition, JobIteration, JobPage,
    JobStatus,
};

use crate::error::StoreResult;

/// Durable keyed storage of job definitions.
pub trait JobStore: Send + Sync {
    /// Idempotently create the backing table. Safe to call repeatedly.
    fn prepare(&self) -> StoreResult<()>;

    /// Create-if-absent. Returns `None` when a definition with the same
    /// id already exists; the existing record is left untouched.
    fn insert(&self, job: &JobDefinition) -> StoreResult<Option<JobDefinition>>;

    /// Full replace of an existing definition. Returns `None` when the
    /// id is absent.
    fn update(&self, job: &JobDefinition) -> StoreResult<Option<JobDefinition>>;

    fn get_by_id(&self, id: &str) -> StoreResult<Option<JobDefinition>>;

    /// Hard delete. Returns the removed definition, `None` if absent.
    fn delete_by_id(&self, id: &str) -> StoreResult<Option<JobDefinition>>;

    fn get_all(&self) -> StoreResult<Vec<JobDefinition>>;

    fn get_by_type(&self, job_type: &str) -> StoreResult<Vec<JobDefinition>>;

    /// Definitions matching (type, group, cluster) whose status is one of
    /// `statuses`.
    fn get_by_status_in(
        &self,
        job_type: &str,
        group: &str,
        cluster: &str,
        statuses: &[JobStatus],
    ) -> StoreResult<Vec<JobDefinition>>;

    /// Distinct groups present in a cluster, sorted.
    fn get_all_groups(&self, cluster: &str) -> StoreResult<Vec<String>>;

    /// Distinct types present in a cluster, sorted.
    fn get_all_types(&self, cluster: &str) -> StoreResult<Vec<String>>;

    /// Stable code-ordered pagination over all definitions. Pages are
    /// zero-based; `total` reports the full count.
    fn get_page_by_code(&self, page: u64, size: u64) -> StoreResult<JobPage>;
}

/// Durable append-only storage of job iterations.
pub trait IterationStore: Send + Sync {
    /// Idempotently create the backing table. Safe to call repeatedly.
    fn prepare(&self) -> StoreResult<()>;

    /// Append one iteration record. Iterations are never updated or
    /// deleted by this subsystem.
    fn insert(&self, iteration: &JobIteration) -> StoreResult<JobIteration>;

    /// Newest-first pagination, optionally restricted to a job id and/or
    /// a set of statuses.
    fn get_page_by_timestamp(
        &self,
        job_id: Option<&str>,
        statuses: Option<&[IterationStatus]>,
        page: u64,
        size: u64,
    ) -> StoreResult<IterationPage>;
}

/// Durable keyed storage of agent definitions.
pub trait AgentStore: Send + Sync {
    /// Idempotently create the backing table. Safe to call repeatedly.
    fn prepare(&self) -> StoreResult<()>;

    /// Insert-or-replace by agent id.
    fn upsert(&self, agent: &AgentDefinition) -> StoreResult<AgentDefinition>;

    fn get_by_id(&self, id: &str) -> StoreResult<Option<AgentDefinition>>;

    /// Hard delete. Returns the removed definition, `None` if absent.
    fn delete_by_id(&self, id: &str) -> StoreResult<Option<AgentDefinition>>;

    fn get_all(&self) -> StoreResult<Vec<AgentDefinition>>;
}
