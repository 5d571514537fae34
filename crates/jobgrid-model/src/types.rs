//! Persisted domain types for the Jobgrid catalog.
//!
//! These types represent the stored state of job definitions, job
//! iterations, and worker agents. All types are serializable to/from JSON
//! for storage in redb tables.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a job definition (caller-assigned, equal to `code`).
pub type JobId = String;

/// Unique identifier of a worker agent.
pub type AgentId = String;

/// The cluster assigned to jobs and agents that specify none.
pub const DEFAULT_CLUSTER: &str = "DEFAULT_CLUSTER";

/// Compare two instants at millisecond precision.
///
/// Timestamps cross the wire and the storage layer serialized to
/// sub-second precision; comparing raw nanosecond instants would make
/// round-tripped values spuriously unequal. Every timestamp comparison in
/// the sync path goes through this helper or [`is_after`].
pub fn same_instant(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.timestamp_millis() == b.timestamp_millis()
}

/// True when `a` is strictly after `b` at millisecond precision.
pub fn is_after(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.timestamp_millis() > b.timestamp_millis()
}

// ── Job definition ─────────────────────────────────────────────────

/// A stored description of a schedulable unit of work.
///
/// Identity is caller-assigned: `id` is set equal to `code` at creation
/// and there is no surrogate key. `code`, `created`, and `created_by` are
/// immutable after creation; `modified` advances on every update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobDefinition {
    /// Storage identity, equal to `code`.
    #[serde(default)]
    pub id: JobId,
    /// Caller-chosen unique business key.
    pub code: String,
    /// Logical grouping of jobs (workers sync per group/type pair).
    pub group: String,
    /// The job type, determines which worker executors can run it.
    #[serde(rename = "type")]
    pub job_type: String,
    /// Cluster partition; defaulted to [`DEFAULT_CLUSTER`] when unset.
    #[serde(default)]
    pub cluster: Option<String>,
    /// Lifecycle status; defaulted to `Active` on creation when unset.
    #[serde(default)]
    pub status: Option<JobStatus>,
    /// Opaque execution payload, never null once stored.
    #[serde(default)]
    pub job_data: Option<JobData>,
    /// Creation instant, immutable after creation.
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    /// Who created the job, immutable after creation.
    #[serde(default)]
    pub created_by: Option<String>,
    /// Last modification instant, advanced on every successful update.
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
}

/// Lifecycle status of a job definition.
///
/// Only `Active` jobs participate in worker synchronization; every other
/// status is indistinguishable from deletion to a syncing worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Defined,
    Active,
    Paused,
    Completed,
    Failed,
}

/// Opaque string-keyed payload bag attached to a job definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct JobData {
    #[serde(default)]
    pub data: Option<HashMap<String, serde_json::Value>>,
}

impl JobData {
    /// An empty payload bag (the stored form when the caller supplied none).
    pub fn empty() -> Self {
        Self {
            data: Some(HashMap::new()),
        }
    }
}

// ── Job iteration ──────────────────────────────────────────────────

/// One recorded execution attempt of a job. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobIteration {
    pub id: Uuid,
    /// The owning job definition.
    pub job_id: JobId,
    pub status: IterationStatus,
    /// Free-form outcome detail (error text, runtime notes).
    #[serde(default)]
    pub message: Option<String>,
    /// Ordering key for pagination, newest first.
    pub timestamp: DateTime<Utc>,
}

/// Outcome of a single job execution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IterationStatus {
    Running,
    Succeeded,
    Failed,
    Cancelled,
}

// ── Agent ──────────────────────────────────────────────────────────

/// Identity and last reported health of one worker process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentDefinition {
    pub id: AgentId,
    pub cluster: String,
    /// Last heartbeat payload; replaced wholesale on every heartbeat.
    #[serde(default)]
    pub health: Option<AgentHealth>,
}

/// Health payload reported by a worker heartbeat.
///
/// Opaque to the control plane beyond being attached to the agent record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentHealth {
    pub state: AgentState,
    pub last_reported: DateTime<Utc>,
    /// Arbitrary numeric gauges (cpu, memory, queue depth, ...).
    #[serde(default)]
    pub metrics: HashMap<String, f64>,
}

/// Coarse agent liveness state as self-reported by the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentState {
    Active,
    Paused,
    Stopped,
}
