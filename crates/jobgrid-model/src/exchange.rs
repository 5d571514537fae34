//! Worker exchange protocol types.
//!
//! Workers discover the groups/types present in their cluster via a
//! metadata request, then reconcile per (group, type, cluster) through a
//! status exchange: they send the `{code -> modified}` map they last
//! observed and receive only the delta back.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{JobDefinition, JobId};

// ── Metadata discovery ─────────────────────────────────────────────

/// Request for cluster metadata (which groups/types exist).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataRequest {
    pub cluster: String,
}

/// The distinct groups and types currently present in a cluster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetadataResponse {
    pub cluster: String,
    pub groups: Vec<String>,
    pub types: Vec<String>,
}

// ── Status exchange ────────────────────────────────────────────────

/// A worker's view of its job state for one (group, type, cluster) bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusExchangeRequest {
    pub group: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub cluster: String,
    /// Last modification instant the worker observed, per job code.
    #[serde(default)]
    pub state: HashMap<JobId, DateTime<Utc>>,
}

/// The change-set a worker must apply to converge with the active set.
///
/// Jobs the worker already has at the current timestamp are omitted
/// entirely. `removed` carries only codes: a job that left the active set
/// (paused, completed, failed, or deleted) looks the same either way.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusExchangeResponse {
    pub group: String,
    #[serde(rename = "type")]
    pub job_type: String,
    /// Codes the worker knows that are no longer in the active set.
    pub removed: Vec<JobId>,
    /// Jobs the worker knows at an older modification instant.
    pub updated: HashMap<JobId, JobDefinition>,
    /// Jobs the worker has never seen.
    pub added: HashMap<JobId, JobDefinition>,
}

// ── Paged results ──────────────────────────────────────────────────

/// One page of job definitions plus the total match count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPage {
    pub jobs: Vec<JobDefinition>,
    pub total: u64,
}

/// One page of job iterations plus the total match count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationPage {
    pub iterations: Vec<crate::types::JobIteration>,
    pub total: u64,
}
