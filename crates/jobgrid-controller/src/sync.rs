//! The synchronization engine — metadata discovery and the status
//! exchange diff.
//!
//! The diff is computed against the *active* job set only: a job that
//! leaves `Active` status is reported as removed, indistinguishable from
//! a deleted job. That is deliberate; workers carry no notion of paused
//! or completed jobs.

use std::collections::{HashMap, HashSet};

use jobgrid_model::{
    JobPage, JobStatus, MetadataRequest, MetadataResponse, StatusExchangeRequest,
    StatusExchangeResponse, is_after, same_instant,
};
use tracing::debug;

use crate::controller::JobSchedulerController;
use crate::error::ControllerResult;

impl JobSchedulerController {
    /// The distinct groups and types present in a cluster.
    ///
    /// Workers call this to discover which status-exchange requests to
    /// make. Pure projection, no side effects.
    pub fn get_metadata(&self, request: MetadataRequest) -> ControllerResult<MetadataResponse> {
        let groups = self.definitions.get_all_groups(&request.cluster)?;
        let types = self.definitions.get_all_types(&request.cluster)?;
        Ok(MetadataResponse {
            cluster: request.cluster,
            groups,
            types,
        })
    }

    /// The active job set for one (group, type, cluster) bucket — the
    /// current truth the status exchange diffs against. Only `Active`
    /// jobs participate; defined, paused, completed, and failed jobs are
    /// excluded.
    pub fn get_all_active(
        &self,
        group: &str,
        job_type: &str,
        cluster: &str,
    ) -> ControllerResult<JobPage> {
        let jobs = self
            .definitions
            .get_by_status_in(job_type, group, cluster, &[JobStatus::Active])?;
        let total = jobs.len() as u64;
        Ok(JobPage { jobs, total })
    }

    /// Diff the requester's `{code -> modified}` snapshot against the
    /// active set and return the minimal change-set.
    ///
    /// Classification per active job, comparing at millisecond precision:
    /// unknown code → `added`; millisecond-equal `modified` → unchanged
    /// (omitted); strictly newer `modified` → `updated`. A `modified`
    /// strictly *older* than the requester's record lands in no bucket —
    /// observed behavior, kept as is (see DESIGN.md). Codes the requester
    /// knows that are absent from the active set → `removed`.
    pub fn status_exchange(
        &self,
        request: StatusExchangeRequest,
    ) -> ControllerResult<StatusExchangeResponse> {
        let active = self
            .get_all_active(&request.group, &request.job_type, &request.cluster)?
            .jobs;

        let active_codes: HashSet<&str> = active.iter().map(|j| j.code.as_str()).collect();

        let mut removed: Vec<String> = request
            .state
            .keys()
            .filter(|code| !active_codes.contains(code.as_str()))
            .cloned()
            .collect();
        removed.sort();

        let mut added = HashMap::new();
        let mut updated = HashMap::new();

        for job in active {
            let Some(known) = request.state.get(&job.code) else {
                added.insert(job.code.clone(), job);
                continue;
            };
            // Stored jobs always carry a modified stamp.
            let Some(modified) = job.modified else {
                continue;
            };
            if same_instant(modified, *known) {
                continue;
            }
            if is_after(modified, *known) {
                updated.insert(job.code.clone(), job);
            }
        }

        debug!(
            group = %request.group,
            job_type = %request.job_type,
            cluster = %request.cluster,
            added = added.len(),
            updated = updated.len(),
            removed = removed.len(),
            "status exchange computed"
        );

        Ok(StatusExchangeResponse {
            group: request.group,
            job_type: request.job_type,
            removed,
            updated,
            added,
        })
    }
}
