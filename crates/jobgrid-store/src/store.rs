//! RedbStore — redb-backed storage for the Jobgrid control plane.
//!
//! One database holds the job catalog, the iteration log, and the agent
//! registry; the store implements the three capability traits over it.
//! All values are JSON-serialized into redb's `&[u8]` value columns. The
//! store supports both on-disk and in-memory backends (the latter for
//! testing).

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata};
use tracing::{debug, warn};

use jobgrid_model::{
    AgentDefinition, IterationPage, IterationStatus, JobDefinition, JobIteration, JobPage,
    JobStatus,
};

use crate::error::{StoreError, StoreResult};
use crate::tables::*;
use crate::traits::{AgentStore, IterationStore, JobStore};

/// Convert any `Display` error into a `StoreError` variant via a closure factory.
macro_rules! map_err {
    ($variant:ident) => {
        |e| StoreError::$variant(e.to_string())
    };
}

/// Thread-safe store backed by redb, implementing all three capability
/// traits over one shared database.
#[derive(Clone)]
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open (or create) a persistent store at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let db = Database::create(path).map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        debug!(?path, "store opened");
        Ok(store)
    }

    /// Create an ephemeral in-memory store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let backend = redb::backends::InMemoryBackend::new();
        let db = Database::builder()
            .create_with_backend(backend)
            .map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        debug!("in-memory store opened");
        Ok(store)
    }

    /// Create a table if it doesn't exist yet. Idempotent.
    fn ensure_table(&self, table: redb::TableDefinition<&str, &[u8]>) -> StoreResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        // Opening a table in a write transaction creates it if absent.
        txn.open_table(table).map_err(map_err!(Table))?;
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }
}

/// Build the iteration table key: `{job_id}:{inverted_millis:020}:{uuid}`.
///
/// Inverting the millisecond timestamp makes redb's forward key order
/// newest-first within a job prefix; the uuid is a stable tiebreak for
/// iterations recorded in the same millisecond.
fn iteration_key(iteration: &JobIteration) -> String {
    let millis = iteration.timestamp.timestamp_millis().max(0) as u64;
    let inverted = u64::MAX - millis;
    format!("{}:{:020}:{}", iteration.job_id, inverted, iteration.id)
}

// ── Job catalog ────────────────────────────────────────────────────

impl JobStore for RedbStore {
    fn prepare(&self) -> StoreResult<()> {
        self.ensure_table(JOBS)
    }

    fn insert(&self, job: &JobDefinition) -> StoreResult<Option<JobDefinition>> {
        let value = serde_json::to_vec(job).map_err(map_err!(Serialize))?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let conflicted;
        {
            let mut table = txn.open_table(JOBS).map_err(map_err!(Table))?;
            // The existence check and the insert share one write
            // transaction: this is the uniqueness backstop behind the
            // controller's non-atomic pre-check.
            conflicted = table.get(job.id.as_str()).map_err(map_err!(Read))?.is_some();
            if !conflicted {
                table
                    .insert(job.id.as_str(), value.as_slice())
                    .map_err(map_err!(Write))?;
            }
        }
        txn.commit().map_err(map_err!(Transaction))?;
        if conflicted {
            warn!(id = %job.id, "job insert conflict, record left untouched");
            return Ok(None);
        }
        debug!(id = %job.id, "job stored");
        Ok(Some(job.clone()))
    }

    fn update(&self, job: &JobDefinition) -> StoreResult<Option<JobDefinition>> {
        let value = serde_json::to_vec(job).map_err(map_err!(Serialize))?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let existed;
        {
            let mut table = txn.open_table(JOBS).map_err(map_err!(Table))?;
            existed = table.get(job.id.as_str()).map_err(map_err!(Read))?.is_some();
            if existed {
                table
                    .insert(job.id.as_str(), value.as_slice())
                    .map_err(map_err!(Write))?;
            }
        }
        txn.commit().map_err(map_err!(Transaction))?;
        if !existed {
            return Ok(None);
        }
        debug!(id = %job.id, "job updated");
        Ok(Some(job.clone()))
    }

    fn get_by_id(&self, id: &str) -> StoreResult<Option<JobDefinition>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(JOBS).map_err(map_err!(Table))?;
        match table.get(id).map_err(map_err!(Read))? {
            Some(guard) => {
                let job: JobDefinition =
                    serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(Some(job))
            }
            None => Ok(None),
        }
    }

    fn delete_by_id(&self, id: &str) -> StoreResult<Option<JobDefinition>> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let removed;
        {
            let mut table = txn.open_table(JOBS).map_err(map_err!(Table))?;
            removed = match table.remove(id).map_err(map_err!(Write))? {
                Some(guard) => Some(
                    serde_json::from_slice::<JobDefinition>(guard.value())
                        .map_err(map_err!(Deserialize))?,
                ),
                None => None,
            };
        }
        txn.commit().map_err(map_err!(Transaction))?;
        if removed.is_some() {
            debug!(%id, "job deleted");
        }
        Ok(removed)
    }

    fn get_all(&self) -> StoreResult<Vec<JobDefinition>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(JOBS).map_err(map_err!(Table))?;
        let mut results = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (_, value) = entry.map_err(map_err!(Read))?;
            let job: JobDefinition =
                serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
            results.push(job);
        }
        Ok(results)
    }

    fn get_by_type(&self, job_type: &str) -> StoreResult<Vec<JobDefinition>> {
        Ok(JobStore::get_all(self)?
            .into_iter()
            .filter(|j| j.job_type == job_type)
            .collect())
    }

    fn get_by_status_in(
        &self,
        job_type: &str,
        group: &str,
        cluster: &str,
        statuses: &[JobStatus],
    ) -> StoreResult<Vec<JobDefinition>> {
        Ok(JobStore::get_all(self)?
            .into_iter()
            .filter(|j| {
                j.job_type == job_type
                    && j.group == group
                    && j.cluster.as_deref() == Some(cluster)
                    && j.status.is_some_and(|s| statuses.contains(&s))
            })
            .collect())
    }

    fn get_all_groups(&self, cluster: &str) -> StoreResult<Vec<String>> {
        let groups: BTreeSet<String> = JobStore::get_all(self)?
            .into_iter()
            .filter(|j| j.cluster.as_deref() == Some(cluster))
            .map(|j| j.group)
            .collect();
        Ok(groups.into_iter().collect())
    }

    fn get_all_types(&self, cluster: &str) -> StoreResult<Vec<String>> {
        let types: BTreeSet<String> = JobStore::get_all(self)?
            .into_iter()
            .filter(|j| j.cluster.as_deref() == Some(cluster))
            .map(|j| j.job_type)
            .collect();
        Ok(types.into_iter().collect())
    }

    fn get_page_by_code(&self, page: u64, size: u64) -> StoreResult<JobPage> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(JOBS).map_err(map_err!(Table))?;
        let total = table.len().map_err(map_err!(Read))?;
        let mut jobs = Vec::new();
        // Keys are codes, so redb's key order is already code order.
        let skip = page.saturating_mul(size);
        for (index, entry) in table.iter().map_err(map_err!(Read))?.enumerate() {
            let (_, value) = entry.map_err(map_err!(Read))?;
            if (index as u64) < skip {
                continue;
            }
            if jobs.len() as u64 >= size {
                break;
            }
            let job: JobDefinition =
                serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
            jobs.push(job);
        }
        Ok(JobPage { jobs, total })
    }
}

// ── Iteration log ──────────────────────────────────────────────────

impl IterationStore for RedbStore {
    fn prepare(&self) -> StoreResult<()> {
        self.ensure_table(ITERATIONS)
    }

    fn insert(&self, iteration: &JobIteration) -> StoreResult<JobIteration> {
        let key = iteration_key(iteration);
        let value = serde_json::to_vec(iteration).map_err(map_err!(Serialize))?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let mut table = txn.open_table(ITERATIONS).map_err(map_err!(Table))?;
            table
                .insert(key.as_str(), value.as_slice())
                .map_err(map_err!(Write))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(job_id = %iteration.job_id, status = ?iteration.status, "iteration recorded");
        Ok(iteration.clone())
    }

    fn get_page_by_timestamp(
        &self,
        job_id: Option<&str>,
        statuses: Option<&[IterationStatus]>,
        page: u64,
        size: u64,
    ) -> StoreResult<IterationPage> {
        let prefix = job_id.map(|id| format!("{id}:"));
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(ITERATIONS).map_err(map_err!(Table))?;
        let mut matching = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (key, value) = entry.map_err(map_err!(Read))?;
            if let Some(prefix) = &prefix
                && !key.value().starts_with(prefix.as_str())
            {
                continue;
            }
            let iteration: JobIteration =
                serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
            if let Some(statuses) = statuses
                && !statuses.contains(&iteration.status)
            {
                continue;
            }
            matching.push(iteration);
        }
        // Newest first; uuid tiebreak keeps same-millisecond records in a
        // stable order across calls.
        matching.sort_by(|a, b| {
            b.timestamp
                .timestamp_millis()
                .cmp(&a.timestamp.timestamp_millis())
                .then_with(|| a.id.cmp(&b.id))
        });
        let total = matching.len() as u64;
        let skip = page.saturating_mul(size) as usize;
        let iterations = matching
            .into_iter()
            .skip(skip)
            .take(size as usize)
            .collect();
        Ok(IterationPage { iterations, total })
    }
}

// ── Agent registry ─────────────────────────────────────────────────

impl AgentStore for RedbStore {
    fn prepare(&self) -> StoreResult<()> {
        self.ensure_table(AGENTS)
    }

    fn upsert(&self, agent: &AgentDefinition) -> StoreResult<AgentDefinition> {
        let value = serde_json::to_vec(agent).map_err(map_err!(Serialize))?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let mut table = txn.open_table(AGENTS).map_err(map_err!(Table))?;
            table
                .insert(agent.id.as_str(), value.as_slice())
                .map_err(map_err!(Write))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(id = %agent.id, cluster = %agent.cluster, "agent stored");
        Ok(agent.clone())
    }

    fn get_by_id(&self, id: &str) -> StoreResult<Option<AgentDefinition>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(AGENTS).map_err(map_err!(Table))?;
        match table.get(id).map_err(map_err!(Read))? {
            Some(guard) => {
                let agent: AgentDefinition =
                    serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(Some(agent))
            }
            None => Ok(None),
        }
    }

    fn delete_by_id(&self, id: &str) -> StoreResult<Option<AgentDefinition>> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let removed;
        {
            let mut table = txn.open_table(AGENTS).map_err(map_err!(Table))?;
            removed = match table.remove(id).map_err(map_err!(Write))? {
                Some(guard) => Some(
                    serde_json::from_slice::<AgentDefinition>(guard.value())
                        .map_err(map_err!(Deserialize))?,
                ),
                None => None,
            };
        }
        txn.commit().map_err(map_err!(Transaction))?;
        if removed.is_some() {
            debug!(%id, "agent deleted");
        }
        Ok(removed)
    }

    fn get_all(&self) -> StoreResult<Vec<AgentDefinition>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(AGENTS).map_err(map_err!(Table))?;
        let mut results = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (_, value) = entry.map_err(map_err!(Read))?;
            let agent: AgentDefinition =
                serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
            results.push(agent);
        }
        Ok(results)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jobgrid_model::{AgentHealth, AgentState, DEFAULT_CLUSTER, JobData};
    use std::collections::HashMap;
    use uuid::Uuid;

    // RedbStore implements all three capability traits, so tests go
    // through typed trait objects to pick the surface under test.
    fn jobs(store: &RedbStore) -> &dyn JobStore {
        store
    }

    fn iterations(store: &RedbStore) -> &dyn IterationStore {
        store
    }

    fn agents(store: &RedbStore) -> &dyn AgentStore {
        store
    }

    fn prepared_store() -> RedbStore {
        let store = RedbStore::open_in_memory().unwrap();
        jobs(&store).prepare().unwrap();
        iterations(&store).prepare().unwrap();
        agents(&store).prepare().unwrap();
        store
    }

    fn test_job(code: &str) -> JobDefinition {
        JobDefinition {
            id: code.to_string(),
            code: code.to_string(),
            group: "etl".to_string(),
            job_type: "cron".to_string(),
            cluster: Some(DEFAULT_CLUSTER.to_string()),
            status: Some(JobStatus::Active),
            job_data: Some(JobData::empty()),
            created: Some(Utc::now()),
            created_by: Some("tester".to_string()),
            modified: Some(Utc::now()),
        }
    }

    fn test_iteration(job_id: &str, status: IterationStatus, offset_secs: i64) -> JobIteration {
        JobIteration {
            id: Uuid::new_v4(),
            job_id: job_id.to_string(),
            status,
            message: None,
            timestamp: Utc::now() + Duration::seconds(offset_secs),
        }
    }

    fn test_agent(id: &str) -> AgentDefinition {
        AgentDefinition {
            id: id.to_string(),
            cluster: DEFAULT_CLUSTER.to_string(),
            health: Some(AgentHealth {
                state: AgentState::Active,
                last_reported: Utc::now(),
                metrics: HashMap::new(),
            }),
        }
    }

    // ── Job catalog ────────────────────────────────────────────────

    #[test]
    fn job_insert_and_get() {
        let store = prepared_store();
        let job = test_job("reports");

        let stored = jobs(&store).insert(&job).unwrap();
        assert_eq!(stored, Some(job.clone()));
        assert_eq!(jobs(&store).get_by_id("reports").unwrap(), Some(job));
    }

    #[test]
    fn job_insert_conflict_keeps_original() {
        let store = prepared_store();
        let first = test_job("reports");
        jobs(&store).insert(&first).unwrap();

        let mut second = test_job("reports");
        second.group = "other".to_string();
        assert!(jobs(&store).insert(&second).unwrap().is_none());

        // The original record is untouched.
        let kept = jobs(&store).get_by_id("reports").unwrap().unwrap();
        assert_eq!(kept.group, "etl");
    }

    #[test]
    fn job_update_absent_returns_none() {
        let store = prepared_store();
        assert!(jobs(&store).update(&test_job("ghost")).unwrap().is_none());
        assert!(jobs(&store).get_by_id("ghost").unwrap().is_none());
    }

    #[test]
    fn job_update_replaces_in_full() {
        let store = prepared_store();
        let mut job = test_job("reports");
        jobs(&store).insert(&job).unwrap();

        job.status = Some(JobStatus::Paused);
        job.group = "night-etl".to_string();
        jobs(&store).update(&job).unwrap();

        let stored = jobs(&store).get_by_id("reports").unwrap().unwrap();
        assert_eq!(stored.status, Some(JobStatus::Paused));
        assert_eq!(stored.group, "night-etl");
    }

    #[test]
    fn job_delete_returns_removed_record() {
        let store = prepared_store();
        jobs(&store).insert(&test_job("reports")).unwrap();

        let removed = jobs(&store).delete_by_id("reports").unwrap();
        assert_eq!(removed.unwrap().code, "reports");
        assert!(jobs(&store).delete_by_id("reports").unwrap().is_none());
        assert!(jobs(&store).get_by_id("reports").unwrap().is_none());
    }

    #[test]
    fn job_filter_by_type() {
        let store = prepared_store();
        jobs(&store).insert(&test_job("a")).unwrap();
        let mut other = test_job("b");
        other.job_type = "batch".to_string();
        jobs(&store).insert(&other).unwrap();

        let cron = jobs(&store).get_by_type("cron").unwrap();
        assert_eq!(cron.len(), 1);
        assert_eq!(cron[0].code, "a");
    }

    #[test]
    fn job_filter_by_status_set() {
        let store = prepared_store();
        jobs(&store).insert(&test_job("active")).unwrap();
        let mut paused = test_job("paused");
        paused.status = Some(JobStatus::Paused);
        jobs(&store).insert(&paused).unwrap();

        let active = jobs(&store)
            .get_by_status_in("cron", "etl", DEFAULT_CLUSTER, &[JobStatus::Active])
            .unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].code, "active");

        let both = jobs(&store)
            .get_by_status_in(
                "cron",
                "etl",
                DEFAULT_CLUSTER,
                &[JobStatus::Active, JobStatus::Paused],
            )
            .unwrap();
        assert_eq!(both.len(), 2);
    }

    #[test]
    fn job_groups_and_types_are_distinct_and_cluster_scoped() {
        let store = prepared_store();
        jobs(&store).insert(&test_job("a")).unwrap();
        jobs(&store).insert(&test_job("b")).unwrap();
        let mut elsewhere = test_job("c");
        elsewhere.cluster = Some("other-cluster".to_string());
        elsewhere.group = "elsewhere".to_string();
        jobs(&store).insert(&elsewhere).unwrap();

        assert_eq!(
            jobs(&store).get_all_groups(DEFAULT_CLUSTER).unwrap(),
            vec!["etl"]
        );
        assert_eq!(
            jobs(&store).get_all_types(DEFAULT_CLUSTER).unwrap(),
            vec!["cron"]
        );
        assert_eq!(
            jobs(&store).get_all_groups("other-cluster").unwrap(),
            vec!["elsewhere"]
        );
    }

    #[test]
    fn job_pages_are_disjoint_and_reproduce_get_all() {
        let store = prepared_store();
        for code in ["a", "b", "c", "d", "e"] {
            jobs(&store).insert(&test_job(code)).unwrap();
        }

        let mut paged = Vec::new();
        for page in 0..3 {
            let result = jobs(&store).get_page_by_code(page, 2).unwrap();
            assert_eq!(result.total, 5);
            paged.extend(result.jobs);
        }
        let codes: Vec<&str> = paged.iter().map(|j| j.code.as_str()).collect();
        assert_eq!(codes, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn job_page_past_end_is_empty() {
        let store = prepared_store();
        jobs(&store).insert(&test_job("only")).unwrap();

        let result = jobs(&store).get_page_by_code(3, 10).unwrap();
        assert!(result.jobs.is_empty());
        assert_eq!(result.total, 1);
    }

    // ── Iteration log ──────────────────────────────────────────────

    #[test]
    fn iterations_page_newest_first() {
        let store = prepared_store();
        let oldest = test_iteration("job-1", IterationStatus::Succeeded, -20);
        let middle = test_iteration("job-1", IterationStatus::Failed, -10);
        let newest = test_iteration("job-1", IterationStatus::Running, 0);
        for it in [&oldest, &middle, &newest] {
            iterations(&store).insert(it).unwrap();
        }

        let page = iterations(&store)
            .get_page_by_timestamp(Some("job-1"), None, 0, 10)
            .unwrap();
        assert_eq!(page.total, 3);
        let ids: Vec<Uuid> = page.iterations.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![newest.id, middle.id, oldest.id]);
    }

    #[test]
    fn iterations_filter_by_job_and_status() {
        let store = prepared_store();
        iterations(&store)
            .insert(&test_iteration("job-1", IterationStatus::Failed, -2))
            .unwrap();
        iterations(&store)
            .insert(&test_iteration("job-1", IterationStatus::Succeeded, -1))
            .unwrap();
        iterations(&store)
            .insert(&test_iteration("job-2", IterationStatus::Failed, 0))
            .unwrap();

        let failed = iterations(&store)
            .get_page_by_timestamp(Some("job-1"), Some(&[IterationStatus::Failed]), 0, 10)
            .unwrap();
        assert_eq!(failed.total, 1);
        assert_eq!(failed.iterations[0].job_id, "job-1");

        let all_failed = iterations(&store)
            .get_page_by_timestamp(None, Some(&[IterationStatus::Failed]), 0, 10)
            .unwrap();
        assert_eq!(all_failed.total, 2);
    }

    #[test]
    fn iterations_pages_are_disjoint() {
        let store = prepared_store();
        for offset in 0..5 {
            iterations(&store)
                .insert(&test_iteration("job-1", IterationStatus::Succeeded, -offset))
                .unwrap();
        }

        let mut seen = Vec::new();
        for page in 0..3 {
            let result = iterations(&store)
                .get_page_by_timestamp(Some("job-1"), None, page, 2)
                .unwrap();
            seen.extend(result.iterations.into_iter().map(|i| i.id));
        }
        assert_eq!(seen.len(), 5);
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 5, "pages overlapped");
    }

    #[test]
    fn iteration_prefix_does_not_leak_across_job_ids() {
        // "job-1" must not match iterations of "job-10".
        let store = prepared_store();
        iterations(&store)
            .insert(&test_iteration("job-1", IterationStatus::Succeeded, 0))
            .unwrap();
        iterations(&store)
            .insert(&test_iteration("job-10", IterationStatus::Succeeded, 0))
            .unwrap();

        let page = iterations(&store)
            .get_page_by_timestamp(Some("job-1"), None, 0, 10)
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.iterations[0].job_id, "job-1");
    }

    // ── Agent registry ─────────────────────────────────────────────

    #[test]
    fn agent_upsert_and_get() {
        let store = prepared_store();
        let agent = test_agent("worker-1");

        agents(&store).upsert(&agent).unwrap();
        assert_eq!(
            agents(&store).get_by_id("worker-1").unwrap(),
            Some(agent.clone())
        );

        // Upsert replaces.
        let mut moved = agent;
        moved.cluster = "edge".to_string();
        agents(&store).upsert(&moved).unwrap();
        assert_eq!(
            agents(&store).get_by_id("worker-1").unwrap().unwrap().cluster,
            "edge"
        );
    }

    #[test]
    fn agent_list_and_delete() {
        let store = prepared_store();
        agents(&store).upsert(&test_agent("worker-1")).unwrap();
        agents(&store).upsert(&test_agent("worker-2")).unwrap();

        assert_eq!(agents(&store).get_all().unwrap().len(), 2);
        assert!(agents(&store).delete_by_id("worker-1").unwrap().is_some());
        assert!(agents(&store).delete_by_id("worker-1").unwrap().is_none());
        assert_eq!(agents(&store).get_all().unwrap().len(), 1);
    }

    // ── Persistence (on-disk) ──────────────────────────────────────

    #[test]
    fn persistence_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("jobgrid.redb");

        {
            let store = RedbStore::open(&db_path).unwrap();
            jobs(&store).prepare().unwrap();
            jobs(&store).insert(&test_job("durable")).unwrap();
        }

        // Reopen the same database file.
        let store = RedbStore::open(&db_path).unwrap();
        jobs(&store).prepare().unwrap();
        let job = jobs(&store).get_by_id("durable").unwrap();
        assert_eq!(job.unwrap().code, "durable");
    }

    #[test]
    fn prepare_is_idempotent() {
        let store = prepared_store();
        jobs(&store).prepare().unwrap();
        iterations(&store).prepare().unwrap();
        agents(&store).prepare().unwrap();
        assert!(jobs(&store).get_all().unwrap().is_empty());
    }
}
