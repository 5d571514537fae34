//! redb table definitions for the Jobgrid stores.
//!
//! Each table uses `&str` keys and `&[u8]` values (JSON-serialized domain
//! types). Iteration keys embed an inverted millisecond timestamp so a
//! forward key scan yields newest-first order.

use redb::TableDefinition;

/// Job definitions keyed by `{code}`.
pub const JOBS: TableDefinition<&str, &[u8]> = TableDefinition::new("jobs");

/// Job iterations keyed by `{job_id}:{inverted_millis:020}:{uuid}`.
pub const ITERATIONS: TableDefinition<&str, &[u8]> = TableDefinition::new("iterations");

/// Agent definitions keyed by `{agent_id}`.
pub const AGENTS: TableDefinition<&str, &[u8]> = TableDefinition::new("agents");
