//! jobgrid-model — domain types for the Jobgrid control plane.
//!
//! Defines the persisted entities (job definitions, job iterations, agent
//! definitions) and the transient exchange types workers use to reconcile
//! their local job state against the catalog.
//!
//! All types are serde-serializable; timestamps are `chrono::DateTime<Utc>`
//! and are compared at millisecond precision everywhere (see
//! [`same_instant`]), matching the precision they are serialized at.

pub mod exchange;
pub mod types;

pub use exchange::*;
pub use types::*;
