//! jobgrid-store — embedded storage for the Jobgrid control plane.
//!
//! Backed by [redb](https://docs.rs/redb), provides the durable homes of
//! the three entity families the controller operates on: the job catalog,
//! the append-only iteration log, and the agent registry.
//!
//! # Architecture
//!
//! The controller consumes storage through the capability traits in
//! [`traits`] ([`JobStore`], [`IterationStore`], [`AgentStore`]); the
//! concrete [`RedbStore`] implements all three over one shared database.
//! Domain values are JSON-serialized into redb's `&[u8]` value columns.
//!
//! `RedbStore` is `Clone` + `Send` + `Sync` (backed by `Arc<Database>`)
//! and can be shared across request-handling tasks. Every operation is a
//! self-contained transaction; nothing is cached across calls.

pub mod error;
pub mod store;
pub mod tables;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use store::RedbStore;
pub use traits::{AgentStore, IterationStore, JobStore};
