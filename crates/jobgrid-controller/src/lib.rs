//! jobgrid-controller — the stateless engine of the Jobgrid control plane.
//!
//! The [`JobSchedulerController`] enforces job and agent lifecycle rules
//! (creation defaults, immutability, status transitions) and computes the
//! incremental change-set workers pull through the status exchange. It
//! holds no state of its own beyond handles to the injected stores; every
//! operation is a self-contained read-modify-write cycle and is safe to
//! run from any number of concurrent tasks.
//!
//! # Error model
//!
//! "Not found" and "already exists" are fail-soft: operations return
//! `Ok(None)` and the caller distinguishes outcomes by presence of a
//! result. Only storage faults surface as `Err`.

pub mod controller;
pub mod error;
mod sync;

pub use controller::JobSchedulerController;
pub use error::{ControllerError, ControllerResult};
