//! Controller error types.

use thiserror::Error;

/// Errors that can escape controller operations.
///
/// Lifecycle outcomes ("not found", "already exists") are not errors;
/// they are `Ok(None)` results. The controller has no local recovery for
/// storage faults, so those pass through unchanged.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("store error: {0}")]
    Store(#[from] jobgrid_store::StoreError),
}

pub type ControllerResult<T> = Result<T, ControllerError>;
