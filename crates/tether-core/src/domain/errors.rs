//! Error taxonomy.
//!
//! Note what is *not* here: a wait timeout. An elapsed timeout is a normal
//! outcome (`Ok(None)` from `wait`) and the handle stays usable, so it never
//! surfaces as an error.

use thiserror::Error;

use super::ids::RunId;
use super::status::RunStatus;

#[derive(Debug, Error)]
pub enum TetherError {
    /// The status store has no record for this id. This is a consistency
    /// error on the caller's side (bad id, or the store lost the record);
    /// it is never retried and never cached.
    #[error("no run found for {0}")]
    NotFound(RunId),

    /// The run reached a terminal status other than Completed. Carries the
    /// original status so the failure payload/reason survives propagation.
    #[error("run {id} finished as {}", .status.name())]
    Upstream { id: RunId, status: RunStatus },

    /// Status store transport failure.
    #[error("status store: {0}")]
    Store(String),

    /// Execution backend failure.
    #[error("executor: {0}")]
    Executor(String),
}
