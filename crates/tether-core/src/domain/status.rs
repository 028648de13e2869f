//! Run status model.
//!
//! Statuses are produced by the execution side and persisted in the status
//! store; this crate only consumes them. The one rule that matters here:
//! a terminal status is an immutable fact and never changes again.
//!
//! State transitions (owned by the execution side, documented for reference):
//! - Pending -> Running -> Completed
//! - Pending -> Running -> Failed
//! - Pending | Running -> Cancelled

use serde::{Deserialize, Serialize};

use super::errors::TetherError;
use super::ids::RunId;

/// Current status of a remote run.
///
/// We intentionally serialize the tag as SCREAMING_SNAKE_CASE to match the
/// store-side naming: PENDING / RUNNING / COMPLETED / FAILED / CANCELLED.
///
/// `data` on Completed/Failed is an opaque payload: this crate forwards it,
/// never interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    /// Submitted, not yet picked up.
    Pending,

    /// Currently executing.
    Running,

    /// Finished successfully. `data` may lag behind the state flip while the
    /// result is still being attached.
    Completed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<serde_json::Value>,
    },

    /// Finished with an error.
    Failed {
        reason: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<serde_json::Value>,
    },

    /// Cancelled before completion.
    Cancelled {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
}

impl RunStatus {
    /// Is this a terminal status (will never change again)?
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Completed { .. } | RunStatus::Failed { .. } | RunStatus::Cancelled { .. }
        )
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, RunStatus::Completed { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunStatus::Failed { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunStatus::Cancelled { .. })
    }

    /// Does this status carry a usable payload?
    ///
    /// Only Completed/Failed can carry one, and only once the execution side
    /// has attached it.
    pub fn has_data(&self) -> bool {
        matches!(
            self,
            RunStatus::Completed { data: Some(_) } | RunStatus::Failed { data: Some(_), .. }
        )
    }

    /// Borrow the payload, if attached.
    pub fn data(&self) -> Option<&serde_json::Value> {
        match self {
            RunStatus::Completed { data } | RunStatus::Failed { data, .. } => data.as_ref(),
            _ => None,
        }
    }

    /// Short tag name for logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            RunStatus::Pending => "PENDING",
            RunStatus::Running => "RUNNING",
            RunStatus::Completed { .. } => "COMPLETED",
            RunStatus::Failed { .. } => "FAILED",
            RunStatus::Cancelled { .. } => "CANCELLED",
        }
    }

    /// Unwrap a status into its produced value.
    ///
    /// Completed yields the attached payload (Null when none was attached).
    /// Everything else becomes [`TetherError::Upstream`] carrying the status,
    /// so the caller keeps the original reason/payload. Total on purpose:
    /// `wait(None)` only hands terminal statuses to this path, but a
    /// non-terminal input must not panic.
    pub fn into_result(self, id: RunId) -> Result<serde_json::Value, TetherError> {
        match self {
            RunStatus::Completed { data } => Ok(data.unwrap_or(serde_json::Value::Null)),
            other => Err(TetherError::Upstream { id, status: other }),
        }
    }
}
