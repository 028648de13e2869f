//! StatusStore port - run status の正本（source of truth）

use async_trait::async_trait;

use crate::domain::{RunId, RunStatus, TetherError};

/// Read access to the store that persists run statuses by id.
///
/// `Ok(None)` means the store has no record of the id at all; the handle
/// turns that into [`TetherError::NotFound`]. No transactional guarantees
/// are required beyond read-your-writes, eventually.
#[async_trait]
pub trait StatusStore: Send + Sync {
    async fn read_status(&self, id: RunId) -> Result<Option<RunStatus>, TetherError>;
}
