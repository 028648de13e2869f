//! Run handles.
//!
//! A [`RunHandle`] is the caller's view onto work executing remotely: it owns
//! the run id, shares the status store and executor with every other handle,
//! and keeps a write-once cache of the terminal status. All observation goes
//! through [`RunHandle::wait`] / [`RunHandle::get_status`].

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tracing::debug;

use crate::bridge;
use crate::domain::{RunId, RunStatus, TetherError};
use crate::ports::{Executor, StatusStore};

/// Handle to a remote run.
///
/// Cloning is cheap and clones share the cache slot: once any clone observes
/// the terminal status, all of them serve it without further I/O.
///
/// Identity is the run id alone. Two handles created independently for the
/// same id compare equal and hash identically, so handles can be de-duplicated
/// in sets or used as map keys.
#[derive(Clone)]
pub struct RunHandle {
    id: RunId,
    store: Arc<dyn StatusStore>,
    executor: Arc<dyn Executor>,

    /// Terminal status, populated at most once. Terminal statuses are
    /// immutable facts, so a lost race on `set` loses nothing.
    final_status: Arc<OnceLock<RunStatus>>,
}

impl RunHandle {
    pub fn new(id: RunId, store: Arc<dyn StatusStore>, executor: Arc<dyn Executor>) -> Self {
        Self {
            id,
            store,
            executor,
            final_status: Arc::new(OnceLock::new()),
        }
    }

    pub fn id(&self) -> RunId {
        self.id
    }

    /// Has a terminal status already been observed and cached?
    pub fn is_resolved(&self) -> bool {
        self.final_status.get().is_some()
    }

    /// Wait for the run to finish and return its terminal status.
    ///
    /// - Cached terminal status: returned immediately, no I/O.
    /// - Otherwise the store is queried once. A terminal status that already
    ///   carries its payload is cached and returned. A non-terminal status,
    ///   or a terminal one whose payload is not yet attached, hands the call
    ///   to the executor's blocking wait.
    /// - With a `timeout`, `Ok(None)` means it elapsed first; the handle is
    ///   untouched and a later `wait` may still succeed. Without one, the
    ///   call blocks until a terminal status exists, so the result is always
    ///   `Some` on the `Ok` path.
    pub async fn wait(
        &self,
        timeout: Option<Duration>,
    ) -> Result<Option<RunStatus>, TetherError> {
        if let Some(status) = self.final_status.get() {
            debug!(id = %self.id, status = status.name(), "wait served from cache");
            return Ok(Some(status.clone()));
        }

        let status = self.read_status().await?;
        if status.is_terminal() && status.has_data() {
            debug!(id = %self.id, status = status.name(), "terminal on first read");
            return Ok(Some(self.cache(status)));
        }

        debug!(id = %self.id, status = status.name(), ?timeout, "delegating to executor");
        match self.executor.wait_for(self, timeout).await? {
            Some(status) => Ok(Some(self.cache(status))),
            None => Ok(None),
        }
    }

    /// Current status straight from the store. Never blocks on the executor,
    /// never caches; this is the "peek" counterpart to [`RunHandle::wait`].
    pub async fn get_status(&self) -> Result<RunStatus, TetherError> {
        self.read_status().await
    }

    /// Blocking form of [`RunHandle::wait`] for non-async call sites.
    pub fn wait_blocking(
        &self,
        timeout: Option<Duration>,
    ) -> Result<Option<RunStatus>, TetherError> {
        bridge::block_on(self.wait(timeout))
    }

    /// Blocking form of [`RunHandle::get_status`].
    pub fn get_status_blocking(&self) -> Result<RunStatus, TetherError> {
        bridge::block_on(self.get_status())
    }

    async fn read_status(&self) -> Result<RunStatus, TetherError> {
        self.store
            .read_status(self.id)
            .await?
            .ok_or(TetherError::NotFound(self.id))
    }

    /// Store into the write-once slot and hand back whatever won. Concurrent
    /// first-time resolvers race on an identical terminal value, so either
    /// writer's value is the right answer.
    fn cache(&self, status: RunStatus) -> RunStatus {
        self.final_status.get_or_init(|| status).clone()
    }
}

impl PartialEq for RunHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for RunHandle {}

impl Hash for RunHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for RunHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunHandle")
            .field("id", &self.id)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
