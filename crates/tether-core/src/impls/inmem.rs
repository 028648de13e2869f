//! In-memory status store and executor.
//!
//! Development/test implementations of the two ports. The store holds all
//! statuses in a mutex'd map and wakes waiters on every write; the executor
//! is a thin wait loop over the same store. Good enough to exercise the whole
//! handle/resolver surface without any external service.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};
use tokio::time::Instant;
use tracing::debug;

use crate::domain::{RunId, RunStatus, TetherError};
use crate::handle::RunHandle;
use crate::ports::{Executor, StatusStore};

/// In-memory run status registry.
pub struct InMemoryStatusStore {
    runs: Mutex<HashMap<RunId, RunStatus>>,
    changed: Notify,
}

impl InMemoryStatusStore {
    pub fn new() -> Self {
        Self {
            runs: Mutex::new(HashMap::new()),
            changed: Notify::new(),
        }
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a new run as Pending and return its id.
    pub async fn create_run(&self) -> RunId {
        let id = RunId::new();
        self.runs.lock().await.insert(id, RunStatus::Pending);
        id
    }

    /// Record a status transition and wake waiters.
    ///
    /// Refuses to touch a run whose status is already terminal: terminal
    /// statuses are immutable facts.
    pub async fn set_status(&self, id: RunId, status: RunStatus) -> Result<(), TetherError> {
        {
            let mut runs = self.runs.lock().await;
            let current = runs.get(&id).ok_or(TetherError::NotFound(id))?;
            if current.is_terminal() {
                return Err(TetherError::Store(format!(
                    "{id} is already terminal ({})",
                    current.name()
                )));
            }
            debug!(%id, from = current.name(), to = status.name(), "status transition");
            runs.insert(id, status);
        }
        self.changed.notify_waiters();
        Ok(())
    }

    /// Does the store have a record for this run?
    pub async fn contains(&self, id: RunId) -> bool {
        self.runs.lock().await.contains_key(&id)
    }
}

impl Default for InMemoryStatusStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatusStore for InMemoryStatusStore {
    async fn read_status(&self, id: RunId) -> Result<Option<RunStatus>, TetherError> {
        Ok(self.runs.lock().await.get(&id).cloned())
    }
}

/// Executor whose blocking wait polls the in-memory store on change
/// notifications.
pub struct InMemoryExecutor {
    store: Arc<InMemoryStatusStore>,
}

impl InMemoryExecutor {
    pub fn new(store: Arc<InMemoryStatusStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Executor for InMemoryExecutor {
    async fn wait_for(
        &self,
        handle: &RunHandle,
        timeout: Option<Duration>,
    ) -> Result<Option<RunStatus>, TetherError> {
        let id = handle.id();
        let deadline = timeout.map(|t| Instant::now() + t);

        loop {
            // Subscribe before reading so a write between the read and the
            // await cannot be missed.
            let notified = self.store.changed.notified();

            match self.store.read_status(id).await? {
                Some(status) if status.is_terminal() => return Ok(Some(status)),
                Some(_) => {}
                None => return Err(TetherError::NotFound(id)),
            }

            match deadline {
                None => notified.await,
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Ok(None);
                    }
                    if tokio::time::timeout(deadline - now, notified).await.is_err() {
                        return Ok(None);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn harness() -> (Arc<InMemoryStatusStore>, Arc<InMemoryExecutor>) {
        let store = InMemoryStatusStore::shared();
        let executor = Arc::new(InMemoryExecutor::new(store.clone()));
        (store, executor)
    }

    #[tokio::test]
    async fn create_then_read() {
        let (store, _) = harness();
        let id = store.create_run().await;
        assert!(store.contains(id).await);
        assert_eq!(
            store.read_status(id).await.unwrap(),
            Some(RunStatus::Pending)
        );
        assert_eq!(store.read_status(RunId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn terminal_statuses_cannot_be_overwritten() {
        let (store, _) = harness();
        let id = store.create_run().await;
        store
            .set_status(id, RunStatus::Cancelled { reason: None })
            .await
            .unwrap();

        let err = store
            .set_status(id, RunStatus::Running)
            .await
            .unwrap_err();
        assert!(matches!(err, TetherError::Store(_)));
        assert_eq!(
            store.read_status(id).await.unwrap(),
            Some(RunStatus::Cancelled { reason: None })
        );
    }

    #[tokio::test]
    async fn zero_timeout_returns_immediately_for_unfinished_runs() {
        let (store, executor) = harness();
        let id = store.create_run().await;
        let handle = RunHandle::new(id, store.clone(), executor.clone());

        let waited = executor
            .wait_for(&handle, Some(Duration::ZERO))
            .await
            .unwrap();
        assert_eq!(waited, None);
    }

    #[tokio::test]
    async fn wait_wakes_on_status_change() {
        let (store, executor) = harness();
        let id = store.create_run().await;
        let handle = RunHandle::new(id, store.clone(), executor.clone());

        let writer = {
            let store = store.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                store.set_status(id, RunStatus::Running).await.unwrap();
                tokio::time::sleep(Duration::from_millis(10)).await;
                store
                    .set_status(
                        id,
                        RunStatus::Completed {
                            data: Some(json!("v")),
                        },
                    )
                    .await
                    .unwrap();
            })
        };

        let status = executor
            .wait_for(&handle, Some(Duration::from_secs(5)))
            .await
            .unwrap();
        assert_eq!(
            status,
            Some(RunStatus::Completed {
                data: Some(json!("v"))
            })
        );
        writer.await.unwrap();
    }

    #[tokio::test]
    async fn timeout_fires_when_nothing_happens() {
        let (store, executor) = harness();
        let id = store.create_run().await;
        let handle = RunHandle::new(id, store.clone(), executor.clone());

        let started = std::time::Instant::now();
        let waited = executor
            .wait_for(&handle, Some(Duration::from_millis(20)))
            .await
            .unwrap();
        assert_eq!(waited, None);
        // Returned promptly at the deadline, not stuck.
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
