//! Executor port - 実行バックエンドの blocking-wait

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{RunStatus, TetherError};
use crate::handle::RunHandle;

/// The execution backend's blocking-wait primitive.
///
/// Design intent:
/// - The backend runs the work; this trait only exposes "park me until the
///   run behind `handle` is terminal".
/// - With a `timeout`, the call must return promptly at or before the
///   deadline; `Ok(None)` means the timeout elapsed first.
/// - Backends may key internal wait maps by the handle itself (it is
///   `Eq + Hash` by run id).
#[async_trait]
pub trait Executor: Send + Sync {
    async fn wait_for(
        &self,
        handle: &RunHandle,
        timeout: Option<Duration>,
    ) -> Result<Option<RunStatus>, TetherError>;
}
