//! tether-core
//!
//! Handles for observing work that executes on a remote backend, and a
//! structural resolver that swaps those handles for their results inside
//! arbitrarily nested data.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, status, errors）
//! - **ports**: 抽象化レイヤー（StatusStore, Executor）
//! - **handle**: RunHandle（wait / get_status / terminal-status cache）
//! - **resolve**: Value ツリーの構造保存リゾルバ
//! - **bridge**: blocking ↔ async 呼び出し規約ブリッジ
//! - **impls**: in-memory 実装（開発・テスト用）
//!
//! # Quick tour
//! ```ignore
//! let store = InMemoryStatusStore::shared();
//! let executor = Arc::new(InMemoryExecutor::new(store.clone()));
//!
//! let id = store.create_run().await;
//! let handle = RunHandle::new(id, store.clone(), executor);
//!
//! // Peek without blocking, wait with a timeout, or wait forever.
//! let now = handle.get_status().await?;
//! let maybe = handle.wait(Some(Duration::from_millis(100))).await?;
//! let done = handle.wait(None).await?;
//!
//! // Or bury handles inside a structure and resolve the whole thing.
//! let out = resolve_to_values(Value::List(vec![handle.into()])).await?;
//! ```

pub mod bridge;
pub mod domain;
pub mod handle;
pub mod impls;
pub mod ports;
pub mod resolve;

pub use self::domain::{RunId, RunStatus, TetherError};
pub use self::handle::RunHandle;
pub use self::impls::{InMemoryExecutor, InMemoryStatusStore};
pub use self::ports::{Executor, StatusStore};
pub use self::resolve::{
    Key, Record, Value, resolve_to_statuses, resolve_to_statuses_blocking, resolve_to_values,
    resolve_to_values_blocking,
};
