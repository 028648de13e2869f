//! Structural resolution: find run handles nested anywhere inside a
//! [`Value`] tree and replace them in place, keeping the container shape.
//!
//! Two entry points, differing only in what a discovered handle becomes:
//! - [`resolve_to_values`]: the run's produced payload (a Failed/Cancelled
//!   run aborts the whole resolution with [`TetherError::Upstream`]).
//! - [`resolve_to_statuses`]: the terminal [`RunStatus`] itself, left for the
//!   caller to branch on.
//!
//! Both wait without a timeout, so the walk completes only once every handle
//! in the tree is terminal. Siblings resolve sequentially; callers only ever
//! see the fully rebuilt tree.

mod value;

pub use self::value::{Key, Record, Value};

use std::future::Future;
use std::pin::Pin;

use tracing::trace;

use crate::bridge;
use crate::domain::TetherError;
use crate::handle::RunHandle;

/// What a resolved handle leaf turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Leaf {
    Data,
    Status,
}

/// Resolve every handle in `value` into the payload its run produced.
pub async fn resolve_to_values(value: Value) -> Result<Value, TetherError> {
    visit(value, Leaf::Data).await
}

/// Resolve every handle in `value` into its terminal status.
pub async fn resolve_to_statuses(value: Value) -> Result<Value, TetherError> {
    visit(value, Leaf::Status).await
}

/// Blocking form of [`resolve_to_values`].
pub fn resolve_to_values_blocking(value: Value) -> Result<Value, TetherError> {
    bridge::block_on(resolve_to_values(value))
}

/// Blocking form of [`resolve_to_statuses`].
pub fn resolve_to_statuses_blocking(value: Value) -> Result<Value, TetherError> {
    bridge::block_on(resolve_to_statuses(value))
}

/// Depth-first rebuild. Boxed because the future recurses through itself;
/// the tree depth bounds the box chain.
fn visit(
    value: Value,
    leaf: Leaf,
) -> Pin<Box<dyn Future<Output = Result<Value, TetherError>> + Send>> {
    Box::pin(async move {
        match value {
            Value::Handle(handle) => resolve_leaf(handle, leaf).await,

            Value::List(items) => {
                let mut resolved = Vec::with_capacity(items.len());
                for item in items {
                    resolved.push(visit(item, leaf).await?);
                }
                Ok(Value::List(resolved))
            }

            // Re-dedupe after resolution: distinct handles may produce equal
            // values.
            Value::Set(items) => {
                let mut resolved = Vec::with_capacity(items.len());
                for item in items {
                    resolved.push(visit(item, leaf).await?);
                }
                Ok(Value::set(resolved))
            }

            // Keys pass through verbatim; only the values are walked.
            Value::Map(entries) => {
                let mut resolved = Vec::with_capacity(entries.len());
                for (key, item) in entries {
                    resolved.push((key, visit(item, leaf).await?));
                }
                Ok(Value::Map(resolved))
            }

            // Same schema out as in, field by field.
            Value::Record(record) => {
                let (schema, fields) = record.into_parts();
                let mut resolved = Vec::with_capacity(fields.len());
                for (name, item) in fields {
                    resolved.push((name, visit(item, leaf).await?));
                }
                Ok(Value::Record(Record::new(schema, resolved)))
            }

            // Scalars and already-resolved statuses pass through unchanged.
            other => Ok(other),
        }
    })
}

async fn resolve_leaf(handle: RunHandle, leaf: Leaf) -> Result<Value, TetherError> {
    let id = handle.id();
    trace!(%id, ?leaf, "resolving handle");

    // No timeout, so wait only returns on a terminal status.
    let status = match handle.wait(None).await? {
        Some(status) => status,
        None => {
            // An untimed wait cannot time out; a backend that returns empty
            // anyway has broken the Executor contract.
            return Err(TetherError::Executor(format!(
                "backend returned no status from an untimed wait for {id}"
            )));
        }
    };

    match leaf {
        Leaf::Data => Ok(Value::from(status.into_result(id)?)),
        Leaf::Status => Ok(Value::Status(status)),
    }
}
