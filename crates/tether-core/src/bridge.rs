//! Blocking/async calling-convention bridge.
//!
//! Every operation in this crate is written once, as an `async fn`. The
//! `*_blocking` variants are one-line wrappers over [`block_on`], so the
//! query/caching logic is never duplicated per calling convention.

use std::future::Future;
use std::sync::OnceLock;

use tokio::runtime::{Builder, Handle, Runtime};

/// Drive a future to completion on the calling thread.
///
/// Inside a tokio runtime this uses `block_in_place`, so the worker thread
/// may block without starving the rest of the runtime; that requires the
/// multi-thread runtime flavor. Outside any runtime, a lazily-built
/// process-wide current-thread runtime drives the future.
pub fn block_on<F: Future>(fut: F) -> F::Output {
    match Handle::try_current() {
        Ok(handle) => tokio::task::block_in_place(|| handle.block_on(fut)),
        Err(_) => fallback_runtime().block_on(fut),
    }
}

fn fallback_runtime() -> &'static Runtime {
    static RT: OnceLock<Runtime> = OnceLock::new();
    RT.get_or_init(|| {
        Builder::new_current_thread()
            .enable_time()
            .build()
            .expect("building the fallback runtime cannot fail without OS resource exhaustion")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_a_future_outside_any_runtime() {
        let value = block_on(async { 40 + 2 });
        assert_eq!(value, 42);
    }

    #[test]
    fn timers_work_on_the_fallback_runtime() {
        block_on(async {
            tokio::time::sleep(std::time::Duration::from_millis(1)).await;
        });
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn runs_a_future_from_inside_a_runtime() {
        // A blocking call site on a runtime worker thread takes the
        // block_in_place path.
        let value = block_on(async { "same result" });
        assert_eq!(value, "same result");
    }
}
