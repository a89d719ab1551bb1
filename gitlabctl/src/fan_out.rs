//! Structured fan-out/fan-in over tokio tasks.

use std::future::Future;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, Instrument};

/// Runs `task` once per input, each on its own tokio task, and collects the
/// results in input order.
///
/// Every result is written to the slot of the input that produced it. The
/// first error wins: remaining tasks are aborted and the error is returned
/// without any partial results. The worker ID handed to `task` is the input
/// index.
pub(crate) async fn fan_out<I, T, E, F, Fut>(inputs: Vec<I>, task: F) -> Result<Vec<T>, E>
where
    F: Fn(usize, I) -> Fut,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: From<JoinError> + Send + 'static,
{
    let mut slots: Vec<Option<T>> = Vec::with_capacity(inputs.len());
    slots.resize_with(inputs.len(), || None);

    let mut set = JoinSet::new();
    for (worker_id, input) in inputs.into_iter().enumerate() {
        let fut = task(worker_id, input);
        set.spawn(async move { (worker_id, fut.await) }.in_current_span());
    }

    while let Some(joined) = set.join_next().await {
        let (worker_id, result) = match joined {
            Ok(joined) => joined,
            Err(e) => {
                set.abort_all();
                return Err(E::from(e));
            }
        };

        match result {
            Ok(value) => slots[worker_id] = Some(value),
            Err(e) => {
                debug!(worker_id, remaining = set.len(), "Task failed, cancelling siblings");
                set.abort_all();
                return Err(e);
            }
        }
    }

    // Every task joined successfully, so every slot is filled.
    Ok(slots.into_iter().flatten().collect())
}
