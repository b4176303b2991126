//! Runs CPU-bound work on the blocking pool with the caller's trace id.

use crate::domain::TraceId;

/// Run `work` via `spawn_blocking`, re-entering the current [`TraceId`] scope.
pub(super) async fn run_blocking<F, R>(work: F) -> Result<R, tokio::task::JoinError>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let trace_id = TraceId::current();
    tokio::task::spawn_blocking(move || match trace_id {
        Some(id) => TraceId::sync_scope(id, work),
        None => work(),
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn trace_id_follows_work_onto_blocking_pool() {
        let expected = TraceId::generate();
        let observed = TraceId::scope(expected, async {
            run_blocking(TraceId::current).await.expect("join")
        })
        .await;
        assert_eq!(observed, Some(expected));
    }
}
