use crate::state::AppState;
use std::sync::Arc;
use std::time::Duration;

/// Spawn a background task that drops stale liveness entries
pub fn spawn_liveness_pruner(state: Arc<AppState>, every: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every.max(Duration::from_secs(1)));
        loop {
            interval.tick().await;
            state.prune_liveness().await;
            tracing::trace!("Pruned liveness entries");
        }
    });
}
