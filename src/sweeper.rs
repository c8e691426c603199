use crate::state::AppState;
use std::sync::Arc;
use std::time::Duration;

/// Spawn a background task that periodically drops idle games
pub fn spawn_game_sweeper(state: Arc<AppState>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        // interval() panics on a zero period
        let period = state.config.game_sweep_interval.max(Duration::from_millis(1));
        let mut interval = tokio::time::interval(period);
        // The first tick completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;

            let removed = state.remove_expired_games().await;
            if removed > 0 {
                tracing::info!(
                    "Removed {} idle games, {} still active",
                    removed,
                    state.game_count().await
                );
            }
        }
    })
}
