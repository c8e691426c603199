use chrono::Utc;

use super::AppState;

impl AppState {
    /// Drop games that have been idle longer than the configured TTL.
    /// Returns how many were removed.
    pub async fn remove_expired_games(&self) -> usize {
        let ttl = self.config.game_idle_ttl;
        let now = Utc::now();

        let mut games = self.games.write().await;
        let before = games.len();
        games.retain(|game_id, session| match session.try_lock() {
            Ok(mut session) => {
                let expired = session.is_idle(ttl, now);
                if expired {
                    session.close();
                    tracing::warn!(
                        "Expiring game {} (created {}, last active {})",
                        game_id,
                        session.created_at.to_rfc3339(),
                        session.last_active.to_rfc3339()
                    );
                }
                !expired
            }
            // Someone is using it right now
            Err(_) => true,
        });

        before - games.len()
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{team_names, test_state};
    use std::time::Duration;

    #[tokio::test]
    async fn test_fresh_games_are_kept() {
        let state = test_state();
        state
            .create_game(team_names(&["Red"]), None)
            .await
            .unwrap();

        assert_eq!(state.remove_expired_games().await, 0);
        assert_eq!(state.game_count().await, 1);
    }

    #[tokio::test]
    async fn test_idle_games_are_removed() {
        let mut state = test_state();
        state.config.game_idle_ttl = Duration::ZERO;
        let game_id = state
            .create_game(team_names(&["Red"]), None)
            .await
            .unwrap();

        assert_eq!(state.remove_expired_games().await, 1);
        assert!(!state.game_exists(&game_id).await);
    }

    #[tokio::test]
    async fn test_busy_games_are_kept() {
        let mut state = test_state();
        state.config.game_idle_ttl = Duration::ZERO;
        let game_id = state
            .create_game(team_names(&["Red"]), None)
            .await
            .unwrap();

        let session = state.games.read().await.get(&game_id).cloned().unwrap();
        let _guard = session.lock().await;

        assert_eq!(state.remove_expired_games().await, 0);
        assert!(state.game_exists(&game_id).await);
    }

    #[tokio::test]
    async fn test_expired_game_rejects_late_answers() {
        let mut state = test_state();
        state.config.game_idle_ttl = Duration::ZERO;
        let game_id = state
            .create_game(team_names(&["Red"]), None)
            .await
            .unwrap();

        // A request that found the game just before it expired
        let session = state.session(&game_id).await.unwrap();
        assert_eq!(state.remove_expired_games().await, 1);

        let session = session.lock().await;
        assert!(session.is_closed());
        assert_eq!(session.game.state().player_states[0].questions_answered, 0);
        assert!(state.submit_answer(&game_id, 0, "Paris").await.is_none());
    }
}
