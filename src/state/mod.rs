mod expiry;
mod game;

pub use game::CreateGameError;

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::config::ServerConfig;
use crate::engine::TriviaGame;
use crate::types::{GameId, Question};

/// A registered game plus bookkeeping for expiry
#[derive(Debug)]
pub struct GameSession {
    pub game: TriviaGame,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    /// Set once the session leaves the registry
    closed: bool,
}

impl GameSession {
    pub fn new(game: TriviaGame) -> Self {
        let now = Utc::now();
        Self {
            game,
            created_at: now,
            last_active: now,
            closed: false,
        }
    }

    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }

    /// Whether the game was ended or expired
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn close(&mut self) {
        self.closed = true;
    }

    /// Whether the session has been idle for at least `ttl` as of `now`
    pub fn is_idle(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        match (now - self.last_active).to_std() {
            Ok(idle) => idle >= ttl,
            // last_active is in the future
            Err(_) => false,
        }
    }
}

/// Shared application state
///
/// Each game sits behind its own mutex, so answers to one game are applied
/// one at a time while different games never wait on each other.
#[derive(Clone)]
pub struct AppState {
    pub games: Arc<RwLock<HashMap<GameId, Arc<Mutex<GameSession>>>>>,
    /// Question bank every new game is created from
    pub questions: Arc<Vec<Question>>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(questions: Vec<Question>, config: ServerConfig) -> Self {
        Self {
            games: Arc::new(RwLock::new(HashMap::new())),
            questions: Arc::new(questions),
            config,
        }
    }

    /// Look up a game session without holding the registry lock
    async fn session(&self, game_id: &str) -> Option<Arc<Mutex<GameSession>>> {
        self.games.read().await.get(game_id).cloned()
    }

    /// Lock a game for use and mark it active. None if there is no such game.
    async fn open_session(&self, game_id: &str) -> Option<OwnedMutexGuard<GameSession>> {
        lock_open(self.session(game_id).await?).await
    }

    pub async fn game_count(&self) -> usize {
        self.games.read().await.len()
    }
}

/// Lock a session looked up earlier. A game can be ended or expired between
/// the lookup and the lock, in which case it is gone.
async fn lock_open(session: Arc<Mutex<GameSession>>) -> Option<OwnedMutexGuard<GameSession>> {
    let mut session = session.lock_owned().await;
    if session.is_closed() {
        return None;
    }
    session.touch();
    Some(session)
}
