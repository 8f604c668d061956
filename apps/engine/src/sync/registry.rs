//! Process-wide registry of live game actors.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::info;

use crate::archive::GameArchive;
use crate::config::EngineConfig;
use crate::domain::game::Game;
use crate::errors::domain::{DomainError, GameId};
use crate::sync::actor::{spawn_game, GameHandle};

pub struct GameRegistry {
    config: EngineConfig,
    archive: Arc<dyn GameArchive>,
    games: DashMap<GameId, GameHandle>,
}

impl GameRegistry {
    pub fn new(config: EngineConfig, archive: Arc<dyn GameArchive>) -> Self {
        Self {
            config,
            archive,
            games: DashMap::new(),
        }
    }

    /// Spawn a fresh game actor and return its handle.
    pub fn create_game(&self) -> GameHandle {
        let game = Game::new(self.config.clone());
        let handle = spawn_game(game, Arc::clone(&self.archive));
        info!(game_id = %handle.game_id(), "game created");
        self.games.insert(handle.game_id(), handle.clone());
        handle
    }

    pub fn get(&self, game_id: GameId) -> Result<GameHandle, DomainError> {
        self.games
            .get(&game_id)
            .map(|entry| entry.value().clone())
            .ok_or(DomainError::GameNotFound(game_id))
    }

    /// Drop the registry's handle. The actor exits once the remaining
    /// client handles are gone.
    pub fn remove(&self, game_id: GameId) -> Result<(), DomainError> {
        self.games
            .remove(&game_id)
            .map(|_| ())
            .ok_or(DomainError::GameNotFound(game_id))
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}
