//! Application state shared across routes

use std::sync::Arc;

use crate::config::Config;
use crate::game::{Arena, Broadcaster, GameHandle, GameWorld, SpawnGenerator};
use crate::ws::ConnectionTracker;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub game: GameHandle,
    pub connections: ConnectionTracker,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);

        // One world per process; seeded only when asked to be reproducible
        let spawner = match config.spawn_seed {
            Some(seed) => SpawnGenerator::seeded(Arena::STANDARD, seed),
            None => SpawnGenerator::new(Arena::STANDARD),
        };
        let world = GameWorld::new(spawner);

        let game = GameHandle::new(world, Broadcaster::new(config.broadcast_capacity));

        Self {
            config,
            game,
            connections: ConnectionTracker::new(),
        }
    }
}
