//! Game simulation modules

pub mod arena;
pub mod broadcast;
pub mod constants;
pub mod entity;
pub mod handle;
pub mod registry;
pub mod scheduler;
pub mod snapshot;
pub mod spawn;
pub mod world;

pub use arena::Arena;
pub use broadcast::Broadcaster;
pub use entity::{Collectible, Obstacle, Player};
pub use handle::GameHandle;
pub use registry::PlayerUpdate;
pub use scheduler::TickScheduler;
pub use spawn::SpawnGenerator;
pub use world::GameWorld;

use uuid::Uuid;

/// Errors raised by game-state operations
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("No player registered for session {0}")]
    UnknownSession(Uuid),
}
