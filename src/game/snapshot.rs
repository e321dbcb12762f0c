//! Snapshot building for network transmission

use uuid::Uuid;

use crate::ws::protocol::ServerMsg;

use super::world::{GameWorld, Outcome};

/// Handshake for a freshly connected session
pub fn build_init(world: &GameWorld, session_id: Uuid) -> ServerMsg {
    ServerMsg::Init {
        session_id,
        players: world.players().to_vec(),
        obstacle: world.obstacle().clone(),
        collectible: world.collectible().clone(),
    }
}

/// Full-state snapshot. `affected` is looked up after the fact, so the
/// reported player reflects the post-tick state.
pub fn build_update(world: &GameWorld, affected: Option<Uuid>) -> ServerMsg {
    ServerMsg::Update {
        players: world.players().to_vec(),
        obstacle: world.obstacle().clone(),
        collectible: world.collectible().clone(),
        affected_player: affected.and_then(|id| world.player(id).cloned()),
    }
}

impl From<Outcome> for ServerMsg {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Won(session_id) => ServerMsg::Won { session_id },
            Outcome::Lost(session_id) => ServerMsg::Lost { session_id },
        }
    }
}
