//! WebSocket protocol message definitions
//! These are the wire types for client-server communication

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::{Collectible, Obstacle, Player};

/// Messages sent from client to server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    /// Periodic report of the client's own player. Every field is required.
    Update {
        x: i32,
        y: i32,
        score: i32,
        radius: i32,
    },

    /// Ask the server to replace the collectible
    RefreshCollectible { refresh: bool },
}

/// Messages sent from server to client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    /// Handshake sent once, only to the newly connected client
    Init {
        session_id: Uuid,
        players: Vec<Player>,
        obstacle: Obstacle,
        collectible: Collectible,
    },

    /// Full state snapshot, sent to everyone
    Update {
        players: Vec<Player>,
        obstacle: Obstacle,
        collectible: Collectible,
        /// Player singled out by the tick that produced this snapshot
        affected_player: Option<Player>,
    },

    /// A session disconnected; clients drop its sprite
    RemovePlayer { session_id: Uuid },

    /// A player reached the winning score
    Won { session_id: Uuid },

    /// A player fell to the losing score
    Lost { session_id: Uuid },
}
