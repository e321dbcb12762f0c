//! Session registry: one player per live connection

use uuid::Uuid;

use super::entity::Player;
use super::GameError;

/// Fields a client is allowed to overwrite on its own player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerUpdate {
    pub x: i32,
    pub y: i32,
    pub score: i32,
    pub radius: i32,
}

/// Players keyed by session id, kept in join order
#[derive(Debug, Default)]
pub struct SessionRegistry {
    players: Vec<Player>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn get(&self, session_id: Uuid) -> Option<&Player> {
        self.players.iter().find(|p| p.id == session_id)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Player> {
        self.players.iter_mut()
    }

    /// Insert a player. A session that is already registered is replaced,
    /// so there is never more than one entry per id.
    pub fn insert(&mut self, player: Player) -> &Player {
        let idx = match self.players.iter().position(|p| p.id == player.id) {
            Some(idx) => {
                self.players[idx] = player;
                idx
            }
            None => {
                self.players.push(player);
                self.players.len() - 1
            }
        };
        &self.players[idx]
    }

    /// Overwrite the client-owned fields. No plausibility checks are made.
    pub fn apply_update(&mut self, session_id: Uuid, update: PlayerUpdate) -> Result<(), GameError> {
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == session_id)
            .ok_or(GameError::UnknownSession(session_id))?;

        player.x = update.x;
        player.y = update.y;
        player.score = update.score;
        player.radius = update.radius;
        Ok(())
    }

    pub fn remove(&mut self, session_id: Uuid) -> Option<Player> {
        let idx = self.players.iter().position(|p| p.id == session_id)?;
        Some(self.players.remove(idx))
    }
}
