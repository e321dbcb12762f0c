//! Game world: the authoritative state and the per-tick simulation

use uuid::Uuid;

use super::arena::Arena;
use super::constants::{LOSS_SCORE, OBSTACLE_PENALTY, WIN_SCORE};
use super::entity::{Circle, Collectible, Obstacle, Player};
use super::registry::{PlayerUpdate, SessionRegistry};
use super::spawn::SpawnGenerator;
use super::GameError;

/// Threshold crossing reported to every client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won(Uuid),
    Lost(Uuid),
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Last player whose collision was processed this tick. Earlier
    /// collisions in the same tick are applied but not reported here.
    pub affected: Option<Uuid>,
    /// Win/loss notices in the order they were triggered
    pub outcomes: Vec<Outcome>,
    pub obstacle_hits: u32,
    pub pickups: u32,
}

/// Everything the server is authoritative for
#[derive(Debug)]
pub struct GameWorld {
    arena: Arena,
    registry: SessionRegistry,
    obstacle: Obstacle,
    collectible: Collectible,
    spawner: SpawnGenerator,
}

impl GameWorld {
    /// New world with the obstacle and collectible at fresh spawn points
    pub fn new(mut spawner: SpawnGenerator) -> Self {
        let obstacle = Obstacle::new(spawner.next_position());
        let collectible = Collectible::new(spawner.next_position());
        Self::from_parts(spawner, obstacle, collectible)
    }

    /// Assemble a world from explicit entities
    pub fn from_parts(spawner: SpawnGenerator, obstacle: Obstacle, collectible: Collectible) -> Self {
        Self {
            arena: *spawner.arena(),
            registry: SessionRegistry::new(),
            obstacle,
            collectible,
            spawner,
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn players(&self) -> &[Player] {
        self.registry.players()
    }

    pub fn player(&self, session_id: Uuid) -> Option<&Player> {
        self.registry.get(session_id)
    }

    pub fn player_count(&self) -> usize {
        self.registry.len()
    }

    pub fn obstacle(&self) -> &Obstacle {
        &self.obstacle
    }

    pub fn collectible(&self) -> &Collectible {
        &self.collectible
    }

    /// Register a new session at a fresh spawn point with score 0
    pub fn on_connect(&mut self, session_id: Uuid) -> &Player {
        let player = Player::new(session_id, self.spawner.next_position());
        self.registry.insert(player)
    }

    /// Apply a client-reported state to its own player
    pub fn on_update(&mut self, session_id: Uuid, update: PlayerUpdate) -> Result<(), GameError> {
        self.registry.apply_update(session_id, update)
    }

    /// Drop the session's player, if it still has one
    pub fn on_disconnect(&mut self, session_id: Uuid) -> Option<Player> {
        self.registry.remove(session_id)
    }

    /// Replace the collectible with a new one at a fresh spawn point
    pub fn respawn_collectible(&mut self) -> &Collectible {
        self.collectible = Collectible::new(self.spawner.next_position());
        &self.collectible
    }

    /// Run one simulation step
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();

        self.obstacle.advance(&self.arena);
        debug_assert!(self.arena.contains(self.obstacle.x, self.obstacle.y));

        for player in self.registry.iter_mut() {
            if self.obstacle.collides_with(&*player) {
                player.move_to(self.spawner.next_position());
                player.score = player.score.saturating_sub(OBSTACLE_PENALTY);
                report.obstacle_hits += 1;
                report.affected = Some(player.id);

                if player.score <= LOSS_SCORE {
                    report.outcomes.push(Outcome::Lost(player.id));
                }
            }

            // Test against a copy so the pickup check sees where the
            // player is after any respawn above
            let moved = player.clone();
            if moved.collides_with(&self.collectible) {
                player.score = player.score.saturating_add(self.collectible.value);
                self.collectible = Collectible::new(self.spawner.next_position());
                report.pickups += 1;
                report.affected = Some(player.id);

                if player.score >= WIN_SCORE {
                    report.outcomes.push(Outcome::Won(player.id));
                }
            }
        }

        report
    }
}
