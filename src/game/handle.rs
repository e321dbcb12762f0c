//! Shared handle to the game world
//!
//! Every operation locks the world for its whole body and publishes its
//! broadcast before the lock is released. Broadcasts are therefore totally
//! ordered and always describe a fully applied state.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

use crate::ws::protocol::ServerMsg;

use super::broadcast::Broadcaster;
use super::registry::PlayerUpdate;
use super::snapshot::{build_init, build_update};
use super::world::{GameWorld, TickReport};
use super::GameError;

#[derive(Clone)]
pub struct GameHandle {
    world: Arc<Mutex<GameWorld>>,
    hub: Broadcaster,
}

impl GameHandle {
    pub fn new(world: GameWorld, hub: Broadcaster) -> Self {
        Self {
            world: Arc::new(Mutex::new(world)),
            hub,
        }
    }

    /// Register a session. Returns its `init` message and a subscription
    /// that receives every broadcast issued after that snapshot.
    pub fn connect(&self, session_id: Uuid) -> (ServerMsg, broadcast::Receiver<ServerMsg>) {
        let mut world = self.world.lock();
        world.on_connect(session_id);
        let init = build_init(&world, session_id);
        let rx = self.hub.subscribe();
        (init, rx)
    }

    /// Apply a client update and broadcast the new state
    pub fn update(&self, session_id: Uuid, update: PlayerUpdate) -> Result<(), GameError> {
        let mut world = self.world.lock();
        world.on_update(session_id, update)?;
        self.hub.publish(build_update(&world, None));
        Ok(())
    }

    /// Replace the collectible on request. `false` is a no-op.
    pub fn refresh_collectible(&self, requested: bool) -> bool {
        if !requested {
            return false;
        }

        let mut world = self.world.lock();
        let id = world.respawn_collectible().id;
        debug!(collectible_id = %id, "Collectible refreshed on request");
        self.hub.publish(build_update(&world, None));
        true
    }

    /// Remove the session's player, announce the removal, then broadcast
    /// the remaining roster. Returns false if the session was unknown.
    pub fn disconnect(&self, session_id: Uuid) -> bool {
        let mut world = self.world.lock();
        if world.on_disconnect(session_id).is_none() {
            return false;
        }

        self.hub.publish(ServerMsg::RemovePlayer { session_id });
        self.hub.publish(build_update(&world, None));
        true
    }

    /// Run one simulation step and broadcast its outcome notices followed
    /// by a single post-tick snapshot
    pub fn tick(&self) -> TickReport {
        let mut world = self.world.lock();
        let report = world.tick();

        for outcome in &report.outcomes {
            self.hub.publish((*outcome).into());
        }
        self.hub.publish(build_update(&world, report.affected));

        report
    }

    /// Run a closure against the current state
    pub fn inspect<R>(&self, f: impl FnOnce(&GameWorld) -> R) -> R {
        f(&*self.world.lock())
    }
}
