//! Fan-out of server messages to every connected session

use tokio::sync::broadcast;
use tracing::trace;

use crate::ws::protocol::ServerMsg;

/// Default buffer depth, in messages, per subscriber
pub const DEFAULT_CAPACITY: usize = 256;

/// Best-effort broadcast to all subscribed sessions. A message published
/// while nobody is subscribed is dropped.
#[derive(Clone)]
pub struct Broadcaster {
    tx: broadcast::Sender<ServerMsg>,
}

impl Broadcaster {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServerMsg> {
        self.tx.subscribe()
    }

    /// Publish to everyone, returning how many sessions will receive it
    pub fn publish(&self, msg: ServerMsg) -> usize {
        match self.tx.send(msg) {
            Ok(receivers) => receivers,
            Err(_) => {
                trace!("No subscribers, message dropped");
                0
            }
        }
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
