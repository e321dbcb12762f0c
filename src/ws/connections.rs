//! Live connection bookkeeping

use dashmap::DashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use uuid::Uuid;

use crate::util::time::unix_millis;

/// A connected client as seen by the transport
#[derive(Debug, Clone)]
pub struct ClientConnection {
    pub peer_addr: Option<SocketAddr>,
    pub connected_at: u64,
}

/// Sockets currently open, independent of the game state
#[derive(Clone, Default)]
pub struct ConnectionTracker {
    connections: Arc<DashMap<Uuid, ClientConnection>>,
}

impl ConnectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new connection and return the number now open
    pub fn open(&self, session_id: Uuid, peer_addr: Option<SocketAddr>) -> usize {
        self.connections.insert(
            session_id,
            ClientConnection {
                peer_addr,
                connected_at: unix_millis(),
            },
        );
        self.connections.len()
    }

    /// Forget a connection, returning what was recorded for it
    pub fn close(&self, session_id: Uuid) -> Option<ClientConnection> {
        self.connections.remove(&session_id).map(|(_, conn)| conn)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_open_connections() {
        let tracker = ConnectionTracker::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let addr: SocketAddr = "127.0.0.1:5000".parse().unwrap();

        assert_eq!(tracker.open(a, Some(addr)), 1);
        assert_eq!(tracker.open(b, None), 2);

        let closed = tracker.close(a).unwrap();
        assert_eq!(closed.peer_addr, Some(addr));
        assert!(closed.connected_at > 0);
        assert!(tracker.close(a).is_none());
        assert_eq!(tracker.len(), 1);
    }
}
