/**
 * Connection Registry
 *
 * Tracks live WebSocket connections and their room memberships, and
 * provides the delivery primitives the message router fans out with.
 *
 * # Design
 *
 * The registry is an explicit, cloneable object held in `AppState` and
 * passed by handle to handler functions; nothing reaches it as ambient
 * global state, which keeps it unit-testable with fake connections.
 *
 * Internally it is a `Mutex<HashMap<ConnectionId, entry>>`. The lock is
 * only held for short synchronous sections and never across an await,
 * preserving the single-writer-at-a-time property.
 *
 * # Delivery semantics
 *
 * All delivery is fire-and-forget, at-most-once: events are pushed into
 * each connection's unbounded channel, and a send to a connection that
 * has since disconnected is silently dropped.
 *
 * # User channels
 *
 * Direct (1:1) delivery targets the channel named by the receiver's
 * user id: a client subscribes to its own messages by joining the room
 * labelled with its uuid string. `deliver_to_user` is room broadcast
 * under that label.
 */

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::chat::events::ServerEvent;

/// Opaque identity of a live connection, assigned at connect time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One live connection: its outbound channel and joined rooms.
struct ConnectionEntry {
    tx: mpsc::UnboundedSender<ServerEvent>,
    rooms: HashSet<String>,
}

/// Registry of live connections and room memberships.
#[derive(Clone, Default)]
pub struct ChatRegistry {
    inner: Arc<Mutex<HashMap<ConnectionId, ConnectionEntry>>>,
}

impl ChatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new connection with no room memberships.
    ///
    /// `tx` is the channel the transport's writer task drains into the
    /// socket sink.
    pub fn register(&self, tx: mpsc::UnboundedSender<ServerEvent>) -> ConnectionId {
        let id = ConnectionId(Uuid::new_v4());
        let mut inner = self.inner.lock().unwrap();
        inner.insert(
            id,
            ConnectionEntry {
                tx,
                rooms: HashSet::new(),
            },
        );
        id
    }

    /// Remove a connection and all its memberships.
    pub fn remove(&self, id: ConnectionId) {
        self.inner.lock().unwrap().remove(&id);
    }

    /// Idempotently add `room` to the connection's membership set.
    ///
    /// Unknown connections are ignored (the peer raced a disconnect).
    pub fn join(&self, id: ConnectionId, room: &str) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(entry) = inner.get_mut(&id) {
            entry.rooms.insert(room.to_string());
        }
    }

    /// Whether the connection is currently a member of `room`.
    pub fn is_member(&self, id: ConnectionId, room: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .get(&id)
            .map(|e| e.rooms.contains(room))
            .unwrap_or(false)
    }

    /// Deliver an event to a single connection.
    pub fn send_to_connection(&self, id: ConnectionId, event: ServerEvent) {
        let inner = self.inner.lock().unwrap();
        if let Some(entry) = inner.get(&id) {
            let _ = entry.tx.send(event);
        }
    }

    /// Deliver an event to every connection joined to `room`.
    ///
    /// Returns the number of connections the event was pushed to.
    pub fn broadcast_to_room(&self, room: &str, event: ServerEvent) -> usize {
        let inner = self.inner.lock().unwrap();
        let mut delivered = 0;
        for entry in inner.values().filter(|e| e.rooms.contains(room)) {
            if entry.tx.send(event.clone()).is_ok() {
                delivered += 1;
            }
        }
        delivered
    }

    /// Deliver an event to the channel associated with a user identity.
    pub fn deliver_to_user(&self, user_id: Uuid, event: ServerEvent) -> usize {
        self.broadcast_to_room(&user_id.to_string(), event)
    }

    /// Deliver an event to every currently connected client.
    pub fn broadcast_to_all(&self, event: ServerEvent) -> usize {
        let inner = self.inner.lock().unwrap();
        let mut delivered = 0;
        for entry in inner.values() {
            if entry.tx.send(event.clone()).is_ok() {
                delivered += 1;
            }
        }
        delivered
    }

    /// Number of live connections (for logging and tests).
    pub fn connection_count(&self) -> usize {
        self.inner.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_connection(
        registry: &ChatRegistry,
    ) -> (ConnectionId, mpsc::UnboundedReceiver<ServerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (registry.register(tx), rx)
    }

    fn error_event(msg: &str) -> ServerEvent {
        ServerEvent::Error {
            message: msg.to_string(),
        }
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<ServerEvent>) -> Vec<ServerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_register_and_remove() {
        let registry = ChatRegistry::new();
        let (id, _rx) = fake_connection(&registry);
        assert_eq!(registry.connection_count(), 1);

        registry.remove(id);
        assert_eq!(registry.connection_count(), 0);
    }

    #[test]
    fn test_room_broadcast_reaches_members_only() {
        let registry = ChatRegistry::new();
        let (a, mut rx_a) = fake_connection(&registry);
        let (_b, mut rx_b) = fake_connection(&registry);

        registry.join(a, "r1");
        let delivered = registry.broadcast_to_room("r1", error_event("x"));

        assert_eq!(delivered, 1);
        assert_eq!(drain(&mut rx_a).len(), 1);
        assert_eq!(drain(&mut rx_b).len(), 0);
    }

    #[test]
    fn test_idempotent_join_delivers_one_copy() {
        let registry = ChatRegistry::new();
        let (a, mut rx_a) = fake_connection(&registry);

        registry.join(a, "r1");
        registry.join(a, "r1");

        registry.broadcast_to_room("r1", error_event("x"));
        assert_eq!(drain(&mut rx_a).len(), 1);
    }

    #[test]
    fn test_broadcast_to_all_includes_everyone() {
        let registry = ChatRegistry::new();
        let (_a, mut rx_a) = fake_connection(&registry);
        let (_b, mut rx_b) = fake_connection(&registry);

        let delivered = registry.broadcast_to_all(error_event("x"));
        assert_eq!(delivered, 2);
        assert_eq!(drain(&mut rx_a).len(), 1);
        assert_eq!(drain(&mut rx_b).len(), 1);
    }

    #[test]
    fn test_deliver_to_user_targets_user_channel() {
        let registry = ChatRegistry::new();
        let user = Uuid::new_v4();
        let (a, mut rx_a) = fake_connection(&registry);
        let (_b, mut rx_b) = fake_connection(&registry);

        registry.join(a, &user.to_string());
        let delivered = registry.deliver_to_user(user, error_event("x"));

        assert_eq!(delivered, 1);
        assert_eq!(drain(&mut rx_a).len(), 1);
        assert_eq!(drain(&mut rx_b).len(), 0);
    }

    #[test]
    fn test_remove_drops_memberships() {
        let registry = ChatRegistry::new();
        let (a, _rx_a) = fake_connection(&registry);

        registry.join(a, "r1");
        registry.remove(a);

        assert_eq!(registry.broadcast_to_room("r1", error_event("x")), 0);
        assert!(!registry.is_member(a, "r1"));
    }

    #[test]
    fn test_send_to_closed_connection_is_dropped() {
        let registry = ChatRegistry::new();
        let (tx, rx) = mpsc::unbounded_channel();
        let id = registry.register(tx);
        drop(rx);

        // No panic, no error surfaced
        registry.send_to_connection(id, error_event("x"));
        assert_eq!(registry.broadcast_to_all(error_event("x")), 0);
    }
}
