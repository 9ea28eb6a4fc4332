use futures_channel::mpsc::UnboundedSender;
use qdart_core::{AssetId, TeamId};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Room every administrative dashboard joins. Resource mutations land here,
/// and chat traffic to any other room is mirrored here.
pub const COMMAND_ROOM: &str = "command";
/// Shared fan-out room for report creation/update events. Recipients apply
/// their own visibility filter; the broadcaster never geofences.
pub const REPORT_ROOM: &str = "reports";

pub fn team_room(id: TeamId) -> String {
    format!("team_{id}")
}

pub fn asset_room(id: AssetId) -> String {
    format!("asset_{id}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named event delivered to a room, in publish order, at most once.
#[derive(Debug, Clone, Serialize)]
pub struct RoomEvent {
    pub event: String,
    pub data: Value,
}

impl RoomEvent {
    pub fn new(event: impl Into<String>, data: Value) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }
}

#[derive(Debug, Clone)]
struct Subscriber {
    connection: ConnectionId,
    sender: UnboundedSender<RoomEvent>,
}

/// Topic-keyed registry of subscriber handles. Membership is mutated only by
/// join/leave/disconnect; publish reads a snapshot of the current subscribers
/// so concurrent joins never race an in-flight delivery. Fan-out is
/// best-effort: closed handles are dropped, nothing is persisted or replayed.
#[derive(Debug)]
pub struct Broadcaster {
    rooms: RwLock<HashMap<String, Vec<Subscriber>>>,
    command_room: String,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::with_command_room(COMMAND_ROOM)
    }

    pub fn with_command_room(name: impl Into<String>) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            command_room: name.into(),
        }
    }

    pub fn command_room(&self) -> &str {
        &self.command_room
    }

    pub fn join(&self, connection: ConnectionId, room: &str, sender: UnboundedSender<RoomEvent>) {
        let mut rooms = self.rooms.write().unwrap_or_else(|e| e.into_inner());
        let members = rooms.entry(room.to_string()).or_default();
        members.retain(|member| member.connection != connection);
        members.push(Subscriber { connection, sender });
        debug!(%connection, room, members = members.len(), "joined room");
    }

    pub fn leave(&self, connection: ConnectionId, room: &str) {
        let mut rooms = self.rooms.write().unwrap_or_else(|e| e.into_inner());
        if let Some(members) = rooms.get_mut(room) {
            members.retain(|member| member.connection != connection);
            if members.is_empty() {
                rooms.remove(room);
            }
        }
    }

    pub fn disconnect(&self, connection: ConnectionId) {
        let mut rooms = self.rooms.write().unwrap_or_else(|e| e.into_inner());
        rooms.retain(|_, members| {
            members.retain(|member| member.connection != connection);
            !members.is_empty()
        });
    }

    pub fn room_size(&self, room: &str) -> usize {
        let rooms = self.rooms.read().unwrap_or_else(|e| e.into_inner());
        rooms.get(room).map(Vec::len).unwrap_or(0)
    }

    /// Delivers `event` to every current subscriber of `room`. Returns how
    /// many subscribers received it.
    pub fn publish(&self, room: &str, event: RoomEvent) -> usize {
        let snapshot: Vec<Subscriber> = {
            let rooms = self.rooms.read().unwrap_or_else(|e| e.into_inner());
            rooms.get(room).cloned().unwrap_or_default()
        };

        let mut delivered = 0usize;
        let mut stale = Vec::new();
        for member in &snapshot {
            if member.sender.unbounded_send(event.clone()).is_ok() {
                delivered += 1;
            } else {
                stale.push(member.connection);
            }
        }

        if !stale.is_empty() {
            let mut rooms = self.rooms.write().unwrap_or_else(|e| e.into_inner());
            if let Some(members) = rooms.get_mut(room) {
                members.retain(|member| !stale.contains(&member.connection));
                if members.is_empty() {
                    rooms.remove(room);
                }
            }
        }

        debug!(room, event = %event.event, delivered, "published");
        delivered
    }

    /// Chat delivery: the message goes to its target room, and unless the
    /// target already is the command room it is mirrored there so commanders
    /// observe all traffic. Never delivered twice to the same room.
    pub fn send_message(
        &self,
        sender: &str,
        target_room: &str,
        content: &str,
        timestamp: &str,
    ) -> usize {
        let event = RoomEvent::new(
            "receive_message",
            json!({
                "sender": sender,
                "target_room": target_room,
                "message": content,
                "timestamp": timestamp,
            }),
        );
        let mut delivered = self.publish(target_room, event.clone());
        if target_room != self.command_room {
            delivered += self.publish(&self.command_room, event);
        }
        delivered
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_channel::mpsc::{unbounded, UnboundedReceiver};

    fn subscribe(
        broadcaster: &Broadcaster,
        room: &str,
    ) -> (ConnectionId, UnboundedReceiver<RoomEvent>) {
        let connection = ConnectionId::new();
        let (tx, rx) = unbounded();
        broadcaster.join(connection, room, tx);
        (connection, rx)
    }

    fn drain(rx: &mut UnboundedReceiver<RoomEvent>) -> Vec<RoomEvent> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = rx.try_next() {
            events.push(event);
        }
        events
    }

    #[test]
    fn publish_is_fifo_per_room() {
        let broadcaster = Broadcaster::new();
        let (_conn, mut rx) = subscribe(&broadcaster, "ops");
        for index in 0..3 {
            broadcaster.publish("ops", RoomEvent::new("tick", json!(index)));
        }
        let events = drain(&mut rx);
        let order: Vec<i64> = events.iter().map(|e| e.data.as_i64().unwrap()).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn late_joiner_receives_nothing_from_the_past() {
        let broadcaster = Broadcaster::new();
        broadcaster.publish("ops", RoomEvent::new("tick", json!(1)));
        let (_conn, mut rx) = subscribe(&broadcaster, "ops");
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn publish_reaches_only_the_named_room() {
        let broadcaster = Broadcaster::new();
        let (_a, mut rx_ops) = subscribe(&broadcaster, "ops");
        let (_b, mut rx_other) = subscribe(&broadcaster, "other");
        let delivered = broadcaster.publish("ops", RoomEvent::new("tick", json!(1)));
        assert_eq!(delivered, 1);
        assert_eq!(drain(&mut rx_ops).len(), 1);
        assert!(drain(&mut rx_other).is_empty());
    }

    #[test]
    fn disconnect_removes_from_every_room() {
        let broadcaster = Broadcaster::new();
        let connection = ConnectionId::new();
        let (tx, _rx) = unbounded();
        broadcaster.join(connection, "a", tx.clone());
        broadcaster.join(connection, "b", tx);
        broadcaster.disconnect(connection);
        assert_eq!(broadcaster.room_size("a"), 0);
        assert_eq!(broadcaster.room_size("b"), 0);
    }

    #[test]
    fn closed_handles_are_pruned_on_publish() {
        let broadcaster = Broadcaster::new();
        let (_conn, rx) = subscribe(&broadcaster, "ops");
        drop(rx);
        let delivered = broadcaster.publish("ops", RoomEvent::new("tick", json!(1)));
        assert_eq!(delivered, 0);
        assert_eq!(broadcaster.room_size("ops"), 0);
    }

    #[test]
    fn chat_mirrors_to_command_room_once() {
        let broadcaster = Broadcaster::new();
        let (_team, mut team_rx) = subscribe(&broadcaster, "team_1");
        let (_cmd, mut cmd_rx) = subscribe(&broadcaster, COMMAND_ROOM);

        broadcaster.send_message("Medic Team Alpha", "team_1", "need supplies", "t0");
        assert_eq!(drain(&mut team_rx).len(), 1);
        let mirrored = drain(&mut cmd_rx);
        assert_eq!(mirrored.len(), 1);
        assert_eq!(mirrored[0].data["message"], "need supplies");
    }

    #[test]
    fn chat_to_command_room_is_not_duplicated() {
        let broadcaster = Broadcaster::new();
        let (_cmd, mut cmd_rx) = subscribe(&broadcaster, COMMAND_ROOM);
        broadcaster.send_message("Admin", COMMAND_ROOM, "all stations report", "t0");
        assert_eq!(drain(&mut cmd_rx).len(), 1);
    }

    #[test]
    fn rejoining_a_room_does_not_double_subscribe() {
        let broadcaster = Broadcaster::new();
        let connection = ConnectionId::new();
        let (tx, mut rx) = unbounded();
        broadcaster.join(connection, "ops", tx.clone());
        broadcaster.join(connection, "ops", tx);
        broadcaster.publish("ops", RoomEvent::new("tick", json!(1)));
        assert_eq!(drain(&mut rx).len(), 1);
    }
}
