/**
 * Chat Wire Events
 *
 * JSON event types exchanged over the WebSocket transport. Every frame
 * is a tagged envelope `{"event": "...", "data": {...}}`.
 *
 * # Events
 *
 * | Direction       | Event         | Payload                                  |
 * |-----------------|---------------|------------------------------------------|
 * | client → server | `joinRoom`    | `{room}`                                 |
 * | client → server | `sendMessage` | `{sender, receiver?, content, room?}`    |
 * | server → client | `joinedRoom`  | `{room, message}`                        |
 * | server → client | `newMessage`  | `{id, sender, receiver, content, room, created_at}` |
 * | server → client | `error`       | `{message}`                              |
 *
 * Frames that fail to parse are ignored by the transport.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::users::UserSummary;

/// Inbound events from a connected client.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    /// Join a room to receive its broadcasts.
    #[serde(rename = "joinRoom")]
    JoinRoom(JoinRoomRequest),
    /// Send a chat message.
    #[serde(rename = "sendMessage")]
    SendMessage(SendMessageRequest),
}

/// `joinRoom` payload. A missing or empty room is a silent no-op.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JoinRoomRequest {
    #[serde(default)]
    pub room: Option<String>,
}

/// `sendMessage` payload.
///
/// `sender` and `content` are required at validation time; `receiver`
/// and `room` select the delivery mode (see the router).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub sender: Option<Uuid>,
    #[serde(default)]
    pub receiver: Option<Uuid>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
}

/// Outbound events pushed to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// Acknowledgment sent to the joining connection only.
    #[serde(rename = "joinedRoom")]
    JoinedRoom { room: String, message: String },
    /// A persisted message, delivered per the routing rules.
    #[serde(rename = "newMessage")]
    NewMessage(MessagePayload),
    /// Fault report, sent to the originating connection only.
    #[serde(rename = "error")]
    Error { message: String },
}

/// The `newMessage` body. The sender is always resolved to display
/// attributes; recipients never see a bare identifier.
#[derive(Debug, Clone, Serialize)]
pub struct MessagePayload {
    pub id: Uuid,
    pub sender: UserSummary,
    pub receiver: Option<Uuid>,
    pub content: String,
    pub room: Option<String>,
    pub created_at: DateTime<Utc>,
}
