/**
 * Message Router
 *
 * Validates, persists, and routes a single inbound chat send request.
 * This is the one place delivery policy is decided.
 *
 * # Pipeline
 *
 * 1. Validate: `sender` and non-empty (after trim) `content` required.
 *    A validation fault is reported as an `error` event to the
 *    originating connection only; nothing is persisted.
 * 2. Persist: the message row must be durably created before any
 *    fan-out begins. A persistence failure (including an absent pool)
 *    is again an `error` event to the origin, and nobody else learns
 *    the send was attempted.
 * 3. Resolve: the sender id is resolved to display attributes before
 *    the outbound payload is built. A resolution failure after a
 *    successful insert leaves the record durable and delivers nothing.
 * 4. Route: room beats receiver beats global broadcast (see
 *    [`RouteDecision::decide`]).
 *
 * # Trust boundary
 *
 * The `sender` field is taken from the payload as-is: the socket path
 * does not verify a bearer token, unlike every REST path. A client can
 * therefore claim any sender id that exists in the users table.
 *
 * # Delivery guarantees
 *
 * At-least-persisted, at-most-once-delivered: delivery failure after a
 * durable insert is neither retried nor rolled back.
 */

use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::users::get_user_summary;
use crate::chat::db::create_message;
use crate::chat::events::{JoinRoomRequest, MessagePayload, SendMessageRequest, ServerEvent};
use crate::chat::registry::{ChatRegistry, ConnectionId};

/// Delivery mode for a validated message, in priority order.
///
/// `room` is the more specific addressing mode and wins over the 1:1
/// `receiver` mode; absence of both degrades to a global broadcast.
/// When a client supplies both `room` and `receiver`, room wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Deliver to every connection joined to the room.
    Room(String),
    /// Echo to the originating connection and deliver to the receiver's
    /// user channel.
    Direct(Uuid),
    /// Deliver to every currently connected client, sender included.
    All,
}

impl RouteDecision {
    /// Evaluate the routing priority: room, then receiver, then all.
    ///
    /// An empty or whitespace-only room counts as absent.
    pub fn decide(room: Option<&str>, receiver: Option<Uuid>) -> Self {
        match room.map(str::trim).filter(|r| !r.is_empty()) {
            Some(room) => Self::Room(room.to_string()),
            None => match receiver {
                Some(user) => Self::Direct(user),
                None => Self::All,
            },
        }
    }
}

/// Validate a send request, returning the sender id and trimmed content.
fn validate(request: &SendMessageRequest) -> Result<(Uuid, String), String> {
    let sender = request.sender;
    let content = request
        .content
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    match (sender, content) {
        (Some(sender), Some(content)) => Ok((sender, content.to_string())),
        _ => Err("Sender and content are required".to_string()),
    }
}

/// Fan a prepared payload out according to the routing decision.
pub fn dispatch(
    registry: &ChatRegistry,
    decision: RouteDecision,
    origin: ConnectionId,
    payload: MessagePayload,
) {
    match decision {
        RouteDecision::Room(room) => {
            let delivered = registry.broadcast_to_room(&room, ServerEvent::NewMessage(payload));
            tracing::debug!("[Chat] message delivered to room {} ({} connections)", room, delivered);
        }
        RouteDecision::Direct(receiver) => {
            registry.send_to_connection(origin, ServerEvent::NewMessage(payload.clone()));
            registry.deliver_to_user(receiver, ServerEvent::NewMessage(payload));
            tracing::debug!("[Chat] message delivered directly to user {}", receiver);
        }
        RouteDecision::All => {
            let delivered = registry.broadcast_to_all(ServerEvent::NewMessage(payload));
            tracing::debug!("[Chat] message broadcast to all ({} connections)", delivered);
        }
    }
}

/// Handle an inbound `sendMessage` event.
///
/// All faults are confined to an `error` event on the originating
/// connection; nothing here crashes the connection task or the process.
pub async fn handle_send(
    registry: &ChatRegistry,
    pool: Option<&PgPool>,
    origin: ConnectionId,
    request: SendMessageRequest,
) {
    let (sender, content) = match validate(&request) {
        Ok(valid) => valid,
        Err(message) => {
            tracing::warn!("[Chat] rejected send from {}: {}", origin, message);
            registry.send_to_connection(origin, ServerEvent::Error { message });
            return;
        }
    };

    let Some(pool) = pool else {
        tracing::error!("[Chat] send failed: database not configured");
        registry.send_to_connection(
            origin,
            ServerEvent::Error {
                message: "Failed to send message".to_string(),
            },
        );
        return;
    };

    let room = request
        .room
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty());

    // Persistence strictly precedes any delivery
    let message = match create_message(pool, sender, request.receiver, &content, room).await {
        Ok(message) => message,
        Err(e) => {
            tracing::error!("[Chat] failed to persist message: {:?}", e);
            registry.send_to_connection(
                origin,
                ServerEvent::Error {
                    message: "Failed to send message".to_string(),
                },
            );
            return;
        }
    };

    // Resolve the sender to display attributes. The record is already
    // durable; a failure here delivers nothing but rolls nothing back.
    let sender_info = match get_user_summary(pool, sender).await {
        Ok(Some(info)) => info,
        Ok(None) => {
            tracing::error!("[Chat] sender {} not found after persisting message", sender);
            registry.send_to_connection(
                origin,
                ServerEvent::Error {
                    message: "Failed to send message".to_string(),
                },
            );
            return;
        }
        Err(e) => {
            tracing::error!("[Chat] failed to resolve sender {}: {:?}", sender, e);
            registry.send_to_connection(
                origin,
                ServerEvent::Error {
                    message: "Failed to send message".to_string(),
                },
            );
            return;
        }
    };

    let payload = MessagePayload {
        id: message.id,
        sender: sender_info,
        receiver: message.receiver,
        content: message.content,
        room: message.room.clone(),
        created_at: message.created_at,
    };

    dispatch(
        registry,
        RouteDecision::decide(message.room.as_deref(), message.receiver),
        origin,
        payload,
    );
}

/// Handle an inbound `joinRoom` event.
///
/// A falsy room is a silent no-op: no membership change, no ack.
/// Whitespace-only rooms also count as absent, which is stricter than
/// treating every non-empty string as joinable but keeps join labels
/// consistent with the trim applied by the send path (a membership in
/// `"  "` could never receive a message). Otherwise the membership is
/// registered and a `joinedRoom` ack goes to the requesting connection
/// only.
pub fn handle_join(registry: &ChatRegistry, origin: ConnectionId, request: JoinRoomRequest) {
    let Some(room) = request
        .room
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
    else {
        return;
    };

    registry.join(origin, room);
    tracing::info!("[Chat] connection {} joined room: {}", origin, room);

    registry.send_to_connection(
        origin,
        ServerEvent::JoinedRoom {
            room: room.to_string(),
            message: format!("Joined room: {room}"),
        },
    );
}
