/**
 * WebSocket Transport
 *
 * The `GET /ws` upgrade handler and the per-connection task. Each
 * connection gets:
 *
 * - a registry entry with an unbounded outbound channel
 * - a writer task draining that channel into the socket sink
 * - a read loop parsing tagged JSON frames into `ClientEvent`s and
 *   dispatching them to the join/send handlers
 *
 * Unparseable frames are ignored. Disconnect removes the connection
 * from the registry; an in-flight persistence is not cancelled, only
 * later delivery to the removed connection is dropped.
 */

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use sqlx::PgPool;
use tokio::sync::mpsc;

use crate::chat::events::{ClientEvent, ServerEvent};
use crate::chat::registry::ChatRegistry;
use crate::chat::router::{handle_join, handle_send};

/// Chat WebSocket endpoint (GET /ws)
pub async fn chat_ws(
    State(registry): State<ChatRegistry>,
    State(pool): State<Option<PgPool>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, registry, pool))
}

async fn handle_socket(socket: WebSocket, registry: ChatRegistry, pool: Option<PgPool>) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();

    let conn_id = registry.register(tx);
    tracing::info!("[Chat] connection established: {}", conn_id);

    let writer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!("[Chat] failed to serialize event: {:?}", e);
                    continue;
                }
            };
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(msg)) = stream.next().await {
        let Ok(event) = serde_json::from_slice::<ClientEvent>(&msg.into_data()) else {
            continue;
        };

        match event {
            ClientEvent::JoinRoom(request) => handle_join(&registry, conn_id, request),
            ClientEvent::SendMessage(request) => {
                handle_send(&registry, pool.as_ref(), conn_id, request).await
            }
        }
    }

    tracing::info!("[Chat] connection closed: {}", conn_id);
    registry.remove(conn_id);
    writer.abort();
}
