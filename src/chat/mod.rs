//! Real-time Chat Module
//!
//! Room-based and 1:1 chat over a WebSocket transport.
//!
//! # Architecture
//!
//! - **`registry`** - Connection Registry: live connections, room
//!   memberships, delivery primitives
//! - **`router`** - Message Router: validate → persist → resolve →
//!   route; the one place delivery policy is decided
//! - **`events`** - Tagged JSON wire events
//! - **`ws`** - The `/ws` upgrade handler and per-connection tasks
//! - **`db`** - Message persistence
//!
//! # Routing policy
//!
//! A send names at most one delivery mode, evaluated in priority order:
//! room broadcast, then direct (origin echo + receiver channel), then
//! global broadcast. Persistence always completes before fan-out, so a
//! client never observes a message that was not durably recorded.

/// Connection registry and delivery primitives
pub mod registry;

/// Message routing policy
pub mod router;

/// Wire event types
pub mod events;

/// WebSocket transport
pub mod ws;

/// Message persistence
pub mod db;

pub use events::{ClientEvent, ServerEvent};
pub use registry::{ChatRegistry, ConnectionId};
pub use router::RouteDecision;
pub use ws::chat_ws;
