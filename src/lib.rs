//! Taskhive - Main Library
//!
//! Taskhive is a multi-tenant productivity backend built on axum,
//! providing user accounts, owner-scoped notes and tasks, file uploads
//! with metadata persistence, and a real-time chat layer over
//! WebSockets.
//!
//! # Module Structure
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Registration, login, JWT sessions, user management
//! - **`middleware`** - Bearer-token authentication middleware
//! - **`notes`** - Owner-scoped note CRUD
//! - **`tasks`** - Assignment-scoped task CRUD
//! - **`files`** - Upload storage and metadata
//! - **`chat`** - Connection registry, message router, WebSocket transport
//! - **`error`** - API error types
//!
//! # State Management
//!
//! Handlers share `AppState` (database pool + chat registry) and
//! extract the slice they need via `FromRef`. The chat registry is the
//! one piece of mutable shared state; its mutex is only held for short
//! synchronous sections.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and user management
pub mod auth;

/// Request middleware
pub mod middleware;

/// Owner-scoped notes
pub mod notes;

/// Assignment-scoped tasks
pub mod tasks;

/// File uploads
pub mod files;

/// Real-time chat
pub mod chat;

/// API error types
pub mod error;

// Re-export commonly used types
pub use chat::{ChatRegistry, RouteDecision};
pub use error::ApiError;
pub use server::{create_app, AppState};
