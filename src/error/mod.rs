//! API Error Module
//!
//! Error types used by HTTP handlers and their conversion to HTTP
//! responses.
//!
//! - **`types`** - `ApiError` definition and status-code mapping
//! - **`conversion`** - `IntoResponse` implementation
//!
//! All handlers return `Result<_, ApiError>`; chat-side faults never use
//! this type, they are confined to `error` events on the socket.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::ApiError;
