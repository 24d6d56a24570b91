//! Authentication HTTP Handlers
//!
//! - **`types`** - Request/response types
//! - **`register`** - User registration handler
//! - **`login`** - User authentication handler
//! - **`me`** - Get current user handler

/// Request and response types
pub mod types;

/// User registration handler
pub mod register;

/// User login handler
pub mod login;

/// Get current user handler
pub mod me;

pub use login::login;
pub use me::get_me;
pub use register::register;
