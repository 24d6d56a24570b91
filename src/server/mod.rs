//! Server Module
//!
//! Server initialization, application state, and configuration.
//!
//! - **`init`** - `create_app`: assemble state and router
//! - **`state`** - `AppState` and `FromRef` extraction
//! - **`config`** - Optional database loading

/// Server initialization
pub mod init;

/// Application state
pub mod state;

/// Configuration loading
pub mod config;

pub use init::create_app;
pub use state::AppState;
