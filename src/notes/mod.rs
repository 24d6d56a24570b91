//! Notes Module
//!
//! Owner-scoped note CRUD.
//!
//! - **`db`** - Row types and queries (owner resolved via join)
//! - **`handlers`** - HTTP handlers with ownership enforcement

/// Database operations
pub mod db;

/// HTTP handlers
pub mod handlers;

pub use db::Note;
