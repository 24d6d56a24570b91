//! Tasks Module
//!
//! Assignment-scoped task CRUD.
//!
//! - **`db`** - Row types and queries (assignee and creator resolved)
//! - **`handlers`** - HTTP handlers with creator/assignee rules

/// Database operations
pub mod db;

/// HTTP handlers
pub mod handlers;

pub use db::{Task, TaskStatus};
