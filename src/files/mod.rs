//! Files Module
//!
//! Multipart upload with disk storage and metadata persistence.
//!
//! - **`storage`** - Allow-list, size cap, unique filenames, disk I/O
//! - **`db`** - Metadata row type and queries
//! - **`handlers`** - Upload and list endpoints

/// Disk storage
pub mod storage;

/// Database operations
pub mod db;

/// HTTP handlers
pub mod handlers;

pub use db::StoredFile;
