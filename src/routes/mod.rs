//! Route Configuration
//!
//! - **`router`** - Router assembly (layers, static files, fallback)
//! - **`api_routes`** - REST API route table

/// Router assembly
pub mod router;

/// API route table
pub mod api_routes;

pub use router::create_router;
