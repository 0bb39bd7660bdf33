//! hostel-rooms - Hostel room registry and allocation service
//!
//! Stores hostel rooms (number, capacity, amenities) and allocates the
//! smallest room that fits a group of students.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`] - Room record and search criteria
//! - [`storage`] - Room store trait with SQLite and in-memory implementations
//! - [`allocation`] - Best-fit allocation and the room service
//! - [`api`] - REST endpoints served with axum
//! - [`config`] - Configuration management and settings
//! - [`query`] - Lenient query-string parameter decoding
//! - [`error`] - Unified error type
//!
//! # Example
//!
//! ```no_run
//! use hostel_rooms::api::RoomServer;
//! use hostel_rooms::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = RoomServer::from_config(&config)?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```

pub mod allocation;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod storage;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::allocation::{Allocation, AllocationRequest, RoomService};
    pub use crate::api::{RoomServer, ServerConfig};
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::models::{Room, RoomFilter};
    pub use crate::storage::{RoomRepository, SharedRoomRepository, SqliteRoomRepository};
}

// Direct re-exports for convenience
pub use models::{Room, RoomFilter};
