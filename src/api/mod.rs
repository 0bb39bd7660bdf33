//! HTTP API for the room registry
//!
//! # Endpoints
//!
//! ```text
//! POST /api/rooms           add a room (201, or 409 if the number is taken)
//! GET  /api/rooms           list every room
//! GET  /api/rooms/search    ?capacity=&hasAC=&hasAttachedWashroom=
//! GET  /api/rooms/allocate  ?students=&needsAC=&needsWashroom=
//! GET  /api/health          liveness and room count
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use hostel_rooms::api::{RoomServer, ServerConfig};
//! use hostel_rooms::storage::create_sqlite_repository;
//!
//! let repo = create_sqlite_repository("data/rooms.db")?;
//! let server = RoomServer::new(ServerConfig::default(), repo)?;
//! server.start().await?;
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod server;

pub use config::ServerConfig;
pub use error::{ApiError, ErrorResponse};
pub use handlers::{create_router, AllocationResponse, HealthResponse};
pub use server::{AppState, RoomServer, ServerError, ServerInfo};
