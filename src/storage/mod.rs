//! Room persistence
//!
//! Rooms live in a single SQLite table keyed by room number. See
//! [`repository`] for the storage trait and its implementations.

pub mod repository;

pub use repository::{
    create_mock_repository, create_sqlite_repository, MockRoomRepository, RoomRepository,
    SharedRoomRepository, SqliteRoomRepository,
};
