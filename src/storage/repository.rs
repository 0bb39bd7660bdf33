//! Repository Pattern for Room Storage
//!
//! The [`RoomRepository`] trait decouples the allocation logic from the
//! storage engine:
//! - SQLite for the running service
//! - an in-memory mock for tests
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │            RoomService (add / list / search / allocate)     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      RoomRepository                         │
//! └─────────────────────────────────────────────────────────────┘
//!                  │                           │
//!                  ▼                           ▼
//!        ┌─────────────────┐         ┌─────────────────┐
//!        │     SQLite      │         │      Mock       │
//!        │  Implementation │         │ Implementation  │
//!        └─────────────────┘         └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use hostel_rooms::storage::{RoomRepository, SqliteRoomRepository};
//!
//! let repo = SqliteRoomRepository::new("data/rooms.db")?;
//! repo.insert(Room::new("101", 4, true, false))?;
//! ```

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use rusqlite::{params, Connection};

use crate::error::{Error, Result};
use crate::models::{Room, RoomFilter};

// ============================================================================
// Repository Trait
// ============================================================================

/// Persistent keyed collection of rooms
///
/// Rooms are keyed by `room_no`. Listing returns rooms in insertion order;
/// filtered queries return them ascending by capacity, ties in insertion order.
pub trait RoomRepository: Send + Sync {
    /// Check if a room with this number is stored
    fn exists(&self, room_no: &str) -> Result<bool>;

    /// Store a new room
    ///
    /// Fails with [`Error::DuplicateRoom`] if the number is taken; the stored
    /// record is never overwritten.
    fn insert(&self, room: Room) -> Result<Room>;

    /// All stored rooms
    fn list_all(&self) -> Result<Vec<Room>>;

    /// Rooms matching the filter, smallest capacity first
    fn find_matching(&self, filter: &RoomFilter) -> Result<Vec<Room>>;

    /// Number of stored rooms
    fn count(&self) -> Result<usize>;
}

// ============================================================================
// SQLite Implementation
// ============================================================================

/// SQLite implementation of RoomRepository
///
/// Uses `Mutex` to ensure thread-safety for the SQLite connection.
pub struct SqliteRoomRepository {
    conn: Mutex<Connection>,
}

impl SqliteRoomRepository {
    /// Open (or create) a database file
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        let repo = Self {
            conn: Mutex::new(conn),
        };
        repo.create_schema()?;

        tracing::info!(path = %path.display(), "SQLite room store initialized");
        Ok(repo)
    }

    /// Create in-memory repository (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let repo = Self {
            conn: Mutex::new(conn),
        };
        repo.create_schema()?;
        Ok(repo)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::other("SQLite connection mutex poisoned"))
    }

    fn create_schema(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(
            r#"
                CREATE TABLE IF NOT EXISTS rooms (
                    room_no TEXT PRIMARY KEY,
                    capacity INTEGER NOT NULL CHECK (capacity >= 0),
                    has_ac INTEGER NOT NULL,
                    has_attached_washroom INTEGER NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_rooms_capacity
                    ON rooms(capacity);
                "#,
        )?;

        Ok(())
    }

    fn row_to_room(row: &rusqlite::Row<'_>) -> rusqlite::Result<Room> {
        Ok(Room {
            room_no: row.get(0)?,
            capacity: row.get(1)?,
            has_ac: row.get(2)?,
            has_attached_washroom: row.get(3)?,
        })
    }
}

/// Primary-key collisions surface as an extended constraint code
fn is_primary_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}

impl RoomRepository for SqliteRoomRepository {
    fn exists(&self, room_no: &str) -> Result<bool> {
        let conn = self.conn()?;
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM rooms WHERE room_no = ?1)",
            params![room_no],
            |row| row.get(0),
        )?;

        Ok(exists)
    }

    fn insert(&self, room: Room) -> Result<Room> {
        let conn = self.conn()?;
        let inserted = conn.execute(
            r#"
                INSERT INTO rooms (room_no, capacity, has_ac, has_attached_washroom)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            params![
                room.room_no,
                room.capacity,
                room.has_ac,
                room.has_attached_washroom
            ],
        );

        match inserted {
            Ok(_) => Ok(room),
            Err(e) if is_primary_key_violation(&e) => Err(Error::duplicate_room(room.room_no)),
            Err(e) => Err(e.into()),
        }
    }

    fn list_all(&self) -> Result<Vec<Room>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT room_no, capacity, has_ac, has_attached_washroom
             FROM rooms ORDER BY rowid",
        )?;

        let rooms = stmt
            .query_map([], Self::row_to_room)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rooms)
    }

    fn find_matching(&self, filter: &RoomFilter) -> Result<Vec<Room>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT room_no, capacity, has_ac, has_attached_washroom
             FROM rooms
             WHERE capacity >= ?1 AND has_ac = ?2 AND has_attached_washroom = ?3
             ORDER BY capacity ASC, rowid ASC",
        )?;

        let rooms = stmt
            .query_map(
                params![
                    filter.min_capacity,
                    filter.has_ac,
                    filter.has_attached_washroom
                ],
                Self::row_to_room,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rooms)
    }

    fn count(&self) -> Result<usize> {
        let conn = self.conn()?;
        let total: i64 = conn.query_row("SELECT COUNT(*) FROM rooms", [], |row| row.get(0))?;
        Ok(total as usize)
    }
}

// ============================================================================
// Mock Implementation (for testing)
// ============================================================================

/// In-memory mock implementation of RoomRepository
///
/// Useful for testing without database dependencies.
pub struct MockRoomRepository {
    rooms: RwLock<Vec<Room>>,
}

impl MockRoomRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(Vec::new()),
        }
    }

    /// Get the number of rooms
    pub fn len(&self) -> usize {
        self.rooms.read().map(|rooms| rooms.len()).unwrap_or(0)
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all rooms
    pub fn clear(&self) {
        if let Ok(mut rooms) = self.rooms.write() {
            rooms.clear();
        }
    }

    fn poisoned() -> Error {
        Error::other("Mock room store lock poisoned")
    }
}

impl Default for MockRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomRepository for MockRoomRepository {
    fn exists(&self, room_no: &str) -> Result<bool> {
        let rooms = self.rooms.read().map_err(|_| Self::poisoned())?;
        Ok(rooms.iter().any(|r| r.room_no == room_no))
    }

    fn insert(&self, room: Room) -> Result<Room> {
        let mut rooms = self.rooms.write().map_err(|_| Self::poisoned())?;
        if rooms.iter().any(|r| r.room_no == room.room_no) {
            return Err(Error::duplicate_room(room.room_no));
        }
        rooms.push(room.clone());
        Ok(room)
    }

    fn list_all(&self) -> Result<Vec<Room>> {
        let rooms = self.rooms.read().map_err(|_| Self::poisoned())?;
        Ok(rooms.clone())
    }

    fn find_matching(&self, filter: &RoomFilter) -> Result<Vec<Room>> {
        let rooms = self.rooms.read().map_err(|_| Self::poisoned())?;
        let mut matching: Vec<Room> = rooms.iter().filter(|r| filter.matches(r)).cloned().collect();
        // stable: equal capacities keep insertion order
        matching.sort_by_key(|r| r.capacity);
        Ok(matching)
    }

    fn count(&self) -> Result<usize> {
        let rooms = self.rooms.read().map_err(|_| Self::poisoned())?;
        Ok(rooms.len())
    }
}

// ============================================================================
// Shared Repository Types
// ============================================================================

/// Thread-safe shared repository wrapper
pub type SharedRoomRepository = Arc<dyn RoomRepository>;

/// Create a shared SQLite repository
pub fn create_sqlite_repository(path: impl AsRef<Path>) -> Result<SharedRoomRepository> {
    let repo = SqliteRoomRepository::new(path)?;
    Ok(Arc::new(repo))
}

/// Create a shared mock repository
pub fn create_mock_repository() -> SharedRoomRepository {
    Arc::new(MockRoomRepository::new())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // Helper to create test repositories
    fn create_test_repos() -> Vec<Box<dyn RoomRepository>> {
        vec![
            Box::new(SqliteRoomRepository::in_memory().unwrap()),
            Box::new(MockRoomRepository::new()),
        ]
    }

    #[test]
    fn test_exists_after_insert() {
        for repo in create_test_repos() {
            assert!(!repo.exists("101").unwrap());

            repo.insert(Room::new("101", 4, true, false)).unwrap();

            assert!(repo.exists("101").unwrap());
            assert!(!repo.exists("102").unwrap());
        }
    }

    #[test]
    fn test_insert_echoes_room() {
        for repo in create_test_repos() {
            let room = Room::new("A-7", 2, false, true);
            let stored = repo.insert(room.clone()).unwrap();
            assert_eq!(stored, room);
        }
    }

    #[test]
    fn test_duplicate_insert_keeps_original() {
        for repo in create_test_repos() {
            repo.insert(Room::new("101", 4, true, false)).unwrap();

            let err = repo.insert(Room::new("101", 9, false, true)).unwrap_err();
            assert!(matches!(err, Error::DuplicateRoom { ref room_no } if room_no == "101"));

            let rooms = repo.list_all().unwrap();
            assert_eq!(rooms, vec![Room::new("101", 4, true, false)]);
        }
    }

    #[test]
    fn test_list_all_in_insertion_order() {
        for repo in create_test_repos() {
            assert!(repo.list_all().unwrap().is_empty());

            repo.insert(Room::new("300", 6, false, false)).unwrap();
            repo.insert(Room::new("100", 2, true, true)).unwrap();
            repo.insert(Room::new("200", 4, true, false)).unwrap();

            let numbers: Vec<String> = repo
                .list_all()
                .unwrap()
                .into_iter()
                .map(|r| r.room_no)
                .collect();
            assert_eq!(numbers, vec!["300", "100", "200"]);
        }
    }

    #[test]
    fn test_find_matching_filters_and_sorts() {
        for repo in create_test_repos() {
            repo.insert(Room::new("big", 8, true, false)).unwrap();
            repo.insert(Room::new("small", 2, true, false)).unwrap();
            repo.insert(Room::new("mid", 4, true, false)).unwrap();
            repo.insert(Room::new("no-ac", 4, false, false)).unwrap();
            repo.insert(Room::new("washroom", 4, true, true)).unwrap();

            let rooms = repo.find_matching(&RoomFilter::new(3, true, false)).unwrap();
            let numbers: Vec<&str> = rooms.iter().map(|r| r.room_no.as_str()).collect();

            assert_eq!(numbers, vec!["mid", "big"]);
        }
    }

    #[test]
    fn test_find_matching_capacity_is_inclusive() {
        for repo in create_test_repos() {
            repo.insert(Room::new("exact", 4, false, false)).unwrap();

            let rooms = repo.find_matching(&RoomFilter::new(4, false, false)).unwrap();
            assert_eq!(rooms.len(), 1);

            let rooms = repo.find_matching(&RoomFilter::new(5, false, false)).unwrap();
            assert!(rooms.is_empty());
        }
    }

    #[test]
    fn test_find_matching_ties_keep_insertion_order() {
        for repo in create_test_repos() {
            repo.insert(Room::new("z", 4, true, true)).unwrap();
            repo.insert(Room::new("a", 4, true, true)).unwrap();

            let rooms = repo.find_matching(&RoomFilter::new(1, true, true)).unwrap();
            let numbers: Vec<&str> = rooms.iter().map(|r| r.room_no.as_str()).collect();
            assert_eq!(numbers, vec!["z", "a"]);
        }
    }

    #[test]
    fn test_count() {
        for repo in create_test_repos() {
            assert_eq!(repo.count().unwrap(), 0);
            repo.insert(Room::new("1", 1, false, false)).unwrap();
            repo.insert(Room::new("2", 2, false, false)).unwrap();
            assert_eq!(repo.count().unwrap(), 2);
        }
    }

    #[test]
    fn test_sqlite_file_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("rooms.db");

        {
            let repo = SqliteRoomRepository::new(&path).unwrap();
            repo.insert(Room::new("101", 4, true, false)).unwrap();
        }

        let reopened = SqliteRoomRepository::new(&path).unwrap();
        assert!(reopened.exists("101").unwrap());
        assert_eq!(reopened.list_all().unwrap(), vec![Room::new("101", 4, true, false)]);
    }

    #[test]
    fn test_mock_repository_utilities() {
        let mock = MockRoomRepository::new();

        assert!(mock.is_empty());
        assert_eq!(mock.len(), 0);

        mock.insert(Room::new("1", 2, false, false)).unwrap();

        assert!(!mock.is_empty());
        assert_eq!(mock.len(), 1);

        mock.clear();
        assert!(mock.is_empty());
    }

    #[test]
    fn test_shared_repository_creation() {
        let repo = create_mock_repository();
        repo.insert(Room::new("1", 2, false, false)).unwrap();
        assert!(repo.exists("1").unwrap());
    }
}
