//! Room service shared by the HTTP API and the CLI

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::{Room, RoomFilter};
use crate::storage::{RoomRepository, SharedRoomRepository};

use super::{best_fit, Allocation, AllocationRequest};

/// Front door to the room store
///
/// SQLite calls are synchronous, so every store access runs on the blocking
/// thread pool.
#[derive(Clone)]
pub struct RoomService {
    repo: SharedRoomRepository,
}

impl RoomService {
    pub fn new(repo: SharedRoomRepository) -> Self {
        Self { repo }
    }

    async fn run_blocking<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&dyn RoomRepository) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let repo = Arc::clone(&self.repo);
        tokio::task::spawn_blocking(move || op(repo.as_ref()))
            .await
            .map_err(|e| Error::with_source("Room store task failed", e))?
    }

    /// Add a room, rejecting numbers that are already taken
    pub async fn add_room(&self, room: Room) -> Result<Room> {
        room.validate()?;

        let room_no = room.room_no.clone();
        let result = self
            .run_blocking(move |repo| {
                if repo.exists(&room.room_no)? {
                    return Err(Error::duplicate_room(room.room_no));
                }
                // a concurrent add can still win between the check and here;
                // the store rejects that insert as a duplicate too
                repo.insert(room)
            })
            .await;

        match &result {
            Ok(room) => tracing::info!(
                room_no = %room.room_no,
                capacity = room.capacity,
                has_ac = room.has_ac,
                has_attached_washroom = room.has_attached_washroom,
                "Room added"
            ),
            Err(Error::DuplicateRoom { .. }) => {
                tracing::warn!(room_no = %room_no, "Rejected duplicate room")
            }
            Err(e) => tracing::error!(room_no = %room_no, error = %e, "Failed to add room"),
        }

        result
    }

    pub async fn list_rooms(&self) -> Result<Vec<Room>> {
        self.run_blocking(|repo| repo.list_all()).await
    }

    /// Rooms matching the filter, smallest capacity first
    pub async fn search_rooms(&self, filter: RoomFilter) -> Result<Vec<Room>> {
        let rooms = self.run_blocking(move |repo| repo.find_matching(&filter)).await?;
        tracing::debug!(
            min_capacity = filter.min_capacity,
            has_ac = filter.has_ac,
            has_attached_washroom = filter.has_attached_washroom,
            matches = rooms.len(),
            "Room search"
        );
        Ok(rooms)
    }

    /// Pick the smallest room that satisfies the request
    pub async fn allocate(&self, request: AllocationRequest) -> Result<Allocation> {
        request.validate()?;

        let filter = request.filter();
        let candidates = self.run_blocking(move |repo| repo.find_matching(&filter)).await?;
        let allocation = best_fit(candidates);

        match &allocation {
            Allocation::Allocated(room) => tracing::info!(
                students = request.students,
                room_no = %room.room_no,
                capacity = room.capacity,
                "Room allocated"
            ),
            Allocation::NoRoomAvailable => tracing::info!(
                students = request.students,
                needs_ac = request.needs_ac,
                needs_washroom = request.needs_washroom,
                "No room available"
            ),
        }

        Ok(allocation)
    }

    pub async fn room_count(&self) -> Result<usize> {
        self.run_blocking(|repo| repo.count()).await
    }
}
