//! Best-fit room allocation
//!
//! An allocation picks the smallest room that fits a group of students and
//! offers the amenities they asked for. It is a pure query: the chosen room
//! is not reserved, so identical requests keep returning the same room.

pub mod service;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Room, RoomFilter};
use crate::query;

pub use service::RoomService;

/// What a group of students is looking for
///
/// Deserializes from the `students`, `needsAC` and `needsWashroom` query
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub students: u32,
    #[serde(rename = "needsAC", deserialize_with = "query::flag")]
    pub needs_ac: bool,
    #[serde(rename = "needsWashroom", deserialize_with = "query::flag")]
    pub needs_washroom: bool,
}

impl AllocationRequest {
    pub fn new(students: u32, needs_ac: bool, needs_washroom: bool) -> Self {
        Self {
            students,
            needs_ac,
            needs_washroom,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.students == 0 {
            return Err(Error::invalid_input("students must be at least 1"));
        }
        Ok(())
    }

    /// Store query selecting every room that could host the group
    pub fn filter(&self) -> RoomFilter {
        RoomFilter::new(self.students, self.needs_ac, self.needs_washroom)
    }
}

/// Outcome of an allocation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Allocation {
    Allocated(Room),
    NoRoomAvailable,
}

impl Allocation {
    pub fn room(&self) -> Option<&Room> {
        match self {
            Self::Allocated(room) => Some(room),
            Self::NoRoomAvailable => None,
        }
    }
}

/// Pick the first candidate of a capacity-sorted list
pub fn best_fit(candidates: Vec<Room>) -> Allocation {
    candidates
        .into_iter()
        .next()
        .map_or(Allocation::NoRoomAvailable, Allocation::Allocated)
}
