// Core data structures for the room registry

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::query;

/// A hostel room as stored and exchanged over the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Unique room number, e.g. "101"
    pub room_no: String,
    /// Maximum number of students the room holds
    pub capacity: u32,
    #[serde(rename = "hasAC", default)]
    pub has_ac: bool,
    #[serde(default)]
    pub has_attached_washroom: bool,
}

impl Room {
    pub fn new(
        room_no: impl Into<String>,
        capacity: u32,
        has_ac: bool,
        has_attached_washroom: bool,
    ) -> Self {
        Self {
            room_no: room_no.into(),
            capacity,
            has_ac,
            has_attached_washroom,
        }
    }

    /// Reject records that cannot be stored
    pub fn validate(&self) -> Result<()> {
        if self.room_no.trim().is_empty() {
            return Err(Error::invalid_input("roomNo must not be blank"));
        }
        Ok(())
    }
}

/// Search criteria for rooms
///
/// Deserializes from the `capacity`, `hasAC` and `hasAttachedWashroom`
/// query parameters. A negative `capacity` places no lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomFilter {
    #[serde(rename = "capacity", deserialize_with = "query::lower_bound")]
    pub min_capacity: u32,
    #[serde(rename = "hasAC", deserialize_with = "query::flag")]
    pub has_ac: bool,
    #[serde(rename = "hasAttachedWashroom", deserialize_with = "query::flag")]
    pub has_attached_washroom: bool,
}

impl RoomFilter {
    pub fn new(min_capacity: u32, has_ac: bool, has_attached_washroom: bool) -> Self {
        Self {
            min_capacity,
            has_ac,
            has_attached_washroom,
        }
    }

    /// Check whether a room satisfies every criterion
    pub fn matches(&self, room: &Room) -> bool {
        room.capacity >= self.min_capacity
            && room.has_ac == self.has_ac
            && room.has_attached_washroom == self.has_attached_washroom
    }
}
