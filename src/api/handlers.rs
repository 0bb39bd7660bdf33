//! REST API handlers for the room service
//!
//! This module defines the API routes and handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::allocation::{Allocation, AllocationRequest};
use crate::models::{Room, RoomFilter};

use super::error::ApiError;
use super::server::AppState;

pub const NO_ROOM_AVAILABLE: &str = "No room available";

// ============================================================================
// API Response Types
// ============================================================================

/// Health check response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub rooms: usize,
}

/// Allocation response: the chosen room, or a message when none fits
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AllocationResponse {
    Room(Room),
    Unavailable { message: String },
}

impl From<Allocation> for AllocationResponse {
    fn from(allocation: Allocation) -> Self {
        match allocation {
            Allocation::Allocated(room) => Self::Room(room),
            Allocation::NoRoomAvailable => Self::Unavailable {
                message: NO_ROOM_AVAILABLE.to_string(),
            },
        }
    }
}

// ============================================================================
// API Routes
// ============================================================================

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/rooms", get(list_rooms).post(add_room))
        .route("/api/rooms/search", get(search_rooms))
        .route("/api/rooms/allocate", get(allocate_room))
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let rooms = state.service.room_count().await?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        rooms,
    }))
}

/// Add a room; 409 if the number is taken
async fn add_room(
    State(state): State<AppState>,
    payload: Result<Json<Room>, JsonRejection>,
) -> Result<(StatusCode, Json<Room>), ApiError> {
    let Json(room) = payload?;
    let saved = state.service.add_room(room).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

async fn list_rooms(State(state): State<AppState>) -> Result<Json<Vec<Room>>, ApiError> {
    Ok(Json(state.service.list_rooms().await?))
}

async fn search_rooms(
    State(state): State<AppState>,
    query: Result<Query<RoomFilter>, QueryRejection>,
) -> Result<Json<Vec<Room>>, ApiError> {
    let Query(filter) = query?;
    Ok(Json(state.service.search_rooms(filter).await?))
}

/// Allocate the smallest fitting room; "no room" is still a 200
async fn allocate_room(
    State(state): State<AppState>,
    query: Result<Query<AllocationRequest>, QueryRejection>,
) -> Result<Json<AllocationResponse>, ApiError> {
    let Query(request) = query?;
    let allocation = state.service.allocate(request).await?;
    Ok(Json(allocation.into()))
}

// ============================================================================
// Tests
// ============================================================================
