//! End-to-end tests for the room API over a real socket and SQLite file

mod common;

use common::{room_json, TestServer};
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_added_room_is_listed_exactly_once() {
    let server = TestServer::start().await;
    let room = room_json("101", 4, true, false);

    let resp = server.add_room(&room).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(created, room);

    let (status, rooms) = server.get_json("/api/rooms").await;
    assert_eq!(status, StatusCode::OK);
    let occurrences = rooms
        .as_array()
        .unwrap()
        .iter()
        .filter(|r| **r == room)
        .count();
    assert_eq!(occurrences, 1);
}

#[tokio::test]
async fn test_duplicate_room_is_rejected_and_original_kept() {
    let server = TestServer::start().await;
    server.add_room(&room_json("101", 4, true, false)).await;

    let resp = server.add_room(&room_json("101", 10, false, true)).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Room already added" }));

    let (_, rooms) = server.get_json("/api/rooms").await;
    assert_eq!(rooms, json!([room_json("101", 4, true, false)]));
}

#[tokio::test]
async fn test_concurrent_duplicate_adds_store_one_room() {
    let server = TestServer::start().await;
    let body = room_json("race", 3, false, false);

    let (a, b) = tokio::join!(server.add_room(&body), server.add_room(&body));
    let mut statuses = vec![a.status(), b.status()];
    statuses.sort();

    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::CONFLICT]);

    let (_, rooms) = server.get_json("/api/rooms").await;
    assert_eq!(rooms.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_filters_and_orders_by_capacity() {
    let server = TestServer::start().await;
    server.add_room(&room_json("A", 6, true, false)).await;
    server.add_room(&room_json("B", 2, true, false)).await;
    server.add_room(&room_json("C", 4, true, false)).await;
    server.add_room(&room_json("D", 5, false, false)).await;
    server.add_room(&room_json("E", 5, true, true)).await;

    let (status, rooms) = server
        .get_json("/api/rooms/search?capacity=3&hasAC=true&hasAttachedWashroom=false")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        rooms,
        json!([room_json("C", 4, true, false), room_json("A", 6, true, false)])
    );

    let (status, rooms) = server
        .get_json("/api/rooms/search?capacity=50&hasAC=true&hasAttachedWashroom=false")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rooms, json!([]));
}

#[tokio::test]
async fn test_allocate_without_match_returns_message() {
    let server = TestServer::start().await;
    server.add_room(&room_json("101", 2, true, false)).await;

    let (status, body) = server
        .get_json("/api/rooms/allocate?students=3&needsAC=true&needsWashroom=false")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "No room available" }));
    assert!(body.get("roomNo").is_none());
}

#[tokio::test]
async fn test_allocate_single_qualifying_room() {
    let server = TestServer::start().await;
    server.add_room(&room_json("101", 4, true, false)).await;
    server.add_room(&room_json("102", 4, false, false)).await;
    server.add_room(&room_json("103", 4, true, true)).await;

    let (status, body) = server
        .get_json("/api/rooms/allocate?students=3&needsAC=true&needsWashroom=false")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, room_json("101", 4, true, false));
}

#[tokio::test]
async fn test_allocate_picks_smallest_capacity() {
    let server = TestServer::start().await;
    server.add_room(&room_json("six", 6, false, true)).await;
    server.add_room(&room_json("four", 4, false, true)).await;

    let path = "/api/rooms/allocate?students=4&needsAC=false&needsWashroom=true";
    let (_, first) = server.get_json(path).await;
    let (_, second) = server.get_json(path).await;

    assert_eq!(first, room_json("four", 4, false, true));
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_malformed_requests_are_bad_requests() {
    let server = TestServer::start().await;

    let (status, body) = server
        .get_json("/api/rooms/allocate?students=two&needsAC=true&needsWashroom=false")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let resp = server
        .client
        .post(server.url("/api/rooms"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let server = TestServer::start().await;

    let resp = server
        .client
        .request(reqwest::Method::OPTIONS, server.url("/api/rooms"))
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send()
        .await
        .unwrap();

    assert!(resp.status().is_success());
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn test_health_reports_room_count() {
    let server = TestServer::start().await;
    server.add_room(&room_json("101", 4, true, false)).await;
    server.add_room(&room_json("102", 2, false, false)).await;

    let (status, body) = server.get_json("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["rooms"], 2);
}

#[tokio::test]
async fn test_search_with_negative_capacity_has_no_lower_bound() {
    let server = TestServer::start().await;
    server.add_room(&room_json("B", 3, true, false)).await;
    server.add_room(&room_json("A", 1, true, false)).await;
    server.add_room(&room_json("C", 2, false, false)).await;

    let (status, rooms) = server
        .get_json("/api/rooms/search?capacity=-5&hasAC=true&hasAttachedWashroom=false")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        rooms,
        json!([room_json("A", 1, true, false), room_json("B", 3, true, false)])
    );
}
