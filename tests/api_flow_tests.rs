// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end flows over the real router: stream fixes, then read the
//! presence, history, leaderboard and grid views an admin client uses.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

mod common;

async fn get_json(app: &axum::Router, uri: &str) -> Value {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn post_fix(app: &axum::Router, body: String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/gps-stream")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health() {
    let (app, _state) = common::create_test_app();
    let json = get_json(&app, "/health").await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_active_users_reflects_streamed_fixes() {
    let (app, _state) = common::create_test_app();
    post_fix(&app, common::gps_body("alice", 1000, 37.7749, -122.4194)).await;
    post_fix(&app, common::gps_body("bob", 2000, 37.7596, -122.4269)).await;

    let json = get_json(&app, "/api/active-users").await;
    assert_eq!(json["ok"], true);
    let data = json["data"].as_object().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data["alice"]["coords"]["latitude"], 37.7749);
    assert_eq!(data["bob"]["timestamp"], 2000);
}

#[tokio::test]
async fn test_users_with_history_joins_current_and_timeline() {
    let (app, _state) = common::create_test_app();
    for ts in [1000, 2000, 3000] {
        post_fix(&app, common::gps_body("alice", ts, 37.7749, -122.4194)).await;
    }

    let json = get_json(&app, "/api/users-with-history?limit=2").await;
    let alice = &json["data"]["alice"];
    assert_eq!(alice["current"]["timestamp"], 3000);
    let history = alice["history"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    // Most recent first.
    assert_eq!(history[0]["timestamp"], 3000);
    assert_eq!(history[1]["timestamp"], 2000);
}

#[tokio::test]
async fn test_leaderboard_scores_and_orders_users() {
    let (app, _state) = common::create_test_app();
    // bob explores two cells, alice one more recently.
    post_fix(&app, common::gps_body("bob", 1000, 37.7749, -122.4194)).await;
    post_fix(&app, common::gps_body("bob", 2000, 37.7596, -122.4269)).await;
    post_fix(&app, common::gps_body("alice", 9000, 37.7705, -122.4923)).await;

    let json = get_json(&app, "/api/leaderboard").await;
    assert_eq!(json["ok"], true);
    assert_eq!(json["totalUsers"], 2);
    assert_eq!(json["totalUniqueHexagons"], 3);

    let board = json["leaderboard"].as_array().unwrap();
    assert_eq!(board[0]["username"], "bob");
    assert_eq!(board[0]["hexagonsExplored"], 2);
    assert_eq!(board[0]["totalPoints"], 20);
    assert_eq!(board[1]["username"], "alice");
    assert_eq!(board[1]["hexagonsExplored"], 1);
    assert!(board[1]["lastActive"].is_string());
}

#[tokio::test]
async fn test_grid_pagination_is_consistent() {
    let (app, _state) = common::create_test_app();

    let first = get_json(&app, "/api/grid?limit=10").await;
    let cells = first["cells"].as_array().unwrap();
    assert_eq!(cells.len(), 10);
    assert_eq!(first["nextOffset"], 10);
    assert_eq!(cells[0]["cell"]["row"], 0);
    assert_eq!(cells[0]["cell"]["col"], 0);
    assert_eq!(cells[0]["vertices"].as_array().unwrap().len(), 6);

    // Re-fetching the same range yields the same cells.
    let again = get_json(&app, "/api/grid?limit=10").await;
    assert_eq!(first["cells"], again["cells"]);

    // The next batch continues where the first left off.
    let second = get_json(&app, "/api/grid?offset=10&limit=10").await;
    let next = second["cells"].as_array().unwrap();
    assert_ne!(cells[9]["cell"], next[0]["cell"]);
}

#[tokio::test]
async fn test_challenges_expose_resolved_cells() {
    let (app, state) = common::create_test_app();
    let json = get_json(&app, "/api/challenges").await;
    let challenges = json["challenges"].as_array().unwrap();
    assert_eq!(challenges.len(), state.catalog.len());

    let ocean_beach = challenges
        .iter()
        .find(|c| c["id"] == "ocean-beach-sunset")
        .expect("catalog should contain the Ocean Beach challenge");
    assert!(ocean_beach["cell"]["row"].is_u64());
    assert_eq!(ocean_beach["difficulty"], "medium");

    // A fix at the challenge coordinate lands in the challenge's cell.
    post_fix(&app, common::gps_body("alice", 1000, 37.7705, -122.4923)).await;
    let visited = state.tracker.visited_cells("alice").unwrap();
    let cell = exploragon::services::HexCell {
        row: ocean_beach["cell"]["row"].as_u64().unwrap() as u32,
        col: ocean_beach["cell"]["col"].as_u64().unwrap() as u32,
    };
    assert!(visited.contains(&cell));
    assert!(state.catalog.challenge_for_cell(&cell).is_some());
}
