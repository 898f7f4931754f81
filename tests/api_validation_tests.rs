// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API input validation tests for the GPS ingest route.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use tower::ServiceExt;

mod common;

async fn post_gps(app: axum::Router, body: String) -> StatusCode {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/gps-stream")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
    .status()
}

#[tokio::test]
async fn test_valid_fix_accepted() {
    let (app, _state) = common::create_test_app();
    let status = post_gps(app, common::gps_body("alice", 1_700_000_000_000, 37.7749, -122.4194)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_missing_coords_rejected() {
    let (app, _state) = common::create_test_app();
    let status = post_gps(
        app,
        r#"{"username":"alice","timestamp":1700000000000}"#.to_string(),
    )
    .await;
    // Serde rejects the payload before the handler runs.
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_empty_username_rejected() {
    let (app, _state) = common::create_test_app();
    let status = post_gps(app, common::gps_body("", 1_700_000_000_000, 37.7749, -122.4194)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_nonsense_latitude_rejected() {
    let (app, _state) = common::create_test_app();
    let status = post_gps(app, common::gps_body("alice", 1_700_000_000_000, 95.0, -122.4194)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_zero_timestamp_rejected() {
    let (app, _state) = common::create_test_app();
    let status = post_gps(app, common::gps_body("alice", 0, 37.7749, -122.4194)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_out_of_bounds_fix_rejected_and_leaves_no_state() {
    let (app, state) = common::create_test_app();
    // Valid coordinates, but in New York rather than the playable area.
    let status = post_gps(app, common::gps_body("alice", 1_700_000_000_000, 40.7484, -73.9857)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(state.tracker.active_users().unwrap().is_empty());
    assert!(state.tracker.history("alice", None).unwrap().is_empty());
}
