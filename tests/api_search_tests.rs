// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end search tests against a fake upstream.

use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

use common::{body_json, full_page, post_json, session, FakeUpstream};

#[tokio::test]
async fn test_search_all_aggregates_and_sorts_sessions() {
    let upstream = FakeUpstream::start(vec![vec![
        session("Swim", "Kelly Pk", "July 3, 2025", "9:00 AM - 10:00 AM"),
        session("Chess", "Lincoln Pk", "July 2, 2025", "4:00 PM - 5:00 PM"),
        session("Swim", "Kelly Pk", "July 1, 2025", "Noon - 1:00 PM"),
        session("Swim", "Kelly Pk", "July 1, 2025", "9:00 AM - 10:00 AM"),
    ]])
    .await;
    let (app, _) = common::create_test_app(&upstream.url);

    let response = app
        .oneshot(post_json("/api/search", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    // Short first page: one request, nothing more to load
    assert_eq!(upstream.requested_pages(), vec![1]);
    assert_eq!(json["has_more"], false);
    assert_eq!(json["next_page"], 2);
    assert_eq!(json["continuation"], Value::Null);

    let activities = json["activities"].as_array().unwrap();
    assert_eq!(activities.len(), 2);

    let swim = &activities[0];
    assert_eq!(swim["name"], "Swim");
    assert_eq!(swim["location"], "Kelly Park");
    assert_eq!(
        swim["date_ranges"],
        json!([
            "July 1, 2025 (Tuesday)",
            "July 1, 2025 (Tuesday)",
            "July 3, 2025 (Thursday)"
        ])
    );
    assert_eq!(
        swim["time_ranges"],
        json!([
            "9:00 AM - 10:00 AM",
            "Noon - 1:00 PM",
            "9:00 AM - 10:00 AM"
        ])
    );
    assert_eq!(swim["action_links"].as_array().unwrap().len(), 3);

    let parks = json["activity_parks"].as_array().unwrap();
    assert_eq!(parks.len(), 2);
    assert_eq!(parks[0]["name"], "Kelly Park");
    assert_eq!(parks[0]["activities"], json!(["Swim"]));
    assert_eq!(parks[1]["name"], "Lincoln Park");
}

#[tokio::test]
async fn test_search_all_sends_unrestricted_filters() {
    let upstream = FakeUpstream::start(vec![]).await;
    let (app, _) = common::create_test_app(&upstream.url);

    let response = app
        .oneshot(post_json("/api/search", json!({ "open_slots": 3 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let requests = upstream.requests();
    assert_eq!(requests.len(), 1);
    let pattern = &requests[0].body["activity_search_pattern"];
    assert_eq!(pattern["center_ids"], json!([]));
    assert_eq!(pattern["activity_other_category_ids"], Value::Null);
    assert_eq!(pattern["activity_category_ids"], Value::Null);
    assert_eq!(pattern["open_spots"], 3);
    assert_eq!(requests[0].body["activity_transfer_pattern"], json!({}));
}

#[tokio::test]
async fn test_search_named_filters_send_ids() {
    let upstream = FakeUpstream::start(vec![]).await;
    let (app, _) = common::create_test_app(&upstream.url);

    let response = app
        .oneshot(post_json(
            "/api/search",
            json!({
                "parks": { "named": ["Lincoln Park", "Jackson Park"] },
                "categories": { "named": ["Aquatics"] },
                "age_groups": { "named": ["Youth"] }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let requests = upstream.requests();
    let pattern = &requests[0].body["activity_search_pattern"];
    assert_eq!(pattern["center_ids"], json!([1146, 1201]));
    assert_eq!(pattern["activity_other_category_ids"], json!([15]));
    assert_eq!(pattern["activity_category_ids"], json!([5]));
}

#[tokio::test]
async fn test_search_nearby_parks_filter() {
    let upstream = FakeUpstream::start(vec![]).await;
    let (app, _) = common::create_test_app(&upstream.url);

    // Between Washington Park and Jackson Park
    let response = app
        .oneshot(post_json(
            "/api/search",
            json!({
                "parks": {
                    "nearby": { "latitude": 41.787, "longitude": -87.595, "radius_miles": 2.0 }
                }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let requests = upstream.requests();
    let center_ids = requests[0].body["activity_search_pattern"]["center_ids"].clone();
    assert_eq!(center_ids, json!([1182, 1146]));
}

#[tokio::test]
async fn test_search_unknown_names_skip_upstream() {
    let upstream = FakeUpstream::start(vec![full_page(0)]).await;
    let (app, _) = common::create_test_app(&upstream.url);

    let response = app
        .oneshot(post_json(
            "/api/search",
            json!({ "categories": { "named": ["Underwater Basket Weaving"] } }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["activities"], json!([]));
    assert_eq!(json["has_more"], false);
    assert!(upstream.requests().is_empty());
}

#[tokio::test]
async fn test_search_unknown_park_names_skip_upstream() {
    let upstream = FakeUpstream::start(vec![full_page(0)]).await;
    let (app, _) = common::create_test_app(&upstream.url);

    let response = app
        .oneshot(post_json(
            "/api/search",
            json!({ "parks": { "named": ["Atlantis"] } }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["activities"], json!([]));
    assert_eq!(json["activity_parks"], json!([]));
    assert_eq!(json["has_more"], false);
    assert_eq!(json["continuation"], Value::Null);
    assert!(upstream.requests().is_empty());
}

#[tokio::test]
async fn test_search_empty_name_lists_are_unrestricted() {
    let upstream = FakeUpstream::start(vec![]).await;
    let (app, _) = common::create_test_app(&upstream.url);

    let response = app
        .oneshot(post_json(
            "/api/search",
            json!({
                "parks": { "named": [] },
                "categories": { "named": [] },
                "age_groups": { "named": [] }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let requests = upstream.requests();
    assert_eq!(requests.len(), 1);
    let pattern = &requests[0].body["activity_search_pattern"];
    assert_eq!(pattern["center_ids"], json!([]));
    assert_eq!(pattern["activity_other_category_ids"], Value::Null);
    assert_eq!(pattern["activity_category_ids"], Value::Null);
}

#[tokio::test]
async fn test_search_drops_sessions_repeated_across_pages() {
    let mut second = vec![session(
        "Class 0",
        "Kelly Pk",
        "July 1, 2025",
        "9:00 AM - 10:00 AM",
    )];
    second.push(session("Tennis", "Kelly Pk", "July 8, 2025", "9:00 AM - 10:00 AM"));
    let upstream = FakeUpstream::start(vec![full_page(0), second]).await;
    let (app, _) = common::create_test_app(&upstream.url);

    let response = app
        .oneshot(post_json("/api/search", json!({})))
        .await
        .unwrap();
    let json = body_json(response).await;

    assert_eq!(upstream.requested_pages(), vec![1, 2]);
    let activities = json["activities"].as_array().unwrap();
    assert_eq!(activities.len(), 21);
    assert_eq!(activities[0]["name"], "Class 0");
    assert_eq!(activities[0]["date_ranges"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_then_load_more() {
    let pages: Vec<Vec<Value>> = (0..5).map(|p| full_page(p * 20)).collect();
    let mut pages = pages;
    pages.push(vec![session(
        "Late Class",
        "Lincoln Pk",
        "August 5, 2025 to August 26, 2025",
        "6:00 PM - 7:00 PM",
    )]);
    let upstream = FakeUpstream::start(pages).await;
    let (app, _) = common::create_test_app(&upstream.url);

    let response = app
        .clone()
        .oneshot(post_json("/api/search", json!({ "open_slots": 2 })))
        .await
        .unwrap();
    let first = body_json(response).await;

    assert_eq!(upstream.requested_pages(), vec![1, 2, 3, 4, 5]);
    assert_eq!(first["has_more"], true);
    assert_eq!(first["next_page"], 6);
    assert_eq!(first["activities"].as_array().unwrap().len(), 100);
    let token = first["continuation"].as_str().unwrap().to_string();

    let response = app
        .oneshot(post_json("/api/load_more", json!({ "continuation": token })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let second = body_json(response).await;

    assert_eq!(upstream.requested_pages(), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(second["has_more"], false);
    assert_eq!(second["continuation"], Value::Null);
    let activities = second["activities"].as_array().unwrap();
    assert_eq!(activities.len(), 1);
    assert_eq!(
        activities[0]["date_ranges"],
        json!(["August 5, 2025 to August 26, 2025 (Tuesdays)"])
    );

    // The continuation replays the original filters
    let last = upstream.requests().pop().unwrap();
    assert_eq!(last.body["activity_search_pattern"]["open_spots"], 2);
}

#[tokio::test]
async fn test_upstream_rate_limit_is_bad_gateway() {
    let upstream = FakeUpstream::failing(StatusCode::TOO_MANY_REQUESTS).await;
    let (app, _) = common::create_test_app(&upstream.url);

    let response = app
        .oneshot(post_json("/api/search", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = body_json(response).await;
    assert_eq!(json["error"], "upstream_error");
    assert_eq!(json["details"], "Rate limit exceeded");
    assert_eq!(upstream.requested_pages(), vec![1]);
}

#[tokio::test]
async fn test_unreachable_upstream_is_bad_gateway() {
    let (app, _) = common::create_offline_test_app();

    let response = app
        .oneshot(post_json("/api/search", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
