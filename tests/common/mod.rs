// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
use park_activity_finder::config::Config;
use park_activity_finder::routes::create_router;
use park_activity_finder::services::{
    query::PAGE_SIZE, ActivitySearch, PagerConfig, ReferenceData, UpstreamClient,
};
use park_activity_finder::AppState;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// A request received by the fake upstream.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedRequest {
    pub page_info: Value,
    pub content_type: Option<String>,
    pub requested_with: Option<String>,
    pub body: Value,
}

#[derive(Default)]
struct FakeUpstreamState {
    /// Items per page number, 1-indexed. Missing pages are empty.
    pages: Vec<Vec<Value>>,
    status: Option<StatusCode>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// In-process stand-in for the activity search API.
pub struct FakeUpstream {
    pub url: String,
    state: Arc<FakeUpstreamState>,
}

#[allow(dead_code)]
impl FakeUpstream {
    /// Serve `pages` on an ephemeral local port.
    pub async fn start(pages: Vec<Vec<Value>>) -> Self {
        Self::spawn(FakeUpstreamState {
            pages,
            ..Default::default()
        })
        .await
    }

    /// Answer every request with `status` and an empty body.
    pub async fn failing(status: StatusCode) -> Self {
        Self::spawn(FakeUpstreamState {
            status: Some(status),
            ..Default::default()
        })
        .await
    }

    async fn spawn(state: FakeUpstreamState) -> Self {
        let state = Arc::new(state);
        let app = Router::new()
            .route("/activities/list", post(list_activities))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake upstream");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}/activities/list", addr),
            state,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requested_pages(&self) -> Vec<u64> {
        self.requests()
            .iter()
            .filter_map(|r| r.page_info["page_number"].as_u64())
            .collect()
    }
}

async fn list_activities(
    State(state): State<Arc<FakeUpstreamState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let page_info: Value = header("page_info")
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or(Value::Null);
    let page_number = page_info["page_number"].as_u64().unwrap_or(0) as usize;

    state.requests.lock().unwrap().push(RecordedRequest {
        page_info,
        content_type: header("content-type"),
        requested_with: header("x-requested-with"),
        body,
    });

    if let Some(status) = state.status {
        return (status, Json(Value::Null));
    }

    let items = page_number
        .checked_sub(1)
        .and_then(|i| state.pages.get(i))
        .cloned()
        .unwrap_or_default();
    (
        StatusCode::OK,
        Json(json!({ "body": { "activity_items": items } })),
    )
}

/// One upstream session record.
#[allow(dead_code)]
pub fn session(name: &str, location: &str, date_range: &str, time_range: &str) -> Value {
    json!({
        "id": 1,
        "name": name,
        "desc": format!("{} description", name),
        "age_description": "Ages 6-12",
        "category": "Aquatics",
        "date_range": date_range,
        "time_range": time_range,
        "location": { "label": location },
        "detail_url": "https://example.org/detail",
        "action_link": { "href": "https://example.org/enroll" },
        "days_of_week": "Tue"
    })
}

/// A full page of distinct sessions, numbered from `start`.
#[allow(dead_code)]
pub fn full_page(start: usize) -> Vec<Value> {
    (start..start + PAGE_SIZE as usize)
        .map(|i| {
            session(
                &format!("Class {}", i),
                "Kelly Pk",
                "July 1, 2025",
                "9:00 AM - 10:00 AM",
            )
        })
        .collect()
}

/// Create a test app talking to `upstream_url`, with the bundled reference
/// data. Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(upstream_url: &str) -> (Router, Arc<AppState>) {
    let config = Config {
        upstream_url: upstream_url.to_string(),
        ..Config::test_default()
    };

    let reference =
        ReferenceData::load_from_files(&config.parks_geojson_path, &config.categories_path)
            .expect("Failed to load reference data");
    let upstream = UpstreamClient::new(config.upstream_url.clone(), config.upstream_timeout)
        .expect("Failed to create upstream client");
    let pager = PagerConfig {
        max_pages: config.max_pages,
        page_size: PAGE_SIZE,
        delay: config.page_delay,
    };

    let search = ActivitySearch::new(upstream, reference, pager, config.continuation_key.clone());
    let state = Arc::new(AppState { config, search });

    (create_router(state.clone()), state)
}

/// Create a test app whose upstream is unreachable.
#[allow(dead_code)]
pub fn create_offline_test_app() -> (Router, Arc<AppState>) {
    create_test_app(&Config::test_default().upstream_url)
}

/// Build a JSON POST request.
#[allow(dead_code)]
pub fn post_json(uri: &str, body: Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(body.to_string()))
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
