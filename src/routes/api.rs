// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON API routes: search options, activity search, "load more", and
//! nearby parks.

use crate::error::{AppError, Result};
use crate::models::search::{validate_latitude, validate_longitude, validate_radius};
use crate::models::{CategoryKind, ParkSummary, SearchOutcome, SearchRequest};
use crate::services::ParkLocator;
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const DEFAULT_NEARBY_RADIUS_MILES: f64 = 2.0;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/options", get(get_options))
        .route("/api/search", post(search))
        .route("/api/load_more", post(load_more))
        .route("/api/nearby_parks", post(nearby_parks))
}

fn validate<T: Validate>(body: &T) -> Result<()> {
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

// ─── Search Options ──────────────────────────────────────────

/// Everything the search form offers.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct OptionsResponse {
    pub parks: Vec<ParkSummary>,
    pub categories: Vec<String>,
    pub age_groups: Vec<String>,
}

async fn get_options(State(state): State<Arc<AppState>>) -> Json<OptionsResponse> {
    let reference = state.search.reference();

    let mut parks: Vec<ParkSummary> = reference.parks().iter().map(|p| p.summary()).collect();
    parks.sort_by(|a, b| a.name.cmp(&b.name));

    Json(OptionsResponse {
        parks,
        categories: reference.category_names(CategoryKind::Category),
        age_groups: reference.category_names(CategoryKind::AgeGroup),
    })
}

// ─── Activity Search ─────────────────────────────────────────

async fn search(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchOutcome>> {
    validate(&request)?;

    tracing::debug!(
        parks = ?request.parks,
        categories = ?request.categories,
        age_groups = ?request.age_groups,
        first_page = request.first_page,
        "Searching activities"
    );

    Ok(Json(state.search.search(&request).await?))
}

#[derive(Deserialize)]
struct LoadMoreRequest {
    /// Token from the previous response's `continuation`
    continuation: Option<String>,
}

/// Fetch the next batch of an earlier search.
async fn load_more(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoadMoreRequest>,
) -> Result<Json<SearchOutcome>> {
    let token = request
        .continuation
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing search parameters".to_string()))?;

    Ok(Json(state.search.load_more(&token).await?))
}

// ─── Nearby Parks ────────────────────────────────────────────

fn default_radius() -> f64 {
    DEFAULT_NEARBY_RADIUS_MILES
}

#[derive(Deserialize, Validate)]
struct NearbyParksRequest {
    #[validate(custom(function = "validate_latitude"))]
    lat: f64,
    #[validate(custom(function = "validate_longitude"))]
    lon: f64,
    /// Radius in miles
    #[serde(default = "default_radius")]
    #[validate(custom(function = "validate_radius"))]
    radius: f64,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NearbyParksResponse {
    pub parks: Vec<ParkSummary>,
}

async fn nearby_parks(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NearbyParksRequest>,
) -> Result<Json<NearbyParksResponse>> {
    validate(&request)?;

    let parks = state
        .search
        .reference()
        .parks_within(request.lat, request.lon, request.radius)
        .into_iter()
        .map(|p| p.summary())
        .collect();

    Ok(Json(NearbyParksResponse { parks }))
}
