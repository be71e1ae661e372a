// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Park Activity Finder API Server
//!
//! Searches park district activities, merges each activity's sessions into
//! one sorted record, and places the hosting parks on a map.

use park_activity_finder::{
    config::Config,
    services::{query::PAGE_SIZE, ActivitySearch, PagerConfig, ReferenceData, UpstreamClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Park Activity Finder API");

    // Load park locations and category ids
    tracing::info!(
        parks = %config.parks_geojson_path,
        categories = %config.categories_path,
        "Loading reference data"
    );
    let reference =
        ReferenceData::load_from_files(&config.parks_geojson_path, &config.categories_path)?;
    tracing::info!(count = reference.parks().len(), "Parks loaded");

    let upstream = UpstreamClient::new(config.upstream_url.clone(), config.upstream_timeout)?;
    tracing::info!(url = upstream.url(), "Upstream client initialized");

    let pager = PagerConfig {
        max_pages: config.max_pages,
        page_size: PAGE_SIZE,
        delay: config.page_delay,
    };

    let search = ActivitySearch::new(upstream, reference, pager, config.continuation_key.clone());

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        search,
    });

    // Build router
    let app = park_activity_finder::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("park_activity_finder=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
