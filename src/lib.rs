// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Park Activity Finder: search park district activities near you
//!
//! This crate provides the backend API that queries the park district's
//! activity search service, merges the sessions of each activity into one
//! chronologically sorted record, and locates the parks that host them.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{ActivitySearch, UpstreamClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub search: ActivitySearch<UpstreamClient>,
}
