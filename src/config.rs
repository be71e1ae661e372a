// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default ActiveNet search endpoint for the Chicago Park District.
pub const DEFAULT_UPSTREAM_URL: &str =
    "https://anc.apm.activecommunities.com/chicagoparkdistrict/rest/activities/list?locale=en-US";

/// Shortest accepted `CONTINUATION_KEY`, in bytes.
pub const MIN_CONTINUATION_KEY_LEN: usize = 32;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Activity search endpoint (POST)
    pub upstream_url: String,
    /// GeoJSON file with park locations and upstream ids
    pub parks_geojson_path: String,
    /// JSON file with category and age-group ids
    pub categories_path: String,
    /// Pages fetched per search or "load more" call
    pub max_pages: u32,
    /// Pause between successive upstream page requests
    pub page_delay: Duration,
    /// Timeout applied to every upstream HTTP request
    pub upstream_timeout: Duration,
    /// HMAC key for continuation tokens (raw bytes)
    pub continuation_key: Vec<u8>,
}

impl Config {
    /// Config for tests: no pacing delay, short timeout.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            upstream_url: "http://127.0.0.1:9/activities/list".to_string(),
            parks_geojson_path: "data/parks.geojson".to_string(),
            categories_path: "data/activity_categories.json".to_string(),
            max_pages: 5,
            page_delay: Duration::ZERO,
            upstream_timeout: Duration::from_secs(5),
            continuation_key: b"test_continuation_key_32_bytes!!".to_vec(),
        }
    }

    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            port: parse_or("PORT", 8080)?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            upstream_url: env::var("UPSTREAM_URL")
                .unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string()),
            parks_geojson_path: env::var("PARKS_GEOJSON_PATH")
                .unwrap_or_else(|_| "data/parks.geojson".to_string()),
            categories_path: env::var("CATEGORIES_PATH")
                .unwrap_or_else(|_| "data/activity_categories.json".to_string()),
            max_pages: match parse_or("MAX_PAGES", 5)? {
                0 => return Err(ConfigError::Invalid("MAX_PAGES", "0".to_string())),
                n => n,
            },
            page_delay: Duration::from_millis(parse_or("PAGE_DELAY_MS", 1000)?),
            upstream_timeout: Duration::from_secs(parse_or("UPSTREAM_TIMEOUT_SECS", 30)?),
            continuation_key: continuation_key()?,
        })
    }
}

/// HMAC key for continuation tokens. Must be at least
/// [`MIN_CONTINUATION_KEY_LEN`] bytes after trimming.
fn continuation_key() -> Result<Vec<u8>, ConfigError> {
    let raw = env::var("CONTINUATION_KEY").map_err(|_| ConfigError::Missing("CONTINUATION_KEY"))?;
    let key = raw.trim();
    if key.len() < MIN_CONTINUATION_KEY_LEN {
        return Err(ConfigError::Invalid(
            "CONTINUATION_KEY",
            format!("{} bytes, need at least {}", key.len(), MIN_CONTINUATION_KEY_LEN),
        ));
    }
    Ok(key.as_bytes().to_vec())
}

/// Read an optional numeric variable, falling back to `default` when unset.
fn parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
