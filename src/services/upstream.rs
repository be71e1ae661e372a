// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client for the park district's activity search API.

use crate::error::AppError;
use crate::models::activity::SearchResponse;
use crate::models::RawActivityRecord;
use crate::services::query::PageRequest;
use reqwest::header::CONTENT_TYPE;
use std::future::Future;
use std::time::Duration;

/// A source of activity search result pages.
pub trait ActivitySource {
    /// Fetch one page of results.
    fn fetch_page(
        &self,
        request: &PageRequest<'_>,
    ) -> impl Future<Output = Result<Vec<RawActivityRecord>, AppError>> + Send;
}

/// HTTP client for the upstream search endpoint.
#[derive(Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    url: String,
}

impl UpstreamClient {
    /// Create a client for `url` with a per-request timeout.
    pub fn new(url: String, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client init failed: {}", e)))?;

        Ok(Self { http, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Check response status and parse the JSON envelope.
    async fn check_response_json(
        &self,
        response: reqwest::Response,
    ) -> Result<SearchResponse, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                tracing::warn!("Upstream rate limit hit (429)");
                return Err(AppError::Upstream(
                    AppError::UPSTREAM_RATE_LIMIT.to_string(),
                ));
            }

            return Err(AppError::Upstream(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("JSON parse error: {}", e)))
    }
}

impl ActivitySource for UpstreamClient {
    async fn fetch_page(
        &self,
        request: &PageRequest<'_>,
    ) -> Result<Vec<RawActivityRecord>, AppError> {
        tracing::debug!(page = request.page_number(), "Fetching upstream page");

        let response = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json;charset=utf-8")
            .header("X-Requested-With", "XMLHttpRequest")
            .header("page_info", request.page_info_header())
            .json(request.payload)
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        let envelope = self.check_response_json(response).await?;
        Ok(envelope.body.activity_items)
    }
}
