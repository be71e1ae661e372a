// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fetches a bounded batch of consecutive result pages.
//!
//! Paging is caller-driven: each call fetches at most `max_pages` pages
//! starting at `first_page` and reports whether more results likely exist.
//! The fetcher keeps no state between calls.

use crate::error::AppError;
use crate::models::RawActivityRecord;
use crate::services::query::{SearchQuery, PAGE_SIZE};
use crate::services::upstream::ActivitySource;
use std::time::Duration;

/// Batch limits and pacing for one fetch.
#[derive(Debug, Clone, Copy)]
pub struct PagerConfig {
    pub max_pages: u32,
    pub page_size: u32,
    /// Pause between successive requests. Not a retry backoff.
    pub delay: Duration,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            max_pages: 5,
            page_size: PAGE_SIZE,
            delay: Duration::from_secs(1),
        }
    }
}

/// Records from one batch of pages.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub records: Vec<RawActivityRecord>,
    /// The last page allowed in this batch was full.
    pub has_more: bool,
    pub pages_fetched: u32,
}

/// Fetch up to `config.max_pages` pages starting at `first_page`.
///
/// Stops early on an empty or short page. An upstream error aborts the whole
/// batch; nothing is retried.
pub async fn fetch_pages<S: ActivitySource + Sync>(
    source: &S,
    query: &SearchQuery,
    first_page: u32,
    config: &PagerConfig,
) -> Result<FetchOutcome, AppError> {
    let mut outcome = FetchOutcome::default();

    for offset in 0..config.max_pages {
        let page_number = first_page.saturating_add(offset);
        let items = source.fetch_page(&query.page(page_number)).await?;
        outcome.pages_fetched += 1;

        let count = items.len() as u32;
        tracing::debug!(page = page_number, count, "Fetched page");

        if count == 0 {
            break;
        }
        outcome.records.extend(items);

        if count < config.page_size {
            break;
        }
        if offset + 1 == config.max_pages {
            outcome.has_more = true;
            break;
        }
        if !config.delay.is_zero() {
            tokio::time::sleep(config.delay).await;
        }
    }

    tracing::info!(
        first_page,
        pages = outcome.pages_fetched,
        records = outcome.records.len(),
        has_more = outcome.has_more,
        "Fetched result batch"
    );
    Ok(outcome)
}
