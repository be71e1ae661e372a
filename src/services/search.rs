// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity search service.
//!
//! Handles the core workflow:
//! 1. Resolve park/category/age-group names to upstream ids
//! 2. Reject searches with a dimension that resolved to nothing
//! 3. Fetch a bounded batch of result pages
//! 4. Drop sessions repeated across overlapping pages
//! 5. Parse and aggregate sessions into activities
//! 6. Attach park coordinates and a continuation token

use crate::error::{AppError, Result};
use crate::models::{
    ActivityPark, AggregatedActivity, Filter, NameSelection, ParkSelection, RawActivityRecord,
    SearchFilters, SearchOutcome, SearchRequest,
};
use crate::services::aggregator::aggregate;
use crate::services::continuation::Continuation;
use crate::services::pager::{fetch_pages, PagerConfig};
use crate::services::parser::parse;
use crate::services::query::SearchQuery;
use crate::services::reference::{LookupKind, NameResolver, ParkLocator, ReferenceData};
use crate::services::upstream::ActivitySource;
use std::collections::{HashMap, HashSet};

/// Searches upstream activities and shapes them for display.
pub struct ActivitySearch<S> {
    source: S,
    reference: ReferenceData,
    pager: PagerConfig,
    continuation_key: Vec<u8>,
}

impl<S: ActivitySource + Sync> ActivitySearch<S> {
    pub fn new(
        source: S,
        reference: ReferenceData,
        pager: PagerConfig,
        continuation_key: Vec<u8>,
    ) -> Self {
        Self {
            source,
            reference,
            pager,
            continuation_key,
        }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Run a new search from the request's first page.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchOutcome> {
        let filters = resolve_filters(request, &self.reference);
        self.run(&filters, request.first_page).await
    }

    /// Fetch the next batch for a continuation token from an earlier call.
    ///
    /// Activities are aggregated within this batch only; sessions of an
    /// activity already returned earlier come back as a separate entry.
    pub async fn load_more(&self, token: &str) -> Result<SearchOutcome> {
        let continuation = Continuation::decode(token, &self.continuation_key)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        self.run(&continuation.filters, continuation.next_page).await
    }

    /// Fetch, parse, and aggregate one batch for resolved filters.
    pub async fn run(&self, filters: &SearchFilters, first_page: u32) -> Result<SearchOutcome> {
        let Some(query) = SearchQuery::build(filters) else {
            tracing::warn!(
                parks = ?filters.parks,
                categories = ?filters.categories,
                age_groups = ?filters.age_groups,
                "Search rejected: a filter matched no known ids"
            );
            return Ok(SearchOutcome {
                next_page: first_page,
                ..Default::default()
            });
        };

        let fetched = fetch_pages(&self.source, &query, first_page, &self.pager).await?;
        let next_page = first_page.saturating_add(fetched.pages_fetched);

        let records: Vec<_> = dedupe_sessions(fetched.records)
            .iter()
            .map(parse)
            .collect();
        let activities = aggregate(&records);
        let activity_parks = activity_parks(&self.reference, &activities);

        let continuation = if fetched.has_more {
            let token = Continuation {
                next_page,
                filters: filters.clone(),
            }
            .encode(&self.continuation_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
            Some(token)
        } else {
            None
        };

        tracing::info!(
            sessions = records.len(),
            activities = activities.len(),
            has_more = fetched.has_more,
            "Search batch complete"
        );

        Ok(SearchOutcome {
            activities,
            activity_parks,
            has_more: fetched.has_more,
            next_page,
            continuation,
        })
    }
}

/// Resolve display names in a request to upstream ids.
///
/// "All" selections and empty name lists skip lookup and leave the dimension
/// unrestricted. Names that match nothing leave an empty id list, which makes
/// the search unsearchable rather than unrestricted.
pub fn resolve_filters<R: NameResolver + ParkLocator>(
    request: &SearchRequest,
    reference: &R,
) -> SearchFilters {
    let parks = match &request.parks {
        ParkSelection::All => Filter::All,
        ParkSelection::Named(names) if names.is_empty() => Filter::All,
        ParkSelection::Named(names) => Filter::Ids(reference.resolve_ids(names, LookupKind::Park)),
        ParkSelection::Nearby {
            latitude,
            longitude,
            radius_miles,
        } => Filter::Ids(
            reference
                .parks_within(*latitude, *longitude, *radius_miles)
                .iter()
                .map(|p| p.city_id)
                .collect(),
        ),
    };

    let resolve_names = |selection: &NameSelection| match selection {
        NameSelection::All => Filter::All,
        NameSelection::Named(names) if names.is_empty() => Filter::All,
        NameSelection::Named(names) => {
            Filter::Ids(reference.resolve_ids(names, LookupKind::Activity))
        }
    };

    SearchFilters {
        parks,
        categories: resolve_names(&request.categories),
        age_groups: resolve_names(&request.age_groups),
        open_slots: request.open_slots,
        days_of_week: request.days_of_week.clone(),
        min_age: request.min_age,
        max_age: request.max_age,
        order_by: request.order_by.clone(),
    }
}

/// Drop sessions already seen in this batch, keyed on
/// (name, location label, date range, time range).
pub fn dedupe_sessions(records: Vec<RawActivityRecord>) -> Vec<RawActivityRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| {
            seen.insert((
                r.name.clone(),
                r.location_label().map(str::to_string),
                r.date_range.clone(),
                r.time_range.clone(),
            ))
        })
        .collect()
}

/// Map markers: each known park hosting a returned activity, with the
/// names of those activities. Locations without a known park are omitted.
pub fn activity_parks(
    reference: &ReferenceData,
    activities: &[AggregatedActivity],
) -> Vec<ActivityPark> {
    let mut order: Vec<&str> = Vec::new();
    let mut names_by_location: HashMap<&str, Vec<String>> = HashMap::new();

    for activity in activities.iter().filter(|a| !a.location.is_empty()) {
        names_by_location
            .entry(activity.location.as_str())
            .or_insert_with(|| {
                order.push(activity.location.as_str());
                Vec::new()
            })
            .push(activity.name.clone());
    }

    order
        .into_iter()
        .filter_map(|location| {
            let park = reference.park_by_name(location)?;
            Some(ActivityPark {
                name: park.name.clone(),
                latitude: park.latitude(),
                longitude: park.longitude(),
                activities: names_by_location.remove(location).unwrap_or_default(),
            })
        })
        .collect()
}
