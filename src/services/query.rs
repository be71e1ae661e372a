// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Builds upstream search requests from resolved filters.
//!
//! The search API takes the filter set as a JSON body and the paging
//! parameters as JSON inside a `page_info` request header.

use crate::models::{Filter, SearchFilters};
use serde::Serialize;

/// Records per upstream page. The API pages in fixed 20-record pages.
pub const PAGE_SIZE: u32 = 20;

/// "Standard" result shape in the upstream API.
const ACTIVITY_SELECT_PARAM: u8 = 2;

/// Body of an upstream search request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchPayload {
    pub activity_search_pattern: SearchPattern,
    pub activity_transfer_pattern: TransferPattern,
}

/// Filter dimensions. An unrestricted dimension is sent as `[]` for
/// centers and `null` for category lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchPattern {
    pub activity_select_param: u8,
    pub center_ids: Vec<u64>,
    pub open_spots: u32,
    /// Age groups
    pub activity_category_ids: Option<Vec<u64>>,
    /// Activity categories
    pub activity_other_category_ids: Option<Vec<u64>>,
    pub days_of_week: Option<String>,
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
}

/// Always empty; the API requires the key.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransferPattern {}

/// Paging parameters, sent JSON-encoded in the `page_info` header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageInfo {
    pub order_by: String,
    pub total_records_per_page: u32,
    pub page_number: u32,
}

/// A validated search, ready to be issued page by page.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    order_by: String,
    payload: SearchPayload,
}

/// One page of a search.
#[derive(Debug, Clone)]
pub struct PageRequest<'a> {
    pub page_info: PageInfo,
    pub payload: &'a SearchPayload,
}

impl PageRequest<'_> {
    pub fn page_number(&self) -> u32 {
        self.page_info.page_number
    }

    /// Value of the `page_info` header.
    pub fn page_info_header(&self) -> String {
        serde_json::to_string(&self.page_info).unwrap_or_default()
    }
}

impl SearchQuery {
    /// Build a query, or `None` if a dimension names things that resolved
    /// to no ids. Such a search would silently return nothing.
    pub fn build(filters: &SearchFilters) -> Option<Self> {
        if !filters.is_searchable() {
            return None;
        }

        Some(Self {
            order_by: filters.order_by.clone(),
            payload: build_payload(filters),
        })
    }

    pub fn payload(&self) -> &SearchPayload {
        &self.payload
    }

    /// Request for one page (1-indexed).
    pub fn page(&self, page_number: u32) -> PageRequest<'_> {
        PageRequest {
            page_info: PageInfo {
                order_by: self.order_by.clone(),
                total_records_per_page: PAGE_SIZE,
                page_number,
            },
            payload: &self.payload,
        }
    }
}

fn build_payload(filters: &SearchFilters) -> SearchPayload {
    SearchPayload {
        activity_search_pattern: SearchPattern {
            activity_select_param: ACTIVITY_SELECT_PARAM,
            center_ids: filters.parks.ids().map(<[u64]>::to_vec).unwrap_or_default(),
            open_spots: filters.open_slots,
            activity_category_ids: nullable_ids(&filters.age_groups),
            activity_other_category_ids: nullable_ids(&filters.categories),
            days_of_week: filters.days_of_week.clone(),
            min_age: filters.min_age,
            max_age: filters.max_age,
        },
        activity_transfer_pattern: TransferPattern::default(),
    }
}

fn nullable_ids(filter: &Filter) -> Option<Vec<u64>> {
    filter.ids().map(<[u64]>::to_vec)
}
