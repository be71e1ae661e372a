// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Search filter models: caller input, resolved filters, and results.

use crate::models::{ActivityPark, AggregatedActivity};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Longest accepted list of names in one filter dimension.
pub const MAX_NAMES_PER_FILTER: usize = 200;
/// Longest accepted single park/category name.
pub const MAX_NAME_LEN: usize = 100;
/// Largest accepted "nearby" radius.
pub const MAX_RADIUS_MILES: f64 = 50.0;

/// One resolved filter dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// Do not restrict on this dimension.
    All,
    /// Restrict to exactly these upstream ids.
    Ids(Vec<u64>),
}

impl Filter {
    /// `Ids([])` means names were given but none resolved; searching with it
    /// would silently return nothing.
    pub fn is_searchable(&self) -> bool {
        match self {
            Filter::All => true,
            Filter::Ids(ids) => !ids.is_empty(),
        }
    }

    pub fn ids(&self) -> Option<&[u64]> {
        match self {
            Filter::All => None,
            Filter::Ids(ids) => Some(ids),
        }
    }
}

/// Category or age-group selection by display name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameSelection {
    #[default]
    All,
    Named(Vec<String>),
}

/// Park selection by display name or by distance from a point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParkSelection {
    #[default]
    All,
    Named(Vec<String>),
    Nearby {
        latitude: f64,
        longitude: f64,
        radius_miles: f64,
    },
}

fn default_open_slots() -> u32 {
    1
}

fn default_first_page() -> u32 {
    1
}

fn default_order_by() -> String {
    "Name".to_string()
}

/// Search request body.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct SearchRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_park_selection"))]
    pub parks: ParkSelection,
    #[serde(default)]
    #[validate(custom(function = "validate_name_selection"))]
    pub categories: NameSelection,
    #[serde(default)]
    #[validate(custom(function = "validate_name_selection"))]
    pub age_groups: NameSelection,
    /// Minimum open enrollment spots
    #[serde(default = "default_open_slots")]
    #[validate(range(min = 1, max = 100))]
    pub open_slots: u32,
    /// First upstream page to fetch (1-indexed)
    #[serde(default = "default_first_page")]
    #[validate(range(min = 1, max = 10000))]
    pub first_page: u32,
    #[serde(default)]
    #[validate(length(max = 16))]
    pub days_of_week: Option<String>,
    #[serde(default)]
    #[validate(range(max = 120))]
    pub min_age: Option<u32>,
    #[serde(default)]
    #[validate(range(max = 120))]
    pub max_age: Option<u32>,
    #[serde(default = "default_order_by")]
    #[validate(length(min = 1, max = 32))]
    pub order_by: String,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            parks: ParkSelection::All,
            categories: NameSelection::All,
            age_groups: NameSelection::All,
            open_slots: default_open_slots(),
            first_page: default_first_page(),
            days_of_week: None,
            min_age: None,
            max_age: None,
            order_by: default_order_by(),
        }
    }
}

fn validate_names(names: &[String]) -> Result<(), ValidationError> {
    if names.len() > MAX_NAMES_PER_FILTER {
        return Err(ValidationError::new("too_many_names"));
    }
    if names.iter().any(|n| n.len() > MAX_NAME_LEN) {
        return Err(ValidationError::new("name_too_long"));
    }
    Ok(())
}

fn validate_name_selection(selection: &NameSelection) -> Result<(), ValidationError> {
    match selection {
        NameSelection::All => Ok(()),
        NameSelection::Named(names) => validate_names(names),
    }
}

fn validate_park_selection(selection: &ParkSelection) -> Result<(), ValidationError> {
    match selection {
        ParkSelection::All => Ok(()),
        ParkSelection::Named(names) => validate_names(names),
        ParkSelection::Nearby {
            latitude,
            longitude,
            radius_miles,
        } => {
            validate_latitude(*latitude)?;
            validate_longitude(*longitude)?;
            validate_radius(*radius_miles)
        }
    }
}

pub fn validate_latitude(latitude: f64) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ValidationError::new("invalid_latitude"));
    }
    Ok(())
}

pub fn validate_longitude(longitude: f64) -> Result<(), ValidationError> {
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ValidationError::new("invalid_longitude"));
    }
    Ok(())
}

/// Radius in miles, up to [`MAX_RADIUS_MILES`].
pub fn validate_radius(radius_miles: f64) -> Result<(), ValidationError> {
    if !(0.0..=MAX_RADIUS_MILES).contains(&radius_miles) {
        return Err(ValidationError::new("invalid_radius"));
    }
    Ok(())
}

/// Filters after name and distance resolution. This is also the filter
/// snapshot carried by continuation tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub parks: Filter,
    pub categories: Filter,
    pub age_groups: Filter,
    pub open_slots: u32,
    pub days_of_week: Option<String>,
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
    pub order_by: String,
}

impl SearchFilters {
    /// Unrestricted search for one open slot.
    pub fn all() -> Self {
        Self {
            parks: Filter::All,
            categories: Filter::All,
            age_groups: Filter::All,
            open_slots: default_open_slots(),
            days_of_week: None,
            min_age: None,
            max_age: None,
            order_by: default_order_by(),
        }
    }

    /// True unless some dimension resolved to an empty id list.
    pub fn is_searchable(&self) -> bool {
        self.parks.is_searchable()
            && self.categories.is_searchable()
            && self.age_groups.is_searchable()
    }
}

/// Result of a search or "load more" call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SearchOutcome {
    pub activities: Vec<AggregatedActivity>,
    /// Parks hosting the returned activities, for the map
    pub activity_parks: Vec<ActivityPark>,
    /// The last fetched page was full; more results likely exist
    pub has_more: bool,
    /// First page of the next batch
    pub next_page: u32,
    /// Opaque token for "load more"; present only when `has_more`
    pub continuation: Option<String>,
}
