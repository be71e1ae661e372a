// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Park and activity-category reference models.

use geo::Point;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A park or facility that hosts activities.
#[derive(Debug, Clone)]
pub struct Park {
    /// Display name (e.g., "Washington Park")
    pub name: String,
    /// Upstream center id
    pub city_id: u64,
    /// Location as (longitude, latitude)
    pub location: Point<f64>,
}

impl Park {
    pub fn latitude(&self) -> f64 {
        self.location.y()
    }

    pub fn longitude(&self) -> f64 {
        self.location.x()
    }

    pub fn summary(&self) -> ParkSummary {
        ParkSummary {
            name: self.name.clone(),
            latitude: self.latitude(),
            longitude: self.longitude(),
        }
    }
}

/// Which upstream dimension a category entry filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryKind {
    /// `activity_other_category_ids` (e.g. "Aquatics")
    #[serde(rename = "ActivityOtherCategoryID")]
    Category,
    /// `activity_category_ids` (e.g. "Youth")
    #[serde(rename = "ActivityCategoryID")]
    AgeGroup,
}

/// A named upstream category id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub name: String,
    pub city_id: u64,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
}

/// Park summary for API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ParkSummary {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Map marker: a park and the activities found there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityPark {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub activities: Vec<String>,
}
