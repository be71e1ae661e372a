// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reference data: park locations and upstream category ids.
//!
//! Resolves display names to upstream ids and answers "which parks are
//! within N miles of a point".

use crate::models::{CategoryEntry, CategoryKind, Park};
use geo::{Distance, Haversine, Point};
use geojson::GeoJson;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Meters per statute mile.
pub const METERS_PER_MILE: f64 = 1609.34;

/// Which reference table a name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Park,
    /// Category or age-group entries
    Activity,
}

/// Resolves display names to upstream ids.
pub trait NameResolver {
    /// Ids for the given names. Unknown names are dropped.
    fn resolve_ids(&self, names: &[String], kind: LookupKind) -> Vec<u64>;
}

/// Finds parks near a location.
pub trait ParkLocator {
    fn parks_within(&self, latitude: f64, longitude: f64, radius_miles: f64) -> Vec<&Park>;
}

/// In-memory reference store loaded at startup.
#[derive(Debug, Default, Clone)]
pub struct ReferenceData {
    parks: Vec<Park>,
    categories: Vec<CategoryEntry>,
}

impl ReferenceData {
    pub fn new(parks: Vec<Park>, categories: Vec<CategoryEntry>) -> Self {
        Self { parks, categories }
    }

    /// Load parks (GeoJSON) and categories (JSON list) from files.
    pub fn load_from_files<P: AsRef<Path>, Q: AsRef<Path>>(
        parks_path: P,
        categories_path: Q,
    ) -> Result<Self, ReferenceError> {
        let parks_json = fs::read_to_string(parks_path.as_ref())
            .map_err(|e| ReferenceError::IoError(e.to_string()))?;
        let categories_json = fs::read_to_string(categories_path.as_ref())
            .map_err(|e| ReferenceError::IoError(e.to_string()))?;

        Ok(Self::new(
            Self::parse_parks(&parks_json)?,
            Self::parse_categories(&categories_json)?,
        ))
    }

    /// Parse a FeatureCollection of park points with `name` and `city_id`
    /// properties. Features missing either property are skipped.
    pub fn parse_parks(json_data: &str) -> Result<Vec<Park>, ReferenceError> {
        let geojson: GeoJson = json_data
            .parse()
            .map_err(|e: geojson::Error| ReferenceError::ParseError(e.to_string()))?;

        let GeoJson::FeatureCollection(collection) = geojson else {
            return Err(ReferenceError::ParseError(
                "expected a FeatureCollection".to_string(),
            ));
        };

        let mut parks = Vec::new();
        for feature in collection.features {
            let name = feature
                .property("name")
                .and_then(|v| v.as_str())
                .map(str::to_string);
            let city_id = feature.property("city_id").and_then(|v| v.as_u64());
            let (Some(name), Some(city_id)) = (name, city_id) else {
                tracing::debug!("Skipping park feature without name or city_id");
                continue;
            };

            let Some(geom) = feature.geometry else {
                continue;
            };
            let location: Point<f64> = geom
                .value
                .try_into()
                .map_err(|_| ReferenceError::UnsupportedGeometry(name.clone()))?;

            parks.push(Park {
                name,
                city_id,
                location,
            });
        }

        tracing::info!(count = parks.len(), "Loaded parks");
        Ok(parks)
    }

    pub fn parse_categories(json_data: &str) -> Result<Vec<CategoryEntry>, ReferenceError> {
        let categories: Vec<CategoryEntry> = serde_json::from_str(json_data)
            .map_err(|e| ReferenceError::ParseError(e.to_string()))?;
        tracing::info!(count = categories.len(), "Loaded activity categories");
        Ok(categories)
    }

    pub fn parks(&self) -> &[Park] {
        &self.parks
    }

    /// Park with this exact display name.
    pub fn park_by_name(&self, name: &str) -> Option<&Park> {
        self.parks.iter().find(|p| p.name == name)
    }

    /// Distinct names of one category kind, sorted.
    pub fn category_names(&self, kind: CategoryKind) -> Vec<String> {
        self.categories
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| c.name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl NameResolver for ReferenceData {
    fn resolve_ids(&self, names: &[String], kind: LookupKind) -> Vec<u64> {
        if names.is_empty() {
            return Vec::new();
        }

        match kind {
            LookupKind::Park => self
                .parks
                .iter()
                .filter(|p| names.contains(&p.name))
                .map(|p| p.city_id)
                .collect(),
            LookupKind::Activity => self
                .categories
                .iter()
                .filter(|c| names.contains(&c.name))
                .map(|c| c.city_id)
                .collect(),
        }
    }
}

impl ParkLocator for ReferenceData {
    fn parks_within(&self, latitude: f64, longitude: f64, radius_miles: f64) -> Vec<&Park> {
        let origin = Point::new(longitude, latitude);
        let radius_meters = radius_miles * METERS_PER_MILE;

        self.parks
            .iter()
            .filter(|p| Haversine.distance(origin, p.location) <= radius_meters)
            .collect()
    }
}

/// Errors from loading reference data.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse reference data: {0}")]
    ParseError(String),

    #[error("Park {0:?} does not have Point geometry")]
    UnsupportedGeometry(String),
}
