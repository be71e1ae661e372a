// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity models: raw upstream records, normalized sessions, and
//! aggregated activities for API responses.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One session as returned by the upstream search API.
///
/// Every field is optional on the wire; unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawActivityRecord {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub desc: Option<String>,
    pub age_description: Option<String>,
    pub category: Option<String>,
    /// e.g. "July 1, 2025" or "July 1, 2025 to August 5, 2025"
    pub date_range: Option<String>,
    /// e.g. "9:00 AM - 10:00 AM" or "Noon - 1:00 PM"
    pub time_range: Option<String>,
    pub location: Option<RawLocation>,
    pub detail_url: Option<String>,
    pub action_link: Option<RawActionLink>,
    pub days_of_week: Option<String>,
}

impl RawActivityRecord {
    /// Raw (uncleaned) location label, if any.
    pub fn location_label(&self) -> Option<&str> {
        self.location.as_ref().and_then(|l| l.label.as_deref())
    }
}

/// Nested location object of a raw record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawLocation {
    pub label: Option<String>,
}

/// Nested registration link of a raw record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawActionLink {
    pub href: Option<String>,
}

/// Response envelope of the upstream search API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub body: SearchResponseBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponseBody {
    pub activity_items: Vec<RawActivityRecord>,
}

/// A single scheduled occurrence of an activity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedSession {
    pub date_range: String,
    pub time_range: String,
    pub action_link: Option<String>,
    pub detail_link: Option<String>,
    pub days: String,
}

/// A parsed upstream record: identity fields plus its one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityRecord {
    pub id: Option<u64>,
    pub name: String,
    /// Location label after abbreviation cleanup
    pub location: String,
    pub desc: String,
    pub category: String,
    pub age_description: String,
    pub session: NormalizedSession,
}

impl ActivityRecord {
    /// Identity of the logical activity this session belongs to.
    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            name: self.name.clone(),
            location: self.location.clone(),
            category: self.category.clone(),
            age_description: self.age_description.clone(),
        }
    }
}

/// Two sessions with equal keys are occurrences of the same activity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub name: String,
    pub location: String,
    pub category: String,
    pub age_description: String,
}

/// An activity with all of its sessions, sorted by start date and time.
///
/// The five session lists are index-aligned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AggregatedActivity {
    pub name: String,
    pub location: String,
    pub desc: String,
    pub category: String,
    pub age_description: String,
    /// Date ranges labeled with their weekday, e.g. "July 1, 2025 (Tuesday)"
    pub date_ranges: Vec<String>,
    pub time_ranges: Vec<String>,
    pub action_links: Vec<Option<String>>,
    pub detail_links: Vec<Option<String>>,
    pub days: Vec<String>,
}

impl AggregatedActivity {
    /// Number of sessions in this activity.
    pub fn session_count(&self) -> usize {
        self.date_ranges.len()
    }
}
