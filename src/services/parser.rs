// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Maps raw upstream records into normalized activity records.

use crate::models::{ActivityRecord, NormalizedSession, RawActivityRecord};

/// Abbreviations used in upstream facility labels and their expansions.
/// No expansion contains another abbreviation, so cleanup is idempotent.
const LOCATION_ABBREVIATIONS: [(&str, &str); 4] = [
    (" Ctr", " Center"),
    (" Pk", " Park"),
    (" Fld", " Field"),
    (" Cmty", " Community"),
];

/// Expand facility-name abbreviations ("Lincoln Pk" -> "Lincoln Park").
pub fn clean_location_name(label: &str) -> String {
    LOCATION_ABBREVIATIONS
        .iter()
        .fold(label.to_string(), |name, (from, to)| name.replace(from, to))
}

/// Parse one upstream record. Missing fields become empty strings or `None`.
pub fn parse(raw: &RawActivityRecord) -> ActivityRecord {
    let text = |field: &Option<String>| field.clone().unwrap_or_default();

    ActivityRecord {
        id: raw.id,
        name: text(&raw.name),
        location: raw
            .location_label()
            .map(clean_location_name)
            .unwrap_or_default(),
        desc: text(&raw.desc),
        category: text(&raw.category),
        age_description: text(&raw.age_description),
        session: NormalizedSession {
            date_range: text(&raw.date_range),
            time_range: text(&raw.time_range),
            action_link: raw.action_link.as_ref().and_then(|l| l.href.clone()),
            detail_link: raw.detail_url.clone(),
            days: text(&raw.days_of_week),
        },
    }
}
