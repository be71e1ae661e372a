// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Groups sessions of the same activity and sorts them chronologically.

use crate::models::{ActivityRecord, AggregatedActivity, GroupKey, NormalizedSession};
use crate::time_utils::{label_date_range, parse_start_date, parse_start_time};
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashMap;

/// Sessions of one logical activity, in input order.
struct Group<'a> {
    first: &'a ActivityRecord,
    sessions: Vec<&'a NormalizedSession>,
}

/// Group records by (name, location, category, age description).
///
/// Groups keep first-seen order. Within a group, sessions are stably sorted
/// by parsed start date then start time; unparseable values sort first.
pub fn aggregate(records: &[ActivityRecord]) -> Vec<AggregatedActivity> {
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<Group<'_>> = Vec::new();

    for record in records {
        let slot = *index.entry(record.group_key()).or_insert_with(|| {
            groups.push(Group {
                first: record,
                sessions: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].sessions.push(&record.session);
    }

    groups.into_iter().map(build_activity).collect()
}

fn build_activity(group: Group<'_>) -> AggregatedActivity {
    let mut sessions: Vec<(NaiveDate, NaiveTime, &NormalizedSession)> = group
        .sessions
        .into_iter()
        .map(|s| {
            (
                parse_start_date(&s.date_range),
                parse_start_time(&s.time_range),
                s,
            )
        })
        .collect();

    // `sort_by_key` is stable: equal starts keep input order.
    sessions.sort_by_key(|(date, time, _)| (*date, *time));

    let first = group.first;
    let mut activity = AggregatedActivity {
        name: first.name.clone(),
        location: first.location.clone(),
        desc: first.desc.clone(),
        category: first.category.clone(),
        age_description: first.age_description.clone(),
        ..Default::default()
    };

    for (date, _, session) in sessions {
        activity
            .date_ranges
            .push(label_date_range(&session.date_range, date));
        activity.time_ranges.push(session.time_range.clone());
        activity.action_links.push(session.action_link.clone());
        activity.detail_links.push(session.detail_link.clone());
        activity.days.push(session.days.clone());
    }

    activity
}
