// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod park;
pub mod search;

pub use activity::{
    ActivityRecord, AggregatedActivity, GroupKey, NormalizedSession, RawActivityRecord,
};
pub use park::{ActivityPark, CategoryEntry, CategoryKind, Park, ParkSummary};
pub use search::{Filter, NameSelection, ParkSelection, SearchFilters, SearchOutcome, SearchRequest};
