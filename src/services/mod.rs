// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod aggregator;
pub mod continuation;
pub mod pager;
pub mod parser;
pub mod query;
pub mod reference;
pub mod search;
pub mod upstream;

pub use continuation::{Continuation, ContinuationError};
pub use pager::{FetchOutcome, PagerConfig};
pub use reference::{LookupKind, NameResolver, ParkLocator, ReferenceData, ReferenceError};
pub use search::ActivitySearch;
pub use upstream::{ActivitySource, UpstreamClient};
