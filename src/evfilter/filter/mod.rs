//! # Filter Application Engine
//!
//! Given a catalog list and the active criteria, compute the visible subset.
//!
//! Matching is conjunctive: an entry is visible when it passes every predicate
//! compiled from the criteria (see [`Predicate::compile`]). When no key is
//! meaningfully set the input list is returned unchanged without per-entry work.
//!
//! | Key | Rule |
//! |-----|------|
//! | `manufacturer`, `model`, `category` | exact string equality |
//! | `min_year`, `min_price` | entry value `>=` bound |
//! | `max_year`, `max_price` | entry value `<=` bound |
//! | `featured` | only constrains when `true` |
//! | `exterior_colors`, `interior_colors` | at least one shared color id |

mod count;
mod predicate;

pub use count::{active_filter_count, active_keys, is_key_set};
pub(crate) use count::price_is_set;
pub use predicate::Predicate;

use crate::model::{CatalogEntry, FilterCriteria};
use serde::Serialize;

/// Borrowing variant of [`apply_filters`].
pub fn filter_entries<'a>(
    entries: &'a [CatalogEntry],
    criteria: &FilterCriteria,
) -> Vec<&'a CatalogEntry> {
    let predicates = Predicate::compile(criteria);
    if predicates.is_empty() {
        return entries.iter().collect();
    }
    entries
        .iter()
        .filter(|entry| predicates.iter().all(|p| p.matches(entry)))
        .collect()
}

/// The entries that satisfy every set constraint, in input order.
pub fn apply_filters(entries: &[CatalogEntry], criteria: &FilterCriteria) -> Vec<CatalogEntry> {
    let predicates = Predicate::compile(criteria);
    if predicates.is_empty() {
        return entries.to_vec();
    }
    entries
        .iter()
        .filter(|entry| predicates.iter().all(|p| p.matches(entry)))
        .cloned()
        .collect()
}

/// Why a filtered list came out empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyResult {
    /// The catalog itself has no entries.
    CatalogEmpty,
    /// Entries exist but the active filters exclude all of them.
    NoMatchesWithFilters,
}

impl EmptyResult {
    pub fn message(&self) -> &'static str {
        match self {
            EmptyResult::CatalogEmpty => "No cars are listed right now.",
            EmptyResult::NoMatchesWithFilters => {
                "No cars match your filters. Try clearing some of them."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSummary {
    pub total: usize,
    pub visible: usize,
    pub active_filters: usize,
    pub empty: Option<EmptyResult>,
}

impl FilterSummary {
    pub fn new(total: usize, visible: usize, criteria: &FilterCriteria) -> Self {
        let active_filters = active_filter_count(criteria);
        let empty = match (total, visible) {
            (0, _) => Some(EmptyResult::CatalogEmpty),
            (_, 0) => Some(EmptyResult::NoMatchesWithFilters),
            _ => None,
        };
        Self {
            total,
            visible,
            active_filters,
            empty,
        }
    }
}
