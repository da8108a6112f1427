//! # Command Layer
//!
//! This module contains the **core business logic** behind every user-facing
//! operation. Each command group lives in its own submodule and works on a
//! [`FilterStore`](crate::store::FilterStore) plus plain data.
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O**: no stdout, stderr or terminal concerns
//! - **Argument parsing**: that's the CLI layer's job
//! - **Network access**: catalog entries are passed in already fetched
//!
//! ## Structured Returns
//!
//! Commands return [`CmdResult`], not strings. It carries:
//! - `messages`: structured messages with levels (info, success, warning)
//! - `criteria`: the criteria after the operation
//! - `active_filters`: display rows for each set key
//! - `listed_entries` and `summary`: the visible catalog subset
//! - `buckets` and `slider`: price range presentation data
//!
//! ## Testing Strategy
//!
//! Command tests use [`MemBackend`](crate::store::MemBackend) so nothing touches
//! the filesystem.
//!
//! ## Command Modules
//!
//! - [`filters`]: show, set, unset and clear criteria; color toggles; price range
//! - [`browse`]: filter a catalog and summarise the result
//! - [`prices`]: price buckets and slider positions

use crate::filter::FilterSummary;
use crate::model::{CatalogEntry, FilterCriteria, FilterKey};
use crate::price::{PriceBucket, PriceDomain};
use crate::store::{FilterStore, StorageBackend};
use serde::Serialize;

pub mod browse;
pub mod filters;
pub mod prices;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// One set criteria key, rendered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFilter {
    pub key: FilterKey,
    pub value: String,
}

/// Handle positions for the current price selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderView {
    pub domain: PriceDomain,
    pub selection: (f64, f64),
    pub offsets: (f64, f64),
    pub min_gap: f64,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub criteria: Option<FilterCriteria>,
    pub active_filters: Vec<ActiveFilter>,
    pub listed_entries: Vec<CatalogEntry>,
    pub summary: Option<FilterSummary>,
    pub buckets: Vec<PriceBucket>,
    pub slider: Option<SliderView>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = Some(criteria);
        self
    }

    pub fn with_listed_entries(mut self, entries: Vec<CatalogEntry>) -> Self {
        self.listed_entries = entries;
        self
    }

    pub fn with_buckets(mut self, buckets: Vec<PriceBucket>) -> Self {
        self.buckets = buckets;
        self
    }

    pub fn has_level(&self, level: MessageLevel) -> bool {
        self.messages.iter().any(|m| m.level == level)
    }
}

/// Surface a failed save as a warning. The in-memory change still stands.
pub(crate) fn report_persistence<B: StorageBackend>(store: &FilterStore<B>, result: &mut CmdResult) {
    if let Some(err) = store.last_persist_error() {
        result.add_message(CmdMessage::warning(format!(
            "Filters changed but could not be saved: {}",
            err
        )));
    }
}
