//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry
//! point for every filter operation, regardless of the UI in front of it.
//!
//! The facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (filter keys from text, 1-based bucket numbers)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no business logic, no I/O and no network access. Catalog entries are
//! fetched by the caller and passed in.
//!
//! ## Generic Over StorageBackend
//!
//! `StorefrontApi<B: StorageBackend>`:
//! - Production: `StorefrontApi<FsBackend>`
//! - Testing: `StorefrontApi<MemBackend>`

use crate::colors::ColorPalette;
use crate::commands::{self, CmdResult};
use crate::error::{EvError, Result};
use crate::model::{CatalogEntry, Color, ColorKind, FilterKey};
use crate::store::{FilterStore, StorageBackend};

pub struct StorefrontApi<B: StorageBackend> {
    store: FilterStore<B>,
    palette: ColorPalette,
}

impl<B: StorageBackend> StorefrontApi<B> {
    pub fn new(store: FilterStore<B>) -> Self {
        Self {
            store,
            palette: ColorPalette::default(),
        }
    }

    pub fn with_palette(mut self, colors: Vec<Color>) -> Self {
        self.palette = ColorPalette::new(colors);
        self
    }

    pub fn set_palette(&mut self, colors: Vec<Color>) {
        self.palette = ColorPalette::new(colors);
    }

    pub fn store(&self) -> &FilterStore<B> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut FilterStore<B> {
        &mut self.store
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    pub fn show_filters(&self) -> Result<CmdResult> {
        commands::filters::show(&self.store, &self.palette)
    }

    pub fn set_filter(&mut self, key: &str, raw: &str) -> Result<CmdResult> {
        let key: FilterKey = key.parse()?;
        commands::filters::set(&mut self.store, &self.palette, key, raw)
    }

    pub fn clear_filter(&mut self, key: &str) -> Result<CmdResult> {
        let key: FilterKey = key.parse()?;
        commands::filters::unset(&mut self.store, key)
    }

    pub fn clear_filters(&mut self) -> Result<CmdResult> {
        commands::filters::clear(&mut self.store)
    }

    pub fn toggle_color(&mut self, kind: ColorKind, name: &str) -> Result<CmdResult> {
        commands::filters::toggle_color(&mut self.store, &self.palette, kind, name)
    }

    pub fn reset_colors(&mut self) -> Result<CmdResult> {
        commands::filters::reset_colors(&mut self.store)
    }

    pub fn set_price_range(&mut self, min: f64, max: f64) -> Result<CmdResult> {
        commands::filters::set_price_range(&mut self.store, min, max)
    }

    pub fn browse(&self, entries: &[CatalogEntry]) -> Result<CmdResult> {
        commands::browse::run(&self.store, entries)
    }

    pub fn price_buckets(&self, entries: &[CatalogEntry]) -> Result<CmdResult> {
        commands::prices::buckets(&self.store, entries)
    }

    /// `number` is 1-based, as shown to the user.
    pub fn select_bucket(&mut self, entries: &[CatalogEntry], number: usize) -> Result<CmdResult> {
        let index = number
            .checked_sub(1)
            .ok_or_else(|| EvError::InvalidInput("Price ranges are numbered from 1".into()))?;
        commands::prices::select(&mut self.store, entries, index)
    }

    pub fn slider(&self, entries: &[CatalogEntry]) -> Result<CmdResult> {
        commands::prices::slider(&self.store, entries)
    }
}
