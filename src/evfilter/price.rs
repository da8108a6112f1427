//! # Price Range Bucketing and Slider Math
//!
//! The price domain is the observed `[min, max]` across the whole unfiltered catalog.
//! From it we derive:
//!
//! - five quick-select [`PriceBucket`]s plus a synthetic "Custom Range" bucket, and
//! - handle positions (percent of the track) for a two-handle [`PriceSlider`].
//!
//! Dragging a handle only moves a pending range. Releasing commits the pending range
//! into the [`FilterStore`], which rejects it unless `min < max`.

use crate::filter::is_key_set;
use crate::model::{CatalogEntry, FilterCriteria, FilterKey};
use crate::store::{FilterStore, StorageBackend};
use serde::Serialize;

/// Minimum distance between the two slider handles while dragging.
pub const MIN_HANDLE_GAP: f64 = 100_000.0;

/// Number of bounded buckets, not counting "Custom Range".
pub const BUCKET_COUNT: usize = 5;

pub const CUSTOM_RANGE_LABEL: &str = "Custom Range";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceDomain {
    pub min: f64,
    pub max: f64,
}

impl PriceDomain {
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Observed price extremes. An empty catalog yields `[0, 0]`.
    pub fn from_entries(entries: &[CatalogEntry]) -> Self {
        let mut prices = entries.iter().map(|e| e.price).filter(|p| p.is_finite());
        let Some(first) = prices.next() else {
            return Self { min: 0.0, max: 0.0 };
        };
        let (min, max) = prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_degenerate(&self) -> bool {
        self.span() == 0.0
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Position of `value` as a percentage of the domain.
    ///
    /// A degenerate domain uses a denominator of 1 so the result stays finite.
    pub fn percent_of(&self, value: f64) -> f64 {
        let span = if self.is_degenerate() { 1.0 } else { self.span() };
        (value - self.min) / span * 100.0
    }

    pub fn value_at_percent(&self, percent: f64) -> f64 {
        self.min + self.span() * percent / 100.0
    }
}

/// One quick-select price range. Both bounds are `None` for "Custom Range".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBucket {
    pub label: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceBucket {
    pub fn custom() -> Self {
        Self {
            label: CUSTOM_RANGE_LABEL.to_string(),
            min: None,
            max: None,
        }
    }

    pub fn is_custom(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Whether the criteria's price range is exactly this bucket.
    pub fn is_active(&self, criteria: &FilterCriteria) -> bool {
        !self.is_custom() && criteria.min_price == self.min && criteria.max_price == self.max
    }
}

/// Five contiguous buckets over the domain, then "Custom Range".
///
/// `step = ceil(span / 5)`. Bounds never pass the domain maximum, so on very narrow
/// domains the top buckets collapse onto it.
pub fn price_buckets(domain: PriceDomain) -> Vec<PriceBucket> {
    let step = (domain.span() / BUCKET_COUNT as f64).ceil();
    let last = BUCKET_COUNT - 1;

    let mut buckets: Vec<PriceBucket> = (0..BUCKET_COUNT)
        .map(|i| {
            let lo = (domain.min + step * i as f64).min(domain.max);
            let hi = if i == last {
                domain.max
            } else {
                (domain.min + step * (i + 1) as f64).min(domain.max)
            };
            let label = if i == 0 {
                format!("Under {}", format_price(hi))
            } else if i == last {
                format!("{}+", format_price(lo))
            } else {
                format!("{} - {}", format_price(lo), format_price(hi))
            };
            PriceBucket {
                label,
                min: Some(lo),
                max: Some(hi),
            }
        })
        .collect();

    buckets.push(PriceBucket::custom());
    buckets
}

/// Apply a bucket's range to the store. The custom bucket is a mode switch and
/// changes nothing.
pub fn select_bucket<B: StorageBackend>(store: &mut FilterStore<B>, bucket: &PriceBucket) -> bool {
    match (bucket.min, bucket.max) {
        (Some(min), Some(max)) => store.set_price_range(min, max),
        _ => false,
    }
}

/// Whole-unit price with thousands separators, e.g. `45,000`.
pub fn format_price(value: f64) -> String {
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{}", rounded.abs() as u64);

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Lenient price parsing. Separators and currency symbols are ignored; anything
/// that still fails to parse becomes `0`.
pub fn parse_price_input(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | '$' | '€' | '£' | ' '))
        .collect();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Left and right handle offsets, in percent, for a selection within a domain.
pub fn slider_offsets(domain: PriceDomain, selection: (f64, f64)) -> (f64, f64) {
    (domain.percent_of(selection.0), domain.percent_of(selection.1))
}

/// Convert a percent offset into pixels along a track.
pub fn pixel_offset(percent: f64, track_width: f64) -> f64 {
    percent / 100.0 * track_width
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Min,
    Max,
}

/// Two-handle price slider state.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSlider {
    domain: PriceDomain,
    committed: (f64, f64),
    pending: Option<(f64, f64)>,
}

impl PriceSlider {
    /// Start from the stored price range, falling back to the domain bounds for
    /// unset keys.
    pub fn new(domain: PriceDomain, criteria: &FilterCriteria) -> Self {
        let lo = criteria
            .min_price
            .filter(|_| is_key_set(criteria, FilterKey::MinPrice))
            .map(|p| domain.clamp(p))
            .unwrap_or(domain.min);
        let hi = criteria
            .max_price
            .filter(|_| is_key_set(criteria, FilterKey::MaxPrice))
            .map(|p| domain.clamp(p))
            .unwrap_or(domain.max);
        Self {
            domain,
            committed: (lo, hi),
            pending: None,
        }
    }

    pub fn domain(&self) -> PriceDomain {
        self.domain
    }

    /// The range the handles currently show: pending while dragging, else committed.
    pub fn selection(&self) -> (f64, f64) {
        self.pending.unwrap_or(self.committed)
    }

    pub fn committed(&self) -> (f64, f64) {
        self.committed
    }

    pub fn is_dragging(&self) -> bool {
        self.pending.is_some()
    }

    pub fn offsets(&self) -> (f64, f64) {
        slider_offsets(self.domain, self.selection())
    }

    /// The handle gap, capped at the domain width so narrow catalogs stay draggable.
    pub fn min_gap(&self) -> f64 {
        MIN_HANDLE_GAP.min(self.domain.span())
    }

    /// Move one handle. The value is clamped into the domain and the handles
    /// always end at least [`min_gap`](Self::min_gap) apart.
    pub fn drag(&mut self, handle: Handle, value: f64) -> (f64, f64) {
        let (mut lo, mut hi) = self.selection();
        let gap = self.min_gap();
        let value = self.domain.clamp(value);

        // At a domain edge the dragged handle cannot move further, so the
        // other one is pushed away instead.
        match handle {
            Handle::Min => {
                lo = value.min(hi - gap).max(self.domain.min);
                hi = hi.max(lo + gap).min(self.domain.max);
            }
            Handle::Max => {
                hi = value.max(lo + gap).min(self.domain.max);
                lo = lo.min(hi - gap).max(self.domain.min);
            }
        }

        self.pending = Some((lo, hi));
        (lo, hi)
    }

    /// Move one handle to a pixel position on a track of `track_width` pixels.
    pub fn drag_to_pixel(&mut self, handle: Handle, px: f64, track_width: f64) -> (f64, f64) {
        let percent = if track_width > 0.0 {
            (px / track_width * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        self.drag(handle, self.domain.value_at_percent(percent))
    }

    /// Drop the pending range without committing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Commit the pending range into the store. Returns whether the store accepted it.
    pub fn release<B: StorageBackend>(&mut self, store: &mut FilterStore<B>) -> bool {
        let Some((lo, hi)) = self.pending.take() else {
            return false;
        };
        let accepted = store.set_price_range(lo, hi);
        if accepted {
            self.committed = (lo, hi);
        }
        accepted
    }
}
