//! Price commands. The domain always comes from the full, unfiltered catalog.

use crate::commands::{report_persistence, CmdMessage, CmdResult, SliderView};
use crate::error::{EvError, Result};
use crate::model::CatalogEntry;
use crate::price::{self, format_price, PriceDomain, PriceSlider};
use crate::store::{FilterStore, StorageBackend};

pub fn buckets<B: StorageBackend>(store: &FilterStore<B>, entries: &[CatalogEntry]) -> Result<CmdResult> {
    let domain = PriceDomain::from_entries(entries);
    let buckets = price::price_buckets(domain);

    let mut result = CmdResult::default();
    if entries.is_empty() {
        result.add_message(CmdMessage::info(
            "No cars are listed, so there is no price range yet.",
        ));
    }
    Ok(result
        .with_buckets(buckets)
        .with_criteria(store.get_filters().clone()))
}

/// Select a bucket by zero-based index.
pub fn select<B: StorageBackend>(
    store: &mut FilterStore<B>,
    entries: &[CatalogEntry],
    index: usize,
) -> Result<CmdResult> {
    let buckets = price::price_buckets(PriceDomain::from_entries(entries));
    let bucket = buckets.get(index).cloned().ok_or_else(|| {
        EvError::InvalidInput(format!(
            "No price range {} (choose 1 to {})",
            index + 1,
            buckets.len()
        ))
    })?;

    let mut result = CmdResult::default();
    if bucket.is_custom() {
        result.add_message(CmdMessage::info(
            "Custom range: set the bounds with `filters price <min> <max>`.",
        ));
    } else if price::select_bucket(store, &bucket) {
        result.add_message(CmdMessage::success(format!(
            "Price range set to {}",
            bucket.label
        )));
        report_persistence(store, &mut result);
    } else {
        result.add_message(CmdMessage::warning(format!(
            "Ignored {}: every listed car has the same price.",
            bucket.label
        )));
    }

    Ok(result
        .with_buckets(buckets)
        .with_criteria(store.get_filters().clone()))
}

pub fn slider<B: StorageBackend>(store: &FilterStore<B>, entries: &[CatalogEntry]) -> Result<CmdResult> {
    let domain = PriceDomain::from_entries(entries);
    let slider = PriceSlider::new(domain, store.get_filters());
    let (lo, hi) = slider.selection();

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "{} - {} of {} - {}",
        format_price(lo),
        format_price(hi),
        format_price(domain.min),
        format_price(domain.max)
    )));
    result.slider = Some(SliderView {
        domain,
        selection: (lo, hi),
        offsets: slider.offsets(),
        min_gap: slider.min_gap(),
    });
    Ok(result.with_criteria(store.get_filters().clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::MemBackend;
    use crate::test_utils::{entry, sample_catalog, STORE_NAME};

    fn store() -> FilterStore<MemBackend> {
        FilterStore::open(MemBackend::new(), STORE_NAME)
    }

    #[test]
    fn buckets_span_the_catalog() {
        let result = buckets(&store(), &sample_catalog()).unwrap();
        assert_eq!(result.buckets.len(), 6);
        assert_eq!(result.buckets[0].min, Some(28000.0));
        assert_eq!(result.buckets[4].max, Some(78000.0));
    }

    #[test]
    fn select_applies_bucket_bounds() {
        let mut store = store();
        let result = select(&mut store, &sample_catalog(), 1).unwrap();
        assert!(result.has_level(MessageLevel::Success));
        assert_eq!(store.get_filters().min_price, Some(38000.0));
        assert_eq!(store.get_filters().max_price, Some(48000.0));
        assert!(result.buckets[1].is_active(store.get_filters()));
    }

    #[test]
    fn select_custom_changes_nothing() {
        let mut store = store();
        select(&mut store, &sample_catalog(), 5).unwrap();
        assert!(store.get_filters().is_empty());
    }

    #[test]
    fn select_out_of_range_fails() {
        assert!(select(&mut store(), &sample_catalog(), 9).is_err());
    }

    #[test]
    fn degenerate_catalog_rejects_buckets() {
        let mut store = store();
        let entries = vec![entry(1, "Kia", "EV9", 2024, 55000.0)];
        let result = select(&mut store, &entries, 0).unwrap();
        assert!(result.has_level(MessageLevel::Warning));
        assert!(store.get_filters().min_price.is_none());
    }

    #[test]
    fn slider_reflects_stored_range() {
        let mut store = store();
        store.set_price_range(40500.0, 65500.0);
        let result = slider(&store, &sample_catalog()).unwrap();
        let view = result.slider.unwrap();
        assert_eq!(view.selection, (40500.0, 65500.0));
        assert_eq!(view.offsets, (25.0, 75.0));
    }
}
