use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::filter::{apply_filters, FilterSummary};
use crate::model::CatalogEntry;
use crate::store::{FilterStore, StorageBackend};

/// Apply the stored criteria to `entries` and summarise what is left.
pub fn run<B: StorageBackend>(store: &FilterStore<B>, entries: &[CatalogEntry]) -> Result<CmdResult> {
    let criteria = store.get_filters().clone();
    let visible = apply_filters(entries, &criteria);
    let summary = FilterSummary::new(entries.len(), visible.len(), &criteria);

    let mut result = CmdResult::default();
    match summary.empty {
        Some(empty) => result.add_message(CmdMessage::info(empty.message())),
        None if summary.active_filters > 0 => result.add_message(CmdMessage::info(format!(
            "Showing {} of {} cars ({} active {}).",
            summary.visible,
            summary.total,
            summary.active_filters,
            if summary.active_filters == 1 {
                "filter"
            } else {
                "filters"
            }
        ))),
        None => result.add_message(CmdMessage::info(format!(
            "Showing all {} cars.",
            summary.total
        ))),
    }

    result.summary = Some(summary);
    Ok(result.with_listed_entries(visible).with_criteria(criteria))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::EmptyResult;
    use crate::model::FilterUpdate;
    use crate::store::MemBackend;
    use crate::test_utils::{sample_catalog, STORE_NAME};

    fn store() -> FilterStore<MemBackend> {
        FilterStore::open(MemBackend::new(), STORE_NAME)
    }

    #[test]
    fn unfiltered_lists_everything() {
        let result = run(&store(), &sample_catalog()).unwrap();
        assert_eq!(result.listed_entries.len(), 6);
        assert_eq!(result.messages[0].content, "Showing all 6 cars.");
    }

    #[test]
    fn filtered_summary_counts() {
        let mut store = store();
        store.update_filter(FilterUpdate::Category(Some("SUV".into())));
        let result = run(&store, &sample_catalog()).unwrap();
        let summary = result.summary.unwrap();
        assert_eq!((summary.visible, summary.total), (4, 6));
        assert_eq!(
            result.messages[0].content,
            "Showing 4 of 6 cars (1 active filter)."
        );
    }

    #[test]
    fn no_matches_is_distinct_from_empty_catalog() {
        let mut store = store();
        store.update_filter(FilterUpdate::Manufacturer(Some("Lucid".into())));

        let filtered = run(&store, &sample_catalog()).unwrap();
        assert_eq!(
            filtered.summary.unwrap().empty,
            Some(EmptyResult::NoMatchesWithFilters)
        );

        let empty = run(&store, &[]).unwrap();
        assert_eq!(empty.summary.unwrap().empty, Some(EmptyResult::CatalogEmpty));
    }
}
