//! Active-filter counting.
//!
//! A key counts as set when its value is meaningful: a non-blank string, a
//! non-zero number, `true`, or a non-empty list. Zero prices and years count
//! as unset, and the matcher uses the same rule.

use crate::model::{FilterCriteria, FilterKey};

pub(crate) fn text_is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

pub(crate) fn year_is_set(value: Option<i32>) -> bool {
    value.is_some_and(|y| y != 0)
}

pub(crate) fn price_is_set(value: Option<f64>) -> bool {
    value.is_some_and(|p| p != 0.0 && !p.is_nan())
}

/// Whether `key` carries a meaningful value in `criteria`.
pub fn is_key_set(criteria: &FilterCriteria, key: FilterKey) -> bool {
    match key {
        FilterKey::Manufacturer => text_is_set(&criteria.manufacturer),
        FilterKey::Model => text_is_set(&criteria.model),
        FilterKey::MinYear => year_is_set(criteria.min_year),
        FilterKey::MaxYear => year_is_set(criteria.max_year),
        FilterKey::MinPrice => price_is_set(criteria.min_price),
        FilterKey::MaxPrice => price_is_set(criteria.max_price),
        FilterKey::Category => text_is_set(&criteria.category),
        FilterKey::Featured => criteria.featured == Some(true),
        FilterKey::ExteriorColors => !criteria.exterior_colors.is_empty(),
        FilterKey::InteriorColors => !criteria.interior_colors.is_empty(),
    }
}

/// The keys that are meaningfully set, in declaration order.
pub fn active_keys(criteria: &FilterCriteria) -> Vec<FilterKey> {
    FilterKey::ALL
        .into_iter()
        .filter(|key| is_key_set(criteria, *key))
        .collect()
}

/// Number of meaningfully set keys. Drives badges; never stored.
pub fn active_filter_count(criteria: &FilterCriteria) -> usize {
    FilterKey::ALL
        .iter()
        .filter(|key| is_key_set(criteria, **key))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColorId;

    #[test]
    fn empty_criteria_counts_zero() {
        assert_eq!(active_filter_count(&FilterCriteria::default()), 0);
    }

    #[test]
    fn zero_price_and_empty_colors_do_not_count() {
        let criteria = FilterCriteria {
            manufacturer: Some("Tesla".into()),
            min_price: Some(0.0),
            exterior_colors: vec![],
            ..Default::default()
        };
        assert_eq!(active_filter_count(&criteria), 1);
    }

    #[test]
    fn blank_strings_and_false_do_not_count() {
        let criteria = FilterCriteria {
            model: Some("   ".into()),
            featured: Some(false),
            min_year: Some(0),
            ..Default::default()
        };
        assert_eq!(active_filter_count(&criteria), 0);
    }

    #[test]
    fn every_key_counts_once() {
        let criteria = FilterCriteria {
            manufacturer: Some("Polestar".into()),
            model: Some("2".into()),
            min_year: Some(2020),
            max_year: Some(2024),
            min_price: Some(30000.0),
            max_price: Some(70000.0),
            category: Some("Sedan".into()),
            featured: Some(true),
            exterior_colors: vec![ColorId(1)],
            interior_colors: vec![ColorId(2), ColorId(3)],
        };
        assert_eq!(active_filter_count(&criteria), 10);
        assert_eq!(active_keys(&criteria), FilterKey::ALL.to_vec());
    }
}
