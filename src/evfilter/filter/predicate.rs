//! Catalog predicates.
//!
//! [`Predicate`] is one constraint compiled from the criteria. Only meaningfully set
//! keys compile to a predicate, so an entry passes when every compiled predicate
//! passes.

use super::count::{price_is_set, text_is_set, year_is_set};
use crate::model::{CatalogEntry, ColorId, FilterCriteria};

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Exact manufacturer name match.
    Manufacturer(String),
    /// Exact model name match.
    Model(String),
    MinYear(i32),
    MaxYear(i32),
    MinPrice(f64),
    MaxPrice(f64),
    /// Exact category match.
    Category(String),
    /// Entry must be featured.
    Featured,
    /// Entry must share at least one exterior color id.
    AnyExteriorColor(Vec<ColorId>),
    /// Entry must share at least one interior color id.
    AnyInteriorColor(Vec<ColorId>),
}

impl Predicate {
    /// Compile criteria into predicates, in evaluation order.
    pub fn compile(criteria: &FilterCriteria) -> Vec<Predicate> {
        let mut predicates = Vec::new();

        if text_is_set(&criteria.manufacturer) {
            predicates.push(Predicate::Manufacturer(
                criteria.manufacturer.clone().unwrap_or_default(),
            ));
        }
        if text_is_set(&criteria.model) {
            predicates.push(Predicate::Model(criteria.model.clone().unwrap_or_default()));
        }
        if let Some(year) = criteria.min_year.filter(|y| year_is_set(Some(*y))) {
            predicates.push(Predicate::MinYear(year));
        }
        if let Some(year) = criteria.max_year.filter(|y| year_is_set(Some(*y))) {
            predicates.push(Predicate::MaxYear(year));
        }
        if let Some(price) = criteria.min_price.filter(|p| price_is_set(Some(*p))) {
            predicates.push(Predicate::MinPrice(price));
        }
        if let Some(price) = criteria.max_price.filter(|p| price_is_set(Some(*p))) {
            predicates.push(Predicate::MaxPrice(price));
        }
        if text_is_set(&criteria.category) {
            predicates.push(Predicate::Category(
                criteria.category.clone().unwrap_or_default(),
            ));
        }
        if criteria.featured == Some(true) {
            predicates.push(Predicate::Featured);
        }
        if !criteria.exterior_colors.is_empty() {
            predicates.push(Predicate::AnyExteriorColor(criteria.exterior_colors.clone()));
        }
        if !criteria.interior_colors.is_empty() {
            predicates.push(Predicate::AnyInteriorColor(criteria.interior_colors.clone()));
        }

        predicates
    }

    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        match self {
            Predicate::Manufacturer(name) => entry.manufacturer == *name,
            Predicate::Model(name) => entry.model == *name,
            Predicate::MinYear(year) => entry.year >= *year,
            Predicate::MaxYear(year) => entry.year <= *year,
            Predicate::MinPrice(price) => entry.price >= *price,
            Predicate::MaxPrice(price) => entry.price <= *price,
            Predicate::Category(category) => entry.category == *category,
            Predicate::Featured => entry.featured,
            Predicate::AnyExteriorColor(ids) | Predicate::AnyInteriorColor(ids) => {
                ids.iter().any(|id| entry.color_ids.contains(id))
            }
        }
    }
}
