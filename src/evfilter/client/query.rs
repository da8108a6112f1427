use crate::error::{EvError, Result};
use crate::filter::is_key_set;
use crate::model::{ColorId, FilterCriteria, FilterKey};
use std::fmt;
use std::str::FromStr;

/// Server-side ordering for `GET /cars/electric-cars/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    PriceAsc,
    PriceDesc,
    YearAsc,
    YearDesc,
}

impl SortOrder {
    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::PriceAsc => "price",
            SortOrder::PriceDesc => "-price",
            SortOrder::YearAsc => "year",
            SortOrder::YearDesc => "-year",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for SortOrder {
    type Err = EvError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "price" | "price-asc" => Ok(SortOrder::PriceAsc),
            "-price" | "price-desc" => Ok(SortOrder::PriceDesc),
            "year" | "year-asc" => Ok(SortOrder::YearAsc),
            "-year" | "year-desc" | "newest" => Ok(SortOrder::YearDesc),
            other => Err(EvError::InvalidInput(format!("Unknown ordering: {}", other))),
        }
    }
}

/// Everything that gets serialized into catalog query parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogQuery {
    pub criteria: FilterCriteria,
    pub search: Option<String>,
    pub ordering: Option<SortOrder>,
}

impl CatalogQuery {
    pub fn new(criteria: FilterCriteria) -> Self {
        Self {
            criteria,
            ..Default::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = if search.trim().is_empty() {
            None
        } else {
            Some(search)
        };
        self
    }

    pub fn with_ordering(mut self, ordering: SortOrder) -> Self {
        self.ordering = Some(ordering);
        self
    }

    /// Query pairs for every meaningfully set value. Color ids are comma-joined.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let c = &self.criteria;
        let mut pairs = Vec::new();

        for key in FilterKey::ALL {
            if !is_key_set(c, key) {
                continue;
            }
            let pair = match key {
                FilterKey::Manufacturer => ("manufacturer_name", text(&c.manufacturer)),
                FilterKey::Model => ("model_name", text(&c.model)),
                FilterKey::MinYear => ("min_year", number(c.min_year)),
                FilterKey::MaxYear => ("max_year", number(c.max_year)),
                FilterKey::MinPrice => ("min_price", number(c.min_price)),
                FilterKey::MaxPrice => ("max_price", number(c.max_price)),
                FilterKey::Category => ("category", text(&c.category)),
                FilterKey::Featured => ("featured", "true".to_string()),
                FilterKey::ExteriorColors => ("exterior_color", join_ids(&c.exterior_colors)),
                FilterKey::InteriorColors => ("interior_color", join_ids(&c.interior_colors)),
            };
            pairs.push(pair);
        }

        if let Some(search) = &self.search {
            pairs.push(("search", search.trim().to_string()));
        }
        if let Some(ordering) = self.ordering {
            pairs.push(("ordering", ordering.as_param().to_string()));
        }
        pairs
    }
}

fn text(value: &Option<String>) -> String {
    value.as_deref().unwrap_or_default().trim().to_string()
}

fn number<T: fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn join_ids(ids: &[ColorId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
