//! Core data types: filter criteria and the read-only catalog records served by the API.
//!
//! [`FilterCriteria`] is the only stateful entity. Everything else is reference data
//! that the engine filters or the CLI displays, never mutates.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{EvError, Result};
use crate::filter::price_is_set;

/// Identifier of a color in the API's color registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorId(pub u32);

impl fmt::Display for ColorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Color namespace. Selecting an exterior color never touches the interior list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorKind {
    Exterior,
    Interior,
}

impl ColorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorKind::Exterior => "exterior",
            ColorKind::Interior => "interior",
        }
    }
}

impl fmt::Display for ColorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorKind {
    type Err = EvError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exterior" | "ext" => Ok(ColorKind::Exterior),
            "interior" | "int" => Ok(ColorKind::Interior),
            other => Err(EvError::InvalidInput(format!(
                "Unknown color type '{}' (expected exterior or interior)",
                other
            ))),
        }
    }
}

/// The complete set of currently active filter constraints.
///
/// An absent field means "no constraint on that dimension", never "match nothing".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exterior_colors: Vec<ColorId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub interior_colors: Vec<ColorId>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn colors(&self, kind: ColorKind) -> &[ColorId] {
        match kind {
            ColorKind::Exterior => &self.exterior_colors,
            ColorKind::Interior => &self.interior_colors,
        }
    }

    pub fn colors_mut(&mut self, kind: ColorKind) -> &mut Vec<ColorId> {
        match kind {
            ColorKind::Exterior => &mut self.exterior_colors,
            ColorKind::Interior => &mut self.interior_colors,
        }
    }

    /// Merge a single field into the criteria, leaving every other field untouched.
    pub fn apply(&mut self, update: FilterUpdate) {
        match update {
            FilterUpdate::Manufacturer(v) => self.manufacturer = v,
            FilterUpdate::Model(v) => self.model = v,
            FilterUpdate::MinYear(v) => self.min_year = v,
            FilterUpdate::MaxYear(v) => self.max_year = v,
            FilterUpdate::MinPrice(v) => self.min_price = v,
            FilterUpdate::MaxPrice(v) => self.max_price = v,
            FilterUpdate::Category(v) => self.category = v,
            FilterUpdate::Featured(v) => self.featured = v,
            FilterUpdate::ExteriorColors(v) => self.exterior_colors = v,
            FilterUpdate::InteriorColors(v) => self.interior_colors = v,
        }
    }

    /// True when both year bounds are present and inverted. Stored as-is.
    pub fn has_inverted_years(&self) -> bool {
        matches!((self.min_year, self.max_year), (Some(lo), Some(hi)) if lo > hi)
    }

    /// True when both price bounds are set and the minimum is not below the maximum.
    pub fn has_inverted_prices(&self) -> bool {
        price_is_set(self.min_price)
            && price_is_set(self.max_price)
            && matches!((self.min_price, self.max_price), (Some(lo), Some(hi)) if lo >= hi)
    }
}

/// The closed set of criteria keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    Manufacturer,
    Model,
    MinYear,
    MaxYear,
    MinPrice,
    MaxPrice,
    Category,
    Featured,
    ExteriorColors,
    InteriorColors,
}

impl FilterKey {
    pub const ALL: [FilterKey; 10] = [
        FilterKey::Manufacturer,
        FilterKey::Model,
        FilterKey::MinYear,
        FilterKey::MaxYear,
        FilterKey::MinPrice,
        FilterKey::MaxPrice,
        FilterKey::Category,
        FilterKey::Featured,
        FilterKey::ExteriorColors,
        FilterKey::InteriorColors,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKey::Manufacturer => "manufacturer",
            FilterKey::Model => "model",
            FilterKey::MinYear => "min-year",
            FilterKey::MaxYear => "max-year",
            FilterKey::MinPrice => "min-price",
            FilterKey::MaxPrice => "max-price",
            FilterKey::Category => "category",
            FilterKey::Featured => "featured",
            FilterKey::ExteriorColors => "exterior-colors",
            FilterKey::InteriorColors => "interior-colors",
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKey {
    type Err = EvError;

    /// Accepts kebab-case, snake_case and camelCase spellings.
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();

        let key = match normalized.as_str() {
            "manufacturer" => FilterKey::Manufacturer,
            "model" => FilterKey::Model,
            "minyear" => FilterKey::MinYear,
            "maxyear" => FilterKey::MaxYear,
            "minprice" => FilterKey::MinPrice,
            "maxprice" => FilterKey::MaxPrice,
            "category" => FilterKey::Category,
            "featured" => FilterKey::Featured,
            "exteriorcolors" => FilterKey::ExteriorColors,
            "interiorcolors" => FilterKey::InteriorColors,
            _ => {
                return Err(EvError::InvalidInput(format!(
                    "Unknown filter key: {}",
                    s.trim()
                )))
            }
        };
        Ok(key)
    }
}

/// A new value for exactly one criteria key. `None` (or an empty list) clears the key.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterUpdate {
    Manufacturer(Option<String>),
    Model(Option<String>),
    MinYear(Option<i32>),
    MaxYear(Option<i32>),
    MinPrice(Option<f64>),
    MaxPrice(Option<f64>),
    Category(Option<String>),
    Featured(Option<bool>),
    ExteriorColors(Vec<ColorId>),
    InteriorColors(Vec<ColorId>),
}

impl FilterUpdate {
    pub fn key(&self) -> FilterKey {
        match self {
            FilterUpdate::Manufacturer(_) => FilterKey::Manufacturer,
            FilterUpdate::Model(_) => FilterKey::Model,
            FilterUpdate::MinYear(_) => FilterKey::MinYear,
            FilterUpdate::MaxYear(_) => FilterKey::MaxYear,
            FilterUpdate::MinPrice(_) => FilterKey::MinPrice,
            FilterUpdate::MaxPrice(_) => FilterKey::MaxPrice,
            FilterUpdate::Category(_) => FilterKey::Category,
            FilterUpdate::Featured(_) => FilterKey::Featured,
            FilterUpdate::ExteriorColors(_) => FilterKey::ExteriorColors,
            FilterUpdate::InteriorColors(_) => FilterKey::InteriorColors,
        }
    }

    /// The update that removes `key` from the criteria.
    pub fn clear(key: FilterKey) -> Self {
        match key {
            FilterKey::Manufacturer => FilterUpdate::Manufacturer(None),
            FilterKey::Model => FilterUpdate::Model(None),
            FilterKey::MinYear => FilterUpdate::MinYear(None),
            FilterKey::MaxYear => FilterUpdate::MaxYear(None),
            FilterKey::MinPrice => FilterUpdate::MinPrice(None),
            FilterKey::MaxPrice => FilterUpdate::MaxPrice(None),
            FilterKey::Category => FilterUpdate::Category(None),
            FilterKey::Featured => FilterUpdate::Featured(None),
            FilterKey::ExteriorColors => FilterUpdate::ExteriorColors(Vec::new()),
            FilterKey::InteriorColors => FilterUpdate::InteriorColors(Vec::new()),
        }
    }

    /// Build an update from user text.
    ///
    /// Numeric input is lenient: malformed prices become `0` and malformed years
    /// become `0`, both of which count as "not set". Color lists are comma-separated ids.
    pub fn parse(key: FilterKey, raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let text = || {
            if raw.is_empty() {
                None
            } else {
                Some(raw.to_string())
            }
        };
        let update = match key {
            FilterKey::Manufacturer => FilterUpdate::Manufacturer(text()),
            FilterKey::Model => FilterUpdate::Model(text()),
            FilterKey::Category => FilterUpdate::Category(text()),
            FilterKey::MinYear => FilterUpdate::MinYear(Some(raw.parse().unwrap_or(0))),
            FilterKey::MaxYear => FilterUpdate::MaxYear(Some(raw.parse().unwrap_or(0))),
            FilterKey::MinPrice => {
                FilterUpdate::MinPrice(Some(crate::price::parse_price_input(raw)))
            }
            FilterKey::MaxPrice => {
                FilterUpdate::MaxPrice(Some(crate::price::parse_price_input(raw)))
            }
            FilterKey::Featured => FilterUpdate::Featured(Some(parse_bool(raw)?)),
            FilterKey::ExteriorColors => FilterUpdate::ExteriorColors(parse_color_ids(raw)?),
            FilterKey::InteriorColors => FilterUpdate::InteriorColors(parse_color_ids(raw)?),
        };
        Ok(update)
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        other => Err(EvError::InvalidInput(format!(
            "Expected true or false, got '{}'",
            other
        ))),
    }
}

fn parse_color_ids(raw: &str) -> Result<Vec<ColorId>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .map(ColorId)
                .map_err(|_| EvError::InvalidInput(format!("Invalid color id: {}", s)))
        })
        .collect()
}

/// One vehicle listing as returned by `GET /cars/electric-cars/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: u64,
    #[serde(rename = "manufacturer_name", alias = "manufacturer")]
    pub manufacturer: String,
    #[serde(rename = "model_name", alias = "model")]
    pub model: String,
    pub year: i32,
    #[serde(deserialize_with = "de_price")]
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "is_featured", alias = "featured", default)]
    pub featured: bool,
    #[serde(rename = "color_ids", alias = "colors", default)]
    pub color_ids: Vec<ColorId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CatalogEntry {
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.year, self.manufacturer, self.model)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Decimal fields arrive either as JSON numbers or as strings like `"45000.00"`.
fn de_price<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// A color from `GET /cars/colors/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub id: ColorId,
    pub name: String,
    #[serde(rename = "color_type", alias = "kind")]
    pub kind: ColorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub location: String,
    pub start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    pub published_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Request body for `POST /cars/public/book-service/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceBooking {
    pub car_model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car_year: Option<i32>,
    pub service_type: String,
    pub preferred_date: NaiveDate,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_criteria_serializes_to_empty_object() {
        let json = serde_json::to_string(&FilterCriteria::new()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn criteria_uses_camel_case_keys() {
        let criteria = FilterCriteria {
            min_price: Some(20000.0),
            exterior_colors: vec![ColorId(3)],
            ..Default::default()
        };
        let json = serde_json::to_string(&criteria).unwrap();
        assert!(json.contains("\"minPrice\":20000.0"));
        assert!(json.contains("\"exteriorColors\":[3]"));
    }

    #[test]
    fn apply_merges_single_field() {
        let mut criteria = FilterCriteria {
            manufacturer: Some("Tesla".into()),
            ..Default::default()
        };
        criteria.apply(FilterUpdate::Category(Some("SUV".into())));
        assert_eq!(criteria.manufacturer.as_deref(), Some("Tesla"));
        assert_eq!(criteria.category.as_deref(), Some("SUV"));

        criteria.apply(FilterUpdate::clear(FilterKey::Manufacturer));
        assert!(criteria.manufacturer.is_none());
        assert_eq!(criteria.category.as_deref(), Some("SUV"));
    }

    #[test]
    fn filter_key_accepts_several_spellings() {
        assert_eq!("min-price".parse::<FilterKey>().unwrap(), FilterKey::MinPrice);
        assert_eq!("minPrice".parse::<FilterKey>().unwrap(), FilterKey::MinPrice);
        assert_eq!("min_price".parse::<FilterKey>().unwrap(), FilterKey::MinPrice);
        assert!("colour".parse::<FilterKey>().is_err());
    }

    #[test]
    fn parse_update_coerces_bad_prices_to_zero() {
        let update = FilterUpdate::parse(FilterKey::MinPrice, "lots").unwrap();
        assert_eq!(update, FilterUpdate::MinPrice(Some(0.0)));
    }

    #[test]
    fn parse_update_blank_text_clears() {
        let update = FilterUpdate::parse(FilterKey::Model, "   ").unwrap();
        assert_eq!(update, FilterUpdate::Model(None));
    }

    #[test]
    fn parse_update_color_ids() {
        let update = FilterUpdate::parse(FilterKey::InteriorColors, "4, 7").unwrap();
        assert_eq!(
            update,
            FilterUpdate::InteriorColors(vec![ColorId(4), ColorId(7)])
        );
        assert!(FilterUpdate::parse(FilterKey::InteriorColors, "red").is_err());
    }

    #[test]
    fn inverted_years_are_detected_not_rejected() {
        let mut criteria = FilterCriteria::new();
        criteria.apply(FilterUpdate::MinYear(Some(2024)));
        criteria.apply(FilterUpdate::MaxYear(Some(2020)));
        assert!(criteria.has_inverted_years());
        assert_eq!(criteria.min_year, Some(2024));
    }

    #[test]
    fn inverted_prices_ignore_unset_bounds() {
        let mut criteria = FilterCriteria::new();
        criteria.apply(FilterUpdate::MinPrice(Some(90000.0)));
        criteria.apply(FilterUpdate::MaxPrice(Some(0.0)));
        assert!(!criteria.has_inverted_prices());

        criteria.apply(FilterUpdate::MaxPrice(Some(50000.0)));
        assert!(criteria.has_inverted_prices());
    }

    #[test]
    fn catalog_entry_accepts_decimal_strings() {
        let json = r#"{
            "id": 9,
            "manufacturer_name": "Rivian",
            "model_name": "R1S",
            "year": 2023,
            "price": "78000.00",
            "category": "SUV",
            "is_featured": true,
            "color_ids": [1, 2]
        }"#;
        let entry: CatalogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.price, 78000.0);
        assert!(entry.featured);
        assert_eq!(entry.color_ids, vec![ColorId(1), ColorId(2)]);
    }

    #[test]
    fn color_kind_parses_short_forms() {
        assert_eq!("ext".parse::<ColorKind>().unwrap(), ColorKind::Exterior);
        assert_eq!("Interior".parse::<ColorKind>().unwrap(), ColorKind::Interior);
        assert!("roof".parse::<ColorKind>().is_err());
    }
}
