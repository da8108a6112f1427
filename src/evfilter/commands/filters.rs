use crate::colors::ColorPalette;
use crate::commands::{report_persistence, ActiveFilter, CmdMessage, CmdResult};
use crate::error::Result;
use crate::filter::{active_keys, is_key_set};
use crate::model::{ColorId, ColorKind, FilterCriteria, FilterKey, FilterUpdate};
use crate::price::format_price;
use crate::store::{FilterStore, StorageBackend};

pub fn show<B: StorageBackend>(store: &FilterStore<B>, palette: &ColorPalette) -> Result<CmdResult> {
    let criteria = store.get_filters().clone();
    let mut result = CmdResult::default();

    result.active_filters = describe(&criteria, palette);
    if result.active_filters.is_empty() {
        result.add_message(CmdMessage::info("No filters active."));
    }
    if criteria.has_inverted_years() {
        result.add_message(inverted_years_warning());
    }

    Ok(result.with_criteria(criteria))
}

pub fn set<B: StorageBackend>(
    store: &mut FilterStore<B>,
    palette: &ColorPalette,
    key: FilterKey,
    raw: &str,
) -> Result<CmdResult> {
    let update = FilterUpdate::parse(key, raw)?;

    let mut candidate = store.get_filters().clone();
    candidate.apply(update.clone());
    if candidate.has_inverted_prices() {
        let criteria = store.get_filters().clone();
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::warning(format!(
            "Ignored {} {}: the minimum price must be below the maximum.",
            key,
            raw.trim()
        )));
        result.active_filters = describe(&criteria, palette);
        return Ok(result.with_criteria(criteria));
    }

    store.update_filter(update);

    let criteria = store.get_filters().clone();
    let mut result = CmdResult::default();

    if is_key_set(&criteria, key) {
        let value = describe_key(&criteria, key, palette).unwrap_or_default();
        result.add_message(CmdMessage::success(format!("Set {} to {}", key, value)));
    } else {
        result.add_message(CmdMessage::info(format!(
            "{} is not set ('{}' does not count as a value)",
            key,
            raw.trim()
        )));
    }
    if criteria.has_inverted_years() {
        result.add_message(inverted_years_warning());
    }
    report_persistence(store, &mut result);

    result.active_filters = describe(&criteria, palette);
    Ok(result.with_criteria(criteria))
}

pub fn unset<B: StorageBackend>(store: &mut FilterStore<B>, key: FilterKey) -> Result<CmdResult> {
    store.update_filter(FilterUpdate::clear(key));

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Cleared {}", key)));
    report_persistence(store, &mut result);
    Ok(result.with_criteria(store.get_filters().clone()))
}

pub fn clear<B: StorageBackend>(store: &mut FilterStore<B>) -> Result<CmdResult> {
    let cleared = active_keys(store.get_filters()).len();
    store.clear_filters();

    let mut result = CmdResult::default();
    let msg = match cleared {
        0 => "No filters were active.".to_string(),
        1 => "Cleared 1 filter.".to_string(),
        n => format!("Cleared {} filters.", n),
    };
    result.add_message(CmdMessage::success(msg));
    report_persistence(store, &mut result);
    Ok(result.with_criteria(store.get_filters().clone()))
}

/// Toggle a color by palette name. A bare number is taken as a color id.
pub fn toggle_color<B: StorageBackend>(
    store: &mut FilterStore<B>,
    palette: &ColorPalette,
    kind: ColorKind,
    name: &str,
) -> Result<CmdResult> {
    let id = match name.trim().parse::<u32>() {
        Ok(raw) => ColorId(raw),
        Err(_) => palette.resolve(kind, name)?,
    };
    store.toggle_color_filter(kind, id);

    let criteria = store.get_filters().clone();
    let label = palette
        .names(&[id])
        .pop()
        .unwrap_or_else(|| id.to_string());
    let verb = if criteria.colors(kind).contains(&id) {
        "Added"
    } else {
        "Removed"
    };

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} {} color {}",
        verb, kind, label
    )));
    report_persistence(store, &mut result);
    result.active_filters = describe(&criteria, palette);
    Ok(result.with_criteria(criteria))
}

pub fn reset_colors<B: StorageBackend>(store: &mut FilterStore<B>) -> Result<CmdResult> {
    store.reset_color_filters();

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Color filters reset."));
    report_persistence(store, &mut result);
    Ok(result.with_criteria(store.get_filters().clone()))
}

pub fn set_price_range<B: StorageBackend>(
    store: &mut FilterStore<B>,
    min: f64,
    max: f64,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if store.set_price_range(min, max) {
        result.add_message(CmdMessage::success(format!(
            "Price range set to {} - {}",
            format_price(min),
            format_price(max)
        )));
        report_persistence(store, &mut result);
    } else {
        result.add_message(CmdMessage::warning(format!(
            "Ignored price range {} - {}: the minimum must be below the maximum.",
            format_price(min),
            format_price(max)
        )));
    }

    Ok(result.with_criteria(store.get_filters().clone()))
}

fn inverted_years_warning() -> CmdMessage {
    CmdMessage::warning("Minimum year is after maximum year; no cars will match.")
}

pub(crate) fn describe(criteria: &FilterCriteria, palette: &ColorPalette) -> Vec<ActiveFilter> {
    active_keys(criteria)
        .into_iter()
        .filter_map(|key| {
            describe_key(criteria, key, palette).map(|value| ActiveFilter { key, value })
        })
        .collect()
}

fn describe_key(criteria: &FilterCriteria, key: FilterKey, palette: &ColorPalette) -> Option<String> {
    let value = match key {
        FilterKey::Manufacturer => criteria.manufacturer.clone()?,
        FilterKey::Model => criteria.model.clone()?,
        FilterKey::Category => criteria.category.clone()?,
        FilterKey::MinYear => criteria.min_year?.to_string(),
        FilterKey::MaxYear => criteria.max_year?.to_string(),
        FilterKey::MinPrice => format_price(criteria.min_price?),
        FilterKey::MaxPrice => format_price(criteria.max_price?),
        FilterKey::Featured => criteria.featured?.to_string(),
        FilterKey::ExteriorColors => palette.names(&criteria.exterior_colors).join(", "),
        FilterKey::InteriorColors => palette.names(&criteria.interior_colors).join(", "),
    };
    Some(value)
}
