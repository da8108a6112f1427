//! Color selection.
//!
//! Criteria key color selections by [`ColorId`]. Names only exist at the UI
//! boundary, where [`ColorPalette`] translates them. Two manufacturers may both
//! call a color "Red" under different ids; resolving by name returns the first
//! match in palette order, and the id is what gets stored.

use crate::error::{EvError, Result};
use crate::model::{Color, ColorId, ColorKind, FilterCriteria};

/// Add `id` when absent, remove it when present.
pub fn toggle_in(list: &mut Vec<ColorId>, id: ColorId) {
    if let Some(pos) = list.iter().position(|c| *c == id) {
        list.remove(pos);
    } else {
        list.push(id);
    }
}

/// The known colors, as served by `GET /cars/colors/`.
#[derive(Debug, Clone, Default)]
pub struct ColorPalette {
    colors: Vec<Color>,
}

impl ColorPalette {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn of_kind(&self, kind: ColorKind) -> impl Iterator<Item = &Color> {
        self.colors.iter().filter(move |c| c.kind == kind)
    }

    pub fn get(&self, id: ColorId) -> Option<&Color> {
        self.colors.iter().find(|c| c.id == id)
    }

    pub fn name_of(&self, id: ColorId) -> Option<&str> {
        self.get(id).map(|c| c.name.as_str())
    }

    /// Look up a color id by (case-insensitive) name within one namespace.
    pub fn resolve(&self, kind: ColorKind, name: &str) -> Result<ColorId> {
        let wanted = name.trim();
        self.of_kind(kind)
            .find(|c| c.name.eq_ignore_ascii_case(wanted))
            .map(|c| c.id)
            .ok_or_else(|| EvError::UnknownColor {
                kind: kind.to_string(),
                name: wanted.to_string(),
            })
    }

    /// Display names for a list of ids, falling back to `#id` for unknown colors.
    pub fn names(&self, ids: &[ColorId]) -> Vec<String> {
        ids.iter()
            .map(|id| {
                self.name_of(*id)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("#{}", id))
            })
            .collect()
    }
}

/// Whether a swatch should render as selected.
pub fn is_selected(criteria: &FilterCriteria, kind: ColorKind, id: ColorId) -> bool {
    criteria.colors(kind).contains(&id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> ColorPalette {
        ColorPalette::new(vec![
            Color {
                id: ColorId(1),
                name: "Red".into(),
                kind: ColorKind::Exterior,
                hex_code: Some("#ff0000".into()),
            },
            Color {
                id: ColorId(2),
                name: "Red".into(),
                kind: ColorKind::Interior,
                hex_code: None,
            },
            Color {
                id: ColorId(3),
                name: "Pearl White".into(),
                kind: ColorKind::Exterior,
                hex_code: None,
            },
        ])
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut list = vec![ColorId(3)];
        toggle_in(&mut list, ColorId(1));
        assert_eq!(list, vec![ColorId(3), ColorId(1)]);
        toggle_in(&mut list, ColorId(1));
        assert_eq!(list, vec![ColorId(3)]);
    }

    #[test]
    fn resolve_is_scoped_to_kind() {
        let palette = palette();
        assert_eq!(palette.resolve(ColorKind::Exterior, "red").unwrap(), ColorId(1));
        assert_eq!(palette.resolve(ColorKind::Interior, "RED").unwrap(), ColorId(2));
    }

    #[test]
    fn resolve_unknown_name_fails() {
        let err = palette()
            .resolve(ColorKind::Interior, "Pearl White")
            .unwrap_err();
        assert!(matches!(err, EvError::UnknownColor { .. }));
    }

    #[test]
    fn names_fall_back_to_id() {
        let names = palette().names(&[ColorId(3), ColorId(42)]);
        assert_eq!(names, vec!["Pearl White".to_string(), "#42".to_string()]);
    }

    #[test]
    fn selection_membership() {
        let criteria = FilterCriteria {
            exterior_colors: vec![ColorId(1)],
            ..Default::default()
        };
        assert!(is_selected(&criteria, ColorKind::Exterior, ColorId(1)));
        assert!(!is_selected(&criteria, ColorKind::Interior, ColorId(1)));
    }
}
