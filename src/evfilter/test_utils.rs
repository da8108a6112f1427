use crate::model::{CatalogEntry, Color, ColorId, ColorKind};
use crate::store::{FilterStore, FsBackend};
use std::path::PathBuf;
use tempfile::TempDir;

pub const STORE_NAME: &str = "filter-storage";

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub store: FilterStore<FsBackend>,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let store = FilterStore::open(FsBackend::new(root.clone()), STORE_NAME);
        Self {
            _temp_dir: temp_dir,
            store,
            root,
        }
    }

    /// A second store over the same directory, as after a restart.
    pub fn reopen(&self) -> FilterStore<FsBackend> {
        FilterStore::open(FsBackend::new(self.root.clone()), STORE_NAME)
    }
}

pub fn entry(id: u64, manufacturer: &str, model: &str, year: i32, price: f64) -> CatalogEntry {
    CatalogEntry {
        id,
        manufacturer: manufacturer.to_string(),
        model: model.to_string(),
        year,
        price,
        category: String::new(),
        featured: false,
        color_ids: Vec::new(),
        image: None,
    }
}

fn listed(
    id: u64,
    (manufacturer, model): (&str, &str),
    year: i32,
    price: f64,
    category: &str,
    featured: bool,
    colors: &[u32],
) -> CatalogEntry {
    CatalogEntry {
        category: category.to_string(),
        featured,
        color_ids: colors.iter().copied().map(ColorId).collect(),
        ..entry(id, manufacturer, model, year, price)
    }
}

/// Six listings spanning 28,000 to 78,000.
pub fn sample_catalog() -> Vec<CatalogEntry> {
    vec![
        listed(1, ("Tesla", "Model 3"), 2022, 40000.0, "Sedan", true, &[1, 5]),
        listed(2, ("Tesla", "Model Y"), 2023, 52000.0, "SUV", false, &[2, 6]),
        listed(3, ("Kia", "EV6"), 2022, 48000.0, "SUV", true, &[3, 5]),
        listed(4, ("Hyundai", "Ioniq 5"), 2021, 45000.0, "SUV", false, &[2, 7]),
        listed(5, ("Rivian", "R1S"), 2024, 78000.0, "SUV", false, &[4, 6]),
        listed(6, ("Nissan", "Leaf"), 2020, 28000.0, "Hatchback", false, &[1, 7]),
    ]
}

/// Exterior ids 1-4, interior ids 5-7. "Red" exists in both namespaces.
pub fn sample_colors() -> Vec<Color> {
    let color = |id: u32, name: &str, kind: ColorKind| Color {
        id: ColorId(id),
        name: name.to_string(),
        kind,
        hex_code: None,
    };
    vec![
        color(1, "Red", ColorKind::Exterior),
        color(2, "Pearl White", ColorKind::Exterior),
        color(3, "Midnight Blue", ColorKind::Exterior),
        color(4, "Forest Green", ColorKind::Exterior),
        color(5, "Black", ColorKind::Interior),
        color(6, "Red", ColorKind::Interior),
        color(7, "Beige", ColorKind::Interior),
    ]
}
