//! # Context Setup
//!
//! [`initialize`] resolves where filter state and configuration live, loads
//! [`EvConfig`], opens the persisted [`FilterStore`] and builds the HTTP client.
//!
//! ## Data Directory Resolution
//!
//! 1. `--data <dir>` on the command line.
//! 2. `EVFILTER_DATA` in the environment (used by the end-to-end tests to isolate state).
//! 3. The OS data directory from [`directories::ProjectDirs`].
//!
//! With an explicit data directory the config file is looked up in that same
//! directory; otherwise the OS config directory is used.
//!
//! The context owns one [`CatalogFeeds`], so repeated fetches of a source through
//! it follow latest-request-wins.

use crate::api::StorefrontApi;
use crate::client::{CatalogClient, CatalogFeeds};
use crate::config::EvConfig;
use crate::error::{EvError, Result};
use crate::store::{FilterStore, FsBackend};
use directories::ProjectDirs;
use std::path::PathBuf;

pub const DATA_ENV: &str = "EVFILTER_DATA";

pub struct EvContext {
    pub api: StorefrontApi<FsBackend>,
    pub client: CatalogClient,
    pub feeds: CatalogFeeds,
    pub config: EvConfig,
    pub data_dir: PathBuf,
}

struct Dirs {
    data: PathBuf,
    config: PathBuf,
}

fn resolve_dirs(data_override: Option<PathBuf>) -> Result<Dirs> {
    let explicit = data_override.or_else(|| std::env::var_os(DATA_ENV).map(PathBuf::from));
    if let Some(dir) = explicit {
        return Ok(Dirs {
            data: dir.clone(),
            config: dir,
        });
    }

    let dirs = ProjectDirs::from("com", "evfilter", "evfilter")
        .ok_or_else(|| EvError::Config("Could not determine a home directory".to_string()))?;
    Ok(Dirs {
        data: dirs.data_dir().to_path_buf(),
        config: dirs.config_dir().to_path_buf(),
    })
}

pub fn initialize(data_override: Option<PathBuf>) -> Result<EvContext> {
    let dirs = resolve_dirs(data_override)?;
    let config = EvConfig::load(&dirs.config)?;
    tracing::debug!(
        data_dir = %dirs.data.display(),
        api = %config.api_base_url(),
        "initializing"
    );

    let store = FilterStore::open(FsBackend::new(dirs.data.clone()), config.store_name.clone());
    let client = CatalogClient::new(&config)?;

    Ok(EvContext {
        api: StorefrontApi::new(store),
        client,
        feeds: CatalogFeeds::new(),
        config,
        data_dir: dirs.data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FetchState;
    use crate::model::FilterUpdate;
    use crate::test_utils::sample_catalog;

    #[test]
    fn explicit_data_dir_holds_store_and_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(crate::config::CONFIG_FILENAME),
            "store_name = \"my-filters\"\n",
        )
        .unwrap();

        let mut ctx = initialize(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(ctx.config.store_name, "my-filters");
        assert_eq!(ctx.data_dir, dir.path());

        ctx.api
            .store_mut()
            .update_filter(FilterUpdate::Model(Some("EV6".into())));
        assert!(dir.path().join("my-filters.json").exists());
    }

    #[test]
    fn context_feeds_keep_the_latest_request() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = initialize(Some(dir.path().to_path_buf())).unwrap();

        let stale = ctx.feeds.cars.begin();
        let fresh = ctx.feeds.cars.begin();
        assert!(ctx.feeds.cars.commit(&fresh, Ok(Vec::new())));
        assert!(!ctx.feeds.cars.commit(&stale, Ok(sample_catalog())));
        assert_eq!(ctx.feeds.cars.state(), FetchState::Loaded(Vec::new()));
    }
}
