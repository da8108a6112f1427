//! # Configuration
//!
//! Configuration is managed by [`confique`], which handles layered loading from a
//! TOML file and environment variables over compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `EVFILTER_API_BASE_URL`, `EVFILTER_IMAGE_BASE_URL`, etc.
//! 2. **Config file**: `evfilter.toml` in the OS config directory (via `directories`).
//! 3. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `api_base_url` | `http://localhost:8000/api` | Root of the catalog REST API |
//! | `image_base_url` | `api_base_url` | Base that relative image paths resolve against |
//! | `store_name` | `filter-storage` | Name of the persisted filter blob |
//! | `request_timeout_secs` | none | HTTP timeout; unset uses the client default |

use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

pub const CONFIG_FILENAME: &str = "evfilter.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EvConfig {
    /// Root of the catalog REST API.
    #[config(default = "http://localhost:8000/api", env = "EVFILTER_API_BASE_URL")]
    pub api_base_url: String,

    /// Base URL for relative image paths. Falls back to `api_base_url`.
    #[config(env = "EVFILTER_IMAGE_BASE_URL")]
    pub image_base_url: Option<String>,

    /// Name under which the active filters are persisted.
    #[config(default = "filter-storage", env = "EVFILTER_STORE_NAME")]
    pub store_name: String,

    /// Request timeout in seconds.
    #[config(env = "EVFILTER_REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for EvConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api".to_string(),
            image_base_url: None,
            store_name: "filter-storage".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl EvConfig {
    /// Load from `<config_dir>/evfilter.toml` and the environment.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config = EvConfig::builder()
            .env()
            .file(config_dir.join(CONFIG_FILENAME))
            .load()?;
        Ok(config)
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    pub fn image_base_url(&self) -> &str {
        self.image_base_url
            .as_deref()
            .unwrap_or(&self.api_base_url)
            .trim_end_matches('/')
    }
}
