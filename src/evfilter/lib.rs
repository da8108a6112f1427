//! # evfilter Architecture
//!
//! evfilter is the filtering core of an electric-vehicle marketplace storefront: the
//! active filter criteria, the engine that applies them to a catalog, price range
//! bucketing and slider math, color selection, and a client for the catalog API. The
//! `evfilter` binary is one client of this library; nothing below `api.rs` knows it
//! exists.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, fetches from the API, prints output    │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (key names, color names, bucket nums)  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic over filter/, price.rs, colors.rs         │
//! │  - Returns CmdResult, never prints                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - FilterStore over a StorageBackend                        │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The HTTP client ([`client`]) sits beside the command layer: the CLI fetches
//! catalog entries with it and hands them to the API. Filtering itself never does
//! network I/O.
//!
//! ## "Set" Means Meaningfully Set
//!
//! A criteria key only constrains the catalog when it holds a meaningful value.
//! Absent keys, blank strings, zero years and zero prices, empty color lists and
//! `featured: false` all count as unset, both for matching and for the active filter
//! badge. See [`filter::is_key_set`].
//!
//! ## Testing Strategy
//!
//! 1. **Commands** and core modules: unit tests over `MemBackend`.
//! 2. **API** (`api.rs`): dispatch and input normalization.
//! 3. **CLI** (`tests/cli.rs`): end-to-end runs of the binary against a temp data dir.
//! 4. **Properties** (`tests/filter_properties.rs`): the conjunction law via proptest.
//!
//! ## Module Overview
//!
//! - [`api`]: the facade, entry point for all filter operations
//! - [`commands`]: business logic for each command
//! - [`store`]: persisted, observable filter state
//! - [`filter`]: the filter application engine
//! - [`price`]: price buckets and slider math
//! - [`colors`]: color toggling and name resolution
//! - [`client`]: catalog API client and latest-request-wins sequencing
//! - [`booking`]: the service booking wizard
//! - [`model`]: criteria and catalog record types
//! - [`config`]: configuration management
//! - [`init`]: data directory resolution and context setup
//! - [`error`]: error types

pub mod api;
pub mod booking;
pub mod client;
pub mod colors;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod init;
pub mod model;
pub mod price;
pub mod store;

#[cfg(test)]
pub(crate) mod test_utils;
