//! # Filter State Storage
//!
//! The storage layer keeps the active [`FilterCriteria`](crate::model::FilterCriteria)
//! alive across sessions.
//!
//! ## Split of Responsibilities
//!
//! - [`StorageBackend`]: raw blob I/O, keyed by a fixed store name.
//! - [`FilterStore`]: the criteria state container. Every mutation persists the new
//!   criteria through the backend and then notifies subscribers.
//!
//! Persistence is best-effort. A failed save is logged and remembered
//! ([`FilterStore::last_persist_error`]) while the in-memory criteria keep working.
//!
//! ## Implementations
//!
//! - [`FsBackend`]: production backend, one JSON file per store name, atomic writes.
//! - [`MemBackend`]: for testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! └── filter-storage.json   # Serialized FilterCriteria (camelCase keys)
//! ```

pub mod backend;
pub mod filter_store;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::StorageBackend;
pub use filter_store::{FilterStore, Listener, SubscriptionId};
pub use fs_backend::FsBackend;
pub use mem_backend::MemBackend;
