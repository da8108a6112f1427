//! # Catalog API Client
//!
//! Everything that talks to the remote storefront API lives here. The rest of the
//! crate never performs network I/O: it receives catalog lists and reference data
//! as plain values.
//!
//! - [`CatalogClient`]: async reqwest client for the catalog, reference data and
//!   service booking endpoints.
//! - [`CatalogQuery`]: criteria plus search and ordering, serialized to query pairs.
//! - [`Feed`] / [`RequestSequencer`]: latest-request-wins fetch state.
//! - [`resolve_image_url`]: image path resolution against a configurable base.
//!
//! There is no retry policy. A failed fetch is reported once and the caller decides
//! whether to reload.

mod http;
mod images;
mod query;
mod sequencer;

pub use http::{BookingConfirmation, CatalogClient};
pub use images::resolve_image_url;
pub use query::{CatalogQuery, SortOrder};
pub use sequencer::{CatalogFeeds, Feed, FetchState, RequestSequencer, Ticket};
