//! Coin list with live search and category filters.
//!
//! [`engine::ListEngine`] owns the fetched coins and derives the visible list
//! from the selected [`types::FilterKind`]s and the search query.
//! [`filters::FilterCatalog`] holds the toggleable filter chips whose
//! selection feeds the engine, and [`api`] provides the coin repository.

pub mod api;
pub mod config;
pub mod engine;
pub mod filters;
pub mod logging;
pub mod types;

pub use api::{CoinRepository, Endpoint, HttpCoinRepository, NetworkError};
pub use config::Config;
pub use engine::{EngineEvent, ListEngine, LoadResult, LoadState};
pub use filters::{EntryId, FilterCatalog, FilterEntry, FilterSet};
pub use types::{CoinIcon, CoinKind, CoinRecord, FilterKind, FILTER_KINDS};
