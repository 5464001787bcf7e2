//! Remote catalog access.
//!
//! Everything that touches the network goes through a [`JsonGateway`]. The
//! gateway never panics or propagates errors to the browsing engine: every
//! request settles as either a JSON value or a [`FetchFailure`], and callers
//! decide per item whether a failure means "skip" or "empty".

pub mod client;
pub mod fixture;
pub mod gateway;
pub mod locator;
pub mod types;

use std::future::Future;

use thiserror::Error;
use url::Url;

pub use client::CatalogClient;
pub use fixture::{FixtureEntity, FixtureGateway};
pub use gateway::HttpGateway;
pub use locator::id_from_locator;
pub use types::{
    BaseStat, CategoryMember, CategoryRecord, EntityDetail, EntitySummary, ListingPage,
    NamedResource,
};

/// Reason a remote fetch did not produce a value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    /// The server answered with a non-success status
    #[error("HTTP {0}")]
    Status(u16),

    /// The request never completed (DNS, connect, timeout, reset)
    #[error("transport error: {0}")]
    Transport(String),

    /// The body was not the JSON shape we expected
    #[error("unparsable body: {0}")]
    Decode(String),

    /// A locator handed to us by the API was not a usable URL
    #[error("invalid locator '{0}'")]
    InvalidLocator(String),
}

/// Outcome of a soft-failing fetch
pub type Fetched<T> = std::result::Result<T, FetchFailure>;

/// Soft-failing JSON transport
///
/// Implementations map every problem to a [`FetchFailure`]; they never panic.
/// Logging happens one level up, in [`CatalogClient`], so every gateway gets
/// the same warning on failure.
pub trait JsonGateway: Send + Sync {
    /// GET `url` and parse the body as JSON
    fn get_json(&self, url: &Url) -> impl Future<Output = Fetched<serde_json::Value>> + Send;
}
