//! Typed catalog API client on top of a [`JsonGateway`].

use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::error::Result;

use super::types::DetailRecord;
use super::{CategoryRecord, EntityDetail, FetchFailure, Fetched, JsonGateway, ListingPage};

/// Builds catalog URLs and decodes responses
///
/// Every failed fetch is logged here with a warning and handed back as a
/// [`FetchFailure`]; nothing in this type returns a hard error.
#[derive(Debug, Clone)]
pub struct CatalogClient<G> {
    gateway: G,
    base: Url,
    entity_path: String,
    category_path: String,
}

impl<G: JsonGateway> CatalogClient<G> {
    /// Create a client. `base` must be usable as a base URL.
    pub fn new(
        gateway: G,
        base: Url,
        entity_path: impl Into<String>,
        category_path: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            base,
            entity_path: entity_path.into(),
            category_path: category_path.into(),
        }
    }

    /// Create a client from configuration
    pub fn from_config(gateway: G, config: &Config) -> Result<Self> {
        Ok(Self::new(
            gateway,
            config.base_url()?,
            config.entity_path.clone(),
            config.category_path.clone(),
        ))
    }

    fn resource_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `{base}/{entity}?limit=L&offset=O`
    pub fn listing_url(&self, limit: usize, offset: usize) -> Url {
        let mut url = self.resource_url(&[self.entity_path.as_str()]);
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());
        url
    }

    /// `{base}/{entity}/{id}`
    pub fn entity_url(&self, id: u32) -> Url {
        self.resource_url(&[self.entity_path.as_str(), &id.to_string()])
    }

    /// `{base}/{category}/{name}`
    pub fn category_url(&self, name: &str) -> Url {
        self.resource_url(&[self.category_path.as_str(), name])
    }

    /// Fetch `url` and decode it as `T`, logging any failure
    pub async fn fetch<T: DeserializeOwned>(&self, url: &Url) -> Fetched<T> {
        let result = match self.gateway.get_json(url).await {
            Ok(value) => {
                serde_json::from_value(value).map_err(|e| FetchFailure::Decode(e.to_string()))
            }
            Err(failure) => Err(failure),
        };

        if let Err(failure) = &result {
            tracing::warn!(url = %url, %failure, "catalog fetch failed");
        }

        result
    }

    /// One window of the entity listing
    pub async fn list_page(&self, limit: usize, offset: usize) -> Fetched<ListingPage> {
        self.fetch(&self.listing_url(limit, offset)).await
    }

    /// Detail record by identifier
    pub async fn entity(&self, id: u32) -> Fetched<EntityDetail> {
        self.fetch::<DetailRecord>(&self.entity_url(id))
            .await
            .map(EntityDetail::from)
    }

    /// Detail record by the locator the API handed out in a listing
    pub async fn entity_at(&self, locator: &str) -> Fetched<EntityDetail> {
        let url = match Url::parse(locator).or_else(|_| self.base.join(locator)) {
            Ok(url) => url,
            Err(_) => {
                let failure = FetchFailure::InvalidLocator(locator.to_string());
                tracing::warn!(%failure, "catalog fetch failed");
                return Err(failure);
            }
        };

        self.fetch::<DetailRecord>(&url)
            .await
            .map(EntityDetail::from)
    }

    /// Category membership record
    pub async fn category(&self, name: &str) -> Fetched<CategoryRecord> {
        self.fetch(&self.category_url(name)).await
    }
}
