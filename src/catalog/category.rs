//! Category index cache.
//!
//! Looking up which entities belong to a category costs one request per
//! category. Successful lookups are cached for the life of the session.
//! Failed lookups are cached too, but only for a retry allowance: within it
//! the category reads as empty without touching the network, after it the
//! next lookup tries again.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::remote::{CatalogClient, JsonGateway, id_from_locator};

use super::filter::CategoryFilter;

/// Ids a category restricts the pool to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryIds {
    /// The `all` pseudo-category: no restriction at all
    Unrestricted,
    Only(Arc<HashSet<u32>>),
}

impl CategoryIds {
    pub fn contains(&self, id: u32) -> bool {
        match self {
            CategoryIds::Unrestricted => true,
            CategoryIds::Only(ids) => ids.contains(&id),
        }
    }
}

#[derive(Debug, Clone)]
enum CacheEntry {
    Loaded(Arc<HashSet<u32>>),
    Failed { at: Instant },
}

/// Memoized category → ids lookups
#[derive(Debug, Clone)]
pub struct CategoryIndex {
    entries: HashMap<String, CacheEntry>,
    max_id: u32,
    retry_after: Duration,
    empty: Arc<HashSet<u32>>,
}

impl CategoryIndex {
    pub fn new(max_id: u32, retry_after: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            max_id,
            retry_after,
            empty: Arc::new(HashSet::new()),
        }
    }

    /// True when `name` has a successful lookup cached
    pub fn is_loaded(&self, name: &str) -> bool {
        matches!(self.entries.get(name), Some(CacheEntry::Loaded(_)))
    }

    /// Ids belonging to `category`
    pub async fn ids_for<G: JsonGateway>(
        &mut self,
        client: &CatalogClient<G>,
        category: &CategoryFilter,
    ) -> CategoryIds {
        let Some(name) = category.name() else {
            return CategoryIds::Unrestricted;
        };

        match self.entries.get(name) {
            Some(CacheEntry::Loaded(ids)) => {
                tracing::debug!(category = name, "category cache hit");
                return CategoryIds::Only(Arc::clone(ids));
            }
            Some(CacheEntry::Failed { at }) if at.elapsed() < self.retry_after => {
                tracing::debug!(category = name, "category lookup failed recently; reading as empty");
                return CategoryIds::Only(Arc::clone(&self.empty));
            }
            _ => {}
        }

        match client.category(name).await {
            Ok(record) => {
                let ids: HashSet<u32> = record
                    .members
                    .iter()
                    .filter_map(|member| id_from_locator(&member.entity.url))
                    .filter(|&id| id <= self.max_id)
                    .collect();
                let ids = Arc::new(ids);
                self.entries
                    .insert(name.to_string(), CacheEntry::Loaded(Arc::clone(&ids)));
                CategoryIds::Only(ids)
            }
            Err(_) => {
                self.entries.insert(
                    name.to_string(),
                    CacheEntry::Failed { at: Instant::now() },
                );
                CategoryIds::Only(Arc::clone(&self.empty))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{FetchFailure, FixtureGateway};
    use serde_json::json;
    use url::Url;

    const FIRE_URL: &str = "http://dex.test/api/type/fire";

    fn client(gateway: &FixtureGateway) -> CatalogClient<FixtureGateway> {
        CatalogClient::new(
            gateway.clone(),
            Url::parse("http://dex.test/api/").unwrap(),
            "pokemon",
            "type",
        )
    }

    fn fire() -> CategoryFilter {
        CategoryFilter::Only("fire".to_string())
    }

    fn route_fire(gateway: &FixtureGateway) {
        gateway.route(
            FIRE_URL,
            json!({"pokemon": [
                {"pokemon": {"name": "charmander", "url": "http://dex.test/api/pokemon/4/"}},
                {"pokemon": {"name": "vulpix", "url": "http://dex.test/api/pokemon/37/"}},
                {"pokemon": {"name": "charizard-mega-x", "url": "http://dex.test/api/pokemon/10034/"}}
            ]}),
        );
    }

    #[tokio::test]
    async fn test_all_is_unrestricted_without_request() {
        let gateway = FixtureGateway::new();
        let mut index = CategoryIndex::new(809, Duration::from_secs(30));

        let ids = index.ids_for(&client(&gateway), &CategoryFilter::All).await;
        assert_eq!(ids, CategoryIds::Unrestricted);
        assert!(ids.contains(123));
        assert_eq!(gateway.request_count(), 0);
    }

    #[tokio::test]
    async fn test_members_above_max_are_dropped() {
        let gateway = FixtureGateway::new();
        route_fire(&gateway);
        let mut index = CategoryIndex::new(809, Duration::from_secs(30));

        let ids = index.ids_for(&client(&gateway), &fire()).await;
        assert!(ids.contains(4));
        assert!(ids.contains(37));
        assert!(!ids.contains(10034));
    }

    #[tokio::test]
    async fn test_second_lookup_hits_cache() {
        let gateway = FixtureGateway::new();
        route_fire(&gateway);
        let client = client(&gateway);
        let mut index = CategoryIndex::new(809, Duration::from_secs(30));

        let first = index.ids_for(&client, &fire()).await;
        assert_eq!(gateway.request_count(), 1);

        let second = index.ids_for(&client, &fire()).await;
        assert_eq!(gateway.request_count(), 1);
        assert_eq!(first, second);
        assert!(index.is_loaded("fire"));
    }

    #[tokio::test]
    async fn test_failure_reads_empty_within_allowance() {
        let gateway = FixtureGateway::new();
        gateway.fail(FIRE_URL, FetchFailure::Status(503));
        let client = client(&gateway);
        let mut index = CategoryIndex::new(809, Duration::from_secs(60));

        let ids = index.ids_for(&client, &fire()).await;
        assert_eq!(ids, CategoryIds::Only(Arc::new(HashSet::new())));

        // Served from the negative cache
        index.ids_for(&client, &fire()).await;
        assert_eq!(gateway.request_count(), 1);
        assert!(!index.is_loaded("fire"));
    }

    #[tokio::test]
    async fn test_failure_is_retried_after_allowance() {
        let gateway = FixtureGateway::new();
        gateway.fail(FIRE_URL, FetchFailure::Transport("reset".to_string()));
        let client = client(&gateway);
        let mut index = CategoryIndex::new(809, Duration::ZERO);

        index.ids_for(&client, &fire()).await;
        route_fire(&gateway);

        let ids = index.ids_for(&client, &fire()).await;
        assert_eq!(gateway.request_count(), 2);
        assert!(ids.contains(4));
        assert!(index.is_loaded("fire"));
    }
}
