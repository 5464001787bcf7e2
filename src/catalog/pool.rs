//! Base pool: the lightweight listing of the whole filterable universe.

use crate::remote::{CatalogClient, EntitySummary, JsonGateway, ListingPage, id_from_locator};

/// Every entity in the universe, sorted ascending by id
#[derive(Debug, Clone, Default)]
pub struct BasePool {
    entries: Vec<EntitySummary>,
    /// Lowercased names, parallel to `entries`
    search_names: Vec<String>,
}

impl BasePool {
    /// Build the pool from a listing.
    ///
    /// Identifiers come from each entry's locator. An entry without a
    /// parsable locator falls back to its 1-based listing position. Entries
    /// above `max_id` are dropped and duplicate ids keep the first entry.
    pub fn from_listing(listing: ListingPage, max_id: u32) -> Self {
        let mut entries: Vec<EntitySummary> = listing
            .results
            .into_iter()
            .enumerate()
            .filter_map(|(index, resource)| {
                let id = id_from_locator(&resource.url)
                    .or_else(|| u32::try_from(index + 1).ok())?;
                (id <= max_id).then_some(EntitySummary {
                    id,
                    name: resource.name,
                    locator: resource.url,
                })
            })
            .collect();

        entries.sort_by_key(|e| e.id);
        entries.dedup_by_key(|e| e.id);

        Self::from_entries(entries)
    }

    /// Build the pool from summaries that are already sorted and unique
    pub fn from_entries(entries: Vec<EntitySummary>) -> Self {
        let search_names = entries.iter().map(|e| e.name.to_lowercase()).collect();
        Self {
            entries,
            search_names,
        }
    }

    pub fn entries(&self) -> &[EntitySummary] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&EntitySummary> {
        self.entries
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .map(|i| &self.entries[i])
    }

    /// Entries paired with their lowercased search names
    pub(crate) fn searchable(&self) -> impl Iterator<Item = (&EntitySummary, &str)> {
        self.entries
            .iter()
            .zip(self.search_names.iter().map(String::as_str))
    }
}

/// Fetch the whole universe listing in one request.
///
/// A failed fetch yields an empty pool; filtering then produces no results.
pub async fn load_base_pool<G: JsonGateway>(client: &CatalogClient<G>, max_id: u32) -> BasePool {
    match client.list_page(max_id as usize, 0).await {
        Ok(listing) => {
            let pool = BasePool::from_listing(listing, max_id);
            tracing::info!(entries = pool.len(), "loaded base pool");
            pool
        }
        Err(_) => BasePool::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::NamedResource;

    fn resource(name: &str, url: &str) -> NamedResource {
        NamedResource {
            name: name.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_ids_come_from_locators() {
        let listing = ListingPage {
            count: 3,
            results: vec![
                resource("ivysaur", "https://x/pokemon/2/"),
                resource("bulbasaur", "https://x/pokemon/1/"),
                resource("venusaur", "https://x/pokemon/3/"),
            ],
        };

        let pool = BasePool::from_listing(listing, 809);
        let ids: Vec<u32> = pool.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(pool.get(1).unwrap().name, "bulbasaur");
    }

    #[test]
    fn test_unparsable_locator_falls_back_to_position() {
        let listing = ListingPage {
            count: 2,
            results: vec![
                resource("first", "https://x/pokemon/first/"),
                resource("second", "https://x/pokemon/second/"),
            ],
        };

        let pool = BasePool::from_listing(listing, 809);
        assert_eq!(pool.get(1).unwrap().name, "first");
        assert_eq!(pool.get(2).unwrap().name, "second");
    }

    #[test]
    fn test_entries_above_max_are_dropped() {
        let listing = ListingPage {
            count: 2,
            results: vec![
                resource("mew", "https://x/pokemon/151/"),
                resource("deoxys-attack", "https://x/pokemon/10001/"),
            ],
        };

        let pool = BasePool::from_listing(listing, 809);
        assert_eq!(pool.len(), 1);
        assert!(pool.get(10001).is_none());
    }

    #[test]
    fn test_search_names_are_lowercased() {
        let pool = BasePool::from_entries(vec![EntitySummary {
            id: 1,
            name: "Mr-Mime".to_string(),
            locator: String::new(),
        }]);
        let (_, name) = pool.searchable().next().unwrap();
        assert_eq!(name, "mr-mime");
    }
}
