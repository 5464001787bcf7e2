//! Page hydration: one detail fetch per card, issued concurrently.

use futures::stream::{self, StreamExt};

use crate::remote::{CatalogClient, EntityDetail, JsonGateway};

/// Detail requests in flight at once; a default page fits in one wave
const MAX_CONCURRENT_FETCHES: usize = 16;

/// How to reach an entity's detail record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityRef {
    /// Pool mode: build the URL from the identifier
    Id(u32),
    /// Remote mode: follow the locator the listing handed out
    Locator(String),
}

/// Fetch every referenced detail concurrently.
///
/// Failed fetches are dropped. Survivors are sorted by id so the order does
/// not depend on which request settled first.
pub async fn hydrate<G: JsonGateway>(
    client: &CatalogClient<G>,
    refs: &[EntityRef],
) -> Vec<EntityDetail> {
    let settled: Vec<_> = stream::iter(refs.to_vec())
        .map(|entity| async move {
            match entity {
                EntityRef::Id(id) => client.entity(id).await,
                EntityRef::Locator(locator) => client.entity_at(&locator).await,
            }
        })
        .buffer_unordered(MAX_CONCURRENT_FETCHES)
        .collect()
        .await;

    let mut details: Vec<EntityDetail> = settled.into_iter().filter_map(Result::ok).collect();
    details.sort_by_key(|d| d.id);

    if details.len() < refs.len() {
        tracing::debug!(
            requested = refs.len(),
            hydrated = details.len(),
            "dropped failed detail fetches"
        );
    }

    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{FetchFailure, FixtureEntity, FixtureGateway};
    use url::Url;

    fn seeded(ids: std::ops::RangeInclusive<u32>) -> (FixtureGateway, CatalogClient<FixtureGateway>) {
        let gateway = FixtureGateway::new();
        let base = Url::parse("http://dex.test/api/").unwrap();
        let entities: Vec<FixtureEntity> = ids
            .map(|id| FixtureEntity::new(id, format!("mon{id}"), &["normal"]))
            .collect();
        gateway.seed(&base, "pokemon", "type", &entities);
        let client = CatalogClient::new(gateway.clone(), base, "pokemon", "type");
        (gateway, client)
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_successes_in_id_order() {
        let (gateway, client) = seeded(1..=12);
        gateway.fail("http://dex.test/api/pokemon/3", FetchFailure::Status(500));
        gateway.fail("http://dex.test/api/pokemon/9", FetchFailure::Transport("reset".to_string()));

        // Deliberately shuffled request order
        let refs: Vec<EntityRef> = [12, 3, 1, 7, 9, 2, 4, 5, 6, 8, 10, 11]
            .into_iter()
            .map(EntityRef::Id)
            .collect();
        let details = hydrate(&client, &refs).await;

        let ids: Vec<u32> = details.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 2, 4, 5, 6, 7, 8, 10, 11, 12]);
        assert_eq!(gateway.request_count(), 12);
    }

    #[tokio::test]
    async fn test_locators_are_followed() {
        let (gateway, client) = seeded(1..=2);
        let refs = vec![
            EntityRef::Locator("http://dex.test/api/pokemon/2/".to_string()),
            EntityRef::Locator("http://dex.test/api/pokemon/1/".to_string()),
        ];

        let details = hydrate(&client, &refs).await;
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].id, 1);
        assert!(gateway.requests().iter().all(|u| u.ends_with('/')));
    }

    #[tokio::test]
    async fn test_nothing_to_hydrate() {
        let (gateway, client) = seeded(1..=1);
        assert!(hydrate(&client, &[]).await.is_empty());
        assert_eq!(gateway.request_count(), 0);
    }
}
