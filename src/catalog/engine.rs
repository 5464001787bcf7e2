//! Pool filter engine.
//!
//! Filters are applied in a fixed order: subgroup range, category
//! membership, then name substring. The order only matters for cost; the
//! result is the same conjunction either way.

use crate::remote::{CatalogClient, JsonGateway};

use super::category::{CategoryIds, CategoryIndex};
use super::filter::FilterState;
use super::pool::BasePool;

/// Ids of the base pool entries matching `filters`, in ascending id order.
///
/// `category` must be the lookup result for `filters.category`.
pub fn filter_pool(filters: &FilterState, pool: &BasePool, category: &CategoryIds) -> Vec<u32> {
    let range = filters.subgroup.range();
    let search = filters.search();

    pool.searchable()
        .filter(|(entry, _)| range.contains(&entry.id))
        .filter(|(entry, _)| category.contains(entry.id))
        .filter(|(_, name)| search.is_empty() || name.contains(search))
        .map(|(entry, _)| entry.id)
        .collect()
}

/// Resolve the category (fetching it on a cache miss) and filter the pool
pub async fn recompute_pool<G: JsonGateway>(
    filters: &FilterState,
    pool: &BasePool,
    categories: &mut CategoryIndex,
    client: &CatalogClient<G>,
) -> Vec<u32> {
    let category = categories.ids_for(client, &filters.category).await;
    let ids = filter_pool(filters, pool, &category);
    tracing::debug!(
        search = filters.search(),
        category = %filters.category,
        subgroup = %filters.subgroup,
        matches = ids.len(),
        "recomputed pool"
    );
    ids
}
