use crate::catalog::{CatalogSession, CategoryFilter, FilterState, PageView, Subgroup};
use crate::config::Config;
use crate::display::{Renderer, TerminalRenderer};
use crate::error::{DexError, Result};
use crate::remote::JsonGateway;

use super::{open_session, page_json, print_json};

/// Filters and page for a one-shot listing
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub search: Option<String>,
    pub category: CategoryFilter,
    pub subgroup: Subgroup,
    pub page: usize,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            search: None,
            category: CategoryFilter::default(),
            subgroup: Subgroup::default(),
            page: 1,
        }
    }
}

impl ListOptions {
    fn filters(&self) -> FilterState {
        FilterState::new()
            .with_search(self.search.as_deref().unwrap_or(""))
            .with_category(self.category.clone())
            .with_subgroup(self.subgroup)
    }
}

/// Print one page of the catalog
pub async fn cmd_list(config: &Config, options: ListOptions, json: bool) -> Result<()> {
    let mut session = open_session(config)?;
    let view = list_view(&mut session, &options).await?;

    if json {
        return print_json(&page_json(&view));
    }

    let mut renderer = TerminalRenderer::stdout();
    renderer.render_view(&view)
}

/// Resolve `options` against `session` and hydrate the requested page.
///
/// The base pool is only loaded when a filter is active; an unfiltered
/// listing pages over the remote API directly.
pub async fn list_view<G: JsonGateway>(
    session: &mut CatalogSession<G>,
    options: &ListOptions,
) -> Result<PageView> {
    let filters = options.filters();
    if !filters.is_unfiltered() {
        session.load_base_pool().await;
    }

    let request = session
        .open_at(filters, options.page)
        .await
        .ok_or_else(|| {
            DexError::PageOutOfRange(options.page, session.pagination().total_pages())
        })?;

    Ok(session.load(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{PageMode, SessionSettings};
    use crate::remote::{CatalogClient, FixtureEntity, FixtureGateway};
    use url::Url;

    fn session() -> (FixtureGateway, CatalogSession<FixtureGateway>) {
        let gateway = FixtureGateway::new();
        let base = Url::parse("http://dex.test/api/").unwrap();
        let entities: Vec<FixtureEntity> = (1..=40)
            .map(|id| FixtureEntity::new(id, format!("mon{id}"), &["normal"]))
            .collect();
        gateway.seed(&base, "pokemon", "type", &entities);
        let client = CatalogClient::new(gateway.clone(), base, "pokemon", "type");
        (gateway, CatalogSession::new(client, SessionSettings::default()))
    }

    #[tokio::test]
    async fn test_unfiltered_skips_base_pool() {
        let (gateway, mut session) = session();
        let view = list_view(&mut session, &ListOptions::default()).await.unwrap();

        assert_eq!(view.indicator.mode, PageMode::Remote);
        assert_eq!(view.entries.len(), 12);
        assert!(!gateway.requests().iter().any(|u| u.contains("limit=809")));
    }

    #[tokio::test]
    async fn test_filtered_page() {
        let (_, mut session) = session();
        let options = ListOptions {
            search: Some("mon".to_string()),
            page: 4,
            ..ListOptions::default()
        };

        let view = list_view(&mut session, &options).await.unwrap();
        assert_eq!(view.indicator.mode, PageMode::Pool);
        let ids: Vec<u32> = view.entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![37, 38, 39, 40]);
    }

    #[tokio::test]
    async fn test_page_out_of_range() {
        let (_, mut session) = session();
        let options = ListOptions {
            page: 9,
            ..ListOptions::default()
        };

        let err = list_view(&mut session, &options).await.unwrap_err();
        assert!(matches!(err, DexError::PageOutOfRange(9, 4)));
    }

    #[tokio::test]
    async fn test_page_zero_is_out_of_range() {
        let (_, mut session) = session();
        let options = ListOptions {
            page: 0,
            ..ListOptions::default()
        };

        let err = list_view(&mut session, &options).await.unwrap_err();
        assert!(matches!(err, DexError::PageOutOfRange(0, 4)));
    }

    #[tokio::test]
    async fn test_later_page_costs_one_listing_request() {
        let (gateway, mut session) = session();
        let options = ListOptions {
            page: 2,
            ..ListOptions::default()
        };

        let view = list_view(&mut session, &options).await.unwrap();
        let listings: Vec<String> = gateway
            .requests()
            .into_iter()
            .filter(|u| u.contains("limit="))
            .collect();
        assert_eq!(listings, vec!["http://dex.test/api/pokemon?limit=12&offset=12"]);
        assert_eq!(view.indicator.current_page, 2);
        assert_eq!(view.entries.first().map(|e| e.id), Some(13));
    }
}
