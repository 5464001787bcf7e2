//! Browsing session: filters, pagination and the mode switch between them.
//!
//! A [`CatalogSession`] owns every piece of mutable browsing state. Each
//! mutation returns a [`PageRequest`] describing the page to show; turning a
//! request into a [`PageView`] is a separate step ([`load_page`]) so a front
//! end can run hydration on another task and keep accepting input. Requests
//! carry the generation they were issued under and [`CatalogSession::accept`]
//! drops views that a newer request has superseded.

use std::time::Duration;

use crate::config::Config;
use crate::remote::{CatalogClient, EntityDetail, JsonGateway};

use super::category::CategoryIndex;
use super::engine::recompute_pool;
use super::filter::{CategoryFilter, FilterState, Subgroup};
use super::hydrate::{EntityRef, hydrate};
use super::pagination::{PageIndicator, PageMode, PageStep, PaginationState};
use super::pool::{BasePool, load_base_pool};

/// Tunables a session needs from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub page_size: usize,
    pub max_id: u32,
    pub category_retry: Duration,
}

impl SessionSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            page_size: config.page_size,
            max_id: config.max_id,
            category_retry: config.category_retry(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// A page waiting to be hydrated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: u64,
    pub refs: Vec<EntityRef>,
    pub indicator: PageIndicator,
    /// The listing behind this page could not be fetched
    pub source_failed: bool,
}

/// What a hydrated page amounts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    Cards,
    /// Filtering legitimately matched nothing
    NoResults,
    /// There was something to show but every fetch failed
    Unavailable,
}

/// A hydrated page ready for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub generation: u64,
    pub entries: Vec<EntityDetail>,
    pub indicator: PageIndicator,
    pub requested: usize,
    pub source_failed: bool,
}

impl PageView {
    pub fn outcome(&self) -> PageOutcome {
        if !self.entries.is_empty() {
            PageOutcome::Cards
        } else if self.source_failed || self.requested > 0 {
            PageOutcome::Unavailable
        } else {
            PageOutcome::NoResults
        }
    }
}

/// Hydrate a page request. Needs only the client, so it can run detached
/// from the session.
pub async fn load_page<G: JsonGateway>(client: &CatalogClient<G>, request: PageRequest) -> PageView {
    let entries = hydrate(client, &request.refs).await;
    PageView {
        generation: request.generation,
        entries,
        indicator: request.indicator,
        requested: request.refs.len(),
        source_failed: request.source_failed,
    }
}

/// All browsing state of one user session
#[derive(Debug)]
pub struct CatalogSession<G> {
    client: CatalogClient<G>,
    settings: SessionSettings,
    base_pool: BasePool,
    categories: CategoryIndex,
    filters: FilterState,
    pagination: PaginationState,
    generation: u64,
}

impl<G: JsonGateway> CatalogSession<G> {
    pub fn new(client: CatalogClient<G>, settings: SessionSettings) -> Self {
        Self {
            client,
            settings,
            base_pool: BasePool::default(),
            categories: CategoryIndex::new(settings.max_id, settings.category_retry),
            filters: FilterState::default(),
            pagination: PaginationState::new(settings.page_size),
            generation: 0,
        }
    }

    pub fn client(&self) -> &CatalogClient<G> {
        &self.client
    }

    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn base_pool(&self) -> &BasePool {
        &self.base_pool
    }

    pub fn categories(&self) -> &CategoryIndex {
        &self.categories
    }

    /// Generation of the most recent page request
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Load the filterable universe. Safe to call again to refresh it.
    pub async fn load_base_pool(&mut self) {
        self.base_pool = load_base_pool(&self.client, self.settings.max_id).await;
    }

    /// Load the base pool and request the first unfiltered page
    pub async fn start(&mut self) -> PageRequest {
        self.load_base_pool().await;
        self.reload().await
    }

    pub async fn set_search(&mut self, raw: &str) -> PageRequest {
        self.filters.set_search(raw);
        self.apply_filters().await
    }

    pub async fn set_category(&mut self, category: CategoryFilter) -> PageRequest {
        self.filters.category = category;
        self.apply_filters().await
    }

    pub async fn set_subgroup(&mut self, subgroup: Subgroup) -> PageRequest {
        self.filters.subgroup = subgroup;
        self.apply_filters().await
    }

    /// Replace every filter at once
    pub async fn set_filters(&mut self, filters: FilterState) -> PageRequest {
        self.filters = filters;
        self.apply_filters().await
    }

    /// Back to the default filters, remote mode, page 1
    pub async fn clear_filters(&mut self) -> PageRequest {
        self.filters = FilterState::default();
        self.apply_filters().await
    }

    /// Move one page; `None` when already at the edge
    pub async fn step_page(&mut self, step: PageStep) -> Option<PageRequest> {
        if !self.pagination.step(step) {
            return None;
        }
        Some(self.reload().await)
    }

    /// Jump to `page`; `None` when it does not exist
    pub async fn go_to_page(&mut self, page: usize) -> Option<PageRequest> {
        if !self.pagination.set_page(page) {
            return None;
        }
        Some(self.reload().await)
    }

    /// Request the current page again
    pub async fn reload(&mut self) -> PageRequest {
        match self.pagination.mode() {
            PageMode::Remote => self.remote_page().await,
            PageMode::Pool => self.pool_page(),
        }
    }

    /// Hydrate a request with this session's client
    pub async fn load(&self, request: PageRequest) -> PageView {
        load_page(&self.client, request).await
    }

    /// Keep `view` only if no newer page has been requested since it was issued
    pub fn accept(&self, view: PageView) -> Option<PageView> {
        if view.generation < self.generation {
            tracing::debug!(
                stale = view.generation,
                current = self.generation,
                "discarding stale page"
            );
            return None;
        }
        Some(view)
    }

    /// Detail record for the detail view; `None` when it cannot be fetched
    pub async fn detail(&self, id: u32) -> Option<EntityDetail> {
        self.client.entity(id).await.ok()
    }

    /// Apply `filters` and land directly on `page`; `None` when that page
    /// does not exist.
    ///
    /// In remote mode only the listing window of `page` is fetched. Its total
    /// decides whether the page exists, so a page past the end still costs
    /// that one request.
    pub async fn open_at(&mut self, filters: FilterState, page: usize) -> Option<PageRequest> {
        self.filters = filters;
        self.select_source().await;

        match self.pagination.mode() {
            PageMode::Pool => {
                if !self.pagination.set_page(page) {
                    return None;
                }
                Some(self.pool_page())
            }
            PageMode::Remote => {
                self.pagination.seek(page);
                let request = self.remote_page().await;
                if request.source_failed || (1..=self.pagination.total_pages()).contains(&page) {
                    return Some(request);
                }
                self.pagination.reset_page();
                None
            }
        }
    }

    async fn apply_filters(&mut self) -> PageRequest {
        self.select_source().await;
        self.reload().await
    }

    /// Mode switch, evaluated on every filter mutation. Leaves the page at 1.
    async fn select_source(&mut self) {
        self.pagination.reset_page();

        if self.filters.is_unfiltered() {
            tracing::debug!(mode = %PageMode::Remote, "filters cleared");
            self.pagination.enter_remote();
            return;
        }

        let ids = recompute_pool(
            &self.filters,
            &self.base_pool,
            &mut self.categories,
            &self.client,
        )
        .await;
        self.pagination.enter_pool(ids);
        tracing::debug!(mode = %PageMode::Pool, "filters applied");
    }

    async fn remote_page(&mut self) -> PageRequest {
        let generation = self.next_generation();
        let (limit, offset) = self.pagination.remote_window();

        let (refs, source_failed) = match self.client.list_page(limit, offset).await {
            Ok(listing) => {
                self.pagination
                    .set_remote_total(usize::try_from(listing.count).unwrap_or(usize::MAX));
                let refs = listing
                    .results
                    .into_iter()
                    .map(|resource| EntityRef::Locator(resource.url))
                    .collect();
                (refs, false)
            }
            Err(_) => (Vec::new(), true),
        };

        PageRequest {
            generation,
            refs,
            indicator: self.pagination.indicator(),
            source_failed,
        }
    }

    fn pool_page(&mut self) -> PageRequest {
        let generation = self.next_generation();
        PageRequest {
            generation,
            refs: self
                .pagination
                .pool_page()
                .iter()
                .copied()
                .map(EntityRef::Id)
                .collect(),
            indicator: self.pagination.indicator(),
            source_failed: false,
        }
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}
