//! Browsing engine: base pool, category cache, filtering, pagination and the
//! session that ties them together.

pub mod category;
pub mod engine;
pub mod filter;
pub mod hydrate;
pub mod pagination;
pub mod pool;
pub mod session;

pub use category::{CategoryIds, CategoryIndex};
pub use engine::{filter_pool, recompute_pool};
pub use filter::{CategoryFilter, FilterState, SUBGROUP_RANGES, SortOrder, Subgroup};
pub use hydrate::{EntityRef, hydrate};
pub use pagination::{PageIndicator, PageMode, PageStep, PaginationState};
pub use pool::{BasePool, load_base_pool};
pub use session::{
    CatalogSession, PageOutcome, PageRequest, PageView, SessionSettings, load_page,
};
