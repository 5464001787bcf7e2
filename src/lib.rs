pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod remote;

pub use catalog::{
    CatalogSession, CategoryFilter, FilterState, PageIndicator, PageMode, PageOutcome,
    PageRequest, PageStep, PageView, SessionSettings, Subgroup,
};
pub use config::Config;
pub use error::{DexError, Result};
pub use remote::{
    CatalogClient, EntityDetail, EntitySummary, FetchFailure, Fetched, FixtureEntity,
    FixtureGateway, HttpGateway, JsonGateway,
};
