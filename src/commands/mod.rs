pub mod browse;
mod config;
mod list;
mod show;

pub use browse::{BrowseCommand, cmd_browse, run_browser};
pub use config::{cmd_config_path, cmd_config_show};
pub use list::{ListOptions, cmd_list, list_view};
pub use show::cmd_show;

use serde_json::Value;

use crate::catalog::{CatalogSession, PageView, SessionSettings};
use crate::config::Config;
use crate::error::Result;
use crate::remote::{CatalogClient, EntityDetail, HttpGateway};

/// Build a session talking to the configured API
pub fn open_session(config: &Config) -> Result<CatalogSession<HttpGateway>> {
    let gateway = HttpGateway::from_config(config)?;
    let client = CatalogClient::from_config(gateway, config)?;
    Ok(CatalogSession::new(client, SessionSettings::from_config(config)))
}

/// Print a JSON value to stdout with pretty formatting
pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// JSON form of one detail record
pub fn detail_json(detail: &EntityDetail) -> Value {
    serde_json::json!({
        "id": detail.id,
        "name": detail.name,
        "categories": detail.categories,
        "image": detail.image,
        "height_m": f64::from(detail.height) / 10.0,
        "weight_kg": f64::from(detail.weight) / 10.0,
        "abilities": detail.abilities,
        "stats": detail
            .stats
            .iter()
            .map(|s| serde_json::json!({"name": s.name, "value": s.value}))
            .collect::<Vec<_>>(),
    })
}

/// JSON form of a hydrated page
pub fn page_json(view: &PageView) -> Value {
    serde_json::json!({
        "page": view.indicator.current_page,
        "total_pages": view.indicator.total_pages,
        "total_items": view.indicator.total_items,
        "mode": view.indicator.mode.to_string(),
        "complete": view.entries.len() == view.requested && !view.source_failed,
        "entries": view.entries.iter().map(detail_json).collect::<Vec<_>>(),
    })
}
