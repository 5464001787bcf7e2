//! In-memory gateway for tests.
//!
//! Routes are keyed by full URL. Listing endpoints registered with
//! [`FixtureGateway::listing`] answer any `limit`/`offset` window, so a
//! seeded catalog behaves like the real paginated API. Every request is
//! recorded so callers can assert on network traffic.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{Value, json};
use url::Url;

use super::{FetchFailure, Fetched, JsonGateway};

/// Default listing window when a request omits `limit`
const DEFAULT_LIMIT: usize = 20;

#[derive(Debug, Default)]
struct FixtureState {
    routes: Mutex<HashMap<String, Fetched<Value>>>,
    listings: Mutex<HashMap<String, Vec<Value>>>,
    requests: Mutex<Vec<String>>,
}

/// Gateway answering from canned responses
#[derive(Debug, Clone, Default)]
pub struct FixtureGateway {
    state: Arc<FixtureState>,
}

/// One entity of a seeded catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureEntity {
    pub id: u32,
    pub name: String,
    pub categories: Vec<String>,
}

impl FixtureEntity {
    pub fn new(id: u32, name: impl Into<String>, categories: &[&str]) -> Self {
        Self {
            id,
            name: name.into(),
            categories: categories.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}

impl FixtureGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with `body`
    pub fn route(&self, url: &str, body: Value) {
        self.state.routes.lock().insert(url.to_string(), Ok(body));
    }

    /// Answer `url` with a failure
    pub fn fail(&self, url: &str, failure: FetchFailure) {
        self.state.routes.lock().insert(url.to_string(), Err(failure));
    }

    /// Serve `results` as a paginated listing at `url` (without query)
    pub fn listing(&self, url: &str, results: Vec<Value>) {
        self.state.listings.lock().insert(url.to_string(), results);
    }

    /// Number of requests seen so far
    pub fn request_count(&self) -> usize {
        self.state.requests.lock().len()
    }

    /// Every requested URL, in order
    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().clone()
    }

    pub fn clear_requests(&self) {
        self.state.requests.lock().clear();
    }

    /// Seed a whole catalog under `base`: the listing, detail records at both
    /// `{entity}/{id}` and `{entity}/{id}/`, and one membership record per
    /// category.
    pub fn seed(&self, base: &Url, entity_path: &str, category_path: &str, entities: &[FixtureEntity]) {
        let root = base.as_str().trim_end_matches('/');
        let mut listing = Vec::with_capacity(entities.len());
        let mut members: HashMap<&str, Vec<Value>> = HashMap::new();

        for entity in entities {
            let locator = format!("{root}/{entity_path}/{}/", entity.id);
            listing.push(json!({"name": entity.name, "url": locator}));

            let detail = detail_body(entity);
            self.route(&format!("{root}/{entity_path}/{}", entity.id), detail.clone());
            self.route(&locator, detail);

            for category in &entity.categories {
                members.entry(category.as_str()).or_default().push(json!({
                    "slot": 1,
                    "pokemon": {"name": entity.name, "url": locator},
                }));
            }
        }

        self.listing(&format!("{root}/{entity_path}"), listing);

        for (category, list) in members {
            self.route(
                &format!("{root}/{category_path}/{category}"),
                json!({"name": category, "pokemon": list}),
            );
        }
    }

    fn answer(&self, url: &Url) -> Fetched<Value> {
        if let Some(response) = self.state.routes.lock().get(url.as_str()) {
            return response.clone();
        }

        let mut bare = url.clone();
        bare.set_query(None);
        let listings = self.state.listings.lock();
        let Some(results) = listings.get(bare.as_str()) else {
            return Err(FetchFailure::Status(404));
        };

        let mut limit = DEFAULT_LIMIT;
        let mut offset = 0;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "limit" => limit = value.parse().unwrap_or(DEFAULT_LIMIT),
                "offset" => offset = value.parse().unwrap_or(0),
                _ => {}
            }
        }

        let window: Vec<Value> = results.iter().skip(offset).take(limit).cloned().collect();
        Ok(json!({"count": results.len(), "results": window}))
    }
}

impl JsonGateway for FixtureGateway {
    async fn get_json(&self, url: &Url) -> Fetched<Value> {
        self.state.requests.lock().push(url.to_string());
        self.answer(url)
    }
}

fn detail_body(entity: &FixtureEntity) -> Value {
    let types: Vec<Value> = entity
        .categories
        .iter()
        .enumerate()
        .map(|(i, c)| json!({"slot": i + 1, "type": {"name": c}}))
        .collect();

    json!({
        "id": entity.id,
        "name": entity.name,
        "height": 7,
        "weight": 69,
        "types": types,
        "sprites": {"front_default": format!("https://img.test/{}.png", entity.id)},
        "abilities": [{"ability": {"name": "run-away"}}],
        "stats": [
            {"base_stat": 45, "stat": {"name": "hp"}},
            {"base_stat": 49, "stat": {"name": "special-attack"}}
        ],
    })
}
