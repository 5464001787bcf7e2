#![allow(dead_code)]

use std::fs;
use std::process::{Command, Output};
use std::time::Duration;

use dexview::{
    CatalogClient, CatalogSession, FixtureEntity, FixtureGateway, SessionSettings,
};
use serde_json::json;
use tempfile::TempDir;
use url::Url;

pub const BASE: &str = "http://dex.test/api/v2/";

/// Names used for a handful of well-known ids; everything else is `mon{id}`
const NAMED: [(u32, &str, &[&str]); 6] = [
    (1, "bulbasaur", &["grass", "poison"]),
    (4, "charmander", &["fire"]),
    (6, "charizard", &["fire", "flying"]),
    (25, "pikachu", &["electric"]),
    (26, "raichu", &["electric"]),
    (172, "pichu", &["electric"]),
];

pub fn url(path: &str) -> String {
    format!("{BASE}{path}")
}

/// The full 809-entry universe served by a fixture gateway
pub fn universe() -> FixtureGateway {
    let entities: Vec<FixtureEntity> = (1..=809)
        .map(|id| match NAMED.iter().find(|(named, _, _)| *named == id) {
            Some((_, name, categories)) => FixtureEntity::new(id, *name, categories),
            None => FixtureEntity::new(id, format!("mon{id}"), &["normal"]),
        })
        .collect();

    let gateway = FixtureGateway::new();
    gateway.seed(&base(), "pokemon", "type", &entities);

    // Category records also list forms above the universe maximum
    gateway.route(
        &url("type/fire"),
        json!({"name": "fire", "pokemon": [
            {"slot": 1, "pokemon": {"name": "charmander", "url": url("pokemon/4/")}},
            {"slot": 1, "pokemon": {"name": "charizard", "url": url("pokemon/6/")}},
            {"slot": 1, "pokemon": {"name": "charizard-mega-x", "url": url("pokemon/10034/")}}
        ]}),
    );

    gateway
}

pub fn base() -> Url {
    Url::parse(BASE).expect("valid base")
}

pub fn settings() -> SessionSettings {
    SessionSettings {
        page_size: 12,
        max_id: 809,
        category_retry: Duration::from_secs(30),
    }
}

pub fn session(gateway: &FixtureGateway) -> CatalogSession<FixtureGateway> {
    let client = CatalogClient::new(gateway.clone(), base(), "pokemon", "type");
    CatalogSession::new(client, settings())
}

/// Requests for single detail records (not listings or categories)
pub fn detail_requests(gateway: &FixtureGateway) -> usize {
    let prefix = url("pokemon/");
    gateway
        .requests()
        .iter()
        .filter(|u| u.starts_with(&prefix))
        .count()
}

/// Runs the dexview binary against an isolated config file
pub struct DexviewTest {
    pub temp_dir: TempDir,
}

impl DexviewTest {
    pub fn new() -> Self {
        DexviewTest {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn config_path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("config.yaml")
    }

    pub fn write_config(&self, content: &str) {
        fs::write(self.config_path(), content).expect("Failed to write config");
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_dexview"))
            .args(args)
            .env("DEXVIEW_CONFIG", self.config_path())
            .env_remove("DEXVIEW_API_BASE_URL")
            .env_remove("DEXVIEW_PAGE_SIZE")
            .env_remove("DEXVIEW_MAX_ID")
            .env("NO_COLOR", "1")
            .current_dir(self.temp_dir.path())
            .output()
            .expect("Failed to execute command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "Command {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }
}
