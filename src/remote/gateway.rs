//! HTTP gateway backed by reqwest.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::config::Config;
use crate::error::Result;

use super::{FetchFailure, Fetched, JsonGateway};

/// Connect timeout ceiling; the overall request timeout comes from config
const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// JSON gateway that performs real HTTP requests
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
}

impl HttpGateway {
    /// Create a gateway whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(MAX_CONNECT_TIMEOUT))
            .user_agent(concat!("dexview/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Create a gateway using the configured request timeout
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.request_timeout())
    }
}

impl JsonGateway for HttpGateway {
    async fn get_json(&self, url: &Url) -> Fetched<serde_json::Value> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchFailure::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status.as_u16()));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| FetchFailure::Decode(e.to_string()))
    }
}
