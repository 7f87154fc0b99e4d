use super::{unwrap_envelope, Upstream};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

pub struct NbaApiClient {
    client: Client,
    api_key: String,
    host: String,
    base_url: String,
}

impl NbaApiClient {
    pub fn new(api_key: String, host: String) -> Self {
        let base_url = format!("https://{}", host);
        Self {
            client: Client::new(),
            api_key,
            host,
            base_url,
        }
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

#[async_trait]
impl Upstream for NbaApiClient {
    async fn fetch(&self, endpoint: &str) -> Result<Value> {
        let url = self.url_for(endpoint);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.host)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamTransport(format!(
                "{} returned {}",
                endpoint, status
            )));
        }

        let body: Value = response.json().await?;
        unwrap_envelope(body)
    }
}
