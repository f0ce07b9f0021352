use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::model::BnPage;
use super::ScraperError;

/// Where catalogue pages come from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<BnPage, ScraperError>;
}

/// HTTP client for the `data.bn.org.pl` API.
pub struct BnClient {
    http: Client,
}

impl BnClient {
    pub fn new() -> Result<Self, ScraperError> {
        let http = Client::builder()
            .user_agent(concat!("librarium/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl CatalogSource for BnClient {
    async fn fetch_page(&self, url: &str) -> Result<BnPage, ScraperError> {
        debug!(url, "fetching catalogue page");
        let body = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        serde_json::from_str(&body).map_err(|source| ScraperError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
