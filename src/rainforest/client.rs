//! HTTP client for the Rainforest API.

use crate::config::Config;
use crate::error::LookupError;
use crate::rainforest::models::{OffersResponse, ProductResponse};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

/// Production Rainforest API endpoint.
const API_URL: &str = "https://api.rainforestapi.com/request";

/// Cap on the response body excerpt carried in HTTP error messages.
const ERROR_BODY_MAX: usize = 200;

/// Trait for Rainforest page fetching - enables mocking for tests.
#[async_trait]
pub trait RainforestApi: Send + Sync {
    /// Fetches the `type=product` page for an ASIN.
    async fn product(&self, asin: &str) -> Result<ProductResponse, LookupError>;

    /// Fetches the `type=offers` page for an ASIN.
    async fn offers(&self, asin: &str) -> Result<OffersResponse, LookupError>;
}

/// Rainforest API client. Carries the API key and marketplace domain it was
/// constructed with; nothing here reads the process environment.
pub struct RainforestClient {
    client: Client,
    api_key: String,
    domain: String,
    base_url: Option<String>,
}

impl RainforestClient {
    /// Creates a new client from the given configuration.
    pub fn new(config: &Config) -> Result<Self, LookupError> {
        Self::with_base_url(config, None)
    }

    /// Creates a new client with an optional custom base URL (for testing).
    pub fn with_base_url(config: &Config, base_url: Option<String>) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            domain: config.domain.clone(),
            base_url,
        })
    }

    /// Returns the endpoint URL (custom for testing, or the production API).
    fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(API_URL)
    }

    /// Issues one GET against the endpoint and decodes the JSON body.
    async fn get_page<T: DeserializeOwned>(
        &self,
        request_type: &'static str,
        asin: &str,
    ) -> Result<T, LookupError> {
        debug!("GET {} type={} asin={}", self.base_url(), request_type, asin);

        let response = self
            .client
            .get(self.base_url())
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("type", request_type),
                ("amazon_domain", self.domain.as_str()),
                ("asin", asin),
            ])
            .send()
            .await?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Status {
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| LookupError::Decode {
            page: request_type,
            source,
        })
    }
}

#[async_trait]
impl RainforestApi for RainforestClient {
    async fn product(&self, asin: &str) -> Result<ProductResponse, LookupError> {
        info!("Fetching product page: {}", asin);
        self.get_page("product", asin).await
    }

    async fn offers(&self, asin: &str) -> Result<OffersResponse, LookupError> {
        info!("Fetching offers page: {}", asin);
        self.get_page("offers", asin).await
    }
}

/// Trims an error body down to a single-line excerpt safe to embed in a
/// message or CSV cell.
fn excerpt(body: &str) -> String {
    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= ERROR_BODY_MAX {
        return collapsed;
    }
    collapsed.chars().take(ERROR_BODY_MAX).collect()
}
