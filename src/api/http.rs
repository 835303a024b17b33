use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::{CoinRepository, Endpoint, NetworkError};
use crate::types::CoinRecord;

/// Coin repository backed by a plain JSON GET.
pub struct HttpCoinRepository {
    client: Client,
    base_url: Option<String>,
}

impl HttpCoinRepository {
    pub fn new(base_url: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("coinsift/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }
}

#[async_trait]
impl CoinRepository for HttpCoinRepository {
    async fn fetch(&self, endpoint: Endpoint) -> Result<Vec<CoinRecord>, NetworkError> {
        let url = endpoint.url(self.base_url.as_deref())?;
        debug!(%url, "fetching coins");

        let resp = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| NetworkError::Unknown(e.to_string()))?;

        let status = resp.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "coin service returned non-200");
            return Err(NetworkError::ServiceUnavailable(status.as_u16()));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| NetworkError::Unknown(e.to_string()))?;

        match serde_json::from_str::<Vec<CoinRecord>>(&text) {
            Ok(coins) => {
                debug!(count = coins.len(), "coins decoded");
                Ok(coins)
            }
            Err(e) => {
                let snippet: String = text.chars().take(300).collect();
                warn!(error = %e, response = %snippet, "failed to decode coin payload");
                Err(NetworkError::DecodingFailure(e.to_string()))
            }
        }
    }
}
