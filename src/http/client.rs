//! Low-level HTTP client — `DashboardHttp`.
//!
//! One method per endpoint, each returning the decoded record sequence. No
//! retries: a failed request is reported to the caller and the scheduler
//! simply tries again on its next tick.

use crate::domain::block::Block;
use crate::domain::market::MarketDataPoint;
use crate::error::HttpError;
use crate::network::{BLOCKS_PATH, MARKET_PATH};

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Low-level HTTP client for the dashboard REST API.
#[derive(Clone)]
pub struct DashboardHttp {
    base_url: String,
    client: Client,
}

impl DashboardHttp {
    /// Build a client. `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, HttpError> {
        let mut builder = Client::builder().pool_max_idle_per_host(4);
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Endpoints ────────────────────────────────────────────────────────

    pub async fn get_blocks(&self) -> Result<Vec<Block>, HttpError> {
        let url = format!("{}{}", self.base_url, BLOCKS_PATH);
        self.get(&url).await
    }

    pub async fn get_market(&self) -> Result<Vec<MarketDataPoint>, HttpError> {
        let url = format!("{}{}", self.base_url, MARKET_PATH);
        self.get(&url).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        tracing::trace!("GET {}", url);
        let resp = self.client.get(url).send().await.map_err(classify)?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<T>().await.map_err(classify)?;
            return Ok(parsed);
        }

        let status_code = status.as_u16();
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

impl std::fmt::Debug for DashboardHttp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardHttp")
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn classify(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else {
        HttpError::Reqwest(e)
    }
}
