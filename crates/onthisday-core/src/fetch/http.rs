//! HTTP implementation of [`DaySource`].

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use super::traits::DaySource;
use crate::error::{OnThisDayError, Result};
use crate::model::{decode_day, Day};

/// Public endpoint serving the "on this day" pages.
pub const DEFAULT_BASE_URL: &str = "https://today.zenquotes.io";

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Settings for the HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base endpoint; requests go to `{base_url}/api/{month}/{day}`
    pub base_url: String,

    /// Whole-request timeout
    pub timeout: Duration,

    /// `User-Agent` header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("onthisday/{}", crate::VERSION),
        }
    }
}

impl ClientConfig {
    /// Config pointing at a different base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Fetches days from the remote JSON API.
#[derive(Debug, Clone)]
pub struct HttpDayClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpDayClient {
    /// Build a client from config.
    ///
    /// # Errors
    ///
    /// Returns `OnThisDayError::InvalidInput` if the base URL does not parse
    /// as an absolute URL, or `OnThisDayError::Network` if the TLS backend
    /// cannot be initialised.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            OnThisDayError::InvalidInput(format!("Invalid base URL {}: {}", config.base_url, e))
        })?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Request URL for `month`/`day`, unpadded.
    pub fn day_url(&self, month: u32, day: u32) -> Url {
        let mut url = self.base_url.clone();
        let base_path = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{}/api/{}/{}", base_path, month, day));
        url
    }
}

#[async_trait]
impl DaySource for HttpDayClient {
    async fn fetch_day(&self, month: u32, day: u32) -> Result<Day> {
        let url = self.day_url(month, day);
        tracing::debug!(%url, "fetching day");

        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "request failed");
            OnThisDayError::Network(e.to_string())
        })?;

        let status = response.status();
        if status.as_u16() >= 400 {
            tracing::warn!(%url, status = status.as_u16(), "remote rejected request");
            return Err(OnThisDayError::BadResponse {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let day = decode_day(&body).inspect_err(|e| {
            tracing::warn!(%url, error = %e, "payload did not decode");
        })?;

        tracing::debug!(
            %url,
            date = %day.date,
            total = day.total(),
            "fetched day"
        );
        Ok(day)
    }
}
