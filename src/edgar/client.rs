use std::time::Duration;

use reqwest::{header, Client};
use url::Url;

use super::error::EdgarError;
use super::rate_limiter::RateLimiter;
use crate::config::InsiderConfig;

pub const EDGAR_ARCHIVES_URL: &str = "https://www.sec.gov";
pub const EDGAR_ARCHIVES_HOST: &str = "www.sec.gov";
pub const EDGAR_DATA_URL: &str = "https://data.sec.gov";
pub const EDGAR_DATA_HOST: &str = "data.sec.gov";

// SEC requires a contact address in the User-Agent of automated clients.
pub const DEFAULT_USER_AGENT: &str = "insider admin@example.com";

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for both EDGAR virtual hosts. Every fetch goes through the
/// shared rate limiter and carries the mandated identification headers.
pub struct EdgarClient {
    http: Client,
    user_agent: String,
    timeout: Duration,
    limiter: &'static RateLimiter,
}

impl EdgarClient {
    pub fn new() -> Self {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    pub fn with_user_agent(user_agent: &str) -> Self {
        EdgarClient {
            http: Client::new(),
            user_agent: user_agent.to_string(),
            timeout: FETCH_TIMEOUT,
            limiter: RateLimiter::edgar(),
        }
    }

    pub fn from_config(config: &InsiderConfig) -> Self {
        EdgarClient {
            http: Client::new(),
            user_agent: config.user_agent.clone(),
            timeout: config.request_timeout,
            limiter: RateLimiter::configure_edgar(config.min_request_interval),
        }
    }

    /// Fetches `url` and returns the response body. The `host` header is
    /// explicit because the document archive and the submissions API are
    /// different virtual hosts behind the same client identity. A single
    /// failure is final; no retries.
    pub async fn fetch(&self, url: &str, host: &str) -> Result<String, EdgarError> {
        let parsed = Url::parse(url).map_err(|e| EdgarError::Fetch {
            url: url.to_string(),
            cause: e.to_string(),
        })?;

        self.limiter.acquire().await;
        log::debug!("Fetching URL: {}", url);

        let response = self
            .http
            .get(parsed)
            .header(header::USER_AGENT, &self.user_agent)
            .header(header::ACCEPT_ENCODING, "gzip, deflate")
            .header(header::HOST, host)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.classify(url, e))?;

        log::debug!("Response status: {}", response.status());

        let status = response.status();
        if !status.is_success() {
            return Err(EdgarError::Fetch {
                url: url.to_string(),
                cause: format!("HTTP request failed with status: {}", status),
            });
        }

        response.text().await.map_err(|e| self.classify(url, e))
    }

    fn classify(&self, url: &str, err: reqwest::Error) -> EdgarError {
        if err.is_timeout() {
            EdgarError::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            }
        } else {
            EdgarError::Fetch {
                url: url.to_string(),
                cause: err.to_string(),
            }
        }
    }
}

impl Default for EdgarClient {
    fn default() -> Self {
        Self::new()
    }
}
