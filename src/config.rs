use std::time::Duration;

use crate::edgar::client::{DEFAULT_USER_AGENT, FETCH_TIMEOUT};
use crate::edgar::rate_limiter::DEFAULT_MIN_INTERVAL;

/// Runtime settings, read once from the environment. Every variable has a
/// working default, so a bare process needs no configuration at all.
#[derive(Clone, Debug)]
pub struct InsiderConfig {
    pub user_agent: String,
    pub request_timeout: Duration,
    pub min_request_interval: Duration,
}

impl InsiderConfig {
    pub fn from_env() -> Self {
        let user_agent = std::env::var("INSIDER_USER_AGENT")
            .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        let request_timeout = std::env::var("INSIDER_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(FETCH_TIMEOUT);

        let min_request_interval = std::env::var("INSIDER_MIN_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_MIN_INTERVAL);

        Self {
            user_agent,
            request_timeout,
            min_request_interval,
        }
    }
}

impl Default for InsiderConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: FETCH_TIMEOUT,
            min_request_interval: DEFAULT_MIN_INTERVAL,
        }
    }
}
