//! Dashboard configuration — defaults, validation, environment overrides.

use crate::error::ConfigError;
use crate::network::{DEFAULT_API_URL, DEFAULT_EVENT_BUFFER, DEFAULT_REFRESH_INTERVAL};
use std::time::Duration;

pub const ENV_API_URL: &str = "DASHBOARD_API_URL";
pub const ENV_REFRESH_SECS: &str = "DASHBOARD_REFRESH_SECS";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "DASHBOARD_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Base URL serving `/api/blocks` and `/api/market`.
    pub api_url: String,
    /// Period between two fetches of the same dataset.
    pub refresh_interval: Duration,
    /// Per-request timeout. `None` means a request may hang indefinitely,
    /// stalling only its own fetch.
    pub request_timeout: Option<Duration>,
    /// Capacity of the refresh event channel.
    pub event_buffer: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            request_timeout: None,
            event_buffer: DEFAULT_EVENT_BUFFER,
        }
    }
}

impl DashboardConfig {
    /// Defaults overridden by `DASHBOARD_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            config.api_url = url;
        }
        if let Some(raw) = lookup(ENV_REFRESH_SECS) {
            config.refresh_interval = parse_seconds(ENV_REFRESH_SECS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            config.request_timeout = Some(parse_seconds(ENV_REQUEST_TIMEOUT_SECS, &raw)?);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::Empty { var: ENV_API_URL });
        }
        if self.refresh_interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }
}

fn parse_seconds(var: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .ok_or_else(|| ConfigError::InvalidSeconds {
            var,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.refresh_interval, Duration::from_secs(30));
        assert_eq!(config.request_timeout, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lookup_overrides() {
        let config = DashboardConfig::from_lookup(lookup_from(&[
            (ENV_API_URL, "http://explorer.local:4000/"),
            (ENV_REFRESH_SECS, "5"),
            (ENV_REQUEST_TIMEOUT_SECS, "2.5"),
        ]))
        .unwrap();
        assert_eq!(config.refresh_interval, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Some(Duration::from_millis(2500)));
        assert_eq!(config.api_url, "http://explorer.local:4000/");
    }

    #[test]
    fn test_missing_vars_keep_defaults() {
        let config = DashboardConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_invalid_seconds_rejected() {
        let err = DashboardConfig::from_lookup(lookup_from(&[(ENV_REFRESH_SECS, "soon")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidSeconds {
                var: ENV_REFRESH_SECS,
                value: "soon".into()
            }
        );
        assert!(
            DashboardConfig::from_lookup(lookup_from(&[(ENV_REQUEST_TIMEOUT_SECS, "-1")])).is_err()
        );
    }

    #[test]
    fn test_zero_refresh_rejected() {
        let err =
            DashboardConfig::from_lookup(lookup_from(&[(ENV_REFRESH_SECS, "0")])).unwrap_err();
        assert_eq!(err, ConfigError::ZeroInterval);
    }

    #[test]
    fn test_empty_url_rejected() {
        let err = DashboardConfig::from_lookup(lookup_from(&[(ENV_API_URL, "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::Empty { var: ENV_API_URL });
    }
}
