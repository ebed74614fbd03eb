use std::time::Duration;

use tracing::warn;
use url::Url;

use crate::error::ApiError;

pub const DEFAULT_API_HOST: &str = "youtube-video-download-info.p.rapidapi.com";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8787";

/// Everything the gateway needs from its environment, resolved once at
/// startup and passed in explicitly.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_key: String,
    pub api_host: String,
    pub endpoint: Url,
    pub upstream_timeout: Option<Duration>,
    pub strict_urls: bool,
    pub bind_addr: String,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`GatewayConfig::from_env`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .as_deref()
                .and_then(non_empty)
                .map(ToString::to_string)
        };

        let api_key = read("YOUTUBE_DL_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            warn!("YOUTUBE_DL_API_KEY is not set. Upstream requests will likely be rejected.");
        }

        let api_host = read("RAPIDAPI_HOST").unwrap_or_else(|| DEFAULT_API_HOST.to_string());
        let endpoint_raw = read("UPSTREAM_ENDPOINT").unwrap_or_else(|| format!("https://{api_host}"));
        let endpoint = Url::parse(&endpoint_raw).map_err(|error| {
            ApiError::internal(format!("Invalid UPSTREAM_ENDPOINT {endpoint_raw:?}: {error}"))
        })?;

        let upstream_timeout = read("UPSTREAM_TIMEOUT_SECONDS")
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|seconds| *seconds > 0)
            .map(Duration::from_secs);

        let strict_urls = read("STRICT_URL_CHECK")
            .as_deref()
            .and_then(parse_bool)
            .unwrap_or(false);

        Ok(Self {
            api_key,
            api_host,
            endpoint,
            upstream_timeout,
            strict_urls,
            bind_addr: resolve_bind_addr(read("APP_ADDR"), read("PORT")),
        })
    }
}

fn resolve_bind_addr(app_addr: Option<String>, port: Option<String>) -> String {
    if let Some(configured) = app_addr {
        return configured;
    }

    if let Some(port) = port.and_then(|value| value.parse::<u16>().ok()) {
        return format!("0.0.0.0:{port}");
    }

    DEFAULT_BIND_ADDR.to_string()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub(crate) fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<GatewayConfig, ApiError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        GatewayConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_point_at_rapidapi() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.api_key, "");
        assert_eq!(config.api_host, DEFAULT_API_HOST);
        assert_eq!(
            config.endpoint.as_str(),
            "https://youtube-video-download-info.p.rapidapi.com/"
        );
        assert!(config.upstream_timeout.is_none());
        assert!(!config.strict_urls);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    }

    #[test]
    fn reads_every_variable() {
        let config = config_from(&[
            ("YOUTUBE_DL_API_KEY", " secret "),
            ("RAPIDAPI_HOST", "example.p.rapidapi.com"),
            ("UPSTREAM_ENDPOINT", "http://127.0.0.1:9000/info"),
            ("UPSTREAM_TIMEOUT_SECONDS", "15"),
            ("STRICT_URL_CHECK", "Yes"),
            ("PORT", "3000"),
        ])
        .unwrap();

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.api_host, "example.p.rapidapi.com");
        assert_eq!(config.endpoint.as_str(), "http://127.0.0.1:9000/info");
        assert_eq!(config.upstream_timeout, Some(Duration::from_secs(15)));
        assert!(config.strict_urls);
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
    }

    #[test]
    fn endpoint_defaults_to_the_configured_host() {
        let config = config_from(&[("RAPIDAPI_HOST", "other.example")]).unwrap();
        assert_eq!(config.endpoint.as_str(), "https://other.example/");
    }

    #[test]
    fn app_addr_wins_over_port() {
        let config = config_from(&[("APP_ADDR", "0.0.0.0:9999"), ("PORT", "3000")]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:9999");
    }

    #[test]
    fn zero_or_garbage_timeout_is_ignored() {
        assert!(config_from(&[("UPSTREAM_TIMEOUT_SECONDS", "0")])
            .unwrap()
            .upstream_timeout
            .is_none());
        assert!(config_from(&[("UPSTREAM_TIMEOUT_SECONDS", "soon")])
            .unwrap()
            .upstream_timeout
            .is_none());
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let error = config_from(&[("UPSTREAM_ENDPOINT", "not a url")]).unwrap_err();
        assert!(error.message.contains("UPSTREAM_ENDPOINT"));
    }
}
