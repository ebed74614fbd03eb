use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use crate::{config::GatewayConfig, error::ProviderError, format::VideoInfo};

/// Source of video metadata. The gateway calls it once per request.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn fetch_video_info(&self, url: &str) -> Result<VideoInfo, ProviderError>;
}

/// RapidAPI "youtube video download info" endpoint.
#[derive(Debug, Clone)]
pub struct RapidApiProvider {
    http_client: reqwest::Client,
    endpoint: Url,
    api_key: String,
    api_host: String,
}

impl RapidApiProvider {
    pub fn new(config: &GatewayConfig) -> Result<Self, ProviderError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.upstream_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            api_host: config.api_host.clone(),
        })
    }

    fn request_url(&self, video_url: &str) -> Url {
        let mut target = self.endpoint.clone();
        target.set_query(Some(&format!("url={}", urlencoding::encode(video_url))));
        target
    }
}

#[async_trait]
impl MetadataProvider for RapidApiProvider {
    async fn fetch_video_info(&self, url: &str) -> Result<VideoInfo, ProviderError> {
        let target = self.request_url(url);
        debug!("Requesting video info from {}", target.host_str().unwrap_or("upstream"));

        let response = self
            .http_client
            .get(target)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.api_host)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Video info provider responded with non-success status: {status}");
            return Err(ProviderError::Status(status));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|error| ProviderError::Decode(error.to_string()))
    }
}
