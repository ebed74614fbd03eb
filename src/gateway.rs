use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderName, Method, StatusCode, header},
    routing::get,
};
use serde::Deserialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, warn};

use crate::{
    config::GatewayConfig,
    error::{ApiError, INVALID_YOUTUBE_URL, URL_REQUIRED},
    format::DownloadResponse,
    provider::MetadataProvider,
    resolver::resolve,
    validate::{extract_video_id, is_youtube_url},
};

#[derive(Clone)]
pub struct AppState {
    config: Arc<GatewayConfig>,
    provider: Arc<dyn MetadataProvider>,
}

impl AppState {
    pub fn new(config: GatewayConfig, provider: Arc<dyn MetadataProvider>) -> Self {
        Self {
            config: Arc::new(config),
            provider,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    url: Option<String>,
    quality: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/download", get(download).options(preflight))
        .route("/api/download", get(download).options(preflight))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn download(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> Result<Json<DownloadResponse>, ApiError> {
    let url = query
        .url
        .as_deref()
        .filter(|url| !is_blank(url))
        .ok_or_else(|| ApiError::bad_request(URL_REQUIRED))?;

    if state.config.strict_urls && !is_youtube_url(url) {
        return Err(ApiError::bad_request(INVALID_YOUTUBE_URL));
    }

    // Blank counts as absent; otherwise the hint is matched exactly as sent.
    let quality = query.quality.as_deref().filter(|hint| !is_blank(hint));
    debug!(
        video_id = extract_video_id(url).unwrap_or("-"),
        quality = quality.unwrap_or("-"),
        "Fetching video info"
    );

    let info = state.provider.fetch_video_info(url).await.map_err(|error| {
        warn!("Video info lookup failed for {url:?}: {error}");
        ApiError::from(error)
    })?;

    let descriptors = info.descriptors();
    let selected = resolve(&descriptors, quality);
    debug!(
        "Resolved {:?} out of {} format(s)",
        selected.and_then(|format| format.quality_label.as_deref()),
        info.formats.len()
    );

    Ok(Json(DownloadResponse::normalize(&info, selected)))
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::OPTIONS,
            Method::PATCH,
            Method::DELETE,
            Method::POST,
            Method::PUT,
        ])
        .allow_headers([
            HeaderName::from_static("x-csrf-token"),
            HeaderName::from_static("x-requested-with"),
            header::ACCEPT,
            HeaderName::from_static("accept-version"),
            header::CONTENT_LENGTH,
            HeaderName::from_static("content-md5"),
            header::CONTENT_TYPE,
            header::DATE,
            HeaderName::from_static("x-api-version"),
        ])
}
