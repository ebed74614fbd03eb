//! RapidAPI provider against a throwaway local server.

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::Query,
    http::{HeaderMap, StatusCode},
    routing::get,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use video_gateway::{GatewayConfig, MetadataProvider, ProviderError, RapidApiProvider};

async fn echo(headers: HeaderMap, Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };

    Json(json!({
        "title": header("x-rapidapi-key"),
        "author": header("x-rapidapi-host"),
        "thumbnail": params.get("url").cloned().unwrap_or_default(),
        "length_seconds": 42,
        "formats": [{ "quality_label": "720p", "url": "https://cdn.example/720" }]
    }))
}

async fn spawn_upstream() -> String {
    let app = Router::new()
        .route("/info", get(echo))
        .route("/missing", get(|| async { StatusCode::NOT_FOUND }))
        .route("/garbage", get(|| async { "definitely not json" }));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn provider_for(endpoint: String) -> RapidApiProvider {
    let config = GatewayConfig::from_lookup(|name| match name {
        "YOUTUBE_DL_API_KEY" => Some("test-key".to_string()),
        "RAPIDAPI_HOST" => Some("test-host.example".to_string()),
        "UPSTREAM_ENDPOINT" => Some(endpoint.clone()),
        "UPSTREAM_TIMEOUT_SECONDS" => Some("5".to_string()),
        _ => None,
    })
    .unwrap();
    RapidApiProvider::new(&config).unwrap()
}

#[tokio::test]
async fn sends_credentials_and_the_video_url() {
    let base = spawn_upstream().await;
    let provider = provider_for(format!("{base}/info"));

    let info = provider
        .fetch_video_info("https://www.youtube.com/watch?v=abc&t=1")
        .await
        .unwrap();

    assert_eq!(info.title.as_deref(), Some("test-key"));
    assert_eq!(info.author.as_deref(), Some("test-host.example"));
    assert_eq!(
        info.thumbnail.as_deref(),
        Some("https://www.youtube.com/watch?v=abc&t=1")
    );
    assert_eq!(info.length_seconds, Some(42));
    assert_eq!(info.formats.len(), 1);
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let base = spawn_upstream().await;
    let provider = provider_for(format!("{base}/missing"));

    let error = provider
        .fetch_video_info("https://youtu.be/x")
        .await
        .unwrap_err();
    assert!(matches!(error, ProviderError::Status(status) if status == StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn invalid_json_is_a_decode_error() {
    let base = spawn_upstream().await;
    let provider = provider_for(format!("{base}/garbage"));

    let error = provider
        .fetch_video_info("https://youtu.be/x")
        .await
        .unwrap_err();
    assert!(matches!(error, ProviderError::Decode(_)));
}

#[tokio::test]
async fn unreachable_upstream_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let provider = provider_for(format!("http://{addr}/info"));
    let error = provider
        .fetch_video_info("https://youtu.be/x")
        .await
        .unwrap_err();
    assert!(matches!(error, ProviderError::Transport(_)));
}
