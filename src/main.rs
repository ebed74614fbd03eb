use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use video_gateway::{ApiError, AppState, GatewayConfig, RapidApiProvider, router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "video_gateway=info,tower_http=info".to_string()),
        )
        .init();

    if let Err(error) = run().await {
        eprintln!("Server error: {}", error.message);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), ApiError> {
    let config = GatewayConfig::from_env()?;
    let provider = RapidApiProvider::new(&config)
        .map_err(|error| ApiError::internal(format!("Could not build HTTP client: {error}")))?;

    info!(
        "Video info provider: {} (host header {})",
        config.endpoint, config.api_host
    );
    if config.strict_urls {
        info!("STRICT_URL_CHECK enabled: only YouTube URLs are accepted.");
    }

    let addr = config.bind_addr.clone();
    let app = router(AppState::new(config, Arc::new(provider)));

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|error| ApiError::internal(format!("Could not bind {addr}: {error}")))?;

    info!("Gateway listening on http://{addr}");

    axum::serve(listener, app)
        .await
        .map_err(|error| ApiError::internal(format!("HTTP server error: {error}")))
}
