//! TokenGate auth server entry point.

use std::sync::Arc;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;
use tracing::info;

use tokengate_server::config::AppConfig;
use tokengate_server::{AppState, router};

#[tokio::main]
async fn main() {
    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Configuration
    let config = AppConfig::from_env();
    if config.access_secret.starts_with("tokengate-dev-") {
        info!("using dev signing secrets (set ACCESS_TOKEN_SECRET / REFRESH_TOKEN_SECRET in production)");
    }

    // Credentialed CORS for the browser client
    let cors = CorsLayer::new()
        .allow_origin(
            config
                .client_origin
                .parse::<HeaderValue>()
                .expect("invalid CLIENT_ORIGIN"),
        )
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    let listen_port = config.listen_port;
    let state = Arc::new(AppState::demo(&config));
    let app = router(state).layer(cors);

    let addr = format!("0.0.0.0:{listen_port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listener");

    info!(address = %addr, "auth server listening");
    axum::serve(listener, app).await.expect("server error");
}
