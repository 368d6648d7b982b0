//! Protect Snap Relay
//!
//! Main entry point for the webhook relay service.

use protect_snap_relay::{state::AppConfig, web_api, AppState};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "protect_snap_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Protect Snap Relay v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = AppConfig::default();
    tracing::info!(
        controller_url = %config.controller_url,
        api_key_configured = config.api_key.is_some(),
        password_login_configured = config.username.is_some() && config.password.is_some(),
        webhook_token_configured = config.webhook_token.is_some(),
        relay_configured = config.relay_configured(),
        "Configuration loaded"
    );

    if !config.controller_configured() {
        tracing::warn!(
            "Controller not fully configured; set UNIFI_ADDR plus UNIFI_API_KEY or UNIFI_USERNAME/UNIFI_PASSWORD"
        );
    }
    if !config.relay_configured() {
        tracing::warn!("Relay not configured; set TELEGRAM_TOKEN and TELEGRAM_CHAT");
    }

    // Create application state
    let state = AppState::new(config);

    let app = web_api::create_router(state.clone()).layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", state.config.host, state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
