//! Application state
//!
//! Holds configuration and shared components

use crate::protect::ProtectClient;
use crate::telegram::TelegramClient;
use std::sync::Arc;
use std::time::Instant;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Controller base address, no trailing slash
    pub controller_url: String,
    /// Long-lived controller API key (preferred over password login)
    pub api_key: Option<String>,
    /// Controller username for password login
    pub username: Option<String>,
    /// Controller password for password login
    pub password: Option<String>,
    /// Telegram bot token
    pub telegram_token: String,
    /// Telegram chat id
    pub telegram_chat: String,
    /// Telegram API base URL (overridable for tests)
    pub telegram_api_url: String,
    /// Shared token gating the inbound webhook endpoints
    pub webhook_token: Option<String>,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            controller_url: std::env::var("UNIFI_ADDR")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_default(),
            api_key: std::env::var("UNIFI_API_KEY").ok().filter(|v| !v.is_empty()),
            username: std::env::var("UNIFI_USERNAME").ok().filter(|v| !v.is_empty()),
            password: std::env::var("UNIFI_PASSWORD").ok().filter(|v| !v.is_empty()),
            telegram_token: std::env::var("TELEGRAM_TOKEN").unwrap_or_default(),
            telegram_chat: std::env::var("TELEGRAM_CHAT").unwrap_or_default(),
            telegram_api_url: std::env::var("TELEGRAM_API_URL")
                .unwrap_or_else(|_| "https://api.telegram.org".to_string()),
            webhook_token: std::env::var("WEBHOOK_TOKEN").ok().filter(|v| !v.is_empty()),
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }
}

impl AppConfig {
    /// Whether the controller side has enough settings to operate
    pub fn controller_configured(&self) -> bool {
        !self.controller_url.is_empty()
            && (self.api_key.is_some() || (self.username.is_some() && self.password.is_some()))
    }

    /// Whether the relay side has enough settings to operate
    pub fn relay_configured(&self) -> bool {
        !self.telegram_token.is_empty() && !self.telegram_chat.is_empty()
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Application config
    pub config: AppConfig,
    /// Controller client (discovery, snapshots, session lifecycle)
    pub protect: Arc<ProtectClient>,
    /// Chat relay client
    pub telegram: Arc<TelegramClient>,
    /// Process start time, for the health endpoint
    pub started_at: Instant,
}

impl AppState {
    /// Build state from configuration
    pub fn new(config: AppConfig) -> Self {
        let protect = Arc::new(ProtectClient::new(
            config.controller_url.clone(),
            config.api_key.clone(),
            config.username.clone(),
            config.password.clone(),
        ));
        let telegram = Arc::new(TelegramClient::new(
            config.telegram_api_url.clone(),
            config.telegram_token.clone(),
            config.telegram_chat.clone(),
        ));

        Self {
            config,
            protect,
            telegram,
            started_at: Instant::now(),
        }
    }
}
