//! TelegramClient - Chat Relay Adapter
//!
//! ## Responsibilities
//!
//! - Relay snapshot photos with captions (`sendPhoto`, multipart)
//! - Relay plain text messages (`sendMessage`)
//!
//! Thin collaborator around the Bot API; everything interesting happens
//! upstream of it.

use crate::error::{Error, Result};
use reqwest::multipart::{Form, Part};
use std::time::Duration;

/// Timeout for photo uploads
const PHOTO_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for text messages
const TEXT_TIMEOUT: Duration = Duration::from_secs(15);

/// Telegram Bot API client
pub struct TelegramClient {
    client: reqwest::Client,
    api_url: String,
    token: String,
    chat_id: String,
}

impl TelegramClient {
    /// Create new TelegramClient
    pub fn new(api_url: String, token: String, chat_id: String) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_url,
            token,
            chat_id,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }

    /// Relay a photo with a caption
    pub async fn send_photo(&self, photo: Vec<u8>, caption: &str) -> Result<()> {
        let part = Part::bytes(photo)
            .file_name("snapshot.jpg")
            .mime_str("image/jpeg")
            .map_err(|e| Error::Relay(format!("invalid photo part: {}", e)))?;
        let form = Form::new()
            .text("chat_id", self.chat_id.clone())
            .text("caption", caption.to_string())
            .part("photo", part);

        let resp = self
            .client
            .post(self.method_url("sendPhoto"))
            .timeout(PHOTO_TIMEOUT)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Relay(format!("sendPhoto failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(Error::Relay(format!(
                "sendPhoto rejected: HTTP {} - {}",
                resp.status(),
                resp.text().await.unwrap_or_default()
            )));
        }

        tracing::debug!(caption = %caption, "Photo relayed");
        Ok(())
    }

    /// Relay a plain text message
    pub async fn send_text(&self, text: &str) -> Result<()> {
        let resp = self
            .client
            .post(self.method_url("sendMessage"))
            .timeout(TEXT_TIMEOUT)
            .form(&[("chat_id", self.chat_id.as_str()), ("text", text)])
            .send()
            .await
            .map_err(|e| Error::Relay(format!("sendMessage failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(Error::Relay(format!(
                "sendMessage rejected: HTTP {} - {}",
                resp.status(),
                resp.text().await.unwrap_or_default()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_url_embeds_token() {
        let client = TelegramClient::new(
            "https://api.telegram.org".to_string(),
            "123:abc".to_string(),
            "-100".to_string(),
        );
        assert_eq!(
            client.method_url("sendPhoto"),
            "https://api.telegram.org/bot123:abc/sendPhoto"
        );
    }
}
