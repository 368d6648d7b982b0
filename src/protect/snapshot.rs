//! Snapshot retrieval
//!
//! Primary/fallback chain over two controller generations. The primary
//! endpoint is only trusted when it declares an image content type, since
//! some firmware answers HTTP 200 with an HTML error page. The legacy
//! fallback is the last resort and is accepted unconditionally.

use crate::error::{Error, Result};
use crate::protect::client::ProtectClient;
use reqwest::header::CONTENT_TYPE;

/// Whether a response declares an image media type
fn is_image_content_type(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|v| v.starts_with("image/"))
}

impl ProtectClient {
    /// Fetch a still image for a camera id
    ///
    /// `width` applies to the legacy endpoint only; `high_quality` to the
    /// versioned one only. Fails with `Error::Retrieval` when both
    /// endpoints fail.
    pub async fn snapshot(
        &self,
        camera_id: &str,
        width: u32,
        high_quality: bool,
    ) -> Result<Vec<u8>> {
        let primary = format!(
            "{}/proxy/protect/v1/cameras/{}/snapshot?highQuality={}",
            self.base_url, camera_id, high_quality
        );

        match self.get(&primary).await {
            Ok(resp) => {
                let content_type = resp
                    .headers()
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                if is_image_content_type(content_type.as_deref()) {
                    match resp.bytes().await {
                        Ok(bytes) => return Ok(bytes.to_vec()),
                        Err(e) => {
                            tracing::warn!(
                                camera_id = %camera_id,
                                error = %e,
                                "Primary snapshot body read failed, falling back"
                            );
                        }
                    }
                } else {
                    tracing::warn!(
                        camera_id = %camera_id,
                        content_type = content_type.as_deref().unwrap_or(""),
                        "Primary snapshot endpoint returned non-image body, falling back"
                    );
                }
            }
            Err(e) => {
                tracing::warn!(
                    camera_id = %camera_id,
                    error = %e,
                    "Primary snapshot endpoint failed, falling back"
                );
            }
        }

        // Legacy endpoint with cache-busting timestamp and forced refresh.
        let ts = chrono::Utc::now().timestamp_millis();
        let fallback = format!(
            "{}/proxy/protect/api/cameras/{}/snapshot?ts={}&force=true&width={}",
            self.base_url, camera_id, ts, width
        );

        let resp = self.get(&fallback).await.map_err(|e| {
            Error::Retrieval(format!("both snapshot endpoints failed for {}: {}", camera_id, e))
        })?;
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| Error::Retrieval(format!("reading snapshot body failed: {}", e)))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_prefix_accepted() {
        assert!(is_image_content_type(Some("image/jpeg")));
        assert!(is_image_content_type(Some("image/png")));
    }

    #[test]
    fn non_image_rejected() {
        assert!(!is_image_content_type(Some("text/html; charset=utf-8")));
        assert!(!is_image_content_type(Some("application/json")));
        assert!(!is_image_content_type(None));
    }
}
