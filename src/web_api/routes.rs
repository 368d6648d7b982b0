//! API Routes

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::{Error, Result};
use crate::models::{ApiResponse, CameraSummary};
use crate::overlay;
use crate::protect::{camera_id, display_name, to_summary};
use crate::state::AppState;

/// Create API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/health", get(super::health_check))
        // Cameras
        .route("/cameras", get(list_cameras))
        // Relay smoke test
        .route("/test/text", get(test_text))
        // Motion triggers
        .route("/hook/by-id/:camera_id", post(hook_by_id))
        .route("/hook/:camera_name", post(hook_by_name))
        .with_state(state)
}

/// Query parameters for the motion-trigger endpoints
#[derive(Debug, Deserialize)]
struct HookQuery {
    token: Option<String>,
    caption: Option<String>,
    #[serde(default = "default_width")]
    width: u32,
    hq: Option<String>,
    stamp: Option<String>,
    #[serde(default)]
    stamp_tz: String,
    #[serde(default)]
    stamp_fmt: String,
}

fn default_width() -> u32 {
    1280
}

/// Query parameters for the simple gated endpoints
#[derive(Debug, Deserialize)]
struct SimpleQuery {
    token: Option<String>,
    text: Option<String>,
}

/// Webhook flag values accepted as true
fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(str::to_ascii_lowercase).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

/// Shared-token gate: only enforced when a webhook token is configured
fn check_token(state: &AppState, token: Option<&str>) -> Result<()> {
    match &state.config.webhook_token {
        Some(expected) if token != Some(expected.as_str()) => {
            Err(Error::Forbidden("invalid webhook token".to_string()))
        }
        _ => Ok(()),
    }
}

// ========================================
// Handlers
// ========================================

async fn list_cameras(
    State(state): State<AppState>,
    Query(query): Query<SimpleQuery>,
) -> Result<impl IntoResponse> {
    check_token(&state, query.token.as_deref())?;

    let records = state.protect.list_cameras().await?;
    let cameras: Vec<CameraSummary> = records.iter().map(to_summary).collect();
    Ok(Json(ApiResponse::success(cameras)))
}

async fn test_text(
    State(state): State<AppState>,
    Query(query): Query<SimpleQuery>,
) -> Result<impl IntoResponse> {
    check_token(&state, query.token.as_deref())?;

    let text = query
        .text
        .unwrap_or_else(|| "Snapshot relay test message".to_string());
    state.telegram.send_text(&text).await?;
    Ok(Json(json!({"ok": true})))
}

async fn hook_by_name(
    State(state): State<AppState>,
    Path(camera_name): Path<String>,
    Query(query): Query<HookQuery>,
) -> Result<impl IntoResponse> {
    check_token(&state, query.token.as_deref())?;

    let records = state.protect.list_cameras().await?;
    let record = records
        .iter()
        .find(|r| display_name(r) == camera_name)
        .ok_or_else(|| Error::NotFound(format!("camera {}", camera_name)))?;
    let id = camera_id(record)
        .ok_or_else(|| Error::NotFound(format!("camera {} has no usable id", camera_name)))?
        .to_string();

    let caption = query
        .caption
        .clone()
        .unwrap_or_else(|| format!("Motion on {}", camera_name));
    deliver(&state, &id, &query, &caption).await?;
    Ok(Json(json!({"ok": true})))
}

async fn hook_by_id(
    State(state): State<AppState>,
    Path(camera_id): Path<String>,
    Query(query): Query<HookQuery>,
) -> Result<impl IntoResponse> {
    check_token(&state, query.token.as_deref())?;

    let caption = query
        .caption
        .clone()
        .unwrap_or_else(|| format!("Motion on camera {}", camera_id));
    deliver(&state, &camera_id, &query, &caption).await?;
    Ok(Json(json!({"ok": true})))
}

/// Snapshot -> optional stamp -> relay
async fn deliver(state: &AppState, camera_id: &str, query: &HookQuery, caption: &str) -> Result<()> {
    let mut photo = state
        .protect
        .snapshot(camera_id, query.width, parse_flag(query.hq.as_deref()))
        .await?;

    if parse_flag(query.stamp.as_deref()) {
        // A failed overlay is not worth dropping the alert over.
        match overlay::overlay_timestamp(&photo, &query.stamp_tz, &query.stamp_fmt) {
            Ok(stamped) => photo = stamped,
            Err(e) => {
                tracing::warn!(
                    camera_id = %camera_id,
                    error = %e,
                    "Timestamp overlay failed, relaying unstamped image"
                );
            }
        }
    }

    state.telegram.send_photo(photo, caption).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_parsing_accepts_common_truthy_spellings() {
        for v in ["1", "true", "yes", "on", "TRUE", "Yes", "ON"] {
            assert!(parse_flag(Some(v)), "{} should parse as true", v);
        }
        for v in ["0", "false", "no", "off", ""] {
            assert!(!parse_flag(Some(v)), "{} should parse as false", v);
        }
        assert!(!parse_flag(None));
    }

    #[test]
    fn default_width_matches_legacy_endpoint_default() {
        assert_eq!(default_width(), 1280);
    }
}
