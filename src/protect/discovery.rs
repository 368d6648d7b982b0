//! Camera directory discovery
//!
//! The controller returns its camera directory as a bare array, an envelope
//! object, or a deeply nested bootstrap object depending on firmware. The
//! extraction policy is an ordered sequence of shape strategies applied to
//! the parsed body; the first one producing admissible records wins, with
//! original order preserved and no merging across endpoints.

use crate::error::{Error, Result};
use crate::protect::client::ProtectClient;
use crate::protect::types::{is_camera_like, CameraRecord};
use serde_json::Value;

/// Conventional envelope keys holding a camera list
const CONTAINER_KEYS: [&str; 4] = ["cameras", "data", "items", "results"];

/// Directory endpoint candidates, most specific/modern first
fn endpoint_candidates(base_url: &str) -> [String; 3] {
    [
        format!("{}/proxy/protect/api/cameras", base_url),
        format!("{}/proxy/protect/api/bootstrap", base_url),
        format!("{}/proxy/protect/v1/cameras", base_url),
    ]
}

/// Keep only admissible records, preserving order
fn admissible(list: &[Value]) -> Vec<CameraRecord> {
    list.iter().filter(|v| is_camera_like(v)).cloned().collect()
}

/// Non-empty admissible subset of a list value, if any
fn admissible_list(value: &Value) -> Option<Vec<CameraRecord>> {
    let list = value.as_array()?;
    let cameras = admissible(list);
    (!cameras.is_empty()).then_some(cameras)
}

/// Extract camera records from a parsed directory body
///
/// Strategies, in order:
/// 1. body is a list: the admissible subset (possibly empty)
/// 2. body is a mapping: first conventional container key holding a list
///    with admissible records
/// 3. any mapping value that is a list with admissible records, else any
///    mapping value that is itself a mapping holding such a list
/// 4. empty
pub fn extract_cameras(body: &Value) -> Vec<CameraRecord> {
    if let Some(list) = body.as_array() {
        return admissible(list);
    }

    let Some(obj) = body.as_object() else {
        return Vec::new();
    };

    for key in CONTAINER_KEYS {
        if let Some(cameras) = obj.get(key).and_then(admissible_list) {
            return cameras;
        }
    }

    for value in obj.values() {
        if let Some(cameras) = admissible_list(value) {
            return cameras;
        }
        if let Some(nested) = value.as_object() {
            for nested_value in nested.values() {
                if let Some(cameras) = admissible_list(nested_value) {
                    return cameras;
                }
            }
        }
    }

    Vec::new()
}

impl ProtectClient {
    /// List camera records from the controller
    ///
    /// Tries the endpoint candidates in priority order; the first one
    /// yielding at least one admissible record wins. When every candidate
    /// fails or yields nothing, forces authentication and retries the
    /// bootstrap endpoint once, since the initial calls may have run
    /// before any session existed.
    pub async fn list_cameras(&self) -> Result<Vec<CameraRecord>> {
        if self.base_url.is_empty() {
            return Err(Error::Config("UNIFI_ADDR not configured".to_string()));
        }

        let mut last_err: Option<Error> = None;

        for url in endpoint_candidates(&self.base_url) {
            match self.get_json(&url).await {
                Ok(body) => {
                    let cameras = extract_cameras(&body);
                    if !cameras.is_empty() {
                        tracing::debug!(url = %url, count = cameras.len(), "Camera directory resolved");
                        return Ok(cameras);
                    }
                }
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "Directory endpoint failed");
                    last_err = Some(e);
                }
            }
        }

        // Last resort: force a session, then retry bootstrap once.
        let bootstrap = format!("{}/proxy/protect/api/bootstrap", self.base_url);
        let retry = async {
            self.ensure_authenticated().await?;
            self.get_json(&bootstrap).await
        };
        match retry.await {
            Ok(body) => {
                let cameras = extract_cameras(&body);
                if !cameras.is_empty() {
                    tracing::debug!(count = cameras.len(), "Camera directory resolved after forced login");
                    return Ok(cameras);
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Bootstrap retry after forced login failed");
                last_err = Some(e);
            }
        }

        Err(Error::Discovery(format!(
            "no cameras found via controller API; last error: {}",
            last_err.map(|e| e.to_string()).unwrap_or_else(|| "none".to_string())
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_list_keeps_admissible_records_in_order() {
        let body = json!([
            {"id": "c1", "name": "Front"},
            {"id": "orphan"},
            {"mac": "AA:BB", "type": "bullet"},
        ]);
        let cameras = extract_cameras(&body);
        assert_eq!(cameras.len(), 2);
        assert_eq!(cameras[0]["id"], "c1");
        assert_eq!(cameras[1]["mac"], "AA:BB");
    }

    #[test]
    fn envelope_under_conventional_key() {
        let body = json!({
            "meta": {"count": 1},
            "data": [{"id": "c1", "name": "Front"}],
        });
        let cameras = extract_cameras(&body);
        assert_eq!(cameras.len(), 1);
        assert_eq!(cameras[0]["id"], "c1");
    }

    #[test]
    fn container_key_order_is_fixed() {
        // "cameras" outranks "data" even when both hold admissible records
        let body = json!({
            "data": [{"id": "d1", "name": "Data"}],
            "cameras": [{"id": "c1", "name": "Front"}],
        });
        let cameras = extract_cameras(&body);
        assert_eq!(cameras.len(), 1);
        assert_eq!(cameras[0]["id"], "c1");
    }

    #[test]
    fn scans_mapping_values_for_lists() {
        let body = json!({
            "nvr": {"version": "4.0"},
            "devices": [{"id": "c1", "displayName": "Front"}],
        });
        let cameras = extract_cameras(&body);
        assert_eq!(cameras.len(), 1);
    }

    #[test]
    fn scans_nested_mapping_values_for_lists() {
        // Bootstrap-style: the list is one level down inside an inner object
        let body = json!({
            "authUser": {"id": "u1"},
            "site": {
                "sensors": [{"id": "s1"}],
                "cams": [{"uuid": "c1", "modelKey": "camera"}],
            },
        });
        let cameras = extract_cameras(&body);
        assert_eq!(cameras.len(), 1);
        assert_eq!(cameras[0]["uuid"], "c1");
    }

    #[test]
    fn inadmissible_records_never_survive() {
        let body = json!({
            "cameras": [{"id": "no-descriptive-field"}, {"name": "no-identity"}],
        });
        assert!(extract_cameras(&body).is_empty());
    }

    #[test]
    fn scalar_bodies_yield_nothing() {
        assert!(extract_cameras(&json!("nope")).is_empty());
        assert!(extract_cameras(&json!(42)).is_empty());
        assert!(extract_cameras(&json!(null)).is_empty());
    }

    #[test]
    fn candidate_order_is_modern_first() {
        let urls = endpoint_candidates("https://host");
        assert!(urls[0].ends_with("/proxy/protect/api/cameras"));
        assert!(urls[1].ends_with("/proxy/protect/api/bootstrap"));
        assert!(urls[2].ends_with("/proxy/protect/v1/cameras"));
    }
}
