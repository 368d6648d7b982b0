//! Camera record helpers
//!
//! Camera records stay loosely typed (`serde_json::Value`) because the
//! controller's schemas differ per firmware; only the admission filter and
//! the normalized listing view interpret them.

use crate::models::CameraSummary;
use crate::protect::naming::display_name;
use serde_json::Value;

/// A camera record as returned by the controller: an arbitrary JSON object
/// carrying at least one identity field and one descriptive field.
pub type CameraRecord = Value;

/// Fields that can identify a camera
pub const IDENTITY_FIELDS: [&str; 4] = ["id", "_id", "uuid", "mac"];

/// Fields that describe a camera
pub const DESCRIPTIVE_FIELDS: [&str; 5] = ["name", "displayName", "marketName", "type", "modelKey"];

/// Admission filter: a record is camera-like when it is an object carrying
/// at least one identity field and at least one descriptive field.
pub fn is_camera_like(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    IDENTITY_FIELDS.iter().any(|k| obj.contains_key(*k))
        && DESCRIPTIVE_FIELDS.iter().any(|k| obj.contains_key(*k))
}

/// First present identity field, as a string
pub fn camera_id(record: &CameraRecord) -> Option<&str> {
    IDENTITY_FIELDS
        .iter()
        .find_map(|k| record.get(*k).and_then(Value::as_str))
}

/// First present string value among the given keys
pub(crate) fn first_str<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| record.get(*k).and_then(Value::as_str))
}

/// Normalized view for the external listing surface
pub fn to_summary(record: &CameraRecord) -> CameraSummary {
    CameraSummary {
        id: camera_id(record).unwrap_or_default().to_string(),
        name: display_name(record),
        model: first_str(record, &["marketName", "type", "modelKey", "model"])
            .unwrap_or_default()
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn admission_requires_identity_and_descriptive_fields() {
        assert!(is_camera_like(&json!({"id": "c1", "name": "Front"})));
        assert!(is_camera_like(&json!({"mac": "AA:BB", "modelKey": "g4"})));

        // identity only
        assert!(!is_camera_like(&json!({"id": "c1"})));
        // descriptive only
        assert!(!is_camera_like(&json!({"name": "Front"})));
        // not an object
        assert!(!is_camera_like(&json!("c1")));
        assert!(!is_camera_like(&json!(["c1"])));
    }

    #[test]
    fn camera_id_prefers_id_over_mac() {
        let record = json!({"id": "c1", "mac": "AA:BB:CC:11:22:33", "name": "Front"});
        assert_eq!(camera_id(&record), Some("c1"));

        let record = json!({"mac": "AA:BB:CC:11:22:33", "name": "Front"});
        assert_eq!(camera_id(&record), Some("AA:BB:CC:11:22:33"));
    }

    #[test]
    fn summary_uses_display_name_and_model_chain() {
        let record = json!({"id": "c1", "name": "Front", "marketName": "G4 Bullet"});
        let summary = to_summary(&record);
        assert_eq!(summary.id, "c1");
        assert_eq!(summary.name, "Front");
        assert_eq!(summary.model, "G4 Bullet");
    }
}
