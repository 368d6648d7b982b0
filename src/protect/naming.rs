//! Display-name synthesis
//!
//! Derives a stable human-readable name for a camera record. Total: any
//! input, including an empty object, yields a non-empty string.

use crate::protect::types::{first_str, CameraRecord};

/// Model fields, most specific first
const MODEL_FIELDS: [&str; 3] = ["marketName", "type", "modelKey"];

/// Identifier fields used for the uniqueness suffix
const SUFFIX_FIELDS: [&str; 4] = ["mac", "id", "_id", "uuid"];

/// Last `n` characters of a string; shorter strings are used whole
fn tail(s: &str, n: usize) -> &str {
    let chars = s.chars().count();
    if chars <= n {
        return s;
    }
    let (idx, _) = s.char_indices().nth(chars - n).unwrap_or((0, ' '));
    &s[idx..]
}

/// Human-readable display name for a camera record
///
/// Prefers an explicit `name`/`displayName` verbatim; otherwise synthesizes
/// `{model}_{last6(identifier)}` in MAC-suffix style. The suffix is only
/// appended when an identifier is present as a string.
pub fn display_name(record: &CameraRecord) -> String {
    if let Some(name) = first_str(record, &["name", "displayName"]).filter(|s| !s.is_empty()) {
        return name.to_string();
    }

    let model = first_str(record, &MODEL_FIELDS).unwrap_or("camera");

    match first_str(record, &SUFFIX_FIELDS) {
        Some(ident) => format!("{}_{}", model, tail(ident, 6)),
        None => model.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn explicit_name_wins_verbatim() {
        let record = json!({"name": "Front Door", "marketName": "G4 Bullet", "mac": "AA:BB:CC:11:22:33"});
        assert_eq!(display_name(&record), "Front Door");
    }

    #[test]
    fn display_name_field_is_second_choice() {
        let record = json!({"displayName": "Yard", "id": "abc"});
        assert_eq!(display_name(&record), "Yard");
    }

    #[test]
    fn empty_object_yields_nonempty_default() {
        assert_eq!(display_name(&json!({})), "camera");
    }

    #[test]
    fn mac_suffix_uses_last_six_characters() {
        let record = json!({"mac": "AA:BB:CC:11:22:33"});
        assert_eq!(display_name(&record), "camera_:22:33");
    }

    #[test]
    fn model_prefers_market_name() {
        let record = json!({"marketName": "G4 Pro", "type": "bullet", "id": "0123456789"});
        assert_eq!(display_name(&record), "G4 Pro_456789");
    }

    #[test]
    fn short_identifier_is_used_whole() {
        let record = json!({"id": "c1"});
        assert_eq!(display_name(&record), "camera_c1");
    }

    #[test]
    fn non_string_identifier_gets_no_suffix() {
        let record = json!({"id": 42, "type": "bullet"});
        assert_eq!(display_name(&record), "bullet");
    }

    #[test]
    fn multibyte_identifier_truncates_on_char_boundary() {
        // 9-char identifier, last 6 chars expected
        let record = json!({"id": "かめらのしきべつし"});
        assert_eq!(display_name(&record), "camera_のしきべつし");
    }
}
