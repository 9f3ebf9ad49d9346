//! Editor settings recognized by the core.
//!
//! Settings arrive as JSON from the host, either as a bare object or nested
//! under a `"sass"` key (the shape editors use for `workspace/configuration`).

use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;

/// Key the settings live under in a host configuration payload
pub const SETTINGS_SECTION: &str = "sass";

/// Keys that mark a bare object as a settings payload
const SETTINGS_KEYS: &[&str] = &[
    "disableUnitCompletion",
    "andStared",
    "disableAutoIndent",
    "storagePath",
];

/// Settings bag consulted per completion request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Skip unit suggestions after a bare number
    pub disable_unit_completion: bool,

    /// Pseudo-selector completions carry the leading `&` (`&:hover`)
    pub and_stared: bool,

    /// Never indent the line after a selector on enter
    pub disable_auto_indent: bool,

    /// Where the symbol index is persisted; in-memory when unset
    pub storage_path: Option<PathBuf>,
}

impl Settings {
    /// Parse settings from a host payload.
    ///
    /// Returns `None` when the payload carries no sass settings (neither a
    /// `"sass"` object nor a bare object with a recognized key) or fails to
    /// deserialize; callers keep their current settings in that case.
    pub fn from_json(value: &Value) -> Option<Self> {
        let section = match value.get(SETTINGS_SECTION) {
            Some(nested) if nested.is_object() => nested,
            _ if carries_settings_keys(value) => value,
            _ => {
                tracing::debug!("Payload carries no sass settings: {}", value);
                return None;
            }
        };

        match serde_json::from_value(section.clone()) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!("Ignoring malformed settings payload: {}", e);
                None
            }
        }
    }
}

fn carries_settings_keys(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|fields| SETTINGS_KEYS.iter().any(|key| fields.contains_key(*key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_when_fields_missing() {
        let settings = Settings::from_json(&json!({ "sass": {} })).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_nested_section() {
        let settings = Settings::from_json(&json!({
            "sass": { "disableUnitCompletion": true, "andStared": true }
        }))
        .unwrap();
        assert!(settings.disable_unit_completion);
        assert!(settings.and_stared);
        assert!(!settings.disable_auto_indent);
    }

    #[test]
    fn test_bare_object_with_storage_path() {
        let settings = Settings::from_json(&json!({
            "disableAutoIndent": true,
            "storagePath": "/tmp/sass-index.json"
        }))
        .unwrap();
        assert!(settings.disable_auto_indent);
        assert_eq!(
            settings.storage_path,
            Some(PathBuf::from("/tmp/sass-index.json"))
        );
    }

    #[test]
    fn test_malformed_payload_rejected() {
        assert!(Settings::from_json(&json!({ "andStared": "yes" })).is_none());
        assert!(Settings::from_json(&json!(42)).is_none());
    }

    #[test]
    fn test_unrelated_payload_ignored() {
        assert!(Settings::from_json(&json!({ "editor": { "tabSize": 4 } })).is_none());
        assert!(Settings::from_json(&json!({})).is_none());
        assert!(Settings::from_json(&json!({ "sass": 1, "tabSize": 4 })).is_none());
    }
}
