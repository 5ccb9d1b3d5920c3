use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{Result, SessionError};
use crate::models::RegistryEntry;

/// Load the session registry (`sessions.json`), tolerating absence and corruption.
///
/// Returns `(key, entry)` pairs in the registry file's own key order. A missing or unparsable
/// registry is logged as a warning and yields an empty list, so the caller can still fall back
/// to scanning log files. Entries that are not JSON objects are skipped individually; mistyped
/// fields inside an entry read as absent.
pub fn load_registry(path: &Path) -> Vec<(String, RegistryEntry)> {
    match read_registry(path) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Session registry unavailable, falling back to log scan: {}", e);
            Vec::new()
        }
    }
}

/// Strict variant of [`load_registry`]: surfaces the IO or parse failure.
pub fn read_registry(path: &Path) -> Result<Vec<(String, RegistryEntry)>> {
    let contents = fs::read_to_string(path).map_err(|e| SessionError::io(path, e))?;

    let map: Map<String, Value> =
        serde_json::from_str(&contents).map_err(|e| SessionError::Malformed {
            path: path.to_path_buf(),
            line: e.line(),
            message: e.to_string(),
        })?;

    let mut entries = Vec::with_capacity(map.len());
    for (key, value) in map {
        match serde_json::from_value::<RegistryEntry>(value) {
            Ok(entry) => entries.push((key, entry)),
            Err(e) => {
                warn!("Skipping registry entry {} in {}: {}", key, path.display(), e);
            }
        }
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn create_test_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes()).expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_load_registry_preserves_order() {
        let file = create_test_file(
            r#"{
                "zeta": {"sessionId": "s-1", "updatedAt": 300, "displayName": "Zeta"},
                "alpha": {"sessionId": "s-2", "updatedAt": 100},
                "mid": {"sessionId": "s-3", "updatedAt": 200, "modelProvider": "anthropic"}
            }"#,
        );

        let entries = load_registry(file.path());
        let keys: Vec<_> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
        assert_eq!(entries[0].1.display_name.as_deref(), Some("Zeta"));
        assert_eq!(entries[2].1.model_provider.as_deref(), Some("anthropic"));
    }

    #[test]
    fn test_load_registry_missing_file_is_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let entries = load_registry(&dir.path().join("sessions.json"));
        assert!(entries.is_empty());
    }

    #[test]
    fn test_load_registry_corrupt_file_is_empty() {
        let file = create_test_file(r#"{"abc": {"sessionId": "abc""#);
        assert!(load_registry(file.path()).is_empty());
    }

    #[test]
    fn test_load_registry_non_object_root_is_empty() {
        let file = create_test_file(r#"[{"sessionId": "abc"}]"#);
        assert!(load_registry(file.path()).is_empty());
    }

    #[test]
    fn test_read_registry_reports_malformed() {
        let file = create_test_file("not json");
        let err = read_registry(file.path()).unwrap_err();
        assert!(matches!(err, SessionError::Malformed { .. }));
    }

    #[test]
    fn test_read_registry_reports_io() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = read_registry(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, SessionError::Io { .. }));
    }

    #[test]
    fn test_load_registry_skips_non_object_entries() {
        let file = create_test_file(
            r#"{"good": {"sessionId": "abc", "updatedAt": 1}, "bad": "not an object", "list": [1]}"#,
        );
        let entries = load_registry(file.path());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "good");
        assert_eq!(entries[0].1.session_id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_load_registry_keeps_entry_with_mistyped_fields() {
        let file = create_test_file(
            r#"{"k": {"sessionId": "abc", "totalTokens": "many", "channel": ["x"], "updatedAt": 7}}"#,
        );
        let entries = load_registry(file.path());
        assert_eq!(entries.len(), 1);
        let entry = &entries[0].1;
        assert_eq!(entry.session_id.as_deref(), Some("abc"));
        assert_eq!(entry.updated_at, Some(7));
        assert_eq!(entry.total_tokens, None);
        assert_eq!(entry.channel, None);
    }

    #[test]
    fn test_load_registry_keeps_entry_without_session_id() {
        // Dropping these is the merger's call, not the loader's
        let file = create_test_file(r#"{"orphan": {"updatedAt": 5}}"#);
        let entries = load_registry(file.path());
        assert_eq!(entries.len(), 1);
        assert!(entries[0].1.session_id.is_none());
    }
}
