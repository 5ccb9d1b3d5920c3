//! The three operations the browsing surfaces are built on.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::indexer::list_sessions;
use crate::models::{Event, SearchResult, SessionRecord};
use crate::parsers::read_session_log;
use crate::search::search_sessions;

/// Registry file name inside the sessions directory
pub const REGISTRY_FILE_NAME: &str = "sessions.json";

/// Read-only view of one sessions directory and its registry.
///
/// Holds paths only. Every call re-reads the disk, so concurrent callers each see their own
/// snapshot and nothing goes stale between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStore {
    sessions_dir: PathBuf,
    registry_path: PathBuf,
}

impl SessionStore {
    /// Store for `sessions_dir` with the registry at `<sessions_dir>/sessions.json`
    pub fn new(sessions_dir: impl Into<PathBuf>) -> Self {
        let sessions_dir = sessions_dir.into();
        let registry_path = sessions_dir.join(REGISTRY_FILE_NAME);
        Self { sessions_dir, registry_path }
    }

    pub fn with_registry(mut self, registry_path: impl Into<PathBuf>) -> Self {
        self.registry_path = registry_path.into();
        self
    }

    pub fn sessions_dir(&self) -> &Path {
        &self.sessions_dir
    }

    pub fn registry_path(&self) -> &Path {
        &self.registry_path
    }

    /// Merged, unsorted session list
    pub fn list_sessions(&self) -> Result<Vec<SessionRecord>> {
        list_sessions(&self.sessions_dir, &self.registry_path)
    }

    /// All events of one session, or `NotFound`
    pub fn get_session(&self, session_id: &str) -> Result<Vec<Event>> {
        read_session_log(&self.sessions_dir, session_id)
    }

    /// Substring search across all sessions; blank queries return nothing
    pub fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        search_sessions(&self.sessions_dir, query)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_default_registry_path() {
        let store = SessionStore::new("/data/sessions");
        assert_eq!(store.registry_path(), Path::new("/data/sessions/sessions.json"));
        assert_eq!(store.sessions_dir(), Path::new("/data/sessions"));
    }

    #[test]
    fn test_custom_registry_path() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("abc.jsonl"), "{\"timestamp\":1}\n").unwrap();
        let registry = dir.path().join("elsewhere.json");
        fs::write(&registry, r#"{"main": {"sessionId":"abc","displayName":"Main"}}"#).unwrap();

        let store = SessionStore::new(dir.path()).with_registry(&registry);
        let sessions = store.list_sessions().unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].display_name.as_deref(), Some("Main"));
        assert!(!sessions[0].from_file);
    }

    #[test]
    fn test_operations_reflect_disk_changes() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());
        assert!(store.list_sessions().unwrap().is_empty());

        fs::write(dir.path().join("abc.jsonl"), "{\"type\":\"session\",\"timestamp\":1}\n").unwrap();
        assert_eq!(store.list_sessions().unwrap().len(), 1);
        assert_eq!(store.get_session("abc").unwrap().len(), 1);
        assert_eq!(store.search("SESSION").unwrap().len(), 1);
    }
}
