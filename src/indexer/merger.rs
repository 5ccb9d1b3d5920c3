//! Session list assembly.
//!
//! # Error Handling Strategy
//!
//! - **Registry**: missing or corrupt registry files are tolerated (see `parsers::registry`).
//! - **Per-file isolation**: a log file whose first line cannot be read or parsed is logged and
//!   skipped; the remaining files are still listed.
//! - **Directory**: only a failure to list the sessions directory itself is returned to the
//!   caller, as `SessionError::Io`.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;
use crate::indexer::scanner::synthesize_record;
use crate::models::SessionRecord;
use crate::parsers::load_registry;
use crate::utils::{list_log_files, session_id_from_path};

/// Build the merged session list.
///
/// Registry-derived records come first, in registry order, followed by records synthesized for
/// log files the registry does not mention, in listing order. Each session id appears once:
/// the registry wins over a log file, and the first registry entry wins over later ones.
/// No sorting is applied.
///
/// # Errors
///
/// Returns [`crate::SessionError::Io`] if `sessions_dir` cannot be listed.
pub fn list_sessions(sessions_dir: &Path, registry_path: &Path) -> Result<Vec<SessionRecord>> {
    let registry = load_registry(registry_path);

    let mut sessions = Vec::with_capacity(registry.len());
    let mut seen: HashSet<String> = HashSet::new();

    for (key, entry) in &registry {
        let Some(session_id) = entry.session_id.as_deref().filter(|id| !id.is_empty()) else {
            warn!("Skipping registry entry {} without a sessionId", key);
            continue;
        };
        if !seen.insert(session_id.to_string()) {
            debug!("Registry entry {} repeats session {}", key, session_id);
            continue;
        }
        sessions.push(SessionRecord::from_registry(key, session_id, entry));
    }

    let registry_count = sessions.len();
    let mut skipped = 0;

    for path in list_log_files(sessions_dir)? {
        let Some(session_id) = session_id_from_path(&path) else {
            continue;
        };
        if seen.contains(&session_id) {
            continue;
        }

        match synthesize_record(&path, &session_id) {
            Ok(record) => {
                seen.insert(session_id);
                sessions.push(record);
            }
            Err(e) => {
                skipped += 1;
                warn!("Skipping session log {}: {:#}", path.display(), e);
            }
        }
    }

    debug!(
        "Listed {} sessions ({} from registry, {} from log files, {} skipped)",
        sessions.len(),
        registry_count,
        sessions.len() - registry_count,
        skipped
    );

    Ok(sessions)
}
