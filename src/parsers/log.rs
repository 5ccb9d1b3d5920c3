use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, SessionError};
use crate::models::Event;
use crate::utils::session_log_path;

/// Read every event of one session.
///
/// Unlike search, this is strict: a single unparsable non-blank line fails the whole read with
/// [`SessionError::Malformed`]. Blank lines are ignored. An unknown session id, or one that
/// could escape the sessions directory, is [`SessionError::NotFound`].
pub fn read_session_log(sessions_dir: &Path, session_id: &str) -> Result<Vec<Event>> {
    let path = session_log_path(sessions_dir, session_id)
        .ok_or_else(|| SessionError::not_found(session_id))?;

    match fs::metadata(&path) {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return Err(SessionError::not_found(session_id)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(SessionError::not_found(session_id));
        }
        Err(e) => return Err(SessionError::io(&path, e)),
    }

    parse_log_file(&path)
}

/// Parse a session log file by path with the same strict rules as [`read_session_log`].
pub fn parse_log_file(path: &Path) -> Result<Vec<Event>> {
    let bytes = fs::read(path).map_err(|e| SessionError::io(path, e))?;
    let content = String::from_utf8_lossy(&bytes);

    let mut events = Vec::new();
    for (line_idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let event = serde_json::from_str::<Event>(line).map_err(|e| SessionError::Malformed {
            path: path.to_path_buf(),
            line: line_idx + 1,
            message: e.to_string(),
        })?;
        events.push(event);
    }

    Ok(events)
}
