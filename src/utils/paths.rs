use std::borrow::Cow;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SessionError};

/// Extension of session log files
pub const LOG_EXTENSION: &str = "jsonl";

/// Resolve the log file for a session id inside `sessions_dir`.
///
/// Returns `None` when the id is empty or could name something outside the directory
/// (path separators, `.`/`..`, NUL). Such ids can never correspond to a log file.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use agent_session_explorer::utils::session_log_path;
///
/// let dir = Path::new("/data/sessions");
/// assert_eq!(session_log_path(dir, "abc"), Some(dir.join("abc.jsonl")));
/// assert_eq!(session_log_path(dir, "../abc"), None);
/// ```
pub fn session_log_path(sessions_dir: &Path, session_id: &str) -> Option<PathBuf> {
    let invalid = session_id.is_empty()
        || session_id == "."
        || session_id == ".."
        || session_id.contains(['/', '\\', '\0']);
    if invalid {
        return None;
    }
    Some(sessions_dir.join(format!("{}.{}", session_id, LOG_EXTENSION)))
}

/// Session id for a log file path: the file name without its `.jsonl` extension
pub fn session_id_from_path(path: &Path) -> Option<String> {
    if path.extension()?.to_str()? != LOG_EXTENSION {
        return None;
    }
    path.file_stem()?.to_str().map(str::to_string)
}

/// List the session log files of a directory in listing order (ascending file name).
///
/// Only regular `*.jsonl` files count; subdirectories and other files are ignored.
///
/// # Errors
///
/// Returns [`SessionError::Io`] if the directory itself cannot be read. Unreadable individual
/// entries are skipped.
pub fn list_log_files(sessions_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(sessions_dir).map_err(|e| SessionError::io(sessions_dir, e))?;

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && session_id_from_path(path).is_some())
        .collect();

    files.sort();
    Ok(files)
}

/// Formats a path with ~ substitution for the home directory
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref());

    let path_str = path.to_string_lossy();
    if let Some(home) = home
        && !home.is_empty()
        && path_str.starts_with(home)
    {
        return path_str.replacen(home, "~", 1);
    }

    match path_str {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}
