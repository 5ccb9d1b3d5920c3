use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};

use crate::models::{Event, SessionRecord};

/// Number of session id characters kept in a synthesized display name
const DISPLAY_NAME_ID_CHARS: usize = 8;
/// Channel and chat type of sessions without registry metadata
const UNKNOWN: &str = "unknown";

/// Build a fallback record for a log file that has no registry entry.
///
/// Only the first line is read. Its `timestamp` becomes `updatedAt`; when the line has none, or
/// it does not parse, the file's modification time is used instead.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read, if the first line is empty, or if it is
/// not valid JSON. The caller skips such files.
pub fn synthesize_record(path: &Path, session_id: &str) -> Result<SessionRecord> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open session log: {}", path.display()))?;

    let mut raw = Vec::new();
    BufReader::new(&file)
        .read_until(b'\n', &mut raw)
        .with_context(|| format!("Failed to read first line of {}", path.display()))?;
    let first_line = String::from_utf8_lossy(&raw);

    if first_line.trim().is_empty() {
        bail!("First line of {} is empty", path.display());
    }

    let first_event: Event = serde_json::from_str(&first_line)
        .with_context(|| format!("Failed to parse first line of {}", path.display()))?;

    let updated_at = match first_event.timestamp() {
        Some(ts) => ts.timestamp_millis(),
        None => {
            let modified = file
                .metadata()
                .and_then(|meta| meta.modified())
                .with_context(|| format!("Failed to read modification time of {}", path.display()))?;
            DateTime::<Utc>::from(modified).timestamp_millis()
        }
    };

    Ok(SessionRecord {
        key: format!("file:{}", session_id),
        session_id: session_id.to_string(),
        updated_at: Some(updated_at),
        chat_type: Some(UNKNOWN.to_string()),
        channel: Some(UNKNOWN.to_string()),
        display_name: Some(synthesized_display_name(session_id)),
        model: None,
        provider: None,
        total_tokens: None,
        input_tokens: None,
        output_tokens: None,
        origin: None,
        from_file: true,
    })
}

/// `Session <first 8 chars of the id>...`
pub fn synthesized_display_name(session_id: &str) -> String {
    let prefix: String = session_id.chars().take(DISPLAY_NAME_ID_CHARS).collect();
    format!("Session {}...", prefix)
}
