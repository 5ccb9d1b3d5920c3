use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{Event, SearchMatch, SearchResult};
use crate::utils::{list_log_files, session_id_from_path};

/// Maximum matches collected per session; scanning a file stops once reached
pub const MAX_MATCHES_PER_SESSION: usize = 10;
/// Characters of the raw line kept in a snippet
pub const SNIPPET_MAX_CHARS: usize = 200;
const SNIPPET_ELLIPSIS: &str = "...";

/// Case-insensitive substring search across every session log.
///
/// A blank query returns an empty list without touching the filesystem. Otherwise each log is
/// scanned in listing order; lines that are not valid JSON are skipped, files that cannot be read
/// are logged and skipped. A line matches when its serialized event contains the query. Each
/// session contributes at most [`MAX_MATCHES_PER_SESSION`] matches and only sessions with at
/// least one match are returned, in scan order.
///
/// # Errors
///
/// Returns [`crate::SessionError::Io`] only if the sessions directory cannot be listed.
pub fn search_sessions(sessions_dir: &Path, query: &str) -> Result<Vec<SearchResult>> {
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }

    let needle = query.to_lowercase();
    let mut results = Vec::new();

    for path in list_log_files(sessions_dir)? {
        let Some(session_id) = session_id_from_path(&path) else {
            continue;
        };

        let content = match fs::read(&path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                warn!("Skipping unreadable session log {}: {}", path.display(), e);
                continue;
            }
        };

        let matches = search_content(&content, &needle);
        if !matches.is_empty() {
            debug!("{} matches in session {}", matches.len(), session_id);
            results.push(SearchResult::new(session_id, matches));
        }
    }

    Ok(results)
}

/// Scan one log's content. `needle_lower` must already be lower-cased.
///
/// Line numbers count non-blank lines only, so a match's `line_number` is also the 1-based
/// position of its event in a full read of the same log.
pub fn search_content(content: &str, needle_lower: &str) -> Vec<SearchMatch> {
    let mut matches = Vec::new();

    for (idx, line) in content.lines().filter(|l| !l.trim().is_empty()).enumerate() {
        let line = line.trim();

        let Ok(event) = serde_json::from_str::<Event>(line) else {
            continue;
        };

        if event.matches(needle_lower) {
            matches.push(SearchMatch { line_number: idx + 1, event, snippet: make_snippet(line) });

            if matches.len() >= MAX_MATCHES_PER_SESSION {
                break;
            }
        }
    }

    matches
}

/// First [`SNIPPET_MAX_CHARS`] characters of a raw line, with `...` appended when cut
pub fn make_snippet(line: &str) -> String {
    match line.char_indices().nth(SNIPPET_MAX_CHARS) {
        Some((cut, _)) => format!("{}{}", &line[..cut], SNIPPET_ELLIPSIS),
        None => line.to_string(),
    }
}

/// Keep the events whose serialization contains `query`, case-insensitively.
/// A blank query keeps everything.
pub fn filter_events<'a>(events: &'a [Event], query: &str) -> Vec<&'a Event> {
    let query = query.trim();
    if query.is_empty() {
        return events.iter().collect();
    }
    let needle = query.to_lowercase();
    events.iter().filter(|event| event.matches(&needle)).collect()
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn line(text: &str) -> String {
        format!(
            r#"{{"type":"message","message":{{"role":"assistant","content":[{{"type":"text","text":"{}"}}]}}}}"#,
            text
        )
    }

    #[test]
    fn test_blank_query_does_not_touch_filesystem() {
        let missing = Path::new("/definitely/not/a/real/sessions/dir");
        assert!(search_sessions(missing, "").unwrap().is_empty());
        assert!(search_sessions(missing, "   \t\n").unwrap().is_empty());
    }

    #[test]
    fn test_missing_dir_with_query_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(search_sessions(&dir.path().join("missing"), "tool").is_err());
    }

    #[test]
    fn test_search_content_case_insensitive() {
        let content = [line("Tool call one"), line("nothing here"), line("another TOOL")].join("\n");
        let matches = search_content(&content, "tool");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].line_number, 1);
        assert_eq!(matches[1].line_number, 3);
    }

    #[test]
    fn test_search_content_caps_matches() {
        let content: Vec<String> = (0..15).map(|i| line(&format!("needle {}", i))).collect();
        let matches = search_content(&content.join("\n"), "needle");
        assert_eq!(matches.len(), MAX_MATCHES_PER_SESSION);
        assert_eq!(matches.last().unwrap().line_number, 10);
    }

    #[test]
    fn test_search_content_skips_malformed_lines() {
        let content = format!("{}\nneedle but not json\n{}\n", line("needle a"), line("needle b"));
        let matches = search_content(&content, "needle");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].line_number, 1);
        assert_eq!(matches[1].line_number, 3);
    }

    #[test]
    fn test_line_numbers_ignore_blank_lines() {
        let content = format!("\n\n{}\n   \n{}\n", line("x"), line("needle"));
        let matches = search_content(&content, "needle");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].line_number, 2);
    }

    #[test]
    fn test_matches_against_serialization_not_raw_text() {
        // The raw line has extra whitespace that re-serialization drops
        let content = r#"{"type": "custom",   "customType": "ping"}"#;
        assert_eq!(search_content(content, r#""type":"custom""#).len(), 1);
        assert!(search_content(content, r#""type": "custom""#).is_empty());
    }

    #[test]
    fn test_query_is_not_trimmed() {
        let content = [line("use the tool now"), line("toolbox")].join("\n");
        let matches = search_content(&content, " tool ");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].line_number, 1);
    }

    #[test]
    fn test_snippet_short_line_untouched() {
        let raw = "a".repeat(SNIPPET_MAX_CHARS);
        assert_eq!(make_snippet(&raw), raw);
    }

    #[test]
    fn test_snippet_long_line_truncated() {
        let raw = "b".repeat(SNIPPET_MAX_CHARS + 1);
        let snippet = make_snippet(&raw);
        assert_eq!(snippet.chars().count(), SNIPPET_MAX_CHARS + 3);
        assert!(snippet.ends_with("..."));
    }

    #[test]
    fn test_snippet_multibyte_boundary() {
        let raw = "é".repeat(250);
        let snippet = make_snippet(&raw);
        assert_eq!(snippet.chars().count(), 203);
        assert!(snippet.starts_with("éé"));
    }

    #[test]
    fn test_filter_events() {
        let events: Vec<Event> = [line("alpha"), line("Beta"), line("gamma")]
            .iter()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(filter_events(&events, "").len(), 3);
        assert_eq!(filter_events(&events, "  ").len(), 3);
        let filtered = filter_events(&events, "BETA");
        assert_eq!(filtered.len(), 1);
        assert!(filtered[0].to_json_string().contains("Beta"));
        assert!(filter_events(&events, "delta").is_empty());
    }
}
