use serde::{Deserialize, Serialize};

use crate::models::Event;

/// One matching line inside a session log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
    /// 1-based position among the log's non-blank lines
    pub line_number: usize,
    pub event: Event,
    pub snippet: String,
}

/// Matches found in one session, capped per session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub session_id: String,
    /// Number of matches returned, never more than the per-session cap
    pub match_count: usize,
    pub matches: Vec<SearchMatch>,
}

impl SearchResult {
    pub fn new(session_id: impl Into<String>, matches: Vec<SearchMatch>) -> Self {
        Self { session_id: session_id.into(), match_count: matches.len(), matches }
    }
}
