//! Substring search over raw session logs.
//!
//! Search reads files directly instead of going through `parsers::read_session_log`: it has to
//! forgive unparsable lines one at a time, while a full read fails on the first one. There is no
//! index; every query scans every log.

pub mod engine;

pub use engine::{
    MAX_MATCHES_PER_SESSION, SNIPPET_MAX_CHARS, filter_events, make_snippet, search_content,
    search_sessions,
};
