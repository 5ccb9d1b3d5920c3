//! Data models for session logs and the session registry.
//!
//! - [`SessionRecord`] - One row of the merged session list (registry or synthesized)
//! - [`RegistryEntry`] - Raw metadata object from `sessions.json`
//! - [`Event`] - One parsed log line, classified by its `type` tag
//! - [`SearchResult`] / [`SearchMatch`] - Per-session substring search hits
//!
//! Timestamps in the registry and in log lines go through the lenient helpers in
//! `parsers::deserializers`.

pub mod event;
pub mod search;
pub mod session;

pub use event::{
    ContentBlock, CustomEvent, Event, EventKind, MessageEvent, ModelChange, SessionStart,
    ThinkingLevelChange,
};
pub use search::{SearchMatch, SearchResult};
pub use session::{RegistryEntry, SessionRecord, SortOrder, sort_sessions};
