//! Session discovery: registry + directory scan, merged into one list
//!
//! The registry (`sessions.json`) describes some sessions in detail; the directory holds one
//! `<id>.jsonl` log per session. [`list_sessions`] reconciles the two, synthesizing a minimal
//! record (see [`synthesize_record`]) for every log the registry does not know about.
//!
//! Nothing is cached: every call re-reads the registry and re-lists the directory.

pub mod merger;
pub mod scanner;

pub use merger::list_sessions;
pub use scanner::{synthesize_record, synthesized_display_name};
