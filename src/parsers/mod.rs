//! Readers for the session registry and session log files
//!
//! # Error Handling Strategy
//!
//! The two sources get deliberately different tolerance:
//!
//! - **Registry** (`sessions.json`): optional. A missing or corrupt registry is logged with
//!   `tracing::warn!` and treated as empty; the session list then comes from the log scan alone.
//!
//! - **Session logs** (`<id>.jsonl`): a full read through [`read_session_log`] fails on the first
//!   unparsable line with `SessionError::Malformed`. The search engine does not go through this
//!   reader because it forgives bad lines one at a time.

pub mod deserializers;
pub mod log;
pub mod registry;

pub use log::{parse_log_file, read_session_log};
pub use registry::{load_registry, read_registry};
