//! Agent Session Explorer - Browse and search agent conversation logs
//!
//! Sessions are stored as one JSONL log per session (`<sessionId>.jsonl`) next to an optional
//! `sessions.json` registry carrying richer metadata for some of them. This library:
//!
//! - Merges the registry with a scan of the log directory into one session list
//! - Reads a full session log as typed events, strictly
//! - Searches every log for a case-insensitive substring, tolerating bad lines
//!
//! # Example
//!
//! ```no_run
//! use agent_session_explorer::SessionStore;
//!
//! let store = SessionStore::new("/home/alice/.openclaw/agents/main/sessions");
//! for session in store.list_sessions()? {
//!     println!("{} {}", session.session_id, session.title());
//! }
//! for result in store.search("toolCall")? {
//!     println!("{}: {} matches", result.session_id, result.match_count);
//! }
//! # Ok::<(), agent_session_explorer::SessionError>(())
//! ```

pub mod cli;
pub mod clipboard;
pub mod error;
pub mod indexer;
pub mod models;
pub mod parsers;
pub mod render;
pub mod search;
pub mod store;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use error::SessionError;
pub use indexer::list_sessions;
pub use models::{Event, EventKind, SearchMatch, SearchResult, SessionRecord};
pub use parsers::read_session_log;
pub use search::search_sessions;
pub use store::SessionStore;
