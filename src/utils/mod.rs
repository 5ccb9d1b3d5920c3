pub mod environment;
pub mod paths;
pub mod terminal;

pub use environment::{DEFAULT_AGENT, SESSIONS_DIR_ENV, get_sessions_dir};
pub use paths::{format_path_with_tilde, list_log_files, session_id_from_path, session_log_path};
