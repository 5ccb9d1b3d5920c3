use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Environment variable that overrides the sessions directory
pub const SESSIONS_DIR_ENV: &str = "OPENCLAW_SESSIONS_DIR";
/// Agent whose sessions are browsed when none is given
pub const DEFAULT_AGENT: &str = "main";

/// Resolve the sessions directory.
///
/// Precedence: explicit path, then `$OPENCLAW_SESSIONS_DIR`, then
/// `~/.openclaw/agents/<agent>/sessions`.
pub fn get_sessions_dir(explicit: Option<PathBuf>, agent: &str) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }

    if let Some(dir) = env::var_os(SESSIONS_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(default_sessions_dir(home, agent))
}

fn default_sessions_dir(home: PathBuf, agent: &str) -> PathBuf {
    home.join(".openclaw").join("agents").join(agent).join("sessions")
}
