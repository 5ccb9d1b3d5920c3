use anyhow::{Context, Result};
use arboard::Clipboard;

/// Anything the TUI can put text on. The system clipboard in practice, a recorder in tests.
pub trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard via arboard. The handle is opened per copy so a headless session only
/// fails when the operator actually asks for a copy.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

/// Session ids are copied verbatim; reject values that could not be pasted back as an id.
fn validate_session_id(session_id: &str) -> Result<()> {
    if session_id.is_empty() {
        anyhow::bail!("Cannot copy an empty session id");
    }
    if session_id.chars().any(char::is_control) {
        anyhow::bail!("Session id contains control characters");
    }
    Ok(())
}

/// Copy a session id to `provider`.
pub fn copy_session_id(session_id: &str, provider: &mut dyn ClipboardProvider) -> Result<()> {
    validate_session_id(session_id)?;
    provider.set_text(session_id)
}
