// TUI module for interactive session browsing
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;
mod timestamps;

use anyhow::Result;
pub use app::{App, SEARCH_DEBOUNCE_MS};

use self::terminal::TerminalGuard;
use crate::clipboard::SystemClipboard;
use crate::store::SessionStore;

/// Run the interactive TUI
pub fn run_interactive(store: SessionStore) -> Result<()> {
    let mut app = App::new(store, Box::new(SystemClipboard));

    let mut guard = TerminalGuard::enter()?;
    let res = app.run(guard.terminal_mut());
    guard.restore()?;

    res
}
