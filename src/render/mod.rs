//! Presentation helpers shared by the CLI and the TUI.
//!
//! Turns events into [`EventCard`]s and session metadata into display strings. All text taken
//! from logs or the registry is sanitized here.

pub mod cards;
pub mod sessions;

pub use cards::{CardAccent, CardLine, EventCard, LineStyle};
pub use sessions::{format_thousands, format_updated_at, session_badges};
