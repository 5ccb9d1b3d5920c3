//! TUI application state and event handling.
//!
//! Two screens share one [`App`]:
//!
//! - **Sessions**: the merged session list with a search box. Typing schedules a content search
//!   that runs once input has been idle for [`SEARCH_DEBOUNCE_MS`]; while a search is active
//!   the list shows its results in scan order, including hits in logs the listing skipped.
//! - **Detail**: one session's events as cards, narrowed by a case-insensitive event filter.
//!
//! The event loop redraws only when state changed (or every 100ms to pick up resizes).

use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tracing::debug;

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::clipboard::{ClipboardProvider, copy_session_id};
use crate::models::{Event, SearchResult, SessionRecord, SortOrder, sort_sessions};
use crate::render::EventCard;
use crate::search::filter_events;
use crate::store::SessionStore;

/// Idle time after the last keystroke before a search runs
pub const SEARCH_DEBOUNCE_MS: u64 = 300;
/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
const MAX_INPUT_LEN: usize = 256;
const PAGE_SIZE: isize = 10;

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

/// One opened session
pub struct DetailView {
    pub session_id: String,
    pub record: Option<SessionRecord>,
    pub events: Vec<Event>,
    pub filter: String,
    /// Cards for the events passing `filter`
    pub cards: Vec<EventCard>,
    pub scroll: usize,
}

impl DetailView {
    fn new(session_id: String, record: Option<SessionRecord>, events: Vec<Event>) -> Self {
        let mut view =
            Self { session_id, record, events, filter: String::new(), cards: Vec::new(), scroll: 0 };
        view.refilter();
        view
    }

    fn refilter(&mut self) {
        self.cards =
            filter_events(&self.events, &self.filter).into_iter().map(EventCard::from_event).collect();
        self.scroll = 0;
    }

    /// Rendered height of all cards: title, body, blank separator
    pub fn line_count(&self) -> usize {
        self.cards.iter().map(|c| c.body.len() + 2).sum()
    }

    fn scroll_by(&mut self, delta: isize) {
        let max = self.line_count().saturating_sub(1);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }
}

pub enum Screen {
    Sessions,
    Detail(Box<DetailView>),
}

/// One row of the sessions screen
#[derive(Clone, Copy)]
pub struct SessionRow<'a> {
    pub session_id: &'a str,
    /// Missing for a search hit in a log the listing could not synthesize
    pub record: Option<&'a SessionRecord>,
    pub result: Option<&'a SearchResult>,
}

impl SessionRow<'_> {
    pub fn title(&self) -> &str {
        self.record.map_or(self.session_id, |r| r.title())
    }
}

pub struct App {
    store: SessionStore,
    clipboard: Box<dyn ClipboardProvider>,
    /// All sessions, kept sorted by `sort_order`
    sessions: Vec<SessionRecord>,
    sort_order: SortOrder,
    load_error: Option<String>,
    search_query: String,
    search_deadline: Option<Instant>,
    /// Results of the last search in scan order; `None` when no search is active
    search_results: Option<Vec<SearchResult>>,
    /// Position of each session id in `sessions`
    session_index: HashMap<String, usize>,
    selected_idx: usize,
    screen: Screen,
    should_quit: bool,
    status_message: Option<StatusMessage>,
    // Dirty state tracking for efficient rendering
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(store: SessionStore, clipboard: Box<dyn ClipboardProvider>) -> Self {
        let mut app = Self {
            store,
            clipboard,
            sessions: Vec::new(),
            sort_order: SortOrder::default(),
            load_error: None,
            search_query: String::new(),
            search_deadline: None,
            search_results: None,
            session_index: HashMap::new(),
            selected_idx: 0,
            screen: Screen::Sessions,
            should_quit: false,
            status_message: None,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        };
        app.load_sessions();
        app
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    fn set_error(&mut self, text: impl Into<String>) {
        self.set_status(format!("✗ {}", text.into()), MessageType::Error, STATUS_ERROR_DURATION_MS);
    }

    fn set_success(&mut self, text: impl Into<String>) {
        self.set_status(format!("✓ {}", text.into()), MessageType::Success, STATUS_SUCCESS_DURATION_MS);
    }

    /// Check and clear expired status messages
    fn check_and_clear_expired_status(&mut self) {
        if self.status_message.as_ref().is_some_and(|msg| Instant::now() >= msg.expires_at) {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            self.check_and_clear_expired_status();
            self.run_pending_search(Instant::now());

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            let now = Instant::now();
            if self.needs_redraw || now.duration_since(self.last_draw_time) >= Duration::from_millis(100)
            {
                terminal.draw(|f| render_ui(f, &self.render_state()))?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(50))?;
            self.handle_action(action);
        }

        Ok(())
    }

    pub(super) fn render_state(&self) -> RenderState<'_> {
        RenderState {
            screen: &self.screen,
            rows: self.rows(),
            searching: self.search_results.is_some(),
            selected_idx: self.selected_idx,
            search_query: &self.search_query,
            search_pending: self.search_deadline.is_some(),
            sort_order: self.sort_order,
            total_count: self.sessions.len(),
            load_error: self.load_error.as_deref(),
            status_message: self.status_message.as_ref(),
        }
    }

    pub(super) fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Back => self.back(),
            Action::MoveUp => self.move_selection(-1),
            Action::MoveDown => self.move_selection(1),
            Action::PageUp => self.move_selection(-PAGE_SIZE),
            Action::PageDown => self.move_selection(PAGE_SIZE),
            Action::Top => self.move_selection(isize::MIN / 2),
            Action::Bottom => self.move_selection(isize::MAX / 2),
            Action::OpenSession => {
                if matches!(self.screen, Screen::Sessions) {
                    self.open_selected();
                }
            }
            Action::CopySessionId => self.copy_current_session_id(),
            Action::ToggleSort => {
                if matches!(self.screen, Screen::Sessions) {
                    self.toggle_sort();
                }
            }
            Action::Refresh => self.refresh(),
            Action::Input(c) => self.push_input(c),
            Action::DeleteChar => self.delete_char(),
            Action::None => {}
        }
    }

    fn back(&mut self) {
        let mut leave_detail = false;
        match &mut self.screen {
            Screen::Detail(view) => {
                if view.filter.is_empty() {
                    leave_detail = true;
                } else {
                    view.filter.clear();
                    view.refilter();
                }
            }
            Screen::Sessions => {
                if self.search_query.is_empty() {
                    self.should_quit = true;
                } else {
                    self.search_query.clear();
                    self.search_deadline = None;
                    self.search_results = None;
                    self.recompute_rows();
                }
            }
        }
        if leave_detail {
            self.screen = Screen::Sessions;
        }
        self.needs_redraw = true;
    }

    fn move_selection(&mut self, delta: isize) {
        match &mut self.screen {
            Screen::Detail(view) => view.scroll_by(delta),
            Screen::Sessions => {
                let total = self.row_count();
                if total == 0 {
                    self.selected_idx = 0;
                    return;
                }
                self.selected_idx = self.selected_idx.saturating_add_signed(delta).min(total - 1);
            }
        }
        self.needs_redraw = true;
    }

    fn push_input(&mut self, c: char) {
        match &mut self.screen {
            Screen::Detail(view) => {
                if view.filter.len() < MAX_INPUT_LEN {
                    view.filter.push(c);
                    view.refilter();
                }
            }
            Screen::Sessions => {
                if self.search_query.len() < MAX_INPUT_LEN {
                    self.search_query.push(c);
                    self.schedule_search();
                }
            }
        }
        self.needs_redraw = true;
    }

    fn delete_char(&mut self) {
        match &mut self.screen {
            Screen::Detail(view) => {
                if view.filter.pop().is_some() {
                    view.refilter();
                }
            }
            Screen::Sessions => {
                if self.search_query.pop().is_some() {
                    self.schedule_search();
                }
            }
        }
        self.needs_redraw = true;
    }

    fn schedule_search(&mut self) {
        self.search_deadline = Some(Instant::now() + Duration::from_millis(SEARCH_DEBOUNCE_MS));
    }

    /// Run the scheduled search once its debounce deadline has passed
    pub(super) fn run_pending_search(&mut self, now: Instant) {
        if self.search_deadline.is_some_and(|deadline| now >= deadline) {
            self.search_deadline = None;
            self.run_search();
        }
    }

    fn run_search(&mut self) {
        if self.search_query.trim().is_empty() {
            self.search_results = None;
            self.recompute_rows();
            return;
        }

        match self.store.search(&self.search_query) {
            Ok(results) => {
                debug!("search {:?}: {} sessions", self.search_query, results.len());
                self.search_results = Some(results);
            }
            Err(e) => {
                self.search_results = Some(Vec::new());
                self.set_error(format!("Search failed: {}", e));
            }
        }
        self.recompute_rows();
    }

    fn load_sessions(&mut self) {
        match self.store.list_sessions() {
            Ok(mut sessions) => {
                sort_sessions(&mut sessions, self.sort_order);
                self.sessions = sessions;
                self.load_error = None;
            }
            Err(e) => {
                self.sessions.clear();
                self.load_error = Some(e.to_string());
            }
        }
        self.recompute_rows();
    }

    /// Rebuild the id lookup after `sessions` changed and clamp the selection
    fn recompute_rows(&mut self) {
        self.session_index =
            self.sessions.iter().enumerate().map(|(i, s)| (s.session_id.clone(), i)).collect();
        self.selected_idx = self.selected_idx.min(self.row_count().saturating_sub(1));
        self.needs_redraw = true;
    }

    fn row_count(&self) -> usize {
        self.search_results.as_ref().map_or(self.sessions.len(), Vec::len)
    }

    /// Listed rows: every session in sort order, or the search results in scan order
    fn rows(&self) -> Vec<SessionRow<'_>> {
        match &self.search_results {
            None => self
                .sessions
                .iter()
                .map(|s| SessionRow { session_id: &s.session_id, record: Some(s), result: None })
                .collect(),
            Some(results) => results
                .iter()
                .map(|r| SessionRow {
                    session_id: &r.session_id,
                    record: self.session_index.get(&r.session_id).map(|&i| &self.sessions[i]),
                    result: Some(r),
                })
                .collect(),
        }
    }

    fn selected_row(&self) -> Option<SessionRow<'_>> {
        self.rows().get(self.selected_idx).copied()
    }

    fn toggle_sort(&mut self) {
        let selected_id = self.selected_row().map(|r| r.session_id.to_string());
        self.sort_order = self.sort_order.toggled();
        sort_sessions(&mut self.sessions, self.sort_order);
        self.recompute_rows();
        let position = selected_id.and_then(|id| self.rows().iter().position(|r| r.session_id == id));
        if let Some(pos) = position {
            self.selected_idx = pos;
        }
        self.set_success(format!("Sorted {}", self.sort_order.label()));
    }

    fn open_selected(&mut self) {
        let Some((session_id, record)) =
            self.selected_row().map(|r| (r.session_id.to_string(), r.record.cloned()))
        else {
            self.set_error("No session selected");
            return;
        };
        match self.store.get_session(&session_id) {
            Ok(events) => {
                let view = DetailView::new(session_id, record, events);
                self.screen = Screen::Detail(Box::new(view));
                self.needs_redraw = true;
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    fn copy_current_session_id(&mut self) {
        let session_id = match &self.screen {
            Screen::Detail(view) => Some(view.session_id.clone()),
            Screen::Sessions => self.selected_row().map(|r| r.session_id.to_string()),
        };
        let Some(session_id) = session_id else {
            self.set_error("No session to copy");
            return;
        };
        match copy_session_id(&session_id, self.clipboard.as_mut()) {
            Ok(()) => self.set_success(format!("Copied {}", session_id)),
            Err(e) => self.set_error(format!("Clipboard error: {}", e)),
        }
    }

    /// Re-read the disk: the session list (re-running an active search) or the open session
    fn refresh(&mut self) {
        if let Screen::Detail(view) = &mut self.screen {
            match self.store.get_session(&view.session_id) {
                Ok(events) => {
                    view.events = events;
                    view.refilter();
                    let count = view.events.len();
                    self.set_success(format!("Reloaded {} events", count));
                }
                Err(e) => self.set_error(e.to_string()),
            }
            return;
        }

        self.load_sessions();
        if self.search_results.is_some() {
            self.run_search();
        }
        match &self.load_error {
            Some(e) => self.set_error(format!("Error loading sessions: {}", e)),
            None => self.set_success(format!("Reloaded {} sessions", self.sessions.len())),
        }
    }
}
