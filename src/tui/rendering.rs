use chrono::Utc;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use super::app::{DetailView, MessageType, Screen, SessionRow, StatusMessage};
use super::layout::{DetailLayout, SessionsLayout};
use super::timestamps::format_age;
use crate::models::event::ROLE_TOOL_RESULT;
use crate::models::{SessionRecord, SortOrder};
use crate::render::{
    CardAccent, EventCard, LineStyle, format_thousands, format_updated_at, session_badges,
};
use crate::utils::terminal::single_line;

const MUTED: Color = Color::Rgb(113, 113, 122);
const BRIGHT: Color = Color::Rgb(250, 250, 250);
const EMERALD: Color = Color::Rgb(16, 185, 129);
const RED: Color = Color::Rgb(239, 68, 68);
const BAR_BG: Color = Color::Rgb(24, 24, 27);
const BLUE: Color = Color::Rgb(59, 130, 246);
const AMBER: Color = Color::Rgb(245, 158, 11);
const VIOLET: Color = Color::Rgb(139, 92, 246);
const CYAN: Color = Color::Rgb(6, 182, 212);
const PINK: Color = Color::Rgb(236, 72, 153);
const ORANGE: Color = Color::Rgb(249, 115, 22);

/// Everything a frame needs, borrowed from the app
pub struct RenderState<'a> {
    pub screen: &'a Screen,
    /// Rows currently listed, in display order
    pub rows: Vec<SessionRow<'a>>,
    /// A search is active and `rows` are its results
    pub searching: bool,
    pub selected_idx: usize,
    pub search_query: &'a str,
    pub search_pending: bool,
    pub sort_order: SortOrder,
    pub total_count: usize,
    pub load_error: Option<&'a str>,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    match state.screen {
        Screen::Sessions => render_sessions_screen(frame, state),
        Screen::Detail(view) => render_detail_screen(frame, state, view),
    }
}

fn bordered(title: &str) -> Block<'_> {
    Block::default().borders(Borders::ALL).border_style(Style::default().fg(MUTED)).title(title)
}

fn render_sessions_screen(frame: &mut Frame, state: &RenderState) {
    let layout = SessionsLayout::new(frame.area());

    render_search_box(frame, layout.search_area, state);
    render_session_list(frame, layout.list_area, state);
    render_preview(frame, layout.preview_area, state);
    render_status_bar(frame, layout.status_area, state, &sessions_hints(state));
}

fn render_search_box(frame: &mut Frame, area: Rect, state: &RenderState) {
    let mut spans = vec![Span::raw(state.search_query), Span::styled("▏", Style::default().fg(EMERALD))];
    if state.search_pending {
        spans.push(Span::styled("  searching…", Style::default().fg(MUTED)));
    }
    let paragraph = Paragraph::new(Line::from(spans)).block(bordered(" Search sessions "));
    frame.render_widget(paragraph, area);
}

fn render_session_list(frame: &mut Frame, area: Rect, state: &RenderState) {
    let title = format!(" Sessions ({}) ", state.sort_order.label());

    if state.rows.is_empty() {
        let message = if let Some(error) = state.load_error {
            Line::styled(format!("Error loading sessions: {}", error), Style::default().fg(RED))
        } else if state.searching {
            Line::styled("No sessions match the search", Style::default().fg(MUTED))
        } else {
            Line::styled("No sessions found", Style::default().fg(MUTED))
        };
        frame.render_widget(Paragraph::new(message).block(bordered(&title)), area);
        return;
    }

    let now = Utc::now();
    let items: Vec<ListItem> = state
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let mut content = format!(
                "{:>10} | {}",
                format_age(row.record.and_then(|r| r.updated_at), now),
                single_line(row.title(), 60)
            );
            if let Some(result) = row.result {
                let noun = if result.match_count == 1 { "match" } else { "matches" };
                content.push_str(&format!(" ({} {})", result.match_count, noun));
            }

            let style = if idx == state.selected_idx {
                Style::default().fg(BRIGHT).bg(EMERALD).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(MUTED)
            };

            ListItem::new(content).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(bordered(&title)), area);
}

fn label_line(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(MUTED)),
        Span::raw(single_line(&value.into(), 200)),
    ])
}

fn session_metadata_lines(session: &SessionRecord) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled(single_line(session.title(), 200), Style::default().add_modifier(Modifier::BOLD)),
        label_line("Session", session.session_id.as_str()),
        label_line("Key", session.key.as_str()),
        label_line("Updated", format_updated_at(session.updated_at)),
    ];

    let badges = session_badges(session);
    if !badges.is_empty() {
        lines.push(label_line("Tags", badges.join(" · ")));
    }
    if let Some(provider) = &session.provider {
        lines.push(label_line("Provider", provider.as_str()));
    }
    if session.input_tokens.is_some() || session.output_tokens.is_some() {
        let fmt = |t: Option<u64>| t.map(format_thousands).unwrap_or_else(|| "-".to_string());
        lines.push(label_line(
            "Tokens",
            format!("{} in / {} out", fmt(session.input_tokens), fmt(session.output_tokens)),
        ));
    }
    if session.from_file {
        lines.push(Line::styled("Not in registry; read from log file", Style::default().fg(AMBER)));
    }
    lines
}

fn render_preview(frame: &mut Frame, area: Rect, state: &RenderState) {
    let content = match state.rows.get(state.selected_idx) {
        Some(row) => {
            let mut lines = match row.record {
                Some(session) => session_metadata_lines(session),
                None => vec![
                    Line::styled(
                        single_line(row.session_id, 200),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Line::styled("Not listed; the log's first line is unreadable", Style::default().fg(AMBER)),
                ],
            };

            if let Some(result) = row.result {
                lines.push(Line::from(""));
                lines.push(Line::styled("Matches:", Style::default().fg(EMERALD)));
                for m in &result.matches {
                    lines.push(Line::from(vec![
                        Span::styled(format!("#{} ", m.line_number), Style::default().fg(MUTED)),
                        Span::raw(single_line(&m.snippet, 200)),
                    ]));
                }
            }
            Text::from(lines)
        }
        None => Text::from("No session selected"),
    };

    let paragraph = Paragraph::new(content).block(bordered(" Preview ")).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_detail_screen(frame: &mut Frame, state: &RenderState, view: &DetailView) {
    let layout = DetailLayout::new(frame.area());

    let header = match &view.record {
        Some(record) => session_metadata_lines(record).into_iter().take(2).collect::<Vec<_>>(),
        None => vec![label_line("Session", view.session_id.as_str())],
    };
    frame.render_widget(Paragraph::new(header).block(bordered(" Session ")), layout.header_area);

    let filter = Paragraph::new(Line::from(vec![
        Span::raw(view.filter.as_str()),
        Span::styled("▏", Style::default().fg(EMERALD)),
    ]))
    .block(bordered(" Filter events "));
    frame.render_widget(filter, layout.filter_area);

    let title = format!(" Events ({}/{}) ", view.cards.len(), view.events.len());
    let body = if view.cards.is_empty() {
        let text = if view.events.is_empty() { "No events" } else { "No events match the filter" };
        Text::styled(text, Style::default().fg(MUTED))
    } else {
        Text::from(view.cards.iter().flat_map(card_lines).collect::<Vec<_>>())
    };
    let scroll = u16::try_from(view.scroll).unwrap_or(u16::MAX);
    let events = Paragraph::new(body)
        .block(bordered(&title))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(events, layout.events_area);

    render_status_bar(
        frame,
        layout.status_area,
        state,
        "↑↓/PgUp/PgDn: scroll | type: filter | Esc: back | Ctrl+Y: copy id | Ctrl+R: reload",
    );
}

fn accent_color(accent: &CardAccent) -> Color {
    match accent {
        CardAccent::Message(role) if role == "user" => BLUE,
        CardAccent::Message(role) if role == "assistant" => EMERALD,
        CardAccent::Message(role) if role == ROLE_TOOL_RESULT => AMBER,
        CardAccent::Message(_) => BRIGHT,
        CardAccent::Session => VIOLET,
        CardAccent::ModelChange => CYAN,
        CardAccent::ThinkingLevel => PINK,
        CardAccent::Custom => ORANGE,
        CardAccent::Generic => MUTED,
    }
}

fn card_lines(card: &EventCard) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(card.body.len() + 2);
    lines.push(Line::from(vec![
        Span::styled(
            card.title.clone(),
            Style::default().fg(accent_color(&card.accent)).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", card.time.as_deref().unwrap_or("")), Style::default().fg(MUTED)),
    ]));

    for line in &card.body {
        let style = match line.style {
            LineStyle::Plain => Style::default(),
            LineStyle::Label => Style::default().fg(MUTED).add_modifier(Modifier::BOLD),
            LineStyle::Thinking => Style::default().fg(MUTED).add_modifier(Modifier::ITALIC),
            LineStyle::Tool => Style::default().fg(AMBER),
            LineStyle::Code => Style::default().fg(CYAN),
        };
        lines.push(Line::styled(format!("  {}", line.text), style));
    }
    lines.push(Line::from(""));
    lines
}

fn sessions_hints(state: &RenderState) -> String {
    let mut parts = vec![];
    if state.searching {
        parts.push(format!("{} sessions match", state.rows.len()));
    } else {
        parts.push(format!("{} sessions", state.total_count));
    }
    if !state.rows.is_empty() {
        parts.push(format!("{}/{}", state.selected_idx + 1, state.rows.len()));
    }
    parts.push("Enter: open".to_string());
    parts.push(format!("Tab: {}", state.sort_order.toggled().label()));
    if !state.search_query.is_empty() {
        parts.push("Esc: clear".to_string());
    } else {
        parts.push("Esc: quit".to_string());
    }
    parts.push("Ctrl+Y: copy id".to_string());
    parts.push("Ctrl+R: reload".to_string());
    parts.join(" | ")
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState, hints: &str) {
    let (text, fg) = match state.status_message {
        Some(msg) => {
            let fg = match msg.message_type {
                MessageType::Success => EMERALD,
                MessageType::Error => RED,
            };
            (msg.text.clone(), fg)
        }
        None => (hints.to_string(), BRIGHT),
    };

    let paragraph = Paragraph::new(format!(" {} ", text)).style(Style::default().fg(fg).bg(BAR_BG));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use std::fs;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use tempfile::TempDir;

    use super::*;
    use crate::clipboard::tests::MockClipboard;
    use crate::store::SessionStore;
    use crate::tui::app::App;
    use crate::tui::events::Action;

    fn sessions_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("sessions.json"),
            r#"{"agent:main:main":{"sessionId":"abc","updatedAt":1700000000000,"displayName":"Weekly review","channel":"telegram","totalTokens":1500}}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("abc.jsonl"),
            concat!(
                r#"{"type":"session","id":"abc","cwd":"/work"}"#,
                "\n",
                r#"{"type":"message","message":{"role":"assistant","content":[{"type":"text","text":"All done"}]}}"#,
                "\n"
            ),
        )
        .unwrap();
        fs::write(dir.path().join("orphan.jsonl"), r#"{"type":"session","id":"orphan"}"#).unwrap();
        dir
    }

    fn draw(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render_ui(f, &app.render_state())).unwrap();
        terminal.backend().buffer().content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_render_session_list() {
        let dir = sessions_dir();
        let app = App::new(SessionStore::new(dir.path()), Box::new(MockClipboard::default()));

        let screen = draw(&app, 140, 30);

        assert!(screen.contains("Search sessions"));
        assert!(screen.contains("Sessions (newest first)"));
        assert!(screen.contains("Weekly review"));
        assert!(screen.contains("Session orphan..."));
        assert!(screen.contains("2 sessions"));
    }

    #[test]
    fn test_render_preview_shows_metadata() {
        let dir = sessions_dir();
        let mut app = App::new(SessionStore::new(dir.path()), Box::new(MockClipboard::default()));
        // The synthesized session has the newer mtime, so move to the registry one
        app.handle_action(Action::Bottom);

        let screen = draw(&app, 160, 30);

        assert!(screen.contains("Key: agent:main:main"));
        assert!(screen.contains("telegram"));
        assert!(screen.contains("1,500 tokens"));
    }

    #[test]
    fn test_render_empty_directory() {
        let dir = TempDir::new().unwrap();
        let app = App::new(SessionStore::new(dir.path()), Box::new(MockClipboard::default()));

        let screen = draw(&app, 100, 20);

        assert!(screen.contains("No sessions found"));
        assert!(screen.contains("No session selected"));
    }

    #[test]
    fn test_render_load_error() {
        let dir = TempDir::new().unwrap();
        let app = App::new(
            SessionStore::new(dir.path().join("missing")),
            Box::new(MockClipboard::default()),
        );

        let screen = draw(&app, 200, 20);

        assert!(screen.contains("Error loading sessions"));
    }

    #[test]
    fn test_render_detail_cards() {
        let dir = sessions_dir();
        let mut app = App::new(SessionStore::new(dir.path()), Box::new(MockClipboard::default()));
        app.handle_action(Action::Bottom);
        app.handle_action(Action::OpenSession);

        let screen = draw(&app, 120, 30);

        assert!(screen.contains("Events (2/2)"));
        assert!(screen.contains("Session Start"));
        assert!(screen.contains("Working Directory: /work"));
        assert!(screen.contains("assistant"));
        assert!(screen.contains("All done"));
    }

    #[test]
    fn test_render_detail_with_filter_miss() {
        let dir = sessions_dir();
        let mut app = App::new(SessionStore::new(dir.path()), Box::new(MockClipboard::default()));
        app.handle_action(Action::Bottom);
        app.handle_action(Action::OpenSession);
        for c in "nothing-here".chars() {
            app.handle_action(Action::Input(c));
        }

        let screen = draw(&app, 120, 30);

        assert!(screen.contains("Events (0/2)"));
        assert!(screen.contains("No events match the filter"));
    }

    #[test]
    fn test_render_search_hit_without_record() {
        let dir = sessions_dir();
        fs::write(dir.path().join("stray.jsonl"), "\n{\"type\":\"custom\",\"customType\":\"needle\"}\n")
            .unwrap();
        let mut app = App::new(SessionStore::new(dir.path()), Box::new(MockClipboard::default()));
        for c in "needle".chars() {
            app.handle_action(Action::Input(c));
        }
        app.run_pending_search(std::time::Instant::now() + std::time::Duration::from_secs(1));

        let screen = draw(&app, 160, 30);

        assert!(screen.contains("stray (1 match)"));
        assert!(screen.contains("first line is unreadable"));
        assert!(screen.contains("#1 "));
        assert!(screen.contains("1 sessions match"));
    }

    #[test]
    fn test_render_tiny_terminal_does_not_panic() {
        let dir = sessions_dir();
        let app = App::new(SessionStore::new(dir.path()), Box::new(MockClipboard::default()));
        draw(&app, 10, 4);
    }

    #[test]
    fn test_card_lines_layout() {
        let event = serde_json::from_str(r#"{"type":"model_change","provider":"openai","modelId":"gpt"}"#)
            .unwrap();
        let lines = card_lines(&EventCard::from_event(&event));

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1].to_string(), "  Provider: openai");
        assert_eq!(lines[3].to_string(), "");
    }
}
