use chrono::{DateTime, Local};
use serde_json::Value;

use crate::models::{ContentBlock, Event, EventKind, MessageEvent};
use crate::utils::terminal::strip_ansi_codes;

/// Visual category of a card, used for colouring
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAccent {
    /// Message event; carries the role
    Message(String),
    Session,
    ModelChange,
    ThinkingLevel,
    Custom,
    Generic,
}

/// How a body line should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Plain,
    Label,
    Thinking,
    Tool,
    Code,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLine {
    pub style: LineStyle,
    pub text: String,
}

impl CardLine {
    fn new(style: LineStyle, text: impl AsRef<str>) -> Self {
        Self { style, text: strip_ansi_codes(text.as_ref()) }
    }
}

/// Display-ready rendition of one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCard {
    pub accent: CardAccent,
    pub title: String,
    /// Local wall-clock time of the event, if it has a timestamp
    pub time: Option<String>,
    pub body: Vec<CardLine>,
}

impl EventCard {
    pub fn from_event(event: &Event) -> Self {
        let time = event
            .timestamp()
            .map(|ts| DateTime::<Local>::from(ts).format("%H:%M:%S").to_string());

        let (accent, title, body) = match event.kind() {
            EventKind::Message(msg) => {
                let role = msg.role().to_string();
                let body = if msg.is_tool_result() { tool_result_body(msg) } else { message_body(msg) };
                (CardAccent::Message(role.clone()), role, body)
            }
            EventKind::Session(session) => (
                CardAccent::Session,
                "Session Start".to_string(),
                vec![
                    CardLine::new(LineStyle::Plain, format!("ID: {}", session.id())),
                    CardLine::new(LineStyle::Plain, format!("Working Directory: {}", session.cwd())),
                ],
            ),
            EventKind::ModelChange(change) => (
                CardAccent::ModelChange,
                "Model Change".to_string(),
                vec![
                    CardLine::new(LineStyle::Plain, format!("Provider: {}", change.provider())),
                    CardLine::new(LineStyle::Plain, format!("Model: {}", change.model_id())),
                ],
            ),
            EventKind::ThinkingLevelChange(change) => (
                CardAccent::ThinkingLevel,
                "Thinking Level".to_string(),
                vec![CardLine::new(LineStyle::Plain, format!("Level: {}", change.level()))],
            ),
            EventKind::Custom(custom) => {
                (CardAccent::Custom, custom.custom_type().to_string(), json_lines(&custom.data))
            }
            EventKind::Generic => (
                CardAccent::Generic,
                event.type_tag().unwrap_or(crate::models::event::UNKNOWN).to_string(),
                json_lines(event.raw()),
            ),
        };

        Self { accent, title: strip_ansi_codes(&title), time, body }
    }

    /// Plain-text rendition used by the CLI
    pub fn to_plain_text(&self) -> String {
        let mut out = format!("[{}] {}\n", self.time.as_deref().unwrap_or("--:--:--"), self.title);
        for line in &self.body {
            out.push_str("    ");
            out.push_str(&line.text);
            out.push('\n');
        }
        out
    }
}

fn message_body(msg: &MessageEvent) -> Vec<CardLine> {
    let mut body = Vec::new();
    for block in &msg.blocks {
        match block {
            ContentBlock::Text { text } => {
                body.extend(text.lines().map(|l| CardLine::new(LineStyle::Plain, l)));
            }
            ContentBlock::Thinking { thinking } => {
                body.push(CardLine::new(LineStyle::Label, "Thinking:"));
                body.extend(thinking.lines().map(|l| CardLine::new(LineStyle::Thinking, l)));
            }
            ContentBlock::ToolCall { name, arguments, .. } => {
                let name = name.as_deref().unwrap_or(crate::models::event::UNKNOWN);
                body.push(CardLine::new(LineStyle::Tool, format!("Tool: {}", name)));
                body.push(CardLine::new(LineStyle::Label, "Arguments:"));
                body.extend(json_lines(arguments));
            }
            ContentBlock::Other => {}
        }
    }
    body
}

fn tool_result_body(msg: &MessageEvent) -> Vec<CardLine> {
    let mut body = vec![CardLine::new(LineStyle::Tool, format!("Tool Result: {}", msg.tool_name()))];
    match &msg.content {
        Value::String(text) => body.extend(text.lines().map(|l| CardLine::new(LineStyle::Code, l))),
        other => body.extend(json_lines(other)),
    }
    body
}

fn json_lines(value: &Value) -> Vec<CardLine> {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_default();
    pretty.lines().map(|l| CardLine::new(LineStyle::Code, l)).collect()
}
