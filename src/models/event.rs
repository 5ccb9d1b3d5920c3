//! Event taxonomy for session log lines.
//!
//! Every line of a session log is one JSON object tagged by `type`. Known tags map to a
//! [`EventKind`] variant; anything else (or a known tag whose payload has the wrong shape) becomes
//! [`EventKind::Generic`]. The raw JSON value is always kept so that serializing an [`Event`]
//! reproduces the original object, key order included.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::parsers::deserializers::parse_timestamp;

/// Placeholder for absent optional fields
pub const NOT_AVAILABLE: &str = "N/A";
/// Placeholder for an absent role or tool name
pub const UNKNOWN: &str = "unknown";
/// Role that marks a message as a tool result
pub const ROLE_TOOL_RESULT: &str = "toolResult";

const DEFAULT_CUSTOM_TYPE: &str = "Custom Event";

/// One parsed log line
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    kind: EventKind,
    raw: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Message(MessageEvent),
    Session(SessionStart),
    ModelChange(ModelChange),
    ThinkingLevelChange(ThinkingLevelChange),
    Custom(CustomEvent),
    /// Unrecognized tag; the raw value is available through [`Event::raw`]
    Generic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageEvent {
    pub role: Option<String>,
    pub blocks: Vec<ContentBlock>,
    /// `message.content` exactly as logged (array of blocks or plain string)
    pub content: Value,
    pub tool_name: Option<String>,
}

impl MessageEvent {
    pub fn role(&self) -> &str {
        self.role.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn is_tool_result(&self) -> bool {
        self.role.as_deref() == Some(ROLE_TOOL_RESULT)
    }

    pub fn tool_name(&self) -> &str {
        self.tool_name.as_deref().unwrap_or(UNKNOWN)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text {
        #[serde(default)]
        text: String,
    },
    #[serde(rename = "thinking")]
    Thinking {
        #[serde(default)]
        thinking: String,
    },
    #[serde(rename = "toolCall")]
    ToolCall {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        arguments: Value,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SessionStart {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub cwd: Option<String>,
}

impl SessionStart {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn cwd(&self) -> &str {
        self.cwd.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelChange {
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub model_id: Option<String>,
}

impl ModelChange {
    pub fn provider(&self) -> &str {
        self.provider.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    pub fn model_id(&self) -> &str {
        self.model_id.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingLevelChange {
    #[serde(default)]
    pub thinking_level: Option<String>,
}

impl ThinkingLevelChange {
    pub fn level(&self) -> &str {
        self.thinking_level.as_deref().unwrap_or(NOT_AVAILABLE)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomEvent {
    #[serde(default)]
    pub custom_type: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl CustomEvent {
    pub fn custom_type(&self) -> &str {
        self.custom_type.as_deref().filter(|s| !s.is_empty()).unwrap_or(DEFAULT_CUSTOM_TYPE)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageEnvelope {
    #[serde(default)]
    message: Option<MessageBody>,
    #[serde(default)]
    tool_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageBody {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    content: Value,
    #[serde(default)]
    tool_name: Option<String>,
}

impl Event {
    /// Classify a JSON value. Never fails: unexpected shapes fall back to `Generic`.
    pub fn from_value(raw: Value) -> Self {
        let kind = match raw.get("type").and_then(Value::as_str) {
            Some("message") => parse_message(&raw),
            Some("session") => SessionStart::deserialize(&raw).ok().map(EventKind::Session),
            Some("model_change") => ModelChange::deserialize(&raw).ok().map(EventKind::ModelChange),
            Some("thinking_level_change") => {
                ThinkingLevelChange::deserialize(&raw).ok().map(EventKind::ThinkingLevelChange)
            }
            Some("custom") => CustomEvent::deserialize(&raw).ok().map(EventKind::Custom),
            _ => None,
        };

        Self { kind: kind.unwrap_or(EventKind::Generic), raw }
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }

    /// The `type` tag as logged, if any
    pub fn type_tag(&self) -> Option<&str> {
        self.raw.get("type").and_then(Value::as_str)
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.raw.get("timestamp").and_then(parse_timestamp)
    }

    /// Compact JSON serialization of the raw event
    pub fn to_json_string(&self) -> String {
        // Serializing a `Value` cannot fail
        serde_json::to_string(&self.raw).unwrap_or_default()
    }

    /// Case-insensitive substring test against the serialized event.
    /// `needle_lower` must already be lower-cased.
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.to_json_string().to_lowercase().contains(needle_lower)
    }
}

fn parse_message(raw: &Value) -> Option<EventKind> {
    let envelope = MessageEnvelope::deserialize(raw).ok()?;
    let (role, content, inner_tool_name) = match envelope.message {
        Some(body) => (body.role, body.content, body.tool_name),
        None => (None, Value::Null, None),
    };

    let blocks = match &content {
        Value::Array(items) => items
            .iter()
            .map(|item| ContentBlock::deserialize(item).unwrap_or(ContentBlock::Other))
            .collect(),
        Value::String(text) => vec![ContentBlock::Text { text: text.clone() }],
        _ => Vec::new(),
    };

    Some(EventKind::Message(MessageEvent {
        role,
        blocks,
        content,
        tool_name: inner_tool_name.or(envelope.tool_name),
    }))
}

impl From<Value> for Event {
    fn from(value: Value) -> Self {
        Event::from_value(value)
    }
}

impl Serialize for Event {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Event {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Event::from_value)
    }
}
