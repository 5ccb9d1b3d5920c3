//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for a sessions directory: `sessions.json` plus `<id>.jsonl` logs
pub struct SessionsDirBuilder {
    temp_dir: TempDir,
}

impl SessionsDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `sessions.json` verbatim
    pub fn with_registry(self, content: &str) -> Self {
        self.with_file("sessions.json", content)
    }

    /// Write `sessions.json` from `(key, entry)` pairs, keeping their order
    pub fn with_registry_entries(self, entries: &[(&str, RegistryEntryBuilder)]) -> Self {
        let body = entries
            .iter()
            .map(|(key, entry)| format!("{}:{}", json!(key), entry.to_json()))
            .collect::<Vec<_>>()
            .join(",");
        self.with_registry(&format!("{{{}}}", body))
    }

    /// Write `<session_id>.jsonl` with one event per line
    pub fn with_log(self, session_id: &str, events: &[EventBuilder]) -> Self {
        let content: String = events.iter().map(|e| format!("{}\n", e.to_json())).collect();
        self.with_file(&format!("{}.jsonl", session_id), &content)
    }

    /// Write any file in the directory verbatim
    pub fn with_file(self, name: &str, content: &str) -> Self {
        fs::write(self.temp_dir.path().join(name), content).expect("Failed to write file");
        self
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for SessionsDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one registry object
#[derive(Clone)]
pub struct RegistryEntryBuilder {
    fields: serde_json::Map<String, Value>,
}

impl RegistryEntryBuilder {
    pub fn new(session_id: &str) -> Self {
        let mut fields = serde_json::Map::new();
        fields.insert("sessionId".into(), json!(session_id));
        Self { fields }
    }

    /// An entry that lacks `sessionId`
    pub fn without_id() -> Self {
        Self { fields: serde_json::Map::new() }
    }

    pub fn updated_at(self, ms: i64) -> Self {
        self.field("updatedAt", json!(ms))
    }

    pub fn display_name(self, name: &str) -> Self {
        self.field("displayName", json!(name))
    }

    pub fn field(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn to_json(&self) -> String {
        Value::Object(self.fields.clone()).to_string()
    }
}

/// Builder for one log line
#[derive(Clone)]
pub struct EventBuilder {
    value: Value,
}

impl EventBuilder {
    pub fn session(id: &str, cwd: &str) -> Self {
        Self { value: json!({"type": "session", "id": id, "cwd": cwd}) }
    }

    pub fn user(text: &str) -> Self {
        Self::message("user", json!([{"type": "text", "text": text}]))
    }

    pub fn assistant(text: &str) -> Self {
        Self::message("assistant", json!([{"type": "text", "text": text}]))
    }

    pub fn tool_call(name: &str, arguments: Value) -> Self {
        Self::message(
            "assistant",
            json!([{"type": "toolCall", "id": "call_1", "name": name, "arguments": arguments}]),
        )
    }

    pub fn tool_result(tool_name: &str, content: Value) -> Self {
        Self {
            value: json!({
                "type": "message",
                "message": {"role": "toolResult", "toolName": tool_name, "content": content}
            }),
        }
    }

    pub fn model_change(provider: &str, model_id: &str) -> Self {
        Self { value: json!({"type": "model_change", "provider": provider, "modelId": model_id}) }
    }

    pub fn custom(custom_type: &str, data: Value) -> Self {
        Self { value: json!({"type": "custom", "customType": custom_type, "data": data}) }
    }

    pub fn raw(value: Value) -> Self {
        Self { value }
    }

    fn message(role: &str, content: Value) -> Self {
        Self { value: json!({"type": "message", "message": {"role": role, "content": content}}) }
    }

    /// Set `timestamp` to an RFC3339 string
    pub fn at(mut self, timestamp: &str) -> Self {
        self.value["timestamp"] = json!(timestamp);
        self
    }

    pub fn to_json(&self) -> String {
        self.value.to_string()
    }
}

/// A directory resembling a real agent: two registry sessions and one unregistered log
pub fn realistic_sessions_dir() -> TempDir {
    SessionsDirBuilder::new()
        .with_registry_entries(&[
            (
                "agent:main:main",
                RegistryEntryBuilder::new("a1b2c3d4-0000-4000-8000-000000000001")
                    .updated_at(1_736_935_200_000)
                    .display_name("Main chat")
                    .field("chatType", json!("direct"))
                    .field("lastChannel", json!("telegram"))
                    .field("model", json!("claude-sonnet"))
                    .field("modelProvider", json!("anthropic"))
                    .field("totalTokens", json!(5120)),
            ),
            (
                "agent:main:cron:daily",
                RegistryEntryBuilder::new("b2c3d4e5-0000-4000-8000-000000000002")
                    .updated_at(1_736_848_800_000)
                    .display_name("Daily digest"),
            ),
        ])
        .with_log(
            "a1b2c3d4-0000-4000-8000-000000000001",
            &[
                EventBuilder::session("a1b2c3d4-0000-4000-8000-000000000001", "/home/dev")
                    .at("2025-01-15T10:00:00Z"),
                EventBuilder::model_change("anthropic", "claude-sonnet").at("2025-01-15T10:00:01Z"),
                EventBuilder::user("Check the deploy logs").at("2025-01-15T10:00:02Z"),
                EventBuilder::tool_call("exec", json!({"command": "tail -n 50 deploy.log"}))
                    .at("2025-01-15T10:00:03Z"),
                EventBuilder::tool_result("exec", json!("deploy finished OK"))
                    .at("2025-01-15T10:00:04Z"),
                EventBuilder::assistant("The deploy succeeded.").at("2025-01-15T10:00:05Z"),
            ],
        )
        .with_log(
            "b2c3d4e5-0000-4000-8000-000000000002",
            &[EventBuilder::user("Summarize today's news").at("2025-01-14T10:00:00Z")],
        )
        .with_log(
            "c3d4e5f6-0000-4000-8000-000000000003",
            &[
                EventBuilder::session("c3d4e5f6-0000-4000-8000-000000000003", "/tmp")
                    .at("2025-01-16T08:00:00Z"),
                EventBuilder::custom("usage", json!({"tokens": 42})),
            ],
        )
        .build()
}
