use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata for one session as stored in the `sessions.json` registry
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEntry {
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub session_id: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_optional_millis")]
    pub updated_at: Option<i64>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub chat_type: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub channel: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub last_channel: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_string")]
    pub model_provider: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_count")]
    pub total_tokens: Option<u64>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_count")]
    pub input_tokens: Option<u64>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_lenient_count")]
    pub output_tokens: Option<u64>,
    #[serde(default)]
    pub origin: Option<Value>,
}

/// One entry of the merged session list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub key: String,
    pub session_id: String,
    pub updated_at: Option<i64>,
    pub chat_type: Option<String>,
    pub channel: Option<String>,
    pub display_name: Option<String>,
    pub model: Option<String>,
    pub provider: Option<String>,
    pub total_tokens: Option<u64>,
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
    pub origin: Option<Value>,
    pub from_file: bool,
}

impl SessionRecord {
    /// Build a record from a registry entry. `session_id` is the entry's already-validated id.
    pub fn from_registry(key: &str, session_id: &str, entry: &RegistryEntry) -> Self {
        Self {
            key: key.to_string(),
            session_id: session_id.to_string(),
            updated_at: entry.updated_at,
            chat_type: entry.chat_type.clone(),
            channel: entry.channel.clone().or_else(|| entry.last_channel.clone()),
            display_name: entry.display_name.clone(),
            model: entry.model.clone(),
            provider: entry.model_provider.clone(),
            total_tokens: entry.total_tokens,
            input_tokens: entry.input_tokens,
            output_tokens: entry.output_tokens,
            origin: entry.origin.clone(),
            from_file: false,
        }
    }

    /// Name shown to the operator: display name, then registry key, then a placeholder
    pub fn title(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(Some(self.key.as_str()).filter(|s| !s.is_empty()))
            .unwrap_or("Untitled Session")
    }
}

/// Display ordering for the session list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::NewestFirst => SortOrder::OldestFirst,
            SortOrder::OldestFirst => SortOrder::NewestFirst,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::NewestFirst => "newest first",
            SortOrder::OldestFirst => "oldest first",
        }
    }
}

/// Sort sessions by `updatedAt`. Records without a timestamp count as the oldest.
/// The sort is stable, so ties keep their merge order.
pub fn sort_sessions(sessions: &mut [SessionRecord], order: SortOrder) {
    let key = |s: &SessionRecord| s.updated_at.unwrap_or(i64::MIN);
    match order {
        SortOrder::NewestFirst => sessions.sort_by(|a, b| key(b).cmp(&key(a))),
        SortOrder::OldestFirst => sessions.sort_by_key(key),
    }
}
