use chrono::{DateTime, Local};

use crate::models::SessionRecord;
use crate::utils::terminal::single_line;

const UNKNOWN_CHAT_TYPE: &str = "unknown";

/// Local date-time for an epoch-millisecond value
pub fn format_updated_at(updated_at: Option<i64>) -> String {
    updated_at
        .and_then(DateTime::from_timestamp_millis)
        .map(|ts| DateTime::<Local>::from(ts).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown date".to_string())
}

/// `1234567` -> `1,234,567`
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Short metadata tags shown next to a session: channel, chat type, model, token total
pub fn session_badges(session: &SessionRecord) -> Vec<String> {
    let mut badges = Vec::new();
    if let Some(channel) = session.channel.as_deref().filter(|c| !c.is_empty()) {
        badges.push(single_line(channel, 40));
    }
    if let Some(chat_type) =
        session.chat_type.as_deref().filter(|c| !c.is_empty() && *c != UNKNOWN_CHAT_TYPE)
    {
        badges.push(single_line(chat_type, 40));
    }
    if let Some(model) = session.model.as_deref().filter(|m| !m.is_empty()) {
        badges.push(single_line(model, 60));
    }
    if let Some(tokens) = session.total_tokens.filter(|t| *t > 0) {
        badges.push(format!("{} tokens", format_thousands(tokens)));
    }
    badges
}
