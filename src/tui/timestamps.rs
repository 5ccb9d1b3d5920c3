use chrono::{DateTime, Datelike, Utc};

/// Age of a session's `updatedAt` (epoch ms) for the list view:
/// relative under a week ("2h ago"), otherwise a date ("Jan 15", "Dec 3, 2024").
pub fn format_age(updated_at: Option<i64>, now: DateTime<Utc>) -> String {
    let Some(timestamp) = updated_at.and_then(DateTime::from_timestamp_millis) else {
        return "unknown".to_string();
    };

    let elapsed = now.signed_duration_since(timestamp);
    if elapsed.num_seconds() < 0 {
        return "just now".to_string();
    }

    let days = elapsed.num_days();
    if days >= 7 {
        return if timestamp.year() == now.year() {
            timestamp.format("%b %-d").to_string()
        } else {
            timestamp.format("%b %-d, %Y").to_string()
        };
    }

    let hours = elapsed.num_hours();
    let minutes = elapsed.num_minutes();
    if days > 0 {
        format!("{}d ago", days)
    } else if hours > 0 {
        format!("{}h ago", hours)
    } else if minutes > 0 {
        format!("{}m ago", minutes)
    } else {
        "just now".to_string()
    }
}
