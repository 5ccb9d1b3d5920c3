//! Terminal output sanitization utilities
//!
//! Log lines are written by agents and tools and may carry escape sequences. Anything taken from
//! a log or the registry goes through [`strip_ansi_codes`] (or [`single_line`]) before it reaches
//! the terminal, in both the CLI and the TUI.

/// Strips ANSI escape sequences and control characters from a string
///
/// Removes CSI sequences (`ESC [ ... letter`), OSC sequences (`ESC ] ... BEL` or `ESC ] ... ESC \`)
/// and any other control character except tab, newline and carriage return.
///
/// # Examples
///
/// ```
/// use agent_session_explorer::utils::terminal::strip_ansi_codes;
///
/// let text = "\x1b[31mRed text\x1b[0m";
/// assert_eq!(strip_ansi_codes(text), "Red text");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            match chars.peek() {
                Some('[') => {
                    chars.next();
                    for next_ch in chars.by_ref() {
                        if next_ch.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    while let Some(next_ch) = chars.next() {
                        if next_ch == '\x07' {
                            break;
                        }
                        if next_ch == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }

        if ch.is_control() && ch != '\t' && ch != '\n' && ch != '\r' {
            continue;
        }

        result.push(ch);
    }

    result
}

/// Sanitize and flatten text for a one-row display, truncated to `max_chars` characters.
///
/// Line breaks and tabs become spaces; an ellipsis marks truncation.
pub fn single_line(text: &str, max_chars: usize) -> String {
    let cleaned: String = strip_ansi_codes(text)
        .chars()
        .map(|c| if c == '\n' || c == '\r' || c == '\t' { ' ' } else { c })
        .collect();

    if cleaned.chars().count() <= max_chars {
        return cleaned;
    }
    let mut truncated: String = cleaned.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}
