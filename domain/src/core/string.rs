//! String utilities for the domain layer.

/// Single-line preview of free text for log lines and status displays.
///
/// Collapses all whitespace runs (including newlines) into single spaces and
/// keeps at most `max_chars` characters, appending `...` when cut.
pub fn preview(s: &str, max_chars: usize) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let kept: String = collapsed.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}
