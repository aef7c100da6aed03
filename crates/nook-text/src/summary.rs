//! Title and preview strings derived from a note body.

const ELLIPSIS: char = '…';

/// First non-blank line of `text`, trimmed, or `fallback`.
pub fn build_title(text: &str, fallback: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

/// Whitespace-collapsed text cut to at most `limit` characters.
///
/// A truncated preview ends with an ellipsis, which counts toward `limit`.
pub fn build_preview(text: &str, limit: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= limit {
        return collapsed;
    }
    if limit == 0 {
        return String::new();
    }

    let mut preview: String = collapsed.chars().take(limit.saturating_sub(1)).collect();
    preview.truncate(preview.trim_end().len());
    preview.push(ELLIPSIS);
    preview
}
