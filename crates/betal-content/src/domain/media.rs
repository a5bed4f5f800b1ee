//! Media path normalization.

/// Normalizes a local media path produced by the content generator.
///
/// Backslashes become `/`, repeated slashes collapse, anything before the
/// first `/generated_content` is dropped, and the result always starts with
/// `/`. Absolute URLs (`scheme://...`) pass through untouched. Blank input
/// yields `None`.
#[must_use]
pub fn normalize_media_path(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.contains("://") {
        return Some(raw.to_owned());
    }

    let mut path = String::with_capacity(raw.len() + 1);
    for ch in raw.chars() {
        let ch = if ch == '\\' { '/' } else { ch };
        if ch == '/' && path.ends_with('/') {
            continue;
        }
        path.push(ch);
    }

    if let Some(idx) = path.find("/generated_content") {
        path.replace_range(..idx, "");
    }
    if !path.starts_with('/') {
        path.insert(0, '/');
    }
    Some(path)
}
