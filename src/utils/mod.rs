//! Small string helpers shared across the pipeline.

/// Truncate a string to a maximum character count (UTF-8 safe).
///
/// Adds "..." suffix if truncated. Used only for display summaries;
/// analysis always runs over the untruncated text.
#[inline]
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_chars {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max_chars).collect();
    format!("{}...", truncated)
}

/// Round a float to two decimal places.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
