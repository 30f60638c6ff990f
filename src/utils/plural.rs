//! Pluralization for log lines.

/// Plural form of an English noun (`page` -> `pages`, `entry` -> `entries`).
fn plural_of(noun: &str) -> String {
    match noun.strip_suffix('y') {
        Some(stem) if !stem.ends_with(['a', 'e', 'o', 'u']) => format!("{stem}ies"),
        _ => format!("{noun}s"),
    }
}

/// Format count with noun, handling pluralization
///
/// - `plural_count(0, "page")` -> `"0 pages"`
/// - `plural_count(1, "block")` -> `"1 block"`
/// - `plural_count(3, "entry")` -> `"3 entries"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{} {}", count, plural_of(noun))
    }
}
