pub mod sqlite_dashboard_repo;
pub mod sqlite_event_repo;
pub mod sqlite_probe;

pub mod postgres_dashboard_repo;
pub mod postgres_event_repo;
pub mod postgres_probe;

// Pair every LIKE built from this with `ESCAPE '\'`.
pub(crate) const LIKE_ESCAPE: &str = " ESCAPE '\\'";

/// Lowercased `%text%` pattern in which `\`, `%` and `_` match literally.
pub(crate) fn contains_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for ch in text.to_lowercase().chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
