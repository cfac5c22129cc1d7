//! Helpers for building tree hooks

use glob::Pattern;

use crate::path::PathRef;

/// Match a glob pattern against a name.
pub fn glob_match(pattern: &str, name: &str) -> bool {
    Pattern::new(pattern)
        .map(|p| p.matches(name))
        .unwrap_or(false)
}

/// Size of a file in human-readable form, `None` for directories and
/// unreadable entries.
pub fn file_size(path: &PathRef) -> Option<String> {
    let meta = path.raw().metadata().ok()?;
    if meta.is_file() {
        Some(format_size(meta.len()))
    } else {
        None
    }
}

/// Format a size in bytes to human-readable format.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1}G", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1}M", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1}K", bytes as f64 / KB as f64)
    } else {
        format!("{}B", bytes)
    }
}
