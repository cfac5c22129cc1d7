//! JSON output formatting

use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::path::PathRef;
use crate::tree::relative_depth;

/// One walked entry in JSON listings.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonEntry {
    pub path: String,
    pub depth: usize,
    pub is_dir: bool,
}

impl JsonEntry {
    pub fn new(root: &Path, entry: &PathRef) -> Self {
        Self {
            path: entry.raw().to_string_lossy().to_string(),
            depth: relative_depth(root, entry.raw()),
            is_dir: entry.raw().is_dir(),
        }
    }
}

/// Print entries as pretty-printed JSON to stdout.
pub fn print_json(entries: &[JsonEntry]) -> Result<()> {
    let json = serde_json::to_string_pretty(entries)?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_serialization() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("a.txt");
        std::fs::write(&file, "").unwrap();

        let entry = JsonEntry::new(dir.path(), &PathRef::new(&file));
        assert_eq!(entry.depth, 1);
        assert!(!entry.is_dir);

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["depth"], 1);
        assert_eq!(value["is_dir"], false);
        assert!(value["path"].as_str().unwrap().ends_with("a.txt"));
    }
}
