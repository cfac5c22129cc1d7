//! Breadth-first directory walk

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::path::{PathRef, expand_tilde};

/// Lazy breadth-first walk over a directory subtree.
///
/// Every entry at depth `d` is yielded before any entry at depth `d + 1`.
/// A directory's children are listed only when the walk is resumed after the
/// directory itself was yielded, so dropping the iterator early leaves the
/// rest of the tree untouched. Sibling order is whatever the filesystem
/// reports. Symlinked directories are followed and cycles are not detected.
#[derive(Debug)]
pub struct BfsWalk {
    root: PathBuf,
    queue: VecDeque<PathRef>,
    pending: Option<PathRef>,
}

impl BfsWalk {
    pub fn new(root: &str) -> Self {
        let root = expand_tilde(root);
        let mut queue = VecDeque::new();
        queue.push_back(PathRef::new(root.clone()));
        Self {
            root,
            queue,
            pending: None,
        }
    }

    /// The seed path after `~` expansion.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Depth of an entry produced by this walk. The root has depth 0.
    pub fn depth_of(&self, entry: &PathRef) -> usize {
        relative_depth(&self.root, entry.raw())
    }
}

impl Iterator for BfsWalk {
    type Item = PathRef;

    fn next(&mut self) -> Option<PathRef> {
        if let Some(dir) = self.pending.take() {
            self.queue.extend(read_children(&dir));
        }

        let entry = self.queue.pop_front()?;
        if entry.raw().is_dir() {
            self.pending = Some(entry.clone());
        }
        Some(entry)
    }
}

/// Walk `root` breadth-first. See [`BfsWalk`].
pub fn bfs_walk(root: &str) -> BfsWalk {
    BfsWalk::new(root)
}

/// Collect every walked path accepted by `filter` (all of them when `None`).
pub fn get_paths(root: &str, filter: Option<&dyn Fn(&PathRef) -> bool>) -> Vec<PathRef> {
    bfs_walk(root)
        .filter(|path| filter.is_none_or(|f| f(path)))
        .collect()
}

/// Number of path segments of `path` below `root`.
pub fn relative_depth(root: &Path, path: &Path) -> usize {
    path.strip_prefix(root)
        .map(|rel| rel.components().count())
        .unwrap_or(0)
}

/// Direct children of a directory in listing order.
/// Unreadable directories and entries are skipped.
pub(crate) fn read_children(dir: &PathRef) -> Vec<PathRef> {
    let entries = match std::fs::read_dir(dir.raw()) {
        Ok(e) => e,
        Err(e) => {
            debug!("cannot list {}: {}", dir.raw().display(), e);
            return Vec::new();
        }
    };

    entries
        .filter_map(|e| e.ok())
        .map(|e| PathRef::new(e.path()))
        .collect()
}
