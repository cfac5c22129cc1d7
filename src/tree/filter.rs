//! Visibility rule for tree listing

use crate::path::PathRef;

use super::config::PathPredicate;
use super::walker::read_children;

/// Whether `path` should be listed.
///
/// An entry is visible when the predicate accepts it. A directory the
/// predicate rejects is still visible when one of its direct children is
/// visible by this same rule. Without a predicate nothing is visible.
pub fn is_visible(path: &PathRef, visible: Option<&PathPredicate>) -> bool {
    match visible {
        Some(pred) => visible_by(path, pred.as_ref()),
        None => false,
    }
}

fn visible_by(path: &PathRef, pred: &dyn Fn(&PathRef) -> bool) -> bool {
    if pred(path) {
        return true;
    }
    if path.raw().is_dir() {
        return read_children(path).iter().any(|child| visible_by(child, pred));
    }
    false
}
