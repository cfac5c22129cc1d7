//! Configuration types for tree listing

use crate::path::PathRef;

/// Predicate over a walked entry.
pub type PathPredicate = Box<dyn Fn(&PathRef) -> bool>;

/// Produces the text appended after an entry's name.
pub type PathSuffix = Box<dyn Fn(&PathRef) -> String>;

/// Layout options for tree listing.
#[derive(Debug, Clone)]
pub struct TreeConfig {
    /// Prefix each entry with a folder/file icon
    pub show_icon: bool,
    /// Use ASCII glyphs for icons and indent guides
    pub ascii: bool,
    /// Do not print entries deeper than this many levels below the root
    pub max_depth: Option<usize>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            show_icon: true,
            ascii: false,
            max_depth: None,
        }
    }
}

/// Caller-supplied hooks deciding what is shown and how.
///
/// The default shows every entry, highlights nothing and adds no suffix.
/// With `visible` set to `None` nothing is shown at all.
pub struct TreeHooks {
    pub visible: Option<PathPredicate>,
    pub highlight: Option<PathPredicate>,
    pub suffix: Option<PathSuffix>,
}

impl TreeHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(mut self, f: impl Fn(&PathRef) -> bool + 'static) -> Self {
        self.visible = Some(Box::new(f));
        self
    }

    /// Drop the visibility predicate, hiding every entry.
    pub fn without_visible(mut self) -> Self {
        self.visible = None;
        self
    }

    pub fn highlight(mut self, f: impl Fn(&PathRef) -> bool + 'static) -> Self {
        self.highlight = Some(Box::new(f));
        self
    }

    pub fn suffix(mut self, f: impl Fn(&PathRef) -> String + 'static) -> Self {
        self.suffix = Some(Box::new(f));
        self
    }

    pub(crate) fn is_highlighted(&self, path: &PathRef) -> bool {
        self.highlight.as_ref().is_some_and(|f| f(path))
    }

    pub(crate) fn suffix_for(&self, path: &PathRef) -> String {
        self.suffix.as_ref().map(|f| f(path)).unwrap_or_default()
    }
}

impl Default for TreeHooks {
    fn default() -> Self {
        Self {
            visible: Some(Box::new(|_| true)),
            highlight: None,
            suffix: None,
        }
    }
}
