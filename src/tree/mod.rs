//! Directory walking for tree listings
//!
//! - `walker`: lazy breadth-first traversal ([`BfsWalk`])
//! - `filter`: the recursive visibility rule used when listing
//! - `config`: layout options and caller hooks

mod config;
mod filter;
mod utils;
mod walker;

pub use config::{PathPredicate, PathSuffix, TreeConfig, TreeHooks};
pub use filter::is_visible;
pub use utils::{file_size, format_size, glob_match};
pub use walker::{BfsWalk, bfs_walk, get_paths, relative_depth};
