//! Console output
//!
//! - `tree` - tree listing formatter writing to any `WriteColor` sink
//! - `diff` - colored diff lines
//! - `json` - JSON listing of walked paths
//! - `config` - output configuration

mod config;
mod diff;
mod json;
mod tree;

pub use config::OutputConfig;
pub use diff::{print_diff, write_diff};
pub use json::{JsonEntry, print_json};
pub use tree::{TreeFormatter, ls_tree, print_tree};
