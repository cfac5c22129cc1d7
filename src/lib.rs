//! cmdkit - small console utilities
//!
//! The core is the path/walk/diff cluster: [`PathRef`], the breadth-first
//! [`bfs_walk`], the [`ls_tree`] listing built on it, and [`diff`]. The rest
//! are thin helpers for hashing, HTTP, commands, platform checks and the
//! main color of an image.

pub mod cmd;
pub mod color;
pub mod diff;
pub mod error;
pub mod fs_ops;
pub mod hash;
pub mod http;
pub mod logging;
pub mod output;
pub mod path;
pub mod platform;
pub mod string_utils;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use cmd::{CommandOutput, is_cmd_exist, read_cmd, run_cmd};
pub use color::{ImageSource, Triplet, main_color};
pub use diff::{DiffInput, DiffOptions, DiffSide, diff};
pub use error::{Error, Result};
pub use fs_ops::{TransferOptions, copy_file, move_file, read_file};
pub use hash::{HashTarget, crc32, md5};
pub use http::{AjaxResponse, Method, ajax, read_url, update_file};
pub use output::{JsonEntry, OutputConfig, TreeFormatter, ls_tree, print_json, print_tree};
pub use path::{PathRef, get_path};
pub use platform::{
    Platform, PlatformValue, clear_screen, install_package, is_admin, runas_admin,
};
pub use string_utils::banner;
pub use tree::{BfsWalk, TreeConfig, TreeHooks, bfs_walk, get_paths};
