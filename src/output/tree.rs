//! Tree listing formatter
//!
//! Renders the breadth-first walk of a directory as indented lines, one per
//! visible entry, to any `WriteColor` sink.

use std::io::{self, Write};
use std::path::MAIN_SEPARATOR;

use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

use crate::path::PathRef;
use crate::tree::{TreeConfig, TreeHooks, bfs_walk, is_visible};

use super::config::OutputConfig;

const ICON_DIR: &str = "📁";
const ICON_FILE: &str = "📄";
const ICON_DIR_ASCII: &str = "+";
const ICON_FILE_ASCII: &str = "-";
const INDENT: &str = "│   ";
const INDENT_ASCII: &str = "|   ";

/// Formatter for tree listings.
pub struct TreeFormatter {
    config: TreeConfig,
}

impl TreeFormatter {
    pub fn new(config: TreeConfig) -> Self {
        Self { config }
    }

    /// Walk `root` and write every visible entry to `out`.
    ///
    /// Errors from the sink are returned. Panics in the hooks are not caught.
    pub fn render<W: WriteColor>(
        &self,
        root: &str,
        hooks: &TreeHooks,
        out: &mut W,
    ) -> io::Result<()> {
        let walk = bfs_walk(root);
        let root_path = walk.root().to_path_buf();

        for entry in walk {
            let depth = crate::tree::relative_depth(&root_path, entry.raw());
            // Breadth-first order: once past the limit, everything after is too.
            if self.config.max_depth.is_some_and(|max| depth > max) {
                break;
            }
            if !is_visible(&entry, hooks.visible.as_ref()) {
                continue;
            }
            self.write_entry(out, &entry, depth, hooks)?;
        }
        Ok(())
    }

    fn icon(&self, is_dir: bool) -> &'static str {
        match (self.config.show_icon, self.config.ascii, is_dir) {
            (false, _, _) => " ",
            (true, false, true) => ICON_DIR,
            (true, false, false) => ICON_FILE,
            (true, true, true) => ICON_DIR_ASCII,
            (true, true, false) => ICON_FILE_ASCII,
        }
    }

    fn indent(&self) -> &'static str {
        if self.config.ascii { INDENT_ASCII } else { INDENT }
    }

    fn write_entry<W: WriteColor>(
        &self,
        out: &mut W,
        entry: &PathRef,
        depth: usize,
        hooks: &TreeHooks,
    ) -> io::Result<()> {
        let is_dir = entry.raw().is_dir();
        let name = entry
            .raw()
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| entry.basename());
        let suffix = hooks.suffix_for(entry);

        let mut spec = ColorSpec::new();
        if is_dir {
            spec.set_fg(Some(Color::Blue)).set_bold(true);
        }
        if hooks.is_highlighted(entry) {
            spec.set_underline(true);
        }
        if name.starts_with('.') {
            spec.set_dimmed(true);
        }

        write!(out, "{}{} ", self.indent().repeat(depth), self.icon(is_dir))?;
        out.set_color(&spec)?;
        write!(out, "{}", name)?;
        out.reset()?;
        if is_dir {
            write!(out, "{}", MAIN_SEPARATOR)?;
        }
        if !suffix.is_empty() {
            write!(out, " {}", suffix)?;
        }
        writeln!(out)
    }
}

/// Write the listing of `root` to `out`.
pub fn ls_tree<W: WriteColor>(
    root: &str,
    config: &TreeConfig,
    hooks: &TreeHooks,
    out: &mut W,
) -> io::Result<()> {
    TreeFormatter::new(config.clone()).render(root, hooks, out)
}

/// Print the listing of `root` to stdout.
pub fn print_tree(
    root: &str,
    config: &TreeConfig,
    hooks: &TreeHooks,
    output: &OutputConfig,
) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(output.color_choice());
    ls_tree(root, config, hooks, &mut stdout)
}
