//! CLI entry point for cmdkit

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use regex::Regex;

use cmdkit::hash::HashTarget;
use cmdkit::output::{JsonEntry, OutputConfig, print_diff, print_json, print_tree};
use cmdkit::tree::{TreeConfig, TreeHooks, bfs_walk, file_size, glob_match};
use cmdkit::{
    DiffOptions, ImageSource, Method, Platform, TransferOptions, Triplet, ajax, banner, crc32,
    diff, is_admin, main_color, md5, move_file,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "cmdkit")]
#[command(about = "Small console utilities: tree listing, diffing, hashing and more")]
#[command(version)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto", global = true)]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List a directory breadth-first as an indented tree
    Tree {
        /// Directory to display
        #[arg(default_value = ".")]
        path: String,

        /// Do not print folder/file icons
        #[arg(long = "no-icon")]
        no_icon: bool,

        /// Use ASCII glyphs only
        #[arg(long)]
        ascii: bool,

        /// Print only N levels below the root
        #[arg(short = 'L', long = "level")]
        level: Option<usize>,

        /// Show only entries whose name matches the glob (and their ancestors)
        #[arg(short = 'P', long = "pattern")]
        pattern: Option<String>,

        /// Underline entries whose name matches the regex
        #[arg(long, value_name = "REGEX")]
        highlight: Option<String>,

        /// Show file sizes after file names
        #[arg(short, long)]
        size: bool,
    },

    /// Print every path under a directory in breadth-first order
    Walk {
        #[arg(default_value = ".")]
        path: String,

        /// Keep only entries whose name matches the glob
        #[arg(short = 'P', long = "pattern")]
        pattern: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Unified diff of two files or strings
    Diff {
        a: String,
        b: String,

        /// Keep the ---/+++/@@ header lines
        #[arg(long)]
        meta: bool,

        /// Compare the arguments as text even when they name files
        #[arg(long = "force-text")]
        force_text: bool,

        /// Lines of context around each change
        #[arg(short = 'U', long = "context", default_value = "0")]
        context: usize,
    },

    /// MD5 (default) or CRC32 of a file or string
    Hash {
        target: String,

        /// Print the CRC32 checksum instead of the MD5 digest
        #[arg(long)]
        crc32: bool,

        /// Hash the argument as text even when it names a file
        #[arg(long = "force-text")]
        force_text: bool,
    },

    /// Fetch a URL and print the decoded response
    Get {
        url: String,

        /// Request parameter as key=value (can be used multiple times)
        #[arg(short = 'd', long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// Send the parameters as a JSON POST body
        #[arg(long)]
        post: bool,
    },

    /// Move or copy a file, optionally backing up the destination
    Mv {
        src: PathBuf,
        dst: PathBuf,

        /// Copy instead of moving
        #[arg(long)]
        copy: bool,

        /// Back up an existing destination first
        #[arg(long)]
        backup: bool,

        /// Create the destination's parent directory
        #[arg(long)]
        ensure: bool,
    },

    /// Print the main color of an image file or URL
    Color {
        source: String,

        /// Treat SOURCE as a URL to download
        #[arg(long)]
        url: bool,

        /// Thumbnail size the color is computed on
        #[arg(long, default_value = "200")]
        scale: u32,

        /// Print `#RRGGBB` instead of an RGB triplet
        #[arg(long)]
        hex: bool,
    },

    /// Print text framed in a banner
    Banner { text: String },

    /// Show the detected platform
    Os,
}

/// Parse a `key=value` request parameter.
fn parse_param(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", s))
}

fn main() {
    let args = Args::parse();
    cmdkit::logging::init(args.verbose);

    let output = OutputConfig {
        use_color: should_use_color(args.color),
    };

    if let Err(e) = run(args.command, &output) {
        eprintln!("cmdkit: {}", e);
        process::exit(1);
    }
}

fn run(command: Command, output: &OutputConfig) -> cmdkit::Result<()> {
    match command {
        Command::Tree {
            path,
            no_icon,
            ascii,
            level,
            pattern,
            highlight,
            size,
        } => {
            let config = TreeConfig {
                show_icon: !no_icon,
                ascii,
                max_depth: level,
            };
            let mut hooks = TreeHooks::new();
            if let Some(pattern) = pattern {
                hooks = hooks.visible(move |p| glob_match(&pattern, &p.basename()));
            }
            if let Some(highlight) = highlight {
                let re = Regex::new(&highlight)?;
                hooks = hooks.highlight(move |p| re.is_match(&p.basename()));
            }
            if size {
                hooks = hooks
                    .suffix(|p| file_size(p).map(|s| format!("[{}]", s)).unwrap_or_default());
            }
            print_tree(&path, &config, &hooks, output)?;
        }
        Command::Walk {
            path,
            pattern,
            json,
        } => {
            let walk = bfs_walk(&path);
            let root = walk.root().to_path_buf();
            let entries: Vec<_> = walk
                .filter(|p| {
                    pattern
                        .as_deref()
                        .is_none_or(|pat| glob_match(pat, &p.basename()))
                })
                .collect();
            if json {
                let json_entries: Vec<JsonEntry> =
                    entries.iter().map(|e| JsonEntry::new(&root, e)).collect();
                print_json(&json_entries)?;
            } else {
                for entry in entries {
                    println!("{}", entry.raw().display());
                }
            }
        }
        Command::Diff {
            a,
            b,
            meta,
            force_text,
            context,
        } => {
            let options = DiffOptions {
                show_meta: meta,
                force_text,
                context,
            };
            let lines = diff(a, b, &options)?;
            print_diff(&lines, output)?;
        }
        Command::Hash {
            target,
            crc32: use_crc32,
            force_text,
        } => {
            let target = HashTarget::Text(target);
            if use_crc32 {
                println!("{}", crc32(target, force_text)?);
            } else {
                println!("{}", md5(target, force_text)?);
            }
        }
        Command::Get { url, params, post } => {
            let method = if post { Method::Post } else { Method::Get };
            if let Some(response) = ajax(&url, &params, method)? {
                println!("{}", response);
            }
        }
        Command::Mv {
            src,
            dst,
            copy,
            backup,
            ensure,
        } => {
            let options = TransferOptions {
                copy,
                backup,
                ensure,
            };
            let target = move_file(src, dst, &options)?;
            println!("{}", target.display());
        }
        Command::Color {
            source,
            url,
            scale,
            hex,
        } => {
            let source = if url {
                ImageSource::Url(&source)
            } else {
                ImageSource::File(&source)
            };
            let triplet = if hex { Triplet::Hex } else { Triplet::Rgb };
            if let Some(color) = main_color(source, scale, triplet)? {
                println!("{}", color);
            }
        }
        Command::Banner { text } => {
            println!("{}", banner(&text));
        }
        Command::Os => {
            let platform = Platform::current();
            println!("platform: {}", platform.name());
            match is_admin() {
                Some(admin) => println!("admin: {}", admin),
                None => println!("admin: unknown"),
            }
        }
    }
    Ok(())
}
