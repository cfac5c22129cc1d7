//! Error types shared by every cmdkit module

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File content could not be decoded as UTF-8 text.
    #[error("cannot decode {} as UTF-8", path.display())]
    Decode { path: PathBuf },

    #[error("source file does not exist: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("cannot load image: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid triplet '{0}' (rgb/hex)")]
    InvalidTriplet(String),

    #[error("invalid method '{0}' (GET/POST)")]
    InvalidMethod(String),

    #[error("unsupported package manager: {0}")]
    UnsupportedManager(String),

    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("no package name provided")]
    EmptyPackageName,

    #[error("not supported on this platform: {0}")]
    Unsupported(&'static str),
}
