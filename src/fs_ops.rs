//! File transfer with optional backup, and tolerant file reading

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use encoding_rs::mem::decode_latin1;
use encoding_rs::{GBK, UTF_8, WINDOWS_1252};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::path::PathRef;

/// How [`move_file`] transfers a file.
#[derive(Debug, Clone, Default)]
pub struct TransferOptions {
    /// Copy instead of moving
    pub copy: bool,
    /// Copy an existing destination aside before overwriting it
    pub backup: bool,
    /// Create the destination's parent directory when missing
    pub ensure: bool,
}

/// Move (or copy) `src` to `dst` and return the final destination path.
///
/// When `dst` is an existing directory the file keeps its name inside it.
/// A missing source fails before anything at the destination is touched.
pub fn move_file(
    src: impl Into<PathBuf>,
    dst: impl Into<PathBuf>,
    options: &TransferOptions,
) -> Result<PathBuf> {
    let src = PathRef::new(src);
    let dst = PathRef::new(dst);
    info!("source file: {}", src);
    info!("destination file: {}", dst);

    if !src.exists() {
        return Err(Error::SourceNotFound {
            path: src.absolute(),
        });
    }

    if options.ensure && !dst.parent().exists() {
        fs::create_dir_all(dst.parent().absolute())?;
        info!("destination parent directory created: {}", dst.parent());
    }

    let target = if dst.is_dir() {
        dst.absolute().join(src.basename())
    } else {
        dst.absolute()
    };

    if target.exists() {
        if options.backup {
            let backup = backup_path(&target);
            fs::copy(&target, &backup)?;
            info!("destination file backed up to {}", backup.display());
        } else {
            warn!("destination file already exists and will be overwritten");
        }
    } else if options.backup {
        warn!("destination file does not exist, backup skipped");
    }

    if options.copy {
        fs::copy(src.absolute(), &target)?;
        info!("file {} copied to {}", src, target.display());
    } else {
        rename_or_copy(&src.absolute(), &target)?;
        info!("file {} moved to {}", src, target.display());
    }
    Ok(target)
}

/// [`move_file`] with `copy` forced on.
pub fn copy_file(
    src: impl Into<PathBuf>,
    dst: impl Into<PathBuf>,
    options: &TransferOptions,
) -> Result<PathBuf> {
    let options = TransferOptions {
        copy: true,
        ..options.clone()
    };
    move_file(src, dst, &options)
}

fn backup_path(target: &Path) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d%H%M%S");
    PathBuf::from(format!("{}.backup.{}", target.display(), stamp))
}

/// `rename` across filesystems falls back to copy + delete.
fn rename_or_copy(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(_) if from.is_file() => {
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
        Err(e) => Err(e),
    }
}

/// Bytes Windows-1252 leaves undefined. WHATWG maps them to C1 controls, so
/// a file containing any of them is not treated as Windows-1252.
const CP1252_UNDEFINED: [u8; 5] = [0x81, 0x8d, 0x8f, 0x90, 0x9d];

/// Read a text file, trying UTF-8, GBK and Windows-1252 before falling back
/// to Latin-1, which decodes any byte sequence.
pub fn read_file(path: impl AsRef<Path>) -> Result<String> {
    let bytes = fs::read(path.as_ref())?;
    let (text, mode) = decode_text(&bytes);
    info!("file is read in {} mode", mode);
    Ok(text)
}

fn decode_text(bytes: &[u8]) -> (String, &'static str) {
    for encoding in [UTF_8, GBK, WINDOWS_1252] {
        if encoding == WINDOWS_1252 && bytes.iter().any(|b| CP1252_UNDEFINED.contains(b)) {
            warn!("file cannot be opened in {} mode", encoding.name());
            continue;
        }
        match encoding.decode_without_bom_handling_and_without_replacement(bytes) {
            Some(text) => return (text.into_owned(), encoding.name()),
            None => warn!("file cannot be opened in {} mode", encoding.name()),
        }
    }
    (decode_latin1(bytes).into_owned(), "ISO-8859-1")
}
