//! MD5 and CRC32 digests of bytes, text or file content

use crate::error::Result;
use crate::path::PathRef;

/// What to hash.
///
/// Text naming an existing file hashes the file instead, unless the caller
/// forces text mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashTarget {
    Bytes(Vec<u8>),
    Text(String),
}

impl HashTarget {
    fn is_empty(&self) -> bool {
        match self {
            HashTarget::Bytes(b) => b.is_empty(),
            HashTarget::Text(t) => t.is_empty(),
        }
    }

    /// Bytes that actually get hashed.
    fn content(&self, force_text: bool) -> Result<Vec<u8>> {
        match self {
            HashTarget::Bytes(b) => Ok(b.clone()),
            HashTarget::Text(t) => {
                let as_path = PathRef::new(t.as_str());
                if !force_text && as_path.is_file() {
                    let raw = std::fs::read(as_path.absolute())?;
                    Ok(normalize_newlines(&raw))
                } else {
                    Ok(t.as_bytes().to_vec())
                }
            }
        }
    }
}

impl From<&[u8]> for HashTarget {
    fn from(b: &[u8]) -> Self {
        HashTarget::Bytes(b.to_vec())
    }
}

impl From<Vec<u8>> for HashTarget {
    fn from(b: Vec<u8>) -> Self {
        HashTarget::Bytes(b)
    }
}

impl From<&str> for HashTarget {
    fn from(s: &str) -> Self {
        HashTarget::Text(s.to_string())
    }
}

impl From<String> for HashTarget {
    fn from(s: String) -> Self {
        HashTarget::Text(s)
    }
}

macro_rules! hash_target_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for HashTarget {
                fn from(n: $t) -> Self {
                    HashTarget::Text(n.to_string())
                }
            }
        )*
    };
}

hash_target_from_int!(i32, i64, u32, u64, usize);

/// Replace `\r\n` with `\n`.
fn normalize_newlines(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    let mut iter = raw.iter().peekable();
    while let Some(&b) = iter.next() {
        if b == b'\r' && iter.peek() == Some(&&b'\n') {
            continue;
        }
        out.push(b);
    }
    out
}

/// Hex MD5 digest. Empty input gives an empty string.
pub fn md5(target: impl Into<HashTarget>, force_text: bool) -> Result<String> {
    let target = target.into();
    if target.is_empty() {
        return Ok(String::new());
    }
    let content = target.content(force_text)?;
    Ok(format!("{:x}", ::md5::compute(content)))
}

/// CRC32 checksum. Empty input gives 0.
pub fn crc32(target: impl Into<HashTarget>, force_text: bool) -> Result<u32> {
    let target = target.into();
    if target.is_empty() {
        return Ok(0);
    }
    let content = target.content(force_text)?;
    Ok(crc32fast::hash(&content))
}
