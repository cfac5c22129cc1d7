//! Filesystem path value with derived attributes
//!
//! A [`PathRef`] keeps the string it was built from and derives everything
//! else on demand: the absolute form, its parent, basename, stem and
//! extension, plus live existence checks.
//!
//! ```text
//! " /path/to / filename . txt "
//!   |parent | |  stem  | |ext|
//!             |   basename   |
//! ```

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A filesystem location.
///
/// Construction never touches the filesystem. Derived attributes are
/// recomputed on every access, so `exists()` and friends always reflect the
/// filesystem at call time.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PathRef {
    raw: PathBuf,
}

impl PathRef {
    pub fn new(raw: impl Into<PathBuf>) -> Self {
        Self { raw: raw.into() }
    }

    /// The path exactly as given.
    pub fn raw(&self) -> &Path {
        &self.raw
    }

    /// Expanded (`~`, `$VAR`), absolute and lexically normalized form.
    ///
    /// The path does not have to exist. Applying this to an already
    /// absolute, expanded path returns it unchanged.
    pub fn absolute(&self) -> PathBuf {
        absolutize(&expand(&self.raw))
    }

    /// Last component of the absolute path, empty at the filesystem root.
    pub fn basename(&self) -> String {
        self.absolute()
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Extension without the dot. `.gitignore` has none.
    pub fn extension(&self) -> String {
        let name = self.basename();
        split_extension(&name).1.to_string()
    }

    pub fn stem(&self) -> String {
        let name = self.basename();
        split_extension(&name).0.to_string()
    }

    /// Directory containing this path. The root is its own parent.
    pub fn parent(&self) -> PathRef {
        let abs = self.absolute();
        match abs.parent() {
            Some(parent) => PathRef::new(parent),
            None => PathRef::new(abs),
        }
    }

    pub fn exists(&self) -> bool {
        self.absolute().exists()
    }

    pub fn is_dir(&self) -> bool {
        self.absolute().is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.absolute().is_file()
    }

    /// Whether the basename marks a hidden entry (leading `.`).
    pub fn is_hidden(&self) -> bool {
        self.basename().starts_with('.')
    }
}

impl fmt::Display for PathRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.absolute().display())
    }
}

impl fmt::Debug for PathRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PathRef({:?})", self.raw)
    }
}

impl From<&str> for PathRef {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for PathRef {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<PathBuf> for PathRef {
    fn from(raw: PathBuf) -> Self {
        Self::new(raw)
    }
}

impl From<&Path> for PathRef {
    fn from(raw: &Path) -> Self {
        Self::new(raw)
    }
}

/// Shorthand for [`PathRef::new`].
pub fn get_path(raw: impl Into<PathBuf>) -> PathRef {
    PathRef::new(raw)
}

/// Split a file name into stem and extension the way `splitext` does:
/// leading dots never start an extension.
fn split_extension(name: &str) -> (&str, &str) {
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].rfind('.') {
        Some(i) => {
            let dot = leading + i;
            (&name[..dot], &name[dot + 1..])
        }
        None => (name, ""),
    }
}

/// Expand environment variables, then a leading `~`.
///
/// Paths that are not valid UTF-8 are returned untouched.
pub fn expand(raw: &Path) -> PathBuf {
    match raw.to_str() {
        Some(s) => expand_tilde(&expand_env(s)),
        None => raw.to_path_buf(),
    }
}

/// Expand `~` and `~/rest` to the home directory. `~user` is left alone.
pub fn expand_tilde(s: &str) -> PathBuf {
    let home = match home::home_dir() {
        Some(h) => h,
        None => return PathBuf::from(s),
    };
    if s == "~" {
        home
    } else if let Some(rest) = s.strip_prefix("~/").or_else(|| s.strip_prefix("~\\")) {
        home.join(rest)
    } else {
        PathBuf::from(s)
    }
}

/// Replace `$NAME` and `${NAME}` with the variable's value.
/// Unset variables and malformed references are kept verbatim.
pub fn expand_env(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => ("", 0),
            }
        } else {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], end)
        };

        let value = if name.is_empty() || name.contains(['=', '\0']) {
            None
        } else {
            std::env::var(name).ok()
        };
        match value {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[pos..pos + 1 + consumed]),
        }
        rest = &after[consumed..];
    }

    out.push_str(rest);
    out
}

/// Make `path` absolute against the current directory and resolve `.` and
/// `..` lexically. `..` at the root stays at the root.
pub fn absolutize(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };
    resolve_components(&joined)
}

fn resolve_components(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => result.push(prefix.as_os_str()),
            Component::RootDir => result.push(component),
            Component::CurDir => {}
            Component::ParentDir => {
                // pop() refuses to remove the root, which is what we want
                if result.file_name().is_some() {
                    result.pop();
                }
            }
            Component::Normal(c) => result.push(c),
        }
    }

    if result.as_os_str().is_empty() {
        result.push(Component::CurDir);
    }
    result
}
