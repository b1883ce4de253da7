//! Normalized path handling and root-anchored resolution
//!
//! Everything here is lexical. Nothing in this module touches the
//! filesystem except [`resolve_root`], which reads the current working
//! directory when no explicit root is given.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

/// A path stored with `/` separators on every platform.
///
/// Config files are written with forward slashes; keeping that form until
/// the moment of I/O makes argument values identical across hosts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Wrap `path`, turning `\` into `/`.
    ///
    /// No other cleanup happens here; call [`NormalizedPath::normalize`]
    /// to collapse `.` and `..`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            inner: path.as_ref().to_string_lossy().replace('\\', "/"),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Native form for handing to `std::fs`.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Whether the path is anchored at a filesystem root.
    ///
    /// Recognizes `/...`, network paths (`//server/share`) and drive
    /// prefixes (`C:/...`) regardless of the host platform.
    pub fn is_absolute(&self) -> bool {
        !root_prefix(&self.inner).is_empty()
    }

    /// Join this path with a segment.
    ///
    /// An absolute segment replaces the base entirely, matching
    /// [`Path::join`].
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        if !root_prefix(&segment_normalized).is_empty() || self.inner.is_empty() {
            return Self {
                inner: segment_normalized,
            };
        }
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self { inner: joined }
    }

    /// Lexically collapse `.`, `..` and repeated separators.
    ///
    /// For absolute paths `..` never climbs above the root. Leading `..`
    /// segments of a relative path are preserved.
    pub fn normalize(&self) -> Self {
        let prefix = root_prefix(&self.inner);
        let rest = &self.inner[prefix.len()..];

        let mut parts: Vec<&str> = Vec::new();
        for component in rest.split('/') {
            match component {
                "" | "." => {}
                ".." => match parts.last() {
                    Some(last) if *last != ".." => {
                        parts.pop();
                    }
                    _ if prefix.is_empty() => parts.push(".."),
                    _ => {}
                },
                other => parts.push(other),
            }
        }

        let body = parts.join("/");
        let inner = if prefix.is_empty() && body.is_empty() {
            ".".to_string()
        } else {
            format!("{prefix}{body}")
        };
        Self { inner }
    }

    /// Last segment, ignoring a trailing `/`.
    pub fn file_name(&self) -> Option<&str> {
        self.inner
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
    }

    /// Whether a regular file exists at this path.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Text after the last `.` of the file name. Dotfiles such as
    /// `.artman` have none.
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(0) | None => None,
            Some(idx) => Some(&name[idx + 1..]),
        }
    }
}

/// Root marker at the start of `path`, or `""` for relative paths.
fn root_prefix(path: &str) -> &str {
    if path.starts_with("//") && !path.starts_with("///") {
        return &path[..2];
    }
    if path.starts_with('/') {
        return &path[..1];
    }
    let bytes = path.as_bytes();
    if bytes.len() >= 2
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes.len() == 2 || bytes[2] == b'/')
    {
        return &path[..bytes.len().min(3)];
    }
    ""
}

/// Resolve `path` against `root`.
///
/// Absolute paths come back normalized but otherwise unchanged. Relative
/// paths are joined onto `root` and normalized. `root` is expected to be
/// absolute already; use [`resolve_root`] to obtain one.
pub fn resolve(path: impl AsRef<Path>, root: &NormalizedPath) -> NormalizedPath {
    let path = NormalizedPath::new(path);
    if path.is_absolute() {
        return path.normalize();
    }
    root.join(path.as_str()).normalize()
}

/// Turn an optional root directory into an absolute, normalized root.
///
/// `None` and the empty path both mean the current working directory. A
/// relative root is anchored at the current working directory.
pub fn resolve_root(root: Option<&Path>) -> Result<NormalizedPath> {
    let root = root.filter(|r| !r.as_os_str().is_empty());
    if let Some(root) = root {
        let candidate = NormalizedPath::new(root);
        if candidate.is_absolute() {
            return Ok(candidate.normalize());
        }
    }

    let cwd = std::env::current_dir().map_err(|source| Error::CurrentDir { source })?;
    let cwd = NormalizedPath::new(dunce::simplified(&cwd));
    tracing::trace!(cwd = %cwd, "Anchoring root at current directory");

    Ok(match root {
        Some(relative) => resolve(relative, &cwd),
        None => cwd.normalize(),
    })
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl Serialize for NormalizedPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.inner)
    }
}

impl<'de> Deserialize<'de> for NormalizedPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
