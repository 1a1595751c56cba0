//! Rooted, normalized path handling for the virtual filesystem

use std::path::Path;

/// A path inside the virtual filesystem.
///
/// Always rooted at `/`, uses forward slashes, and is lexically cleaned:
/// empty and `.` segments are dropped and `..` pops the previous segment
/// (clamped at the root). Two spellings of the same location therefore
/// compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedPath {
    /// Internal representation always starts with `/` and never ends with one
    /// (except for the root itself)
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Relative inputs are interpreted from the root, so `"a/b"`, `"./a/b"`
    /// and `"/a/b"` all name the same file.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: clean(&path_str.replace('\\', "/")),
        }
    }

    /// The root directory `/`.
    pub fn root() -> Self {
        Self {
            inner: "/".to_string(),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Whether this path is the root directory.
    pub fn is_root(&self) -> bool {
        self.inner == "/"
    }

    /// Join this path with a segment.
    ///
    /// The segment is always treated as relative to `self`; the result is
    /// cleaned, so `..` segments may walk back towards the root.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        Self {
            inner: clean(&format!("{}/{}", self.inner, segment_normalized)),
        }
    }

    /// Get the parent directory, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        match self.inner.rfind('/') {
            Some(0) => Some(Self::root()),
            Some(idx) => Some(Self {
                inner: self.inner[..idx].to_string(),
            }),
            None => None,
        }
    }

    /// Iterate over all proper ancestors, nearest first, ending at the root.
    pub fn ancestors(&self) -> impl Iterator<Item = NormalizedPath> {
        std::iter::successors(self.parent(), NormalizedPath::parent)
    }

    /// Get the file name component, or `None` for the root.
    pub fn file_name(&self) -> Option<&str> {
        if self.is_root() {
            return None;
        }
        self.inner.rsplit('/').next()
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }

    /// Whether `self` is `base` or lies underneath it, compared by whole
    /// segments (`/ab` is not under `/a`).
    pub fn starts_with(&self, base: &NormalizedPath) -> bool {
        if base.is_root() || self.inner == base.inner {
            return true;
        }
        self.inner
            .strip_prefix(base.inner.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
    }

    /// The prefix every descendant of this directory starts with.
    pub(crate) fn child_prefix(&self) -> String {
        if self.is_root() {
            "/".to_string()
        } else {
            format!("{}/", self.inner)
        }
    }

    /// Lower bound of this directory's descendants in path order.
    ///
    /// Not a valid path itself; only used as a range key.
    pub(crate) fn descendants_start(&self) -> Self {
        Self {
            inner: self.child_prefix(),
        }
    }
}

/// Lexically clean a slash-separated path and root it.
fn clean(raw: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in raw.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    format!("/{}", segments.join("/"))
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

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
