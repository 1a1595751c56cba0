//! Ephemeral in-memory file store
//!
//! Directories are implicit: a directory exists exactly when some file lives
//! beneath it. The root always exists.

use std::collections::BTreeMap;

use crate::{Error, NormalizedPath, Result};

/// An in-memory hierarchical file store owned by a single resolution.
///
/// Files are kept sorted by path. The store never reads from or writes to
/// the host filesystem.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryFs {
    files: BTreeMap<NormalizedPath, Vec<u8>>,
}

impl MemoryFs {
    /// Create an empty store containing only the root directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new file.
    ///
    /// Re-adding identical content is accepted; adding different content at
    /// an existing path is a [`Error::PathCollision`].
    pub fn add_file(&mut self, path: &NormalizedPath, data: impl Into<Vec<u8>>) -> Result<()> {
        let data = data.into();
        self.check_writable(path)?;
        if let Some(existing) = self.files.get(path) {
            if *existing != data {
                return Err(Error::PathCollision { path: path.clone() });
            }
            return Ok(());
        }
        tracing::trace!(%path, bytes = data.len(), "Adding file");
        self.files.insert(path.clone(), data);
        Ok(())
    }

    /// Write a file, replacing any previous content.
    ///
    /// Returns the replaced content, if any.
    pub fn write_file(
        &mut self,
        path: &NormalizedPath,
        data: impl Into<Vec<u8>>,
    ) -> Result<Option<Vec<u8>>> {
        let data = data.into();
        self.check_writable(path)?;
        tracing::trace!(%path, bytes = data.len(), "Writing file");
        Ok(self.files.insert(path.clone(), data))
    }

    /// Read a file's bytes.
    pub fn read_file(&self, path: &NormalizedPath) -> Result<&[u8]> {
        match self.files.get(path) {
            Some(data) => Ok(data),
            None if self.is_dir(path) => Err(Error::NotAFile { path: path.clone() }),
            None => Err(Error::NotFound { path: path.clone() }),
        }
    }

    /// Read a file as UTF-8 text.
    pub fn read_to_string(&self, path: &NormalizedPath) -> Result<String> {
        let data = self.read_file(path)?.to_vec();
        String::from_utf8(data).map_err(|source| Error::InvalidUtf8 {
            path: path.clone(),
            source,
        })
    }

    /// Whether a file or directory exists at `path`.
    pub fn exists(&self, path: &NormalizedPath) -> bool {
        self.is_file(path) || self.is_dir(path)
    }

    /// Whether a file exists at `path`.
    pub fn is_file(&self, path: &NormalizedPath) -> bool {
        self.files.contains_key(path)
    }

    /// Whether `path` is a directory, i.e. the root or an ancestor of a file.
    pub fn is_dir(&self, path: &NormalizedPath) -> bool {
        if path.is_root() {
            return true;
        }
        let start = path.descendants_start();
        self.files
            .range::<NormalizedPath, _>(&start..)
            .next()
            .is_some_and(|(p, _)| p.as_str().starts_with(start.as_str()))
    }

    /// Iterate over all files in path order.
    pub fn files(&self) -> impl Iterator<Item = (&NormalizedPath, &[u8])> {
        self.files.iter().map(|(p, d)| (p, d.as_slice()))
    }

    /// Number of files in the store.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn check_writable(&self, path: &NormalizedPath) -> Result<()> {
        if self.is_dir(path) {
            return Err(Error::NotAFile { path: path.clone() });
        }
        if let Some(blocking) = path.ancestors().find(|a| self.files.contains_key(a)) {
            return Err(Error::NotADirectory { path: blocking });
        }
        Ok(())
    }
}
