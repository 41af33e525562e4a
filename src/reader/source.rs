use std::borrow::Cow;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

/// A submitted file: a path on disk or an in-memory buffer.
#[derive(Debug, Clone)]
pub enum FileRef {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl FileRef {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        FileRef::Path(path.into())
    }

    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        FileRef::Bytes(bytes.into())
    }

    /// Reads the whole file into memory (borrowed for byte input).
    pub fn read_bytes(&self) -> std::io::Result<Cow<'_, [u8]>> {
        match self {
            FileRef::Path(path) => Ok(Cow::Owned(std::fs::read(path)?)),
            FileRef::Bytes(bytes) => Ok(Cow::Borrowed(bytes)),
        }
    }

    /// Returns a path to the file contents, spooling byte input to a temp file.
    ///
    /// The temp file lives as long as the returned [`LocalFile`] and is deleted when it is
    /// dropped, on success and on error paths alike.
    pub fn materialize(&self) -> std::io::Result<LocalFile<'_>> {
        match self {
            FileRef::Path(path) => Ok(LocalFile::Borrowed(path)),
            FileRef::Bytes(bytes) => {
                let mut spooled = NamedTempFile::new()?;
                spooled.write_all(bytes)?;
                spooled.flush()?;
                debug!(
                    path = %spooled.path().display(),
                    size = bytes.len(),
                    "Spooled upload to temp file"
                );
                Ok(LocalFile::Spooled(spooled))
            }
        }
    }
}

impl From<PathBuf> for FileRef {
    fn from(path: PathBuf) -> Self {
        FileRef::Path(path)
    }
}

impl From<Vec<u8>> for FileRef {
    fn from(bytes: Vec<u8>) -> Self {
        FileRef::Bytes(bytes)
    }
}

/// A readable on-disk file; spooled temp files are removed on drop.
#[derive(Debug)]
pub enum LocalFile<'a> {
    Borrowed(&'a Path),
    Spooled(NamedTempFile),
}

impl LocalFile<'_> {
    pub fn path(&self) -> &Path {
        match self {
            LocalFile::Borrowed(path) => path,
            LocalFile::Spooled(file) => file.path(),
        }
    }
}
