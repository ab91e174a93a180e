use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Opaque handle to a user-selected file. The core never opens it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileHandle {
    path: PathBuf,
}

impl FileHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for display and for the multipart part name.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

impl From<PathBuf> for FileHandle {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

/// Immutable, ordered set of files selected together.
///
/// Cloning is cheap, so a submission can take the batch read-only while the
/// state keeps its own copy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileBatch {
    files: Arc<[FileHandle]>,
}

impl FileBatch {
    pub fn new(files: Vec<FileHandle>) -> Self {
        Self {
            files: files.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileHandle> {
        self.files.iter()
    }
}

impl FromIterator<FileHandle> for FileBatch {
    fn from_iter<I: IntoIterator<Item = FileHandle>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
