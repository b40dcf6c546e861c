//! Entry kinds and scan candidates.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// Whether a filesystem entry is a file or a directory.
///
/// Symbolic links are not followed by the scanner and are reported as
/// [`EntryKind::File`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A regular file (or anything that is not a directory).
    File,
    /// A directory.
    Directory,
}

impl EntryKind {
    /// Returns `true` for [`EntryKind::File`].
    #[inline]
    #[must_use]
    pub const fn is_file(self) -> bool {
        matches!(self, Self::File)
    }

    /// Returns a short label for display.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "dir",
        }
    }
}

/// An existing filesystem entry considered for renaming.
///
/// Candidates are built fresh on every scan and only reference the entry by
/// path; file contents are never read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Full path of the entry.
    pub path: Utf8PathBuf,
    /// Final path component as it exists on disk.
    pub name: String,
    /// File or directory.
    pub kind: EntryKind,
}

impl Candidate {
    /// Builds a candidate from a path, taking the name from its last component.
    ///
    /// Returns `None` for paths without a file name (e.g. `/` or `..`).
    #[must_use]
    pub fn from_path(path: &Utf8Path, kind: EntryKind) -> Option<Self> {
        let name = path.file_name()?.to_owned();
        Some(Self {
            path: path.to_owned(),
            name,
            kind,
        })
    }

    /// Returns the candidate's extension (from the last dot onward).
    #[must_use]
    pub fn extension(&self) -> &str {
        split_extension(&self.name).1
    }
}

/// Splits a name into `(stem, extension)` at the last `.`.
///
/// The extension keeps its leading dot and is empty when the name has no dot.
///
/// # Examples
///
/// ```
/// use rn_core::split_extension;
///
/// assert_eq!(split_extension("photo.JPG"), ("photo", ".JPG"));
/// assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
/// assert_eq!(split_extension("README"), ("README", ""));
/// assert_eq!(split_extension(".txt"), ("", ".txt"));
/// ```
#[must_use]
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(index) => name.split_at(index),
        None => (name, ""),
    }
}
