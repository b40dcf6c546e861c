//! Error types for the rn-engine crate.
//!
//! - [`ScanError`] - problems while walking the tree. Never returned from a
//!   scan; collected as diagnostics next to the plan.
//! - [`ExecuteError`] - why a single rename failed. Its display text becomes
//!   the reason in [`RenameOutcome::Failed`](rn_core::RenameOutcome::Failed).

use camino::Utf8PathBuf;

/// Non-fatal problems encountered during a scan.
///
/// # Error Recovery Strategy
///
/// - **Walk errors** ([`ScanError::Walk`]): the unreadable subtree is skipped
/// - **Non-UTF-8 names** ([`ScanError::NonUtf8Path`]): the entry is skipped
/// - **Root not a directory** ([`ScanError::NotADirectory`]): the plan is empty
///
/// # Examples
///
/// ```
/// use rn_engine::ScanError;
/// use camino::Utf8PathBuf;
///
/// let err = ScanError::NotADirectory(Utf8PathBuf::from("/tmp/file.txt"));
/// assert!(!err.is_recoverable());
/// assert!(err.to_string().contains("/tmp/file.txt"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Failed to enumerate a directory.
    #[error("failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// An entry name is not valid UTF-8.
    #[error("path is not valid UTF-8: {}", _0.display())]
    NonUtf8Path(std::path::PathBuf),

    /// The scan root exists but is not a directory.
    #[error("root path is not a directory: {0}")]
    NotADirectory(Utf8PathBuf),
}

impl ScanError {
    /// Returns `true` if the scan continued past this error.
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Walk(_) | Self::NonUtf8Path(_))
    }

    /// Returns the path associated with this error, if known.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::NotADirectory(path) => Some(path),
            Self::Walk(_) | Self::NonUtf8Path(_) => None,
        }
    }
}

/// Why a single rename failed.
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
    /// The proposed name is empty.
    #[error("empty target name")]
    EmptyName,

    /// The proposed name is not a usable single path segment.
    #[error("invalid target name '{name}': {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Another entry already occupies the target path.
    #[error("target already exists: {0}")]
    TargetExists(Utf8PathBuf),

    /// The entry disappeared after the plan was made.
    #[error("source no longer exists: {0}")]
    SourceMissing(Utf8PathBuf),

    /// The filesystem refused the rename.
    #[error("failed to rename {path}: {source}")]
    Io {
        /// The entry being renamed.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ExecuteError {
    /// Creates a new [`ExecuteError::Io`] error.
    #[inline]
    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
