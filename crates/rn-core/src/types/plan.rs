//! Plan entries produced by a scan.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use super::entry::{EntryKind, split_extension};

/// An ordered rename plan, in traversal order.
pub type Plan = Vec<PlanEntry>;

/// One proposed rename: an existing entry and the name it should receive.
///
/// `proposed_name` is a single path segment. It may equal the current name,
/// in which case the entry is a no-op and execution skips it.
///
/// # Examples
///
/// ```
/// use rn_core::{EntryKind, PlanEntry};
/// use camino::Utf8PathBuf;
///
/// let entry = PlanEntry::new(Utf8PathBuf::from("/data/国家.txt"), "國家.txt", EntryKind::File);
/// assert_eq!(entry.original_name(), "国家.txt");
/// assert!(entry.is_change());
/// assert_eq!(entry.target_path(), Utf8PathBuf::from("/data/國家.txt"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Path of the entry as it currently exists.
    pub original_path: Utf8PathBuf,
    /// Name the entry will be renamed to, within the same parent directory.
    pub proposed_name: String,
    /// File or directory.
    pub kind: EntryKind,
}

impl PlanEntry {
    /// Creates a new plan entry.
    #[must_use]
    pub fn new(original_path: Utf8PathBuf, proposed_name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            original_path,
            proposed_name: proposed_name.into(),
            kind,
        }
    }

    /// Returns the current name of the entry (its last path component).
    #[must_use]
    pub fn original_name(&self) -> &str {
        self.original_path.file_name().unwrap_or_default()
    }

    /// Returns `true` if the proposed name differs from the current one.
    #[must_use]
    pub fn is_change(&self) -> bool {
        self.original_name() != self.proposed_name
    }

    /// Returns `true` if the proposed name equals the current one.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        !self.is_change()
    }

    /// Returns the parent directory the rename happens in.
    #[must_use]
    pub fn parent(&self) -> &Utf8Path {
        self.original_path.parent().unwrap_or_else(|| Utf8Path::new(""))
    }

    /// Returns the path the entry will have after renaming.
    #[must_use]
    pub fn target_path(&self) -> Utf8PathBuf {
        self.parent().join(&self.proposed_name)
    }

    /// Returns `true` if the proposed name is empty, or is a file name whose
    /// stem is empty (e.g. `.txt` after every character was stripped).
    #[must_use]
    pub fn is_empty_name(&self) -> bool {
        if self.proposed_name.is_empty() {
            return true;
        }
        self.kind.is_file() && split_extension(&self.proposed_name).0.is_empty()
    }
}
