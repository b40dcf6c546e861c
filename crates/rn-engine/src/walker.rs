//! Directory traversal producing rename candidates.
//!
//! [`TreeWalker`] uses the `ignore` crate's walker with every ignore-file
//! filter disabled: only hidden entries (names starting with `.`) are
//! skipped, and they are skipped whatever the other settings are.
//!
//! # Traversal
//!
//! - Pre-order: a directory comes before its descendants
//! - Children of one directory are visited in file-name order
//! - Directories are always descended into (when recursion is on), even if
//!   folders are not renamed
//! - Symbolic links are not followed
//!
//! # Examples
//!
//! ```no_run
//! use rn_engine::TreeWalker;
//! use camino::Utf8Path;
//!
//! let walked = TreeWalker::new(Utf8Path::new("./photos")).walk();
//! for candidate in &walked.candidates {
//!     println!("{}", candidate.path);
//! }
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use ignore::WalkBuilder;
use rn_core::{Candidate, EntryKind, EntryScope, ExtensionFilter};
use tracing::{debug, warn};

use crate::error::ScanError;

/// Name prefix marking hidden entries.
const HIDDEN_MARKER: char = '.';

/// Candidates and non-fatal diagnostics from one walk.
#[derive(Debug, Default)]
pub struct WalkOutput {
    /// Entries that passed the scope and extension filters, in walk order.
    pub candidates: Vec<Candidate>,
    /// Problems encountered; none of them stopped the walk.
    pub diagnostics: Vec<ScanError>,
}

/// Walks a directory tree and collects rename candidates.
#[derive(Debug, Clone)]
pub struct TreeWalker {
    /// The root directory to walk. Never itself a candidate.
    root: Utf8PathBuf,
    /// Whether to descend below the root's immediate children.
    recursive: bool,
    /// Which entry kinds become candidates.
    scope: EntryScope,
    /// Extension filter for files.
    extensions: ExtensionFilter,
}

impl TreeWalker {
    /// Creates a recursive, files-only walker with no extension filter.
    #[must_use]
    pub fn new(root: &Utf8Path) -> Self {
        Self {
            root: root.to_owned(),
            recursive: true,
            scope: EntryScope::FilesOnly,
            extensions: ExtensionFilter::None,
        }
    }

    /// Configures whether subdirectories are descended into.
    #[must_use]
    pub const fn with_recursion(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Configures which entry kinds become candidates.
    #[must_use]
    pub const fn with_entry_scope(mut self, scope: EntryScope) -> Self {
        self.scope = scope;
        self
    }

    /// Configures the extension filter applied to files.
    #[must_use]
    pub fn with_extension_filter(mut self, extensions: ExtensionFilter) -> Self {
        self.extensions = extensions;
        self
    }

    /// Returns the root directory being walked.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Walks the tree and collects candidates.
    ///
    /// A missing root yields an empty output. A root that is not a directory
    /// yields an empty output with a [`ScanError::NotADirectory`] diagnostic.
    /// Unreadable subtrees are skipped and reported as diagnostics.
    #[must_use]
    pub fn walk(&self) -> WalkOutput {
        let mut output = WalkOutput::default();

        if !self.root.exists() {
            debug!(root = %self.root, "Scan root does not exist");
            return output;
        }
        if !self.root.is_dir() {
            warn!(root = %self.root, "Scan root is not a directory");
            output
                .diagnostics
                .push(ScanError::NotADirectory(self.root.clone()));
            return output;
        }

        for result in self.build_walker() {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry");
                    output.diagnostics.push(ScanError::Walk(e));
                    continue;
                }
            };

            // The root itself is never renamed.
            if entry.depth() == 0 {
                continue;
            }

            let Some(path) = Utf8Path::from_path(entry.path()) else {
                warn!(path = %entry.path().display(), "Skipping non-UTF-8 path");
                output
                    .diagnostics
                    .push(ScanError::NonUtf8Path(entry.path().to_owned()));
                continue;
            };

            let kind = if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                EntryKind::Directory
            } else {
                EntryKind::File
            };

            let Some(candidate) = Candidate::from_path(path, kind) else {
                continue;
            };

            if self.admits(&candidate) {
                output.candidates.push(candidate);
            }
        }

        output
    }

    /// Builds the ignore walker with hidden-entry filtering only.
    fn build_walker(&self) -> ignore::Walk {
        WalkBuilder::new(&self.root)
            // No .gitignore/.ignore handling: every visible entry is a candidate
            .standard_filters(false)
            .hidden(true)
            .follow_links(false)
            .max_depth(if self.recursive { None } else { Some(1) })
            .sort_by_file_name(|a, b| a.cmp(b))
            .build()
    }

    /// Checks scope, hidden-name, and extension filters for one candidate.
    fn admits(&self, candidate: &Candidate) -> bool {
        if is_hidden_name(&candidate.name) {
            return false;
        }

        match candidate.kind {
            EntryKind::Directory => self.scope.includes_folders(),
            EntryKind::File => self.extensions.matches(candidate.extension()),
        }
    }
}

/// Returns `true` for names carrying the hidden-entry marker.
#[inline]
#[must_use]
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with(HIDDEN_MARKER)
}
