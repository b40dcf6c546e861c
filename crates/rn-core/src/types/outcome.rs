//! Execution outcomes.
//!
//! [`ExecutionReport`] is what a front-end shows after the user confirmed a
//! plan: one [`ItemOutcome`] per plan entry plus aggregate counts.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// What happened to a single plan entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "reason")]
pub enum RenameOutcome {
    /// The proposed name equals the current one; nothing was touched.
    SkippedNoOp,
    /// The entry was renamed.
    Renamed,
    /// The rename was attempted and failed for the given reason.
    Failed(String),
}

impl RenameOutcome {
    /// Returns `true` for [`RenameOutcome::Failed`].
    #[inline]
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns a short label for display.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SkippedNoOp => "skipped",
            Self::Renamed => "renamed",
            Self::Failed(_) => "failed",
        }
    }
}

/// The outcome for one plan entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemOutcome {
    /// Path the entry had before execution.
    pub original_path: Utf8PathBuf,
    /// Name the entry was (or would have been) renamed to.
    pub proposed_name: String,
    /// What happened.
    pub outcome: RenameOutcome,
}

/// Result of executing a plan.
///
/// # Examples
///
/// ```
/// use rn_core::{ExecutionReport, ItemOutcome, RenameOutcome};
/// use camino::Utf8PathBuf;
///
/// let mut report = ExecutionReport::default();
/// report.record(ItemOutcome {
///     original_path: Utf8PathBuf::from("/a/b.txt"),
///     proposed_name: "c.txt".to_owned(),
///     outcome: RenameOutcome::Renamed,
/// });
/// assert_eq!(report.success_count, 1);
/// assert!(report.is_clean());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Number of entries renamed.
    pub success_count: usize,
    /// Number of entries whose rename failed.
    pub failure_count: usize,
    /// Per-entry outcomes, in plan order.
    pub outcomes: Vec<ItemOutcome>,
}

impl ExecutionReport {
    /// Appends an outcome and updates the counters.
    pub fn record(&mut self, item: ItemOutcome) {
        match item.outcome {
            RenameOutcome::Renamed => self.success_count += 1,
            RenameOutcome::Failed(_) => self.failure_count += 1,
            RenameOutcome::SkippedNoOp => {}
        }
        self.outcomes.push(item);
    }

    /// Number of entries skipped as no-ops.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|item| item.outcome == RenameOutcome::SkippedNoOp)
            .count()
    }

    /// Iterates over failed items.
    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.outcomes.iter().filter(|item| item.outcome.is_failure())
    }

    /// Returns `true` if no rename failed.
    #[inline]
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.failure_count == 0
    }
}
