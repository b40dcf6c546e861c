//! Plan evaluation for previews and warnings.
//!
//! [`PlanSummary`] is a presentation aid: it tells a front-end how many
//! entries will change and which proposed names look suspicious. It never
//! blocks execution.
//!
//! # Duplicate Detection
//!
//! Duplicates are computed over proposed name strings across the whole
//! plan, not per parent directory. Two entries in different directories
//! that end up with the same name are reported even though their paths do
//! not collide.
//!
//! # Examples
//!
//! ```
//! use rn_core::{EntryKind, PlanEntry};
//! use rn_engine::evaluate::{evaluate, SummaryLevel};
//! use camino::Utf8PathBuf;
//!
//! let plan = vec![
//!     PlanEntry::new(Utf8PathBuf::from("/a/x.txt"), "y.txt", EntryKind::File),
//!     PlanEntry::new(Utf8PathBuf::from("/a/y.txt"), "y.txt", EntryKind::File),
//! ];
//! let summary = evaluate(&plan);
//! assert_eq!(summary.total, 2);
//! assert_eq!(summary.changed, 1);
//! assert!(summary.duplicate_target_names.contains("y.txt"));
//! assert_eq!(summary.level(), SummaryLevel::Warning);
//! ```

use std::collections::BTreeSet;

use rn_core::{FxHashSet, PlanEntry, fx_hash_set};
use serde::Serialize;

/// Plans larger than this are flagged for review.
pub const LARGE_PLAN_THRESHOLD: usize = 300;

/// Summary facts about a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    /// Number of entries in the plan.
    pub total: usize,
    /// Number of entries whose proposed name differs from the current one.
    pub changed: usize,
    /// Proposed names that occur more than once, sorted.
    pub duplicate_target_names: BTreeSet<String>,
    /// Whether any proposed name (or file stem) is empty.
    pub has_empty_name: bool,
}

/// Overall state of a plan, for status banners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryLevel {
    /// Nothing would change.
    Idle,
    /// Changes are pending and nothing looks wrong.
    Ready,
    /// The plan is large or has suspicious names.
    Warning,
}

impl PlanSummary {
    /// Returns the number of entries that would be left alone.
    #[inline]
    #[must_use]
    pub const fn unchanged(&self) -> usize {
        self.total - self.changed
    }

    /// Returns `true` if the plan exceeds [`LARGE_PLAN_THRESHOLD`].
    #[inline]
    #[must_use]
    pub const fn is_large(&self) -> bool {
        self.total > LARGE_PLAN_THRESHOLD
    }

    /// Returns `true` if duplicates or empty names were found.
    #[must_use]
    pub fn has_conflicts(&self) -> bool {
        !self.duplicate_target_names.is_empty() || self.has_empty_name
    }

    /// Classifies the plan for display.
    #[must_use]
    pub fn level(&self) -> SummaryLevel {
        if self.is_large() {
            SummaryLevel::Warning
        } else if self.changed == 0 {
            SummaryLevel::Idle
        } else if self.has_conflicts() {
            SummaryLevel::Warning
        } else {
            SummaryLevel::Ready
        }
    }

    /// Human-readable warning lines, empty when nothing looks wrong.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.is_large() {
            warnings.push(format!(
                "Found {} entries (more than {LARGE_PLAN_THRESHOLD}); review the plan before applying",
                self.total
            ));
        }
        if !self.duplicate_target_names.is_empty() {
            let names: Vec<&str> = self
                .duplicate_target_names
                .iter()
                .map(String::as_str)
                .collect();
            warnings.push(format!("Duplicate target names: {}", names.join(", ")));
        }
        if self.has_empty_name {
            warnings.push("Some proposed names are empty".to_owned());
        }
        warnings
    }
}

/// Computes the summary for a plan.
#[must_use]
pub fn evaluate(plan: &[PlanEntry]) -> PlanSummary {
    let mut seen: FxHashSet<&str> = fx_hash_set();
    let mut summary = PlanSummary {
        total: plan.len(),
        ..PlanSummary::default()
    };

    for entry in plan {
        if entry.is_change() {
            summary.changed += 1;
        }
        if entry.is_empty_name() {
            summary.has_empty_name = true;
        }
        if !seen.insert(entry.proposed_name.as_str()) {
            summary
                .duplicate_target_names
                .insert(entry.proposed_name.clone());
        }
    }

    summary
}

/// Returns the first entry that would change, for a one-line live preview.
#[must_use]
pub fn first_change(plan: &[PlanEntry]) -> Option<&PlanEntry> {
    plan.iter().find(|entry| entry.is_change())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rn_core::EntryKind;

    fn file(path: &str, proposed: &str) -> PlanEntry {
        PlanEntry::new(Utf8PathBuf::from(path), proposed, EntryKind::File)
    }

    #[test]
    fn test_empty_plan() {
        let summary = evaluate(&[]);
        assert_eq!(summary, PlanSummary::default());
        assert_eq!(summary.level(), SummaryLevel::Idle);
        assert!(summary.warnings().is_empty());
    }

    #[test]
    fn test_changed_count() {
        let plan = [
            file("/r/国家.txt", "國家.txt"),
            file("/r/文件.pdf", "文件.pdf"),
        ];
        let summary = evaluate(&plan);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.changed, 1);
        assert_eq!(summary.unchanged(), 1);
        assert_eq!(summary.level(), SummaryLevel::Ready);
    }

    #[test]
    fn test_duplicates_across_directories() {
        let plan = [
            file("/r/a/one.txt", "same.txt"),
            file("/r/b/two.txt", "same.txt"),
            file("/r/b/three.txt", "other.txt"),
        ];
        let summary = evaluate(&plan);
        assert_eq!(
            summary.duplicate_target_names.iter().collect::<Vec<_>>(),
            ["same.txt"]
        );
        assert_eq!(summary.level(), SummaryLevel::Warning);
        assert_eq!(summary.warnings(), ["Duplicate target names: same.txt"]);
    }

    #[test]
    fn test_empty_name_flag() {
        let plan = [file("/r/@@.txt", ".txt")];
        let summary = evaluate(&plan);
        assert!(summary.has_empty_name);
        assert!(summary.has_conflicts());
        assert_eq!(summary.warnings(), ["Some proposed names are empty"]);
    }

    #[test]
    fn test_large_plan_warning() {
        let plan: Vec<PlanEntry> = (0..=LARGE_PLAN_THRESHOLD)
            .map(|i| file(&format!("/r/{i}.txt"), &format!("{i}.txt")))
            .collect();
        let summary = evaluate(&plan);
        assert!(summary.is_large());
        assert_eq!(summary.changed, 0);
        assert_eq!(summary.level(), SummaryLevel::Warning);
        assert_eq!(summary.warnings().len(), 1);
    }

    #[test]
    fn test_first_change() {
        let plan = [file("/r/a.txt", "a.txt"), file("/r/b.txt", "c.txt")];
        assert_eq!(first_change(&plan).map(PlanEntry::original_name), Some("b.txt"));
        assert!(first_change(&plan[..1]).is_none());
    }

    #[test]
    fn test_summary_serialization() {
        let plan = [file("/r/a.txt", "x.txt"), file("/r/b.txt", "x.txt")];
        insta::assert_json_snapshot!(evaluate(&plan), @r#"
        {
          "total": 2,
          "changed": 2,
          "duplicate_target_names": [
            "x.txt"
          ],
          "has_empty_name": false
        }
        "#);
    }
}
