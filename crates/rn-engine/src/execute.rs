//! Sequential plan execution.
//!
//! Entries are processed in plan order. A failed entry is recorded and the
//! batch continues; completed renames are never rolled back.
//!
//! The target check is explicit because `std::fs::rename` silently
//! replaces an existing file on most platforms. The only existing target
//! accepted is the source entry itself, which happens for case-only
//! renames on case-insensitive volumes.

use std::fs;
use std::io;

use camino::Utf8Path;
use rn_core::{ExecutionReport, ItemOutcome, PlanEntry, RenameOutcome};
use tracing::{debug, info, warn};

use crate::error::ExecuteError;

/// Executes `plan` and reports one outcome per entry.
///
/// Never panics and never returns early: every failure becomes a
/// [`RenameOutcome::Failed`] carrying the error text.
#[must_use]
pub fn execute(plan: &[PlanEntry]) -> ExecutionReport {
    let mut report = ExecutionReport::default();

    for entry in plan {
        let outcome = if entry.is_noop() {
            RenameOutcome::SkippedNoOp
        } else {
            match rename_entry(entry) {
                Ok(()) => {
                    debug!(from = %entry.original_path, to = %entry.proposed_name, "Renamed");
                    RenameOutcome::Renamed
                }
                Err(e) => {
                    warn!(path = %entry.original_path, error = %e, "Rename failed");
                    RenameOutcome::Failed(e.to_string())
                }
            }
        };

        report.record(ItemOutcome {
            original_path: entry.original_path.clone(),
            proposed_name: entry.proposed_name.clone(),
            outcome,
        });
    }

    info!(
        renamed = report.success_count,
        failed = report.failure_count,
        skipped = report.skipped_count(),
        "Execution complete"
    );
    report
}

fn rename_entry(entry: &PlanEntry) -> Result<(), ExecuteError> {
    validate_name(&entry.proposed_name)?;

    let source = entry.original_path.as_path();
    if let Err(e) = fs::symlink_metadata(source) {
        return Err(if e.kind() == io::ErrorKind::NotFound {
            ExecuteError::SourceMissing(source.to_owned())
        } else {
            ExecuteError::io(source, e)
        });
    }

    let target = entry.target_path();
    match fs::symlink_metadata(&target) {
        Ok(_) if !is_same_entry(source, &target) => {
            return Err(ExecuteError::TargetExists(target));
        }
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(ExecuteError::io(&target, e)),
    }

    fs::rename(source, &target).map_err(|e| ExecuteError::io(source, e))
}

/// Rejects names that cannot be a single sibling entry.
fn validate_name(name: &str) -> Result<(), ExecuteError> {
    let invalid = |reason| ExecuteError::InvalidName {
        name: name.to_owned(),
        reason,
    };

    if name.is_empty() {
        return Err(ExecuteError::EmptyName);
    }
    if name == "." || name == ".." {
        return Err(invalid("reserved name"));
    }
    if name.chars().any(std::path::is_separator) {
        return Err(invalid("contains a path separator"));
    }
    if name.contains('\0') {
        return Err(invalid("contains a NUL byte"));
    }
    Ok(())
}

/// Returns `true` if `target` resolves to the `source` entry itself.
fn is_same_entry(source: &Utf8Path, target: &Utf8Path) -> bool {
    let names_match = match (source.file_name(), target.file_name()) {
        (Some(a), Some(b)) => a.to_lowercase() == b.to_lowercase(),
        _ => false,
    };
    names_match && same_file_identity(source, target)
}

#[cfg(unix)]
fn same_file_identity(source: &Utf8Path, target: &Utf8Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::symlink_metadata(source), fs::symlink_metadata(target)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_file_identity(_source: &Utf8Path, _target: &Utf8Path) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rn_core::EntryKind;

    fn temp_root() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        (dir, root)
    }

    fn file(path: Utf8PathBuf, proposed: &str) -> PlanEntry {
        PlanEntry::new(path, proposed, EntryKind::File)
    }

    #[test]
    fn test_noop_and_rename() {
        let (_dir, root) = temp_root();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join("b.txt"), "b").unwrap();

        let plan = [file(root.join("a.txt"), "a.txt"), file(root.join("b.txt"), "c.txt")];
        let report = execute(&plan);

        assert_eq!(report.success_count, 1);
        assert_eq!(report.failure_count, 0);
        assert_eq!(report.outcomes[0].outcome, RenameOutcome::SkippedNoOp);
        assert_eq!(report.outcomes[1].outcome, RenameOutcome::Renamed);
        assert!(root.join("a.txt").exists());
        assert!(root.join("c.txt").exists());
        assert!(!root.join("b.txt").exists());
    }

    #[test]
    fn test_second_run_fails_renamed_entries() {
        let (_dir, root) = temp_root();
        fs::write(root.join("old.txt"), "").unwrap();
        let plan = [file(root.join("old.txt"), "new.txt")];

        assert!(execute(&plan).is_clean());

        let report = execute(&plan);
        assert_eq!(report.success_count, 0);
        assert_eq!(report.failure_count, 1);
        assert!(matches!(
            &report.outcomes[0].outcome,
            RenameOutcome::Failed(reason) if reason.starts_with("source no longer exists")
        ));
    }

    #[test]
    fn test_existing_target_is_not_overwritten() {
        let (_dir, root) = temp_root();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join("b.txt"), "b").unwrap();

        let report = execute(&[file(root.join("a.txt"), "b.txt")]);
        assert_eq!(report.failure_count, 1);
        assert!(matches!(
            &report.outcomes[0].outcome,
            RenameOutcome::Failed(reason) if reason.starts_with("target already exists")
        ));
        assert_eq!(fs::read_to_string(root.join("b.txt")).unwrap(), "b");
        assert!(root.join("a.txt").exists());
    }

    #[test]
    fn test_duplicate_targets_first_wins() {
        let (_dir, root) = temp_root();
        fs::write(root.join("one.txt"), "1").unwrap();
        fs::write(root.join("two.txt"), "2").unwrap();

        let plan = [
            file(root.join("one.txt"), "same.txt"),
            file(root.join("two.txt"), "same.txt"),
        ];
        let report = execute(&plan);

        assert_eq!(report.success_count, 1);
        assert_eq!(report.failure_count, 1);
        assert!(report.outcomes[1].outcome.is_failure());
        assert_eq!(fs::read_to_string(root.join("same.txt")).unwrap(), "1");
        assert!(root.join("two.txt").exists());
    }

    #[test]
    fn test_empty_and_invalid_names() {
        let (_dir, root) = temp_root();
        fs::write(root.join("a.txt"), "").unwrap();

        let report = execute(&[
            file(root.join("a.txt"), ""),
            file(root.join("a.txt"), ".."),
        ]);
        assert_eq!(report.failure_count, 2);
        assert_eq!(
            report.outcomes[0].outcome,
            RenameOutcome::Failed("empty target name".to_owned())
        );
        assert!(matches!(
            &report.outcomes[1].outcome,
            RenameOutcome::Failed(reason) if reason.starts_with("invalid target name")
        ));
        assert!(root.join("a.txt").exists());
    }

    #[test]
    fn test_directory_rename() {
        let (_dir, root) = temp_root();
        fs::create_dir_all(root.join("folder/inner")).unwrap();

        let plan = [PlanEntry::new(root.join("folder"), "[folder]", EntryKind::Directory)];
        assert!(execute(&plan).is_clean());
        assert!(root.join("[folder]/inner").is_dir());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("ok.txt").is_ok());
        assert!(matches!(validate_name(""), Err(ExecuteError::EmptyName)));
        assert!(matches!(validate_name("."), Err(ExecuteError::InvalidName { .. })));
        assert!(matches!(validate_name("a/b"), Err(ExecuteError::InvalidName { .. })));
        assert!(matches!(validate_name("a\0b"), Err(ExecuteError::InvalidName { .. })));
    }
}
