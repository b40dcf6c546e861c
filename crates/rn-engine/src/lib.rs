//! Rename planning and execution for the renamer.
//!
//! This crate turns a [`RenameConfig`] into an ordered rename plan, summarizes
//! it, and applies it to the filesystem.
//!
//! # Overview
//!
//! The three operations are exposed as capability traits so front-ends can
//! depend on only what they use:
//!
//! - [`Scanner`]: walk the tree and propose a name for every candidate
//! - [`Evaluator`]: summarize a plan (counts, duplicates, empty names)
//! - [`Executor`]: rename entries in plan order, one outcome per entry
//!
//! [`RenameEngine`] implements all three.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use rn_convert::ScriptConverter;
//! use rn_core::{PrimaryOperation, RenameConfig};
//! use rn_engine::{Evaluator, Executor, RenameEngine, Scanner};
//! use camino::Utf8Path;
//!
//! let engine = RenameEngine::new(Arc::new(ScriptConverter::fallback_only()));
//! let config = RenameConfig::new(Utf8Path::new("./downloads"))
//!     .with_primary_operation(PrimaryOperation::ScriptConvert);
//!
//! let scanned = engine.scan(&config);
//! let summary = engine.evaluate(&scanned.plan);
//! println!("{} of {} entries change", summary.changed, summary.total);
//!
//! let report = engine.execute(&scanned.plan);
//! println!("renamed {}, failed {}", report.success_count, report.failure_count);
//! ```
//!
//! # Architecture
//!
//! ```text
//! RenameEngine
//!     │
//!     ├── TreeWalker (ignore crate, hidden entries skipped)
//!     │
//!     ├── NameTransformer
//!     │       │
//!     │       └── ScriptConverter (rn-convert, lazily probed backend)
//!     │
//!     ├── evaluate (pure)
//!     │
//!     └── execute (sequential std::fs::rename)
//! ```
//!
//! Nothing here panics or returns an error for bad input: a missing root
//! yields an empty plan, walk problems become diagnostics, and rename
//! failures become per-entry outcomes.

#![deny(clippy::all)]
#![warn(missing_docs)]

mod error;
pub mod evaluate;
mod execute;
pub mod transform;
mod walker;

pub use error::{ExecuteError, ScanError};
pub use evaluate::{LARGE_PLAN_THRESHOLD, PlanSummary, SummaryLevel, first_change};
pub use execute::execute;
pub use transform::NameTransformer;
pub use walker::{TreeWalker, WalkOutput, is_hidden_name};

use std::sync::Arc;

use rn_convert::ScriptConverter;
use rn_core::{ExecutionReport, Plan, PlanEntry, RenameConfig};
use tracing::info;

/// A plan together with the non-fatal problems found while building it.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Proposed renames in traversal order.
    pub plan: Plan,
    /// Walk problems; the affected entries are missing from `plan`.
    pub diagnostics: Vec<ScanError>,
}

/// Builds a rename plan from a configuration.
pub trait Scanner {
    /// Walks `config.root_path` and proposes a name for every candidate.
    fn scan(&self, config: &RenameConfig) -> ScanOutcome;
}

/// Summarizes a rename plan.
pub trait Evaluator {
    /// Computes summary facts for `plan`. Pure.
    fn evaluate(&self, plan: &[PlanEntry]) -> PlanSummary;
}

/// Applies a rename plan to the filesystem.
pub trait Executor {
    /// Renames every entry that changes, in plan order.
    fn execute(&self, plan: &[PlanEntry]) -> ExecutionReport;
}

/// The rename engine.
///
/// Holds the name transformer and, through it, the shared script converter.
/// Cloning is cheap; clones share the converter and its probed backend.
#[derive(Debug, Clone)]
pub struct RenameEngine {
    transformer: NameTransformer,
}

impl RenameEngine {
    /// Creates an engine using the given script converter.
    #[must_use]
    pub const fn new(converter: Arc<ScriptConverter>) -> Self {
        Self {
            transformer: NameTransformer::new(converter),
        }
    }

    /// Returns the script converter, e.g. to report its status.
    #[must_use]
    pub fn converter(&self) -> &ScriptConverter {
        self.transformer.converter()
    }

    /// Returns the name transformer.
    #[must_use]
    pub const fn transformer(&self) -> &NameTransformer {
        &self.transformer
    }
}

impl Default for RenameEngine {
    fn default() -> Self {
        Self::new(Arc::new(ScriptConverter::default()))
    }
}

impl Scanner for RenameEngine {
    fn scan(&self, config: &RenameConfig) -> ScanOutcome {
        info!(
            root = %config.root_path,
            operation = config.primary_operation.label(),
            recursive = config.recurse_into_folders,
            "Starting scan"
        );

        let walked = TreeWalker::new(&config.root_path)
            .with_recursion(config.recurse_into_folders)
            .with_entry_scope(config.entry_scope)
            .with_extension_filter(config.extension_filter.clone())
            .walk();

        let plan: Plan = walked
            .candidates
            .into_iter()
            .map(|candidate| {
                let proposed = self
                    .transformer
                    .transform(candidate.kind, &candidate.name, config);
                PlanEntry::new(candidate.path, proposed, candidate.kind)
            })
            .collect();

        info!(
            entries = plan.len(),
            diagnostics = walked.diagnostics.len(),
            "Scan complete"
        );

        ScanOutcome {
            plan,
            diagnostics: walked.diagnostics,
        }
    }
}

impl Evaluator for RenameEngine {
    fn evaluate(&self, plan: &[PlanEntry]) -> PlanSummary {
        evaluate::evaluate(plan)
    }
}

impl Executor for RenameEngine {
    fn execute(&self, plan: &[PlanEntry]) -> ExecutionReport {
        info!(entries = plan.len(), "Executing plan");
        execute::execute(plan)
    }
}
