//! Domain types for the renamer.
//!
//! # Module Organization
//!
//! - [`entry`] - Entry kinds, scan candidates, and stem/extension splitting
//! - [`plan`] - Plan entries produced by a scan
//! - [`outcome`] - Per-item execution outcomes and the batch report
//!
//! All public types are re-exported at this module level and at the crate root:
//!
//! ```
//! use rn_core::{EntryKind, PlanEntry, RenameOutcome};
//! ```

pub mod entry;
pub mod outcome;
pub mod plan;

pub use entry::{Candidate, EntryKind, split_extension};
pub use outcome::{ExecutionReport, ItemOutcome, RenameOutcome};
pub use plan::{Plan, PlanEntry};
