//! Core types, errors, and configuration for the renamer workspace.
//!
//! This crate provides the foundational types shared by the engine and the
//! command-line front-end:
//!
//! - [`RenameConfig`] and [`AppConfig`] describing one planning run
//! - Domain types ([`EntryKind`], [`Candidate`], [`PlanEntry`], [`RenameOutcome`],
//!   [`ExecutionReport`])
//! - [`ConfigError`] for configuration loading failures
//! - Type aliases for `FxHashMap`/`FxHashSet` (faster than std)

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod hash;
pub mod types;

pub use config::{
    AppConfig, ConfirmConfig, ConverterConfig, EntryScope, ExtensionFilter, PrimaryOperation,
    RenameConfig,
};
pub use error::ConfigError;
pub use hash::{FxHashMap, FxHashSet, fx_hash_map, fx_hash_set};
pub use types::{
    Candidate, EntryKind, ExecutionReport, ItemOutcome, Plan, PlanEntry, RenameOutcome,
    split_extension,
};
