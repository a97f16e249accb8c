// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! status-context-core: bounded git status reports for LLM context
//!
//! This library crate turns an unbounded list of working tree changes into a
//! report with a fixed maximum size. Entries are classified into three tiers
//! by path pattern, budgeted per tier, and rendered with explicit counts for
//! everything that was left out.
//!
//! # Example
//!
//! ```
//! use status_context_core::{ReporterConfig, StatusReporter, parse_porcelain};
//!
//! let entries = parse_porcelain(" M src/lib.rs\n?? node_modules/left-pad/index.js\n");
//! let reporter = StatusReporter::new(&ReporterConfig::default());
//! let report = reporter.render_status(&entries);
//!
//! assert_eq!(
//!     report.lines(),
//!     [" M src/lib.rs", "[Filtered: 1 untracked files in ignored paths]"]
//! );
//! ```

#![warn(missing_docs)]

pub mod budget;
pub mod entry;
pub mod error;
pub mod pattern;
pub mod render;
pub mod reporter;
pub mod snapshot;
pub mod tier;

pub use budget::{Budget, BudgetOutcome, BudgetPolicy, PatternCount, ReconciliationCounters};
pub use entry::{StatusEntry, parse_porcelain};
pub use error::PatternError;
pub use pattern::{PatternSet, TierPatterns};
pub use render::{RenderedReport, ReportOptions};
pub use reporter::{ReporterConfig, StatusReporter};
pub use snapshot::{CommitLine, GitSnapshot};
pub use tier::{Tier, TierClassifier, classify};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::budget::{Budget, BudgetOutcome};
    pub use crate::entry::StatusEntry;
    pub use crate::reporter::{ReporterConfig, StatusReporter};
    pub use crate::snapshot::{CommitLine, GitSnapshot};
}
