// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! status-context-git: repository data for status-context
//!
//! This library crate reads working tree status, branch names and recent
//! history from a git repository using the `git2` crate, and hands them over
//! as a [`status_context_core::GitSnapshot`].

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use status_context_git::{GitRepo, SnapshotOptions};
//!
//! let repo = GitRepo::discover(".").expect("discover repo");
//! let snapshot = repo.snapshot(&SnapshotOptions::default());
//!
//! for entry in snapshot.status.unwrap_or_default() {
//!     println!("{entry}");
//! }
//! ```

pub mod commit;
pub mod error;
pub mod repo;

pub use commit::RecentCommit;
pub use error::GitError;
pub use repo::{GitRepo, MAIN_BRANCH_CANDIDATES, SnapshotOptions, porcelain_code};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::RecentCommit;
    pub use crate::error::GitError;
    pub use crate::repo::{GitRepo, SnapshotOptions};
}
