// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Recent commit summaries

use serde::{Deserialize, Serialize};
use status_context_core::CommitLine;

/// Length of an abbreviated commit hash
pub const SHORT_SHA_LEN: usize = 7;

/// A commit from the recent history of HEAD
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentCommit {
    /// The commit SHA (40 hex characters)
    pub sha: String,
    /// Full commit message
    pub message: String,
}

impl RecentCommit {
    /// Get the short SHA (first 7 characters)
    #[must_use]
    pub fn short_sha(&self) -> &str {
        self.sha.get(..SHORT_SHA_LEN).unwrap_or(&self.sha)
    }

    /// Get the first line of the commit message (subject)
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("").trim_end()
    }

    /// One-line form used in the report
    #[must_use]
    pub fn to_commit_line(&self) -> CommitLine {
        CommitLine::new(self.short_sha(), self.subject())
    }
}

impl From<&RecentCommit> for CommitLine {
    fn from(commit: &RecentCommit) -> Self {
        commit.to_commit_line()
    }
}
