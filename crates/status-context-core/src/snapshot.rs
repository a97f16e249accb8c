// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Repository data handed over by the status provider

use serde::{Deserialize, Serialize};

use crate::entry::StatusEntry;

/// One line of recent history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitLine {
    /// Abbreviated commit hash
    pub short_hash: String,
    /// First line of the commit message
    pub subject: String,
}

impl CommitLine {
    /// Create a commit line
    #[must_use]
    pub fn new(short_hash: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            short_hash: short_hash.into(),
            subject: subject.into(),
        }
    }

    /// `git log --oneline` rendering
    #[must_use]
    pub fn to_line(&self) -> String {
        if self.subject.is_empty() {
            self.short_hash.clone()
        } else {
            format!("{} {}", self.short_hash, self.subject)
        }
    }
}

/// Everything the status provider could read from a repository
///
/// Absent fields are omitted from the report rather than rendered empty.
/// `status: None` means status was not collected; `Some(vec![])` is a clean
/// working tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitSnapshot {
    /// Current branch (None when detached or not collected)
    pub branch: Option<String>,
    /// Detected main/default branch
    pub main_branch: Option<String>,
    /// Working tree status in provider order
    pub status: Option<Vec<StatusEntry>>,
    /// Most recent commits, newest first
    pub commits: Vec<CommitLine>,
}

impl GitSnapshot {
    /// A snapshot carrying only status entries
    #[must_use]
    pub fn from_status(entries: Vec<StatusEntry>) -> Self {
        Self {
            status: Some(entries),
            ..Default::default()
        }
    }

    /// Whether no field carries data
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.branch.is_none()
            && self.main_branch.is_none()
            && self.status.is_none()
            && self.commits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_commit_line_rendering() {
        assert_eq!(
            CommitLine::new("1945ab9", "feat: add thing").to_line(),
            "1945ab9 feat: add thing"
        );
        assert_eq!(CommitLine::new("1945ab9", "").to_line(), "1945ab9");
    }

    #[test]
    fn test_snapshot_emptiness() {
        assert!(GitSnapshot::default().is_empty());
        assert!(!GitSnapshot::from_status(vec![]).is_empty());
    }

    #[test]
    fn test_snapshot_serializes_without_rename_source() {
        let snapshot = GitSnapshot {
            branch: Some("main".to_string()),
            status: Some(vec![StatusEntry::untracked("notes.md")]),
            ..Default::default()
        };
        let json = serde_json::to_value(&snapshot).expect("serialize");
        assert_eq!(json["status"][0]["code"], "??");
        assert!(json["status"][0].get("orig_path").is_none());

        let back: GitSnapshot = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, snapshot);
    }
}
