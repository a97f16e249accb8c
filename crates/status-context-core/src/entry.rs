// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Status entries in `git status --porcelain` form
//!
//! Each entry is a two-character status code plus a repository-relative
//! path. Entries keep the order in which the status provider listed them.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Status code git uses for untracked paths
pub const UNTRACKED_CODE: &str = "??";

/// Separator git places between the source and destination of a rename
const RENAME_ARROW: &str = " -> ";

/// A single line of working tree status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    /// Two-character porcelain status code (`" M"`, `"A "`, `"??"`, ...)
    pub code: String,
    /// Repository-relative path (destination path for renames and copies)
    pub path: String,
    /// Source path of a rename or copy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orig_path: Option<String>,
    /// Whether the path is known to version control
    pub tracked: bool,
}

impl StatusEntry {
    /// Create an entry from a status code and path
    ///
    /// The tracked flag is derived from the code: only `??` is untracked.
    #[must_use]
    pub fn new(code: impl Into<String>, path: impl Into<String>) -> Self {
        let code = code.into();
        let tracked = code != UNTRACKED_CODE;
        Self {
            code,
            path: path.into(),
            orig_path: None,
            tracked,
        }
    }

    /// Create a rename or copy entry
    #[must_use]
    pub fn renamed(
        code: impl Into<String>,
        orig_path: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        let mut entry = Self::new(code, path);
        entry.orig_path = Some(orig_path.into());
        entry
    }

    /// Shorthand for an untracked entry
    #[must_use]
    pub fn untracked(path: impl Into<String>) -> Self {
        Self::new(UNTRACKED_CODE, path)
    }

    /// Parse one porcelain line: `XY path` or `XY old -> new`
    ///
    /// Returns `None` for lines too short to carry a code and a path.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let code = line.get(..2)?;
        let rest = line.get(2..)?;
        let path = rest.strip_prefix(' ')?;
        if path.trim().is_empty() {
            return None;
        }

        let is_copy_or_rename = code.contains('R') || code.contains('C');
        if is_copy_or_rename {
            match path.split_once(RENAME_ARROW) {
                Some((orig, dest)) if !orig.trim().is_empty() && !dest.trim().is_empty() => {
                    return Some(Self::renamed(code, orig, dest));
                }
                _ => {}
            }
        }
        Some(Self::new(code, path))
    }

    /// Whether this entry is unmerged (conflicted)
    #[must_use]
    pub fn is_unmerged(&self) -> bool {
        matches!(
            self.code.as_str(),
            "UU" | "AA" | "DD" | "AU" | "UA" | "DU" | "UD"
        )
    }

    /// Render the entry back to its porcelain line
    #[must_use]
    pub fn to_line(&self) -> String {
        match &self.orig_path {
            Some(orig) => format!("{} {}{}{}", self.code, orig, RENAME_ARROW, self.path),
            None => format!("{} {}", self.code, self.path),
        }
    }
}

impl std::fmt::Display for StatusEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_line())
    }
}

/// Parse a block of porcelain output, skipping blank and malformed lines
#[must_use]
pub fn parse_porcelain(text: &str) -> Vec<StatusEntry> {
    let mut entries = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match StatusEntry::parse(line) {
            Some(entry) => entries.push(entry),
            None => debug!(line, "Skipping malformed status line"),
        }
    }
    entries
}
