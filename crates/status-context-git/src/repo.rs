// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Repository access
//!
//! Reads working tree status, branch names and recent commits through
//! `git2`. Status entries are mapped to the two-character codes of
//! `git status --porcelain` so that the rest of the pipeline sees exactly
//! what the command line would print.

use std::path::Path;

use git2::{Delta, ErrorCode, Repository, Sort, Status, StatusOptions};
use status_context_core::entry::UNTRACKED_CODE;
use status_context_core::{CommitLine, GitSnapshot, StatusEntry};
use tracing::{debug, warn};

use crate::commit::RecentCommit;
use crate::error::GitError;

/// Branch names tried, in order, when looking for the main branch
pub const MAIN_BRANCH_CANDIDATES: &[&str] = &["main", "master"];

/// Which parts of the repository to read for a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotOptions {
    /// Read the current branch
    pub include_branch: bool,
    /// Detect the main branch
    pub include_main_branch: bool,
    /// Read working tree status
    pub include_status: bool,
    /// Number of recent commits to read (0 for none)
    pub commit_count: usize,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            include_branch: true,
            include_main_branch: true,
            include_status: true,
            commit_count: 5,
        }
    }
}

/// Porcelain status code for a set of `git2` status flags
///
/// Returns `None` for ignored and unmodified entries.
#[must_use]
pub fn porcelain_code(status: Status) -> Option<String> {
    if status.is_conflicted() {
        return Some("UU".to_string());
    }
    if status.is_ignored() {
        return None;
    }

    let index = if status.is_index_new() {
        'A'
    } else if status.is_index_modified() {
        'M'
    } else if status.is_index_deleted() {
        'D'
    } else if status.is_index_renamed() {
        'R'
    } else if status.is_index_typechange() {
        'T'
    } else {
        ' '
    };

    let worktree = if status.is_wt_modified() {
        'M'
    } else if status.is_wt_deleted() {
        'D'
    } else if status.is_wt_typechange() {
        'T'
    } else if status.is_wt_renamed() {
        'R'
    } else {
        ' '
    };

    match (index, worktree) {
        (' ', ' ') if status.is_wt_new() => Some(UNTRACKED_CODE.to_string()),
        (' ', ' ') => None,
        _ => Some(format!("{index}{worktree}")),
    }
}

fn path_string(path: Option<&Path>) -> Option<String> {
    path.map(|p| p.to_string_lossy().replace('\\', "/"))
}

/// A git repository opened for reading
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Open a git repository at the given path
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if the path is not a git repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        Ok(Self { repo })
    }

    /// Discover and open a git repository containing the given path
    ///
    /// This walks up the directory tree to find a `.git` directory.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if no repository is found.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::discover(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        debug!(git_dir = %repo.path().display(), "Discovered repository");
        Ok(Self { repo })
    }

    /// Check if the repository is bare
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.repo.is_bare()
    }

    /// Get the working directory path (None for bare repos)
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Working tree status in porcelain form
    ///
    /// Entries come in `git status --porcelain` order: tracked changes by
    /// path, then untracked paths. Untracked directories are reported once
    /// as `dir/` instead of file by file.
    ///
    /// # Errors
    ///
    /// Returns `GitError::BareRepository` for bare repositories and
    /// `GitError::Git2` if status cannot be read.
    pub fn status_entries(&self) -> Result<Vec<StatusEntry>, GitError> {
        if self.repo.is_bare() {
            return Err(GitError::BareRepository {
                path: self.repo.path().display().to_string(),
            });
        }

        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(false)
            .include_ignored(false)
            .renames_head_to_index(true);

        let statuses = self.repo.statuses(Some(&mut options))?;
        let mut entries = Vec::with_capacity(statuses.len());

        for entry in statuses.iter() {
            let Some(code) = porcelain_code(entry.status()) else {
                continue;
            };

            let rename = entry
                .head_to_index()
                .filter(|delta| delta.status() == Delta::Renamed)
                .or_else(|| {
                    entry
                        .index_to_workdir()
                        .filter(|delta| delta.status() == Delta::Renamed)
                });

            let status_entry = match rename {
                Some(delta) => {
                    let orig = path_string(delta.old_file().path());
                    let dest = path_string(delta.new_file().path());
                    match (orig, dest) {
                        (Some(orig), Some(dest)) => StatusEntry::renamed(code, orig, dest),
                        (_, dest) => StatusEntry::new(code, dest.unwrap_or_default()),
                    }
                }
                None => {
                    let path = String::from_utf8_lossy(entry.path_bytes()).into_owned();
                    StatusEntry::new(code, path)
                }
            };

            if status_entry.path.is_empty() {
                debug!(code = %status_entry.code, "Skipping status entry without a path");
                continue;
            }
            entries.push(status_entry);
        }

        // git lists changes to tracked paths before untracked ones
        let (mut ordered, untracked): (Vec<_>, Vec<_>) =
            entries.into_iter().partition(|entry| entry.tracked);
        ordered.extend(untracked);

        debug!(count = ordered.len(), "Read working tree status");
        Ok(ordered)
    }

    /// Name of the checked-out branch
    ///
    /// Returns `None` when HEAD is detached. A branch with no commits yet
    /// is still reported by name.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Git2` if HEAD cannot be read.
    pub fn current_branch(&self) -> Result<Option<String>, GitError> {
        match self.repo.head() {
            Ok(head) if head.is_branch() => Ok(head.shorthand().map(ToString::to_string)),
            Ok(_) => Ok(None),
            Err(err) if err.code() == ErrorCode::UnbornBranch => {
                let head = self.repo.find_reference("HEAD")?;
                Ok(head
                    .symbolic_target()
                    .map(|target| target.trim_start_matches("refs/heads/").to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// The first of [`MAIN_BRANCH_CANDIDATES`] that resolves
    #[must_use]
    pub fn main_branch(&self) -> Option<String> {
        MAIN_BRANCH_CANDIDATES
            .iter()
            .find(|name| self.repo.revparse_single(name).is_ok())
            .map(|name| (*name).to_string())
    }

    /// The `limit` most recent commits reachable from HEAD, newest first
    ///
    /// A repository without commits has no history and yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Git2` if the history cannot be walked.
    pub fn recent_commits(&self, limit: usize) -> Result<Vec<RecentCommit>, GitError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        match self.repo.head() {
            Ok(_) => {}
            Err(err) if err.code() == ErrorCode::UnbornBranch => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        }

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME | Sort::TOPOLOGICAL)?;
        revwalk.push_head()?;

        let mut commits = Vec::with_capacity(limit);
        for oid in revwalk.take(limit) {
            let git_commit = self.repo.find_commit(oid?)?;
            commits.push(RecentCommit {
                sha: git_commit.id().to_string(),
                message: String::from_utf8_lossy(git_commit.message_bytes()).into_owned(),
            });
        }
        Ok(commits)
    }

    /// Read the enabled parts of the repository
    ///
    /// A part that fails to read is logged and left out; the rest of the
    /// snapshot is still returned.
    #[must_use]
    pub fn snapshot(&self, options: &SnapshotOptions) -> GitSnapshot {
        let branch = if options.include_branch {
            self.current_branch().unwrap_or_else(|err| {
                warn!(error = %err, "Failed to read current branch");
                None
            })
        } else {
            None
        };

        let main_branch = options
            .include_main_branch
            .then(|| self.main_branch())
            .flatten();

        let status = if options.include_status {
            self.status_entries()
                .map_err(|err| warn!(error = %err, "Failed to read working tree status"))
                .ok()
        } else {
            None
        };

        let commits = self
            .recent_commits(options.commit_count)
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to read recent commits");
                Vec::new()
            })
            .iter()
            .map(CommitLine::from)
            .collect();

        GitSnapshot {
            branch,
            main_branch,
            status,
            commits,
        }
    }
}
