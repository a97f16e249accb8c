// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Timeout-bounded repository reads
//!
//! `git2` calls block, so each read runs on tokio's blocking pool under a
//! timeout. A read that fails, panics or runs out of time yields `None` and
//! a warning; the caller carries on without that data.

use std::path::PathBuf;
use std::time::Duration;

use status_context_core::GitSnapshot;
use status_context_git::{GitError, GitRepo, SnapshotOptions};
use tokio::time::timeout;
use tracing::{debug, warn};

/// What was learned about the repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitCollection {
    /// Whether the working directory is inside a repository
    pub is_git_repo: bool,
    /// Repository data, when collection was enabled and succeeded
    pub snapshot: Option<GitSnapshot>,
}

/// Run a blocking read on the blocking pool, bounded by `limit`
///
/// Returns `None` (after logging) on timeout, panic or error.
pub async fn run_bounded<F, R>(what: &'static str, limit: Duration, f: F) -> Option<R>
where
    F: FnOnce() -> Result<R, GitError> + Send + 'static,
    R: Send + 'static,
{
    match timeout(limit, tokio::task::spawn_blocking(f)).await {
        Ok(Ok(Ok(value))) => Some(value),
        Ok(Ok(Err(GitError::RepositoryNotFound { path }))) => {
            debug!(what, path = %path, "No git repository");
            None
        }
        Ok(Ok(Err(err))) => {
            warn!(what, error = %err, "Git read failed");
            None
        }
        Ok(Err(err)) => {
            warn!(what, error = %err, "Git task panicked");
            None
        }
        Err(_) => {
            warn!(what, timeout = ?limit, "Git read timed out");
            None
        }
    }
}

/// Detect the repository and, when `options` is given, read a snapshot
///
/// Detection and snapshot are bounded separately, so a repository whose
/// snapshot timed out is still reported as a repository.
pub async fn collect_git(
    working_dir: PathBuf,
    options: Option<SnapshotOptions>,
    limit: Duration,
) -> GitCollection {
    let Some(repo) = run_bounded("discover", limit, move || GitRepo::discover(&working_dir)).await
    else {
        return GitCollection::default();
    };

    let snapshot = match options {
        Some(options) => {
            run_bounded("snapshot", limit, move || Ok(repo.snapshot(&options))).await
        }
        None => None,
    };

    GitCollection {
        is_git_repo: true,
        snapshot,
    }
}
