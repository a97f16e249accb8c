// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for status-context-git

use thiserror::Error;

/// Errors that can occur while reading a repository
#[derive(Debug, Error)]
pub enum GitError {
    /// Error from git2 library
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),

    /// No repository at or above the specified path
    #[error("Repository not found: {path}")]
    RepositoryNotFound {
        /// The path that was searched for a repository
        path: String,
    },

    /// The repository has no working tree, so it has no status
    #[error("Bare repository has no working tree: {path}")]
    BareRepository {
        /// Path of the repository's git directory
        path: String,
    },
}
