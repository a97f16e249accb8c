// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for status-context-core

use thiserror::Error;

/// Errors raised while compiling a path pattern
///
/// Pattern errors never abort classification. A rejected pattern is logged,
/// recorded on its [`PatternSet`](crate::pattern::PatternSet) and then
/// matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// The pattern was empty or contained only separators
    #[error("Empty pattern")]
    Empty,

    /// The pattern is made only of wildcards and would match every path
    #[error("Pattern '{pattern}' matches every path")]
    MatchesEverything {
        /// The pattern as supplied
        pattern: String,
    },

    /// The glob compiler rejected the pattern
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidGlob {
        /// The pattern as supplied
        pattern: String,
        /// Reason reported by the glob compiler
        message: String,
    },
}

impl PatternError {
    pub(crate) fn invalid(pattern: &str, source: &globset::Error) -> Self {
        Self::InvalidGlob {
            pattern: pattern.to_string(),
            message: source.kind().to_string(),
        }
    }
}
