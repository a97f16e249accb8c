// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Glob-style path patterns
//!
//! Patterns use `*` for any run of characters inside one path segment and
//! `**` for any run of segments. A trailing `/` (or `/**`) marks a directory
//! pattern, which matches the directory itself and everything beneath it.
//! A pattern whose body has no `/` floats and matches at any depth, the way
//! an ignore-file entry does; anything else is anchored at the repository
//! root.
//!
//! A pattern the glob compiler rejects, or one made only of wildcards,
//! matches nothing. It is reported through [`PatternSet::rejected`] and
//! logged.

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::warn;

use crate::error::PatternError;

/// Dependency, build and cache locations that are never listed one by one
pub const DEFAULT_TIER1_PATTERNS: &[&str] = &[
    "node_modules/**",
    ".venv/**",
    "venv/**",
    "__pycache__/**",
    "build/**",
    "dist/**",
    "target/**",
    ".next/**",
    ".nuxt/**",
    ".tox/**",
    ".mypy_cache/**",
    ".pytest_cache/**",
    ".gradle/**",
    "coverage/**",
    "*.egg-info/**",
    "*.pyc",
    "*.pyo",
    "*.class",
    ".DS_Store",
];

/// Support files shown in limited quantity
pub const DEFAULT_TIER2_PATTERNS: &[&str] = &[
    "*.lock",
    "package-lock.json",
    "pnpm-lock.yaml",
    "go.sum",
    ".vscode/**",
    ".idea/**",
    "*.log",
    "*.swp",
    "*.tmp",
];

/// An ordered, compiled set of path patterns
#[derive(Debug, Clone)]
pub struct PatternSet {
    /// Accepted patterns, in insertion order
    patterns: Vec<String>,
    /// Compiled globs; one pattern may expand to several globs
    set: GlobSet,
    /// Maps each compiled glob back to its index in `patterns`
    owners: Vec<usize>,
    /// Patterns that failed to compile
    rejected: Vec<PatternError>,
}

impl PatternSet {
    /// Compile a pattern set, dropping (and logging) patterns that fail
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut accepted = Vec::new();
        let mut owners = Vec::new();
        let mut rejected = Vec::new();
        let mut builder = GlobSetBuilder::new();

        for pattern in patterns {
            let pattern = pattern.as_ref();
            match compile_pattern(pattern) {
                Ok(globs) => {
                    let owner = accepted.len();
                    accepted.push(pattern.to_string());
                    for glob in globs {
                        builder.add(glob);
                        owners.push(owner);
                    }
                }
                Err(err) => {
                    warn!(pattern, error = %err, "Ignoring path pattern");
                    rejected.push(err);
                }
            }
        }

        let set = builder.build().unwrap_or_else(|err| {
            warn!(error = %err, "Failed to build pattern set; no paths will match");
            accepted.clear();
            owners.clear();
            GlobSet::empty()
        });

        Self {
            patterns: accepted,
            set,
            owners,
            rejected,
        }
    }

    /// A set that matches nothing
    #[must_use]
    pub fn empty() -> Self {
        Self::new(std::iter::empty::<&str>())
    }

    /// Test whether any pattern matches the path
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        !self.patterns.is_empty() && self.set.is_match(normalize_path(path))
    }

    /// The earliest pattern (in set order) matching the path
    #[must_use]
    pub fn first_match(&self, path: &str) -> Option<&str> {
        if self.patterns.is_empty() {
            return None;
        }
        self.set
            .matches(normalize_path(path))
            .into_iter()
            .map(|glob| self.owners[glob])
            .min()
            .map(|owner| self.patterns[owner].as_str())
    }

    /// Accepted patterns, in order
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Patterns that were rejected while compiling
    #[must_use]
    pub fn rejected(&self) -> &[PatternError] {
        &self.rejected
    }

    /// Number of accepted patterns
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether no pattern was accepted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::empty()
    }
}

/// The two pattern tiers used by the classifier
#[derive(Debug, Clone)]
pub struct TierPatterns {
    /// Suppressed paths
    pub tier1: PatternSet,
    /// Limited paths
    pub tier2: PatternSet,
}

impl TierPatterns {
    /// Built-in defaults only
    #[must_use]
    pub fn defaults() -> Self {
        Self::with_extensions::<&str>(&[], &[])
    }

    /// Built-in defaults unioned with user-supplied patterns
    #[must_use]
    pub fn with_extensions<S: AsRef<str>>(tier1_extra: &[S], tier2_extra: &[S]) -> Self {
        let tier1 = DEFAULT_TIER1_PATTERNS
            .iter()
            .copied()
            .chain(tier1_extra.iter().map(|p| p.as_ref()));
        let tier2 = DEFAULT_TIER2_PATTERNS
            .iter()
            .copied()
            .chain(tier2_extra.iter().map(|p| p.as_ref()));
        Self {
            tier1: PatternSet::new(tier1),
            tier2: PatternSet::new(tier2),
        }
    }
}

impl Default for TierPatterns {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Normalise a status path for matching
///
/// Converts backslashes, strips a leading `./` and a trailing `/` (git lists
/// collapsed untracked directories as `dir/`).
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let path = path.strip_prefix("./").unwrap_or(&path);
    path.trim_end_matches('/').to_string()
}

/// Expand one user pattern into the globs that implement it
fn compile_pattern(pattern: &str) -> Result<Vec<Glob>, PatternError> {
    let normalized = pattern.trim().replace('\\', "/");
    let mut body = normalized.strip_prefix("./").unwrap_or(&normalized);

    let rooted = body.starts_with('/');
    body = body.trim_start_matches('/');

    let mut directory = false;
    if let Some(stripped) = body.strip_suffix("/**") {
        body = stripped;
        directory = true;
    } else if body.ends_with('/') {
        directory = true;
    }
    body = body.trim_end_matches('/');

    if body.is_empty() {
        return Err(PatternError::Empty);
    }
    if body.chars().all(|c| c == '*' || c == '/') {
        return Err(PatternError::MatchesEverything {
            pattern: pattern.to_string(),
        });
    }

    let floating = !rooted && !body.contains('/') && !body.starts_with("**");
    let base = if floating {
        format!("**/{body}")
    } else {
        body.to_string()
    };

    let mut sources = vec![base.clone()];
    if directory {
        sources.push(format!("{base}/**"));
    }

    sources
        .iter()
        .map(|source| {
            GlobBuilder::new(source)
                .literal_separator(true)
                .build()
                .map_err(|err| PatternError::invalid(pattern, &err))
        })
        .collect()
}
