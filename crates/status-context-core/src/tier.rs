// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Tier classification of status entries

use serde::{Deserialize, Serialize};

use crate::entry::StatusEntry;
use crate::pattern::{PatternSet, TierPatterns};

/// Display tier of a status entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Never listed individually (dependencies, build output, caches)
    Suppress,
    /// Listed up to a small limit (lockfiles, editor config, logs)
    Limit,
    /// Always listed, subject to the tracked/untracked caps
    Show,
}

/// Classify a path against the two pattern tiers
///
/// Tier 1 is checked first, so a path matching both tiers is suppressed.
/// Tracked state plays no part in classification.
#[must_use]
pub fn classify(path: &str, tier1: &PatternSet, tier2: &PatternSet) -> Tier {
    if tier1.matches(path) {
        Tier::Suppress
    } else if tier2.matches(path) {
        Tier::Limit
    } else {
        Tier::Show
    }
}

/// Classifier holding the pattern tiers built once per invocation
#[derive(Debug, Clone, Default)]
pub struct TierClassifier {
    patterns: TierPatterns,
}

impl TierClassifier {
    /// Create a classifier over the given pattern tiers
    #[must_use]
    pub fn new(patterns: TierPatterns) -> Self {
        Self { patterns }
    }

    /// Classify one entry by its (destination) path
    #[must_use]
    pub fn classify(&self, entry: &StatusEntry) -> Tier {
        classify(&entry.path, &self.patterns.tier1, &self.patterns.tier2)
    }

    /// The Tier-1 pattern responsible for suppressing a path, if any
    #[must_use]
    pub fn suppressing_pattern(&self, path: &str) -> Option<&str> {
        self.patterns.tier1.first_match(path)
    }

    /// The pattern tiers
    #[must_use]
    pub fn patterns(&self) -> &TierPatterns {
        &self.patterns
    }
}
