// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Entry budgeting
//!
//! Splits classified entries into the ones that are rendered and the ones
//! that are only counted. Every entry ends up either shown or in exactly one
//! counter, so `shown + omitted == total` always holds.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entry::StatusEntry;
use crate::tier::{Tier, TierClassifier};

/// Default cap on tracked Tier-3 entries
pub const DEFAULT_MAX_TRACKED: usize = 50;
/// Default cap on untracked Tier-3 entries
pub const DEFAULT_MAX_UNTRACKED: usize = 20;
/// Default cap on Tier-2 entries
pub const DEFAULT_TIER2_LIMIT: usize = 10;

/// Display limits. Zero means unlimited for every field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Tracked Tier-3 entries shown (also caps the warning block)
    pub max_tracked: usize,
    /// Untracked Tier-3 entries shown
    pub max_untracked: usize,
    /// Tier-2 entries shown
    pub tier2_limit: usize,
    /// Absolute cap on rendered report lines
    pub max_lines: usize,
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            max_tracked: DEFAULT_MAX_TRACKED,
            max_untracked: DEFAULT_MAX_UNTRACKED,
            tier2_limit: DEFAULT_TIER2_LIMIT,
            max_lines: 0,
        }
    }
}

impl Budget {
    /// No limits at all
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            max_tracked: 0,
            max_untracked: 0,
            tier2_limit: 0,
            max_lines: 0,
        }
    }

    /// Build a budget from possibly negative configuration values
    ///
    /// Negative values clamp to 0, which is "unlimited" for every field.
    #[must_use]
    pub fn from_signed(
        max_tracked: i64,
        max_untracked: i64,
        tier2_limit: i64,
        max_lines: Option<i64>,
    ) -> Self {
        Self {
            max_tracked: clamp_limit(max_tracked),
            max_untracked: clamp_limit(max_untracked),
            tier2_limit: clamp_limit(tier2_limit),
            max_lines: max_lines.map_or(0, clamp_limit),
        }
    }

    /// The hard line cap, if one is set
    #[must_use]
    pub fn hard_cap(&self) -> Option<usize> {
        (self.max_lines > 0).then_some(self.max_lines)
    }
}

/// Clamp a signed limit into the unsigned range (negative becomes 0)
#[must_use]
pub fn clamp_limit(value: i64) -> usize {
    usize::try_from(value.max(0)).unwrap_or(usize::MAX)
}

/// Whether another item fits under `limit` after `used` items
fn has_room(limit: usize, used: usize) -> bool {
    limit == 0 || used < limit
}

/// Number of suppressed untracked entries attributed to one Tier-1 pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternCount {
    /// The Tier-1 pattern as configured
    pub pattern: String,
    /// Entries it suppressed
    pub count: usize,
}

/// Per-category counts of entries that were not rendered as status lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationCounters {
    /// Entries received
    pub total: usize,
    /// Tracked entries under Tier-1 paths (surfaced as warnings)
    pub tier1_tracked: usize,
    /// Untracked entries under Tier-1 paths
    pub tier1_untracked: usize,
    /// Tier-2 entries beyond the Tier-2 limit
    pub tier2_omitted: usize,
    /// Tracked Tier-3 entries beyond the tracked cap
    pub tracked_over_cap: usize,
    /// Untracked Tier-3 entries beyond the untracked cap
    pub untracked_over_cap: usize,
    /// Untracked entries hidden because untracked files are excluded
    pub untracked_excluded: usize,
    /// Breakdown of `tier1_untracked` by pattern, in first-seen order
    pub filtered_by_pattern: Vec<PatternCount>,
}

impl ReconciliationCounters {
    /// Sum of all omission counters
    #[must_use]
    pub fn omitted(&self) -> usize {
        self.tier1_tracked
            + self.tier1_untracked
            + self.tier2_omitted
            + self.tracked_over_cap
            + self.untracked_over_cap
            + self.untracked_excluded
    }

    fn record_filtered(&mut self, pattern: Option<&str>) {
        self.tier1_untracked += 1;
        let Some(pattern) = pattern else {
            return;
        };
        match self
            .filtered_by_pattern
            .iter_mut()
            .find(|entry| entry.pattern == pattern)
        {
            Some(entry) => entry.count += 1,
            None => self.filtered_by_pattern.push(PatternCount {
                pattern: pattern.to_string(),
                count: 1,
            }),
        }
    }
}

/// Result of budgeting one entry list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetOutcome {
    /// Entries rendered as status lines, in received order
    pub shown: Vec<StatusEntry>,
    /// Tracked entries under Tier-1 paths, in received order
    pub warnings: Vec<StatusEntry>,
    /// Omission counters
    pub counters: ReconciliationCounters,
}

impl BudgetOutcome {
    /// Whether every received entry is shown or counted exactly once
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.shown.len() + self.counters.omitted() == self.counters.total
            && self.warnings.len() == self.counters.tier1_tracked
    }
}

/// Applies a [`Budget`] to a classified entry stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetPolicy {
    /// Display limits
    pub budget: Budget,
    /// Whether untracked entries may be shown at all
    pub include_untracked: bool,
}

impl Default for BudgetPolicy {
    fn default() -> Self {
        Self {
            budget: Budget::default(),
            include_untracked: true,
        }
    }
}

impl BudgetPolicy {
    /// Create a policy
    #[must_use]
    pub fn new(budget: Budget, include_untracked: bool) -> Self {
        Self {
            budget,
            include_untracked,
        }
    }

    /// Budget the entries
    ///
    /// With no classifier (path filtering disabled) every entry is Tier 3 and
    /// only the tracked/untracked caps apply.
    #[must_use]
    pub fn apply(
        &self,
        entries: &[StatusEntry],
        classifier: Option<&TierClassifier>,
    ) -> BudgetOutcome {
        let budget = &self.budget;
        let mut outcome = BudgetOutcome::default();
        outcome.counters.total = entries.len();

        let mut tier2_shown = 0usize;
        let mut tracked_shown = 0usize;
        let mut untracked_shown = 0usize;

        for entry in entries {
            let tier = classifier.map_or(Tier::Show, |c| c.classify(entry));
            let counters = &mut outcome.counters;

            match (tier, entry.tracked) {
                (Tier::Suppress, true) => {
                    counters.tier1_tracked += 1;
                    outcome.warnings.push(entry.clone());
                }
                (Tier::Suppress, false) => {
                    let pattern = classifier.and_then(|c| c.suppressing_pattern(&entry.path));
                    counters.record_filtered(pattern);
                }
                (_, false) if !self.include_untracked => {
                    counters.untracked_excluded += 1;
                }
                (Tier::Limit, _) => {
                    if has_room(budget.tier2_limit, tier2_shown) {
                        tier2_shown += 1;
                        outcome.shown.push(entry.clone());
                    } else {
                        counters.tier2_omitted += 1;
                    }
                }
                (Tier::Show, true) => {
                    if has_room(budget.max_tracked, tracked_shown) {
                        tracked_shown += 1;
                        outcome.shown.push(entry.clone());
                    } else {
                        counters.tracked_over_cap += 1;
                    }
                }
                (Tier::Show, false) => {
                    if has_room(budget.max_untracked, untracked_shown) {
                        untracked_shown += 1;
                        outcome.shown.push(entry.clone());
                    } else {
                        counters.untracked_over_cap += 1;
                    }
                }
            }
        }

        debug!(
            total = outcome.counters.total,
            shown = outcome.shown.len(),
            warnings = outcome.warnings.len(),
            omitted = outcome.counters.omitted(),
            "Budgeted status entries"
        );
        outcome
    }
}
