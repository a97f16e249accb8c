// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Classify, budget and render in one pass
//!
//! [`StatusReporter`] is built once per invocation from a
//! [`ReporterConfig`]; pattern tiers are compiled at construction and never
//! change afterwards.

use serde::{Deserialize, Serialize};

use crate::budget::{Budget, BudgetOutcome, BudgetPolicy};
use crate::entry::StatusEntry;
use crate::pattern::{PatternSet, TierPatterns};
use crate::render::{self, RenderedReport, ReportOptions};
use crate::snapshot::GitSnapshot;
use crate::tier::TierClassifier;

/// Knobs that shape the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReporterConfig {
    /// Display limits
    pub budget: Budget,
    /// Whether untracked entries may be listed
    pub include_untracked: bool,
    /// Whether Tier-1/Tier-2 classification runs at all
    pub path_filtering: bool,
    /// Whether omission counters get summary lines
    pub show_filter_summary: bool,
    /// Extra Tier-1 patterns, added to the defaults
    pub tier1_patterns_extend: Vec<String>,
    /// Extra Tier-2 patterns, added to the defaults
    pub tier2_patterns_extend: Vec<String>,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            budget: Budget::default(),
            include_untracked: true,
            path_filtering: true,
            show_filter_summary: true,
            tier1_patterns_extend: Vec::new(),
            tier2_patterns_extend: Vec::new(),
        }
    }
}

/// The status pipeline: raw entries in, bounded report out
#[derive(Debug, Clone)]
pub struct StatusReporter {
    classifier: Option<TierClassifier>,
    policy: BudgetPolicy,
    options: ReportOptions,
}

impl StatusReporter {
    /// Build a reporter, compiling pattern tiers when filtering is enabled
    #[must_use]
    pub fn new(config: &ReporterConfig) -> Self {
        let classifier = config.path_filtering.then(|| {
            TierClassifier::new(TierPatterns::with_extensions(
                config.tier1_patterns_extend.as_slice(),
                config.tier2_patterns_extend.as_slice(),
            ))
        });
        Self {
            classifier,
            policy: BudgetPolicy::new(config.budget, config.include_untracked),
            options: ReportOptions {
                budget: config.budget,
                show_filter_summary: config.show_filter_summary,
            },
        }
    }

    /// Budget entries without rendering
    #[must_use]
    pub fn budget(&self, entries: &[StatusEntry]) -> BudgetOutcome {
        self.policy.apply(entries, self.classifier.as_ref())
    }

    /// Full report for a snapshot, or `None` when nothing is reportable
    #[must_use]
    pub fn report(&self, snapshot: &GitSnapshot) -> Option<RenderedReport> {
        let outcome = snapshot.status.as_deref().map(|entries| self.budget(entries));
        render::render_report(snapshot, outcome.as_ref(), &self.options)
    }

    /// Status section only (no preamble, branch or commits), hard cap applied
    #[must_use]
    pub fn render_status(&self, entries: &[StatusEntry]) -> RenderedReport {
        let outcome = self.budget(entries);
        RenderedReport::new(
            render::render_status_body(&outcome, &self.options),
            self.options.budget.max_lines,
        )
    }

    /// Patterns that failed to compile, across both tiers
    #[must_use]
    pub fn rejected_patterns(&self) -> Vec<String> {
        let Some(classifier) = &self.classifier else {
            return Vec::new();
        };
        let TierPatterns { tier1, tier2 } = classifier.patterns();
        [tier1, tier2]
            .into_iter()
            .flat_map(PatternSet::rejected)
            .map(ToString::to_string)
            .collect()
    }

    /// Whether path filtering is active
    #[must_use]
    pub fn is_filtering(&self) -> bool {
        self.classifier.is_some()
    }
}

impl Default for StatusReporter {
    fn default() -> Self {
        Self::new(&ReporterConfig::default())
    }
}
