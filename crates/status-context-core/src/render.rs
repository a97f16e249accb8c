// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Report rendering
//!
//! Turns a budgeted entry set plus branch/commit metadata into text lines.
//! Sections appear in a fixed order: preamble, current branch, main branch,
//! status (entries, warning block, filter summary), recent commits. The hard
//! line cap is applied last, to the whole sequence.

use serde::{Deserialize, Serialize};

use crate::budget::{Budget, BudgetOutcome, PatternCount, ReconciliationCounters};
use crate::entry::StatusEntry;
use crate::snapshot::GitSnapshot;

/// First line of every report
pub const PREAMBLE: &str = "gitStatus: This is the git status at the start of the conversation. \
     Note that this status is a snapshot in time, and will not update during the conversation.";

/// Rendered in place of entries when the working tree has no changes
pub const CLEAN_MESSAGE: &str = "Working directory clean";

/// Closes the warning block
pub const SUGGESTION: &str = "[Suggestion: These directories should not be tracked]";

/// Marks warning entries
const WARNING_PREFIX: &str = "  ! ";

/// Rendering switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Limits; `max_tracked` caps the warning block, `max_lines` is the hard cap
    pub budget: Budget,
    /// Emit one summary line per non-zero omission counter
    pub show_filter_summary: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            budget: Budget::default(),
            show_filter_summary: true,
        }
    }
}

/// Final, possibly truncated, report lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedReport {
    lines: Vec<String>,
    truncated: bool,
}

impl RenderedReport {
    /// Wrap composed lines, applying the hard cap when one is set
    #[must_use]
    pub fn new(lines: Vec<String>, max_lines: usize) -> Self {
        let (lines, truncated) = apply_hard_cap(lines, max_lines);
        Self { lines, truncated }
    }

    /// Report lines
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether the hard cap cut the report
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Lines joined with newlines
    #[must_use]
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

impl std::fmt::Display for RenderedReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Notice appended when the hard cap cuts the report
#[must_use]
pub fn truncation_notice(max_lines: usize) -> String {
    format!("[Hard limit reached: output truncated to {max_lines} lines]")
}

/// Cut `lines` to at most `max_lines` lines, the last being the notice
///
/// A `max_lines` of zero disables the cap.
#[must_use]
pub fn apply_hard_cap(mut lines: Vec<String>, max_lines: usize) -> (Vec<String>, bool) {
    if max_lines == 0 || lines.len() <= max_lines {
        return (lines, false);
    }
    lines.truncate(max_lines - 1);
    lines.push(truncation_notice(max_lines));
    (lines, true)
}

/// Placeholder body when entries were received but none produced a line
#[must_use]
pub fn unlisted_notice(total: usize) -> String {
    format!("[{total} changed files not listed]")
}

/// Status section body: entries, warning block and filter summary
///
/// Returns [`CLEAN_MESSAGE`] alone when no entries were received, and
/// [`unlisted_notice`] when entries exist but every one was hidden with the
/// filter summary switched off. The body is never empty.
#[must_use]
pub fn render_status_body(outcome: &BudgetOutcome, options: &ReportOptions) -> Vec<String> {
    if outcome.counters.total == 0 {
        return vec![CLEAN_MESSAGE.to_string()];
    }

    let mut lines: Vec<String> = outcome.shown.iter().map(StatusEntry::to_line).collect();
    if !outcome.warnings.is_empty() {
        lines.extend(render_warning_block(
            &outcome.warnings,
            options.budget.max_tracked,
        ));
    }
    if options.show_filter_summary {
        lines.extend(render_filter_summary(&outcome.counters));
    }
    if lines.is_empty() {
        lines.push(unlisted_notice(outcome.counters.total));
    }
    lines
}

/// Warning block for tracked files living under suppressed paths
///
/// Lists up to `cap` entries (zero is unlimited) and counts the rest.
#[must_use]
pub fn render_warning_block(warnings: &[StatusEntry], cap: usize) -> Vec<String> {
    let total = warnings.len();
    let listed = if cap == 0 { total } else { cap.min(total) };

    let mut lines = Vec::with_capacity(listed + 3);
    lines.push(format!("[WARNING: {total} tracked files in ignored paths]"));
    lines.extend(
        warnings[..listed]
            .iter()
            .map(|entry| format!("{WARNING_PREFIX}{}", entry.to_line())),
    );
    if total > listed {
        lines.push(format!("  ... and {} more", total - listed));
    }
    lines.push(SUGGESTION.to_string());
    lines
}

/// One line per non-zero omission counter
///
/// Tier-1 tracked entries are not summarised here; they have the warning
/// block.
#[must_use]
pub fn render_filter_summary(counters: &ReconciliationCounters) -> Vec<String> {
    let mut lines = Vec::new();
    if counters.tracked_over_cap > 0 {
        lines.push(format!(
            "... ({} more tracked files omitted)",
            counters.tracked_over_cap
        ));
    }
    if counters.untracked_over_cap > 0 {
        lines.push(format!(
            "... ({} more untracked files omitted)",
            counters.untracked_over_cap
        ));
    }
    if counters.tier2_omitted > 0 {
        lines.push(format!(
            "... ({} more support files omitted)",
            counters.tier2_omitted
        ));
    }
    if counters.untracked_excluded > 0 {
        lines.push(format!(
            "... ({} untracked files omitted)",
            counters.untracked_excluded
        ));
    }
    if counters.tier1_untracked > 0 {
        lines.push(format!(
            "[Filtered: {} untracked files in ignored paths]",
            counters.tier1_untracked
        ));
        if counters.filtered_by_pattern.len() > 1 {
            lines.push(render_pattern_breakdown(&counters.filtered_by_pattern));
        }
    }
    lines
}

fn render_pattern_breakdown(counts: &[PatternCount]) -> String {
    let mut sorted: Vec<&PatternCount> = counts.iter().collect();
    sorted.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.pattern.cmp(&b.pattern)));
    let parts: Vec<String> = sorted
        .iter()
        .map(|c| format!("{}: {}", c.pattern, c.count))
        .collect();
    format!("[Filtered by pattern: {}]", parts.join(", "))
}

/// Compose the full report
///
/// `status` is the budgeted status section, or `None` when status was not
/// collected. Returns `None` when no section has content.
#[must_use]
pub fn render_report(
    snapshot: &GitSnapshot,
    status: Option<&BudgetOutcome>,
    options: &ReportOptions,
) -> Option<RenderedReport> {
    let mut lines = vec![PREAMBLE.to_string()];

    if let Some(branch) = &snapshot.branch {
        lines.push(format!("Current branch: {branch}"));
    }

    if let Some(main_branch) = &snapshot.main_branch {
        lines.push(String::new());
        lines.push(format!(
            "Main branch (you will usually use this for PRs): {main_branch}"
        ));
    }

    if let Some(outcome) = status {
        lines.push(String::new());
        lines.push("Status:".to_string());
        lines.extend(render_status_body(outcome, options));
    }

    if !snapshot.commits.is_empty() {
        lines.push(String::new());
        lines.push("Recent commits:".to_string());
        lines.extend(snapshot.commits.iter().map(|c| c.to_line()));
    }

    if lines.len() == 1 {
        return None;
    }
    Some(RenderedReport::new(lines, options.budget.max_lines))
}
